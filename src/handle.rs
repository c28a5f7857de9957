//! One-shot completion handles
//!
//! A [`DownloadHandle`] is the subscriber side of a download's completion
//! channel: it delivers exactly one [`DownloadOutcome`] (the local file
//! location on success or a [`DownloadError`]) to every current and future
//! subscriber, then nothing more. Cloning a handle creates an independent
//! subscriber; a clone taken after resolution still observes the outcome.
//!
//! Built on `tokio::sync::watch`, which retains the last value: that is what
//! gives late subscribers replay without any buffering of our own.

use tokio::sync::watch;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::WatchStream;

use crate::error::DownloadError;
use crate::types::DownloadId;

/// Terminal outcome of a download: local file location or a terminal error
pub type DownloadOutcome = std::result::Result<String, DownloadError>;

/// Create the completion channel for a freshly registered download
pub(crate) fn completion_channel(id: DownloadId) -> (Resolver, DownloadHandle) {
    let (tx, rx) = watch::channel(None);
    (Resolver { id, tx }, DownloadHandle { id, rx })
}

/// Producer side of a completion channel
///
/// Held only by the registry; obtained back via `Registry::remove`, which is
/// what makes resolution structurally exactly-once. Dropping a resolver
/// without resolving closes the channel and waiting subscribers observe
/// [`DownloadError::Abandoned`].
#[derive(Debug)]
pub(crate) struct Resolver {
    id: DownloadId,
    tx: watch::Sender<Option<DownloadOutcome>>,
}

impl Resolver {
    pub(crate) fn id(&self) -> DownloadId {
        self.id
    }

    /// Deliver the terminal outcome to all current and future subscribers
    ///
    /// Consumes the resolver; a send with no live subscriber is fine, the
    /// value is retained for clones taken later.
    pub(crate) fn resolve(self, outcome: DownloadOutcome) {
        self.tx.send(Some(outcome)).ok();
    }

    /// New subscriber handle for this download
    pub(crate) fn subscribe(&self) -> DownloadHandle {
        DownloadHandle {
            id: self.id,
            rx: self.tx.subscribe(),
        }
    }
}

/// Subscriber handle for one download's terminal outcome
///
/// Returned by the submission methods on [`crate::SystemDownloader`].
#[derive(Clone, Debug)]
pub struct DownloadHandle {
    id: DownloadId,
    rx: watch::Receiver<Option<DownloadOutcome>>,
}

impl DownloadHandle {
    /// The engine-assigned identifier this handle is subscribed to
    pub fn id(&self) -> DownloadId {
        self.id
    }

    /// Wait for the download's terminal outcome
    ///
    /// Resolves immediately if the outcome was already delivered. If the
    /// downloader disappears without resolving (dropped with no shutdown),
    /// this returns [`DownloadError::Abandoned`] instead of hanging.
    pub async fn wait(&mut self) -> DownloadOutcome {
        match self.rx.wait_for(|outcome| outcome.is_some()).await {
            Ok(resolved) => match resolved.as_ref() {
                Some(outcome) => outcome.clone(),
                // wait_for guarantees Some; unreachable in practice
                None => Err(DownloadError::Abandoned { id: self.id }),
            },
            Err(_) => Err(DownloadError::Abandoned { id: self.id }),
        }
    }

    /// Non-blocking check for the outcome
    ///
    /// `None` while the download is still in flight.
    pub fn try_outcome(&self) -> Option<DownloadOutcome> {
        self.rx.borrow().clone()
    }

    /// View this handle as a stream yielding the single terminal outcome
    ///
    /// The stream produces one item and then ends. If the resolver side is
    /// dropped without resolving, the stream ends without an item.
    pub fn into_stream(self) -> impl futures::Stream<Item = DownloadOutcome> {
        WatchStream::new(self.rx).filter_map(|outcome| outcome)
    }
}
