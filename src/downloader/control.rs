//! Cancel-all and queued-download queries.

use crate::error::DownloadError;
use crate::handle::DownloadHandle;
use crate::types::{DownloadId, Event};

use super::SystemDownloader;

impl SystemDownloader {
    /// Whether a download for `url` is currently tracked
    ///
    /// True from the moment a submission for that URL returns until its
    /// terminal notice is processed (or it is cancelled). Comparison is
    /// against the exact URL string the caller submitted.
    pub fn is_queued(&self, url: &str) -> bool {
        self.registry.contains_url(url)
    }

    /// Source URLs of all currently tracked downloads
    pub fn queued_urls(&self) -> Vec<String> {
        self.registry.urls()
    }

    /// Number of currently tracked downloads
    pub fn queued_count(&self) -> usize {
        self.registry.len()
    }

    /// Fresh subscriber handle for a download this instance still tracks
    ///
    /// `None` once the download has resolved, been cancelled, or was never
    /// submitted through this instance.
    pub fn lookup(&self, id: DownloadId) -> Option<DownloadHandle> {
        self.registry.lookup(id)
    }

    /// Cancel every tracked download
    ///
    /// Drains the registry in one step, instructs the engine to discard each
    /// drained identifier (one discard call carrying all of them; none when
    /// nothing was tracked), and resolves every drained handle with
    /// [`DownloadError::Cancelled`] so awaiting callers never hang.
    pub fn cancel_all(&self) {
        let drained = self.registry.drain();
        if drained.is_empty() {
            return;
        }

        let ids: Vec<DownloadId> = drained.iter().map(|resolver| resolver.id()).collect();
        self.engine.discard(&ids);

        for resolver in drained {
            let id = resolver.id();
            resolver.resolve(Err(DownloadError::Cancelled { id }));
            self.emit_event(Event::Cancelled { id });
        }

        tracing::info!(count = ids.len(), "cancelled all tracked downloads");
    }
}
