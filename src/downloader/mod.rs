//! Core downloader facade split into focused submodules.
//!
//! The `SystemDownloader` struct and its methods are organized by domain:
//! - [`submit`] - Submission variants and registration
//! - [`control`] - Cancel-all and queued-URL queries
//! - [`listener`] - Completion notice handling
//! - [`lifecycle`] - Shutdown coordination

mod control;
mod lifecycle;
mod listener;
mod submit;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crate::config::Config;
use crate::engine::{CompletionReceiver, DownloadEngine};
use crate::registry::Registry;
use crate::types::Event;

/// Main downloader instance (cloneable - all fields are Arc-wrapped)
///
/// A thin facade over an OS download service: submissions hand a request to
/// the engine and register the assigned identifier; a background listener
/// resolves each download's completion handle when the engine's broadcast
/// says it reached a terminal state. The registry lives exactly as long as
/// this facade; there is no process-wide state.
#[derive(Clone)]
pub struct SystemDownloader {
    /// Download engine this instance submits to
    pub(crate) engine: Arc<dyn DownloadEngine>,
    /// Tracked downloads: id → completion resolver, id → source URL
    pub(crate) registry: Arc<Registry>,
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: Arc<Config>,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: tokio::sync::broadcast::Sender<Event>,
    /// Flag to indicate whether new downloads are accepted (cleared during shutdown)
    pub(crate) accepting_new: Arc<AtomicBool>,
    /// Cancels the completion listener task
    pub(crate) listener_cancel: tokio_util::sync::CancellationToken,
    /// Join handle for the completion listener, taken once by shutdown
    pub(crate) listener_task: Arc<tokio::sync::Mutex<Option<tokio::task::JoinHandle<()>>>>,
}

impl SystemDownloader {
    /// Create a new SystemDownloader instance
    ///
    /// Spawns the completion listener subscribed to `completions`, the
    /// engine's terminal-state broadcast; the listener runs until
    /// [`shutdown`](Self::shutdown) or until that channel closes. Must be
    /// called from within a tokio runtime.
    pub fn new(config: Config, engine: Arc<dyn DownloadEngine>, completions: CompletionReceiver) -> Self {
        // Event buffer sized generously; subscribers that fall further
        // behind observe RecvError::Lagged, not missed registry state
        let (event_tx, _rx) = tokio::sync::broadcast::channel(256);

        let registry = Arc::new(Registry::new());
        let listener_cancel = tokio_util::sync::CancellationToken::new();

        let task = listener::spawn(
            engine.clone(),
            registry.clone(),
            event_tx.clone(),
            completions,
            listener_cancel.clone(),
        );

        tracing::debug!("system downloader initialized");

        Self {
            engine,
            registry,
            config: Arc::new(config),
            event_tx,
            accepting_new: Arc::new(AtomicBool::new(true)),
            listener_cancel,
            listener_task: Arc::new(tokio::sync::Mutex::new(Some(task))),
        }
    }

    /// Subscribe to download lifecycle events
    ///
    /// Multiple subscribers are supported; each receives all events
    /// independently. This bus is observability only; the authoritative
    /// per-download outcome is the [`crate::handle::DownloadHandle`]
    /// returned at submission.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Get the current configuration
    pub fn get_config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    /// Emit an event to all subscribers
    ///
    /// If there are no active subscribers the event is silently dropped;
    /// downloads proceed whether or not anyone is listening.
    pub(crate) fn emit_event(&self, event: Event) {
        self.event_tx.send(event).ok();
    }
}
