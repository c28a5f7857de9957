//! Shutdown coordination.

use std::sync::atomic::Ordering;

use super::SystemDownloader;

impl SystemDownloader {
    /// Shut the downloader down
    ///
    /// Stops accepting new submissions (further [`download`](Self::download)
    /// calls fail with [`crate::Error::ShuttingDown`]), cancels every
    /// outstanding download via the cancel-all path so no caller is left
    /// awaiting an unresolved handle, then stops and joins the completion
    /// listener. Idempotent: only the first call does any work.
    pub async fn shutdown(&self) {
        if !self.accepting_new.swap(false, Ordering::SeqCst) {
            // Another call already shut us down
            return;
        }

        tracing::info!("shutting down, cancelling outstanding downloads");
        self.cancel_all();

        self.listener_cancel.cancel();
        let task = self.listener_task.lock().await.take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "completion listener task failed during shutdown");
            }
        }

        tracing::info!("downloader shut down");
    }
}
