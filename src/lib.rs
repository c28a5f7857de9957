//! # system-dl
//!
//! Reactive client library for OS-managed download services.
//!
//! The operating system's download engine does the actual transferring;
//! this crate turns its callback/broadcast notification model into a
//! subscribable, push-based one. Submitting a download returns a
//! [`DownloadHandle`] that delivers exactly one terminal outcome (the
//! local file location on success, a [`DownloadError`] otherwise) to every
//! current and future subscriber.
//!
//! ## Design Philosophy
//!
//! - **Thin adapter** - no protocol implementation, no scheduling, no
//!   retries; the engine owns the transfer
//! - **Library-first** - no CLI or UI, purely a Rust crate for embedding
//! - **Event-driven** - consumers await handles or subscribe to events,
//!   no polling required
//! - **Single-owner state** - the download registry lives and dies with
//!   its [`SystemDownloader`], never as a process-wide global
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use system_dl::{
//!     Config, DownloadEngine, DownloadId, DownloadRecord, DownloadRequest, SystemDownloader,
//! };
//!
//! // Bridge to the platform's download service
//! struct OsEngine;
//!
//! impl DownloadEngine for OsEngine {
//!     fn enqueue(&self, _request: &DownloadRequest) -> system_dl::Result<DownloadId> {
//!         # // a real bridge hands the request to the OS here
//!         Ok(DownloadId::new(1))
//!     }
//!     fn query(&self, _id: DownloadId) -> Option<DownloadRecord> {
//!         None
//!     }
//!     fn discard(&self, _ids: &[DownloadId]) {}
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // The engine side owns the sender and fires it on terminal states
//!     let (_notice_tx, notices) = tokio::sync::broadcast::channel(64);
//!
//!     let downloader = SystemDownloader::new(Config::default(), Arc::new(OsEngine), notices);
//!
//!     let mut handle = downloader
//!         .download_to_public("https://example.com/file.bin", "file.bin", true)
//!         .await?;
//!     let local_path = handle.wait().await?;
//!     println!("downloaded to {local_path}");
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Core downloader facade (decomposed into focused submodules)
pub mod downloader;
/// Download engine seam
pub mod engine;
/// Error types
pub mod error;
/// One-shot completion handles
pub mod handle;
/// Destination path resolution
pub mod paths;
pub(crate) mod registry;
/// Request descriptor assembly
pub mod request;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use downloader::SystemDownloader;
pub use engine::{CompletionReceiver, DownloadEngine};
pub use error::{DownloadError, Error, Result};
pub use handle::{DownloadHandle, DownloadOutcome};
pub use request::DEFAULT_MIME_TYPE;
pub use types::{
    DestinationKind, DownloadId, DownloadOptions, DownloadRecord, DownloadRequest, DownloadStatus,
    Event, NotificationVisibility,
};

/// Helper function to run the downloader with graceful signal handling.
///
/// Waits for a termination signal and then calls the downloader's
/// `shutdown()` method, which cancels outstanding downloads so no caller is
/// left awaiting an unresolved handle.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// # Example
///
/// ```no_run
/// use system_dl::{Config, SystemDownloader, run_with_shutdown};
/// # use std::sync::Arc;
/// # use system_dl::{DownloadEngine, DownloadId, DownloadRecord, DownloadRequest};
/// # struct OsEngine;
/// # impl DownloadEngine for OsEngine {
/// #     fn enqueue(&self, _r: &DownloadRequest) -> system_dl::Result<DownloadId> { Ok(DownloadId::new(1)) }
/// #     fn query(&self, _id: DownloadId) -> Option<DownloadRecord> { None }
/// #     fn discard(&self, _ids: &[DownloadId]) {}
/// # }
///
/// #[tokio::main]
/// async fn main() {
///     let (_notice_tx, notices) = tokio::sync::broadcast::channel(64);
///     let downloader = SystemDownloader::new(Config::default(), Arc::new(OsEngine), notices);
///
///     // Run with automatic signal handling
///     run_with_shutdown(downloader).await;
/// }
/// ```
pub async fn run_with_shutdown(downloader: SystemDownloader) {
    wait_for_signal().await;
    downloader.shutdown().await;
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Signal registration may fail in restricted environments (containers, tests)
    match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Ok(mut sigterm), Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            sigterm.recv().await;
        }
        (Err(e), Ok(mut sigint)) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            sigint.recv().await;
        }
        (Err(_), Err(_)) => {
            tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
            tokio::signal::ctrl_c().await.ok();
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
