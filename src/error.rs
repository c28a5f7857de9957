//! Error types for system-dl
//!
//! Two layers, mirroring where failures surface:
//! - [`Error`]: synchronous failures raised on the submission path, before
//!   any engine resource is consumed (bad URL, destination preparation,
//!   engine rejection, shutdown gate).
//! - [`DownloadError`]: the single terminal error a download's handle can
//!   deliver. It is `Clone` so every subscriber of a handle receives it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{DownloadId, DownloadStatus};

/// Result type alias for system-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for system-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "public_dir")
        key: Option<String>,
    },

    /// I/O error (destination folder creation, stale file removal)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source URL could not be parsed
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL string that failed to parse
        url: String,
        /// Parser diagnostic
        reason: String,
    },

    /// Download engine rejected an operation
    #[error("engine error: {0}")]
    Engine(String),

    /// Terminal download error (also delivered through the download's handle)
    #[error("download error: {0}")]
    Download(#[from] DownloadError),

    /// Shutdown in progress - not accepting new downloads
    #[error("shutdown in progress: not accepting new downloads")]
    ShuttingDown,
}

/// Terminal error delivered through a download's handle
///
/// Exactly one of these (or a success value) reaches every subscriber of a
/// [`crate::handle::DownloadHandle`]. None of them are retried by this
/// library; resubmitting is the caller's decision.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DownloadError {
    /// Engine reported a non-success terminal status
    #[error("download {id} failed with status {status:?}")]
    Failed {
        /// The download that failed
        id: DownloadId,
        /// Status observed at the completion check
        status: DownloadStatus,
    },

    /// Completion was notified but the engine holds no record for the id
    #[error("no engine record for download {id}")]
    RecordMissing {
        /// The download the engine lost track of
        id: DownloadId,
    },

    /// Download was cancelled before it finished
    #[error("download {id} was cancelled")]
    Cancelled {
        /// The cancelled download
        id: DownloadId,
    },

    /// The downloader went away before the download finished
    #[error("download {id} was abandoned before completing")]
    Abandoned {
        /// The abandoned download
        id: DownloadId,
    },
}
