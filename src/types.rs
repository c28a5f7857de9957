//! Core types for system-dl

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::DownloadError;

/// Unique identifier for a download
///
/// Assigned by the download engine when a request is enqueued. The value is
/// opaque to this library: it is stored as a registry key and handed back to
/// the engine for queries and discards, never interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DownloadId(pub i64);

impl DownloadId {
    /// Create a new DownloadId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for DownloadId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<DownloadId> for i64 {
    fn from(id: DownloadId) -> Self {
        id.0
    }
}

impl PartialEq<i64> for DownloadId {
    fn eq(&self, other: &i64) -> bool {
        self.0 == *other
    }
}

impl PartialEq<DownloadId> for i64 {
    fn eq(&self, other: &DownloadId) -> bool {
        *self == other.0
    }
}

impl std::fmt::Display for DownloadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DownloadId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Download status as reported by the engine's record for an identifier
///
/// Only `Successful` counts as success; any other status observed at the
/// completion check is treated as a terminal failure of that download.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    /// Accepted by the engine, transfer not started
    Pending,
    /// Transfer in progress
    Running,
    /// Paused by the engine (connectivity loss, user action)
    Paused,
    /// Transfer finished and the file is in place
    Successful,
    /// Transfer failed
    Failed,
}

impl DownloadStatus {
    /// Convert an engine status code to a DownloadStatus
    pub fn from_i32(status: i32) -> Self {
        match status {
            0 => DownloadStatus::Pending,
            1 => DownloadStatus::Running,
            2 => DownloadStatus::Paused,
            3 => DownloadStatus::Successful,
            4 => DownloadStatus::Failed,
            _ => DownloadStatus::Failed, // Default to Failed for unknown status
        }
    }

    /// Convert a DownloadStatus to its engine status code
    pub fn to_i32(&self) -> i32 {
        match self {
            DownloadStatus::Pending => 0,
            DownloadStatus::Running => 1,
            DownloadStatus::Paused => 2,
            DownloadStatus::Successful => 3,
            DownloadStatus::Failed => 4,
        }
    }
}

/// Where a downloaded file is placed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationKind {
    /// Shared public downloads area, visible to other applications
    #[default]
    Public,
    /// Application-private files area
    Private,
}

/// System notification behavior for a download
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVisibility {
    /// Notification shown while the download runs
    Visible,
    /// Notification shown while running and kept after completion
    #[default]
    VisibleNotifyCompleted,
}

/// Terminal record the engine holds for a finished download
///
/// Queried by the completion listener when a notice arrives. `local_path` is
/// only expected to be populated when `status` is `Successful`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRecord {
    /// Terminal status observed at the completion check
    pub status: DownloadStatus,
    /// Where the engine placed the file, when it succeeded
    pub local_path: Option<String>,
}

/// Fully assembled download request descriptor
///
/// Built by the request builder and consumed by
/// [`crate::engine::DownloadEngine::enqueue`]. Immutable once built; the
/// destination folder already exists and holds no stale file of the same
/// name by the time a descriptor is handed to the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRequest {
    /// Source URL, exactly as supplied by the caller
    pub url: String,
    /// Display title (also used as the description), taken from the filename
    pub title: String,
    /// MIME type hint for the engine
    pub mime_type: String,
    /// Destination area the target path lives in
    pub destination: DestinationKind,
    /// Sub-directory below the destination base
    pub sub_dir: String,
    /// Absolute path the file will be written to
    pub target_path: PathBuf,
    /// System notification behavior
    pub visibility: NotificationVisibility,
}

/// Caller-supplied knobs for a submission, with sensible defaults
///
/// `None` fields fall back at build time: MIME type to
/// [`crate::request::DEFAULT_MIME_TYPE`], sub-directory to the configured
/// default downloads sub-directory.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadOptions {
    /// MIME type hint (default: wildcard)
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Sub-directory below the destination base (default: from config)
    #[serde(default)]
    pub sub_dir: Option<String>,
    /// Destination area (default: public)
    #[serde(default)]
    pub destination: DestinationKind,
    /// Keep the system notification after completion (default: true)
    #[serde(default = "default_notify")]
    pub notify_on_complete: bool,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            mime_type: None,
            sub_dir: None,
            destination: DestinationKind::default(),
            notify_on_complete: default_notify(),
        }
    }
}

fn default_notify() -> bool {
    true
}

/// Event emitted during download lifecycle
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Download accepted by the engine and registered
    Queued {
        /// Download ID
        id: DownloadId,
        /// Source URL
        url: String,
    },

    /// Download finished and the local file is in place
    Completed {
        /// Download ID
        id: DownloadId,
        /// Local file location reported by the engine
        path: String,
    },

    /// Download reached a terminal failure
    Failed {
        /// Download ID
        id: DownloadId,
        /// Terminal error delivered on the download's handle
        error: DownloadError,
    },

    /// Download was cancelled before any terminal notice arrived
    Cancelled {
        /// Download ID
        id: DownloadId,
    },
}
