//! Configuration types for system-dl

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for [`crate::SystemDownloader`]
///
/// Only destination layout is configurable; everything else about a download
/// is decided per submission via [`crate::types::DownloadOptions`]. All
/// fields have serde defaults, so a config deserialized from `{}` matches
/// `Config::default()`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Base directory for public (shared) downloads (default: "./downloads")
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    /// Base directory for application-private downloads (default: "./data")
    #[serde(default = "default_private_dir")]
    pub private_dir: PathBuf,

    /// Sub-directory used when a submission names none (default: "Downloads")
    #[serde(default = "default_sub_dir")]
    pub default_sub_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            public_dir: default_public_dir(),
            private_dir: default_private_dir(),
            default_sub_dir: default_sub_dir(),
        }
    }
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("./downloads")
}

fn default_private_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_sub_dir() -> String {
    "Downloads".to_string()
}
