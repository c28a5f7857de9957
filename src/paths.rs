//! Destination path resolution
//!
//! The one filesystem concern this library owns: making sure the folder a
//! download lands in exists, and that no stale file of the same name is
//! sitting there when the engine starts writing. Both failures are fatal to
//! the submission and surface before the engine sees the request.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Prepare the destination for a download and return the target file path
///
/// Creates `folder` (recursively) if it does not exist and deletes any
/// pre-existing file named `filename` inside it. The returned path is where
/// the engine is expected to place the finished file.
pub async fn prepare_destination(folder: &Path, filename: &str) -> Result<PathBuf> {
    tokio::fs::create_dir_all(folder).await.map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!(
                "Failed to create destination directory '{}': {}",
                folder.display(),
                e
            ),
        ))
    })?;

    let target = folder.join(filename);
    let stale = tokio::fs::try_exists(&target).await.map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to stat '{}': {}", target.display(), e),
        ))
    })?;
    if stale {
        tokio::fs::remove_file(&target).await.map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to delete stale file '{}': {}", target.display(), e),
            ))
        })?;
    }

    Ok(target)
}
