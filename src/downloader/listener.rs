//! Completion notice handling.
//!
//! One background task per facade consumes the engine's terminal-state
//! broadcast and routes each notice back to the caller-held handle it
//! belongs to. All registry mutations triggered by completions happen on
//! this task, never on the submitting caller's task.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::engine::{CompletionReceiver, DownloadEngine};
use crate::error::DownloadError;
use crate::handle::DownloadOutcome;
use crate::registry::Registry;
use crate::types::{DownloadId, DownloadStatus, Event};

/// Spawn the completion listener task
///
/// Runs until `cancel` fires or the notice channel closes. Lagging behind
/// the broadcast is logged and skipped; any download whose notice was missed
/// stays registered until cancel-all or shutdown resolves it.
pub(crate) fn spawn(
    engine: Arc<dyn DownloadEngine>,
    registry: Arc<Registry>,
    event_tx: broadcast::Sender<Event>,
    mut completions: CompletionReceiver,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("completion listener stopping");
                    break;
                }
                notice = completions.recv() => match notice {
                    Ok(id) => handle_completion(engine.as_ref(), &registry, &event_tx, id),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "completion listener lagged behind notification channel");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::debug!("notification channel closed, completion listener stopping");
                        break;
                    }
                },
            }
        }
    })
}

/// Process one completion notice
///
/// Notices for untracked identifiers are ignored, expected for downloads
/// this instance did not submit or already resolved. For tracked ones the
/// engine's record decides the outcome; every path removes the registry
/// entry and resolves the handle exactly once, which `Registry::remove`
/// enforces structurally.
pub(crate) fn handle_completion(
    engine: &dyn DownloadEngine,
    registry: &Registry,
    event_tx: &broadcast::Sender<Event>,
    id: DownloadId,
) {
    if !registry.contains(id) {
        tracing::trace!(download_id = id.get(), "ignoring completion notice for untracked download");
        return;
    }

    let outcome: DownloadOutcome = match engine.query(id) {
        None => {
            // Notified but no record: local state inconsistency
            engine.discard(&[id]);
            Err(DownloadError::RecordMissing { id })
        }
        Some(record) if record.status != DownloadStatus::Successful => {
            engine.discard(&[id]);
            Err(DownloadError::Failed {
                id,
                status: record.status,
            })
        }
        Some(record) => match record.local_path {
            Some(path) => Ok(path),
            None => {
                // Successful record without a location: same inconsistency
                engine.discard(&[id]);
                Err(DownloadError::RecordMissing { id })
            }
        },
    };

    let Some(resolver) = registry.remove(id) else {
        // Resolved concurrently between the contains check and here
        return;
    };

    match &outcome {
        Ok(path) => {
            tracing::info!(download_id = id.get(), path = %path, "download completed");
            event_tx
                .send(Event::Completed {
                    id,
                    path: path.clone(),
                })
                .ok();
        }
        Err(error) => {
            tracing::warn!(download_id = id.get(), error = %error, "download failed");
            event_tx
                .send(Event::Failed {
                    id,
                    error: error.clone(),
                })
                .ok();
        }
    }

    resolver.resolve(outcome);
}
