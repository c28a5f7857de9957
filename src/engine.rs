//! Download engine seam
//!
//! The OS download service is an external collaborator: it performs the
//! actual transfers, assigns identifiers, and broadcasts completion notices.
//! This library only talks to it through [`DownloadEngine`], held as a trait
//! object so platform bridges and test doubles plug in interchangeably.

use tokio::sync::broadcast;

use crate::error::Result;
use crate::types::{DownloadId, DownloadRecord, DownloadRequest};

/// Receiver half of the engine's completion broadcast
///
/// Carries a notice for every download that reaches a terminal state,
/// including downloads this process never submitted. The completion listener
/// consumes one of these for the facade's lifetime.
pub type CompletionReceiver = broadcast::Receiver<DownloadId>;

/// Handle to the OS download service
///
/// All three operations are fast, non-suspending calls: the engine either
/// answers from its own bookkeeping or rejects immediately. The submitting
/// task absorbs whatever latency the platform call has; no background thread
/// pool is introduced on this side of the seam.
pub trait DownloadEngine: Send + Sync {
    /// Hand a request to the engine, receiving the identifier it assigned
    fn enqueue(&self, request: &DownloadRequest) -> Result<DownloadId>;

    /// The engine's terminal record for `id`, or `None` if it holds none
    fn query(&self, id: DownloadId) -> Option<DownloadRecord>;

    /// Tell the engine to abandon the given downloads and release their
    /// resources. Unknown identifiers are ignored.
    fn discard(&self, ids: &[DownloadId]);
}
