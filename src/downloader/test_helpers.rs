//! Shared test helpers for creating SystemDownloader instances in tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use tempfile::tempdir;
use tokio::sync::broadcast;

use crate::config::Config;
use crate::downloader::SystemDownloader;
use crate::engine::DownloadEngine;
use crate::error::{Error, Result};
use crate::types::{DownloadId, DownloadRecord, DownloadRequest, DownloadStatus};

/// Scriptable in-memory stand-in for the OS download engine.
///
/// Records every `enqueue` and `discard` call so tests can assert exactly
/// what the engine was told; `query` answers from a map the test populates.
pub(crate) struct MockEngine {
    next_id: AtomicI64,
    reject_enqueue: AtomicBool,
    pub(crate) enqueued: Mutex<Vec<DownloadRequest>>,
    pub(crate) discard_calls: Mutex<Vec<Vec<DownloadId>>>,
    records: Mutex<HashMap<DownloadId, DownloadRecord>>,
}

impl MockEngine {
    pub(crate) fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            reject_enqueue: AtomicBool::new(false),
            enqueued: Mutex::new(Vec::new()),
            discard_calls: Mutex::new(Vec::new()),
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Make every subsequent `enqueue` fail
    pub(crate) fn reject_enqueues(&self) {
        self.reject_enqueue.store(true, Ordering::SeqCst);
    }

    /// Script the terminal record `query` returns for `id`
    pub(crate) fn set_record(&self, id: DownloadId, record: DownloadRecord) {
        self.records.lock().unwrap().insert(id, record);
    }

    /// Script a successful record with the given location
    pub(crate) fn set_successful(&self, id: DownloadId, local_path: &str) {
        self.set_record(
            id,
            DownloadRecord {
                status: DownloadStatus::Successful,
                local_path: Some(local_path.to_string()),
            },
        );
    }

    pub(crate) fn enqueued_count(&self) -> usize {
        self.enqueued.lock().unwrap().len()
    }

    /// All identifiers passed to `discard`, flattened across calls
    pub(crate) fn discarded_ids(&self) -> Vec<DownloadId> {
        self.discard_calls
            .lock()
            .unwrap()
            .iter()
            .flatten()
            .copied()
            .collect()
    }

    pub(crate) fn discard_call_count(&self) -> usize {
        self.discard_calls.lock().unwrap().len()
    }
}

impl DownloadEngine for MockEngine {
    fn enqueue(&self, request: &DownloadRequest) -> Result<DownloadId> {
        if self.reject_enqueue.load(Ordering::SeqCst) {
            return Err(Error::Engine("enqueue rejected".to_string()));
        }
        let id = DownloadId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.enqueued.lock().unwrap().push(request.clone());
        Ok(id)
    }

    fn query(&self, id: DownloadId) -> Option<DownloadRecord> {
        self.records.lock().unwrap().get(&id).cloned()
    }

    fn discard(&self, ids: &[DownloadId]) {
        self.discard_calls.lock().unwrap().push(ids.to_vec());
    }
}

/// Helper to create a test SystemDownloader backed by a MockEngine.
///
/// Returns the downloader, the engine (for scripting and call assertions),
/// the sender side of the completion broadcast (for simulating engine
/// notices) and the tempdir (which must be kept alive).
pub(crate) fn create_test_downloader() -> (
    SystemDownloader,
    Arc<MockEngine>,
    broadcast::Sender<DownloadId>,
    tempfile::TempDir,
) {
    let temp_dir = tempdir().unwrap();

    let config = Config {
        public_dir: temp_dir.path().join("public"),
        private_dir: temp_dir.path().join("private"),
        default_sub_dir: "Downloads".to_string(),
    };

    let engine = Arc::new(MockEngine::new());
    let (notice_tx, notice_rx) = broadcast::channel(64);

    let downloader = SystemDownloader::new(config, engine.clone(), notice_rx);

    (downloader, engine, notice_tx, temp_dir)
}
