//! Download registry: the paired id→resolver and id→URL maps
//!
//! The only stateful core of the library. Both maps are guarded by a single
//! `std::sync::Mutex` so any read or write of one implies a consistent view
//! of the other; the invariant is that an id is present in the resolver map
//! iff it is present in the URL map. Critical sections are plain map
//! operations and the lock is never held across an await, which is why a
//! blocking mutex (not tokio's) is the right discipline here. It also lets
//! the completion path mutate the registry without a runtime handle.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::handle::{DownloadHandle, Resolver, completion_channel};
use crate::types::DownloadId;

/// Tracks every download this instance has submitted and not yet resolved.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    resolvers: HashMap<DownloadId, Resolver>,
    urls: HashMap<DownloadId, String>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Create a completion channel for `id` and track it together with its
    /// source URL. Returns the subscriber handle for the caller.
    ///
    /// A duplicate `id` overwrites the previous entry; engine-assigned ids
    /// are unique while active, so this only happens after an id is reused.
    /// Subscribers of the overwritten entry observe `Abandoned`.
    pub(crate) fn register(&self, id: DownloadId, url: &str) -> DownloadHandle {
        let (resolver, handle) = completion_channel(id);
        let mut inner = self.lock();
        if inner.resolvers.insert(id, resolver).is_some() {
            tracing::warn!(download_id = id.get(), "overwriting registry entry for reused download id");
        }
        inner.urls.insert(id, url.to_string());
        handle
    }

    /// Whether `id` is currently tracked
    pub(crate) fn contains(&self, id: DownloadId) -> bool {
        self.lock().resolvers.contains_key(&id)
    }

    /// Subscriber handle for a tracked download, `None` if absent
    pub(crate) fn lookup(&self, id: DownloadId) -> Option<DownloadHandle> {
        self.lock().resolvers.get(&id).map(Resolver::subscribe)
    }

    /// Remove both entries for `id`, yielding the resolver so the caller can
    /// deliver the terminal outcome. Idempotent: absent ids return `None`.
    pub(crate) fn remove(&self, id: DownloadId) -> Option<Resolver> {
        let mut inner = self.lock();
        let resolver = inner.resolvers.remove(&id);
        inner.urls.remove(&id);
        resolver
    }

    /// Source URLs of all currently tracked downloads
    pub(crate) fn urls(&self) -> Vec<String> {
        self.lock().urls.values().cloned().collect()
    }

    /// Whether any tracked download was submitted for `url`
    pub(crate) fn contains_url(&self, url: &str) -> bool {
        self.lock().urls.values().any(|tracked| tracked == url)
    }

    /// Remove and return every resolver; used by cancel-all and shutdown.
    pub(crate) fn drain(&self) -> Vec<Resolver> {
        let mut inner = self.lock();
        inner.urls.clear();
        inner.resolvers.drain().map(|(_, resolver)| resolver).collect()
    }

    /// Number of tracked downloads
    pub(crate) fn len(&self) -> usize {
        self.lock().resolvers.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned registry lock means a panic mid-map-operation; the maps
        // themselves cannot be left inconsistent by any single operation
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
