//! Process-wide registry mapping upload identifiers to built indexes

use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, RwLock};

use crate::error::Result;

use super::index::VectorIndex;

/// Registry of built indexes keyed by upload identifier.
///
/// An owned, injected service handle: callers receive an `Arc<IndexRegistry>`
/// rather than reaching into module-level state. Entries for different
/// upload identifiers are independent; build-or-fetch for one identifier is
/// serialized so concurrent first questions perform exactly one build.
pub struct IndexRegistry {
    /// Built indexes, each exclusively owning its backing collection
    entries: DashMap<String, Arc<VectorIndex>>,
    /// Per-identifier build serialization
    build_locks: DashMap<String, Arc<Mutex<()>>>,
    /// Held shared by lookups and builds, exclusively by `clear_all`
    reset_gate: RwLock<()>,
}

impl IndexRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            build_locks: DashMap::new(),
            reset_gate: RwLock::new(()),
        }
    }

    /// Look up the index for an upload identifier
    pub async fn get(&self, upload_id: &str) -> Option<Arc<VectorIndex>> {
        let _gate = self.reset_gate.read().await;
        self.entries.get(upload_id).map(|e| Arc::clone(e.value()))
    }

    /// Register an index under an upload identifier, replacing any previous
    /// entry
    pub async fn put(&self, upload_id: &str, index: Arc<VectorIndex>) {
        let _gate = self.reset_gate.read().await;
        self.entries.insert(upload_id.to_string(), index);
    }

    /// Fetch the index for `upload_id`, building and registering it if
    /// absent.
    ///
    /// At most one build runs per identifier even under concurrent first
    /// requests; late arrivals observe the winner's index. A failed build
    /// registers nothing, so the next request retries from scratch.
    pub async fn get_or_build<F, Fut>(&self, upload_id: &str, build: F) -> Result<Arc<VectorIndex>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<VectorIndex>>,
    {
        let _gate = self.reset_gate.read().await;

        if let Some(existing) = self.entries.get(upload_id) {
            return Ok(Arc::clone(existing.value()));
        }

        let lock = self
            .build_locks
            .entry(upload_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        // Another request may have finished the build while we waited.
        if let Some(existing) = self.entries.get(upload_id) {
            return Ok(Arc::clone(existing.value()));
        }

        tracing::info!("Building index for upload '{}'", upload_id);
        let index = Arc::new(build().await?);
        self.entries.insert(upload_id.to_string(), Arc::clone(&index));

        Ok(index)
    }

    /// Remove every entry and drop the backing collections.
    ///
    /// Holds the exclusive gate for the duration, so a reset never
    /// interleaves with an in-flight build or lookup.
    pub async fn clear_all(&self) -> usize {
        let _gate = self.reset_gate.write().await;
        let cleared = self.entries.len();
        self.entries.clear();
        self.build_locks.clear();
        tracing::info!("Registry reset, {} index(es) dropped", cleared);
        cleared
    }

    /// Number of registered indexes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for IndexRegistry {
    fn default() -> Self {
        Self::new()
    }
}
