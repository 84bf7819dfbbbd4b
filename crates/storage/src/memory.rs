//! In-process store
//!
//! DashMap keyed by store key with FxHash inside each shard. Writes to one
//! key only lock that key's shard, matching the remote store's per-key
//! atomicity and nothing stronger.

use crate::error::StoreResult;
use crate::RecordStore;
use dashmap::DashMap;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;

type FxBuild = BuildHasherDefault<FxHasher>;

/// In-memory key→bytes store
///
/// # Thread Safety
///
/// All operations are thread-safe:
/// - read(): lock-free read via DashMap
/// - write(): locks only the target key's shard
///
/// # Example
///
/// ```
/// use recordsync_storage::{MemoryStore, RecordStore};
///
/// let store = MemoryStore::new();
/// store.write("k", b"v").unwrap();
/// assert_eq!(store.read("k").unwrap(), Some(b"v".to_vec()));
/// assert_eq!(store.read("missing").unwrap(), None);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, Vec<u8>, FxBuild>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuild::default()),
        }
    }

    /// Number of keys written so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if a key has ever been written
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl RecordStore for MemoryStore {
    fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn write(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
