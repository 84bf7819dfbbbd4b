//! Indexed collection
//!
//! Enumerates records through the index key and appends new ones.
//!
//! ## Design
//!
//! IndexedCollection is stateless apart from its key layout. Every call goes
//! back to the store, so a listing always reflects what the store holds at
//! the time of the call rather than a cached view.
//!
//! ## Listing policy
//!
//! | Situation | Outcome |
//! |-----------|---------|
//! | Index key absent | empty snapshot |
//! | Index read fails | error |
//! | Index undecodable | empty snapshot, logged |
//! | Record key absent | skipped |
//! | Record read fails | skipped, logged |
//! | Record undecodable | skipped, logged |
//! | Id indexed twice | materialized once, first position |

use crate::error::SyncResult;
use recordsync_core::{codec, KeyLayout, Record, RecordId};
use recordsync_storage::RecordStore;
use rustc_hash::FxHashSet;
use tracing::{debug, error, warn};

/// Counters describing how a snapshot was assembled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotStats {
    /// Distinct ids found in the index
    pub indexed: usize,
    /// Indexed ids with no record stored under them
    pub missing: usize,
    /// Records whose read failed
    pub unreadable: usize,
    /// Records whose bytes did not decode
    pub undecodable: usize,
    /// True if the index itself was present but undecodable
    pub index_corrupt: bool,
}

/// Records reachable through the index, newest first
///
/// A snapshot is a disposable derived view: every [`IndexedCollection::list`]
/// builds a new one from scratch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    records: Vec<Record>,
    stats: SnapshotStats,
}

impl Snapshot {
    /// Records, sorted by `created_at` descending
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consume into the record list
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no record was reachable
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records newest first
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Find a record by id
    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// How this snapshot was assembled
    pub fn stats(&self) -> SnapshotStats {
        self.stats
    }
}

impl IntoIterator for Snapshot {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Record collection enumerated through a single index key
///
/// # Example
///
/// ```
/// use recordsync_core::Record;
/// use recordsync_storage::MemoryStore;
/// use recordsync_sync::IndexedCollection;
///
/// let collection = IndexedCollection::new(MemoryStore::new());
/// let stored = collection.append(Record::new("0xab", "trade", 3.0, b"blob".to_vec())).unwrap();
///
/// let snapshot = collection.list().unwrap();
/// assert_eq!(snapshot.records(), &[stored]);
/// ```
#[derive(Debug)]
pub struct IndexedCollection<S> {
    store: S,
    layout: KeyLayout,
}

impl<S: RecordStore> IndexedCollection<S> {
    /// Use the default key layout
    pub fn new(store: S) -> Self {
        Self::with_layout(store, KeyLayout::default())
    }

    /// Use a custom key layout
    pub fn with_layout(store: S, layout: KeyLayout) -> Self {
        Self { store, layout }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The key layout
    pub fn layout(&self) -> &KeyLayout {
        &self.layout
    }

    /// Materialize every record reachable through the index
    ///
    /// Only a failure to read the index itself is returned as an error.
    /// Everything that goes wrong per record is absorbed; see the module
    /// docs for the full policy.
    pub fn list(&self) -> SyncResult<Snapshot> {
        let mut stats = SnapshotStats::default();
        let ids = match self.read_index()? {
            Some(ids) => ids,
            None => {
                stats.index_corrupt = true;
                Vec::new()
            }
        };

        let mut seen = FxHashSet::default();
        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            if !seen.insert(id.clone()) {
                continue;
            }
            stats.indexed += 1;

            let key = self.layout.record_key(&id);
            let bytes = match self.store.read(&key) {
                Ok(Some(bytes)) => bytes,
                Ok(None) => {
                    stats.missing += 1;
                    continue;
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "record read failed, skipping");
                    stats.unreadable += 1;
                    continue;
                }
            };
            match codec::decode_record(id, &bytes) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(key = %key, error = %e, "undecodable record, skipping");
                    stats.undecodable += 1;
                }
            }
        }

        // Stable: equal timestamps keep index order
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        debug!(
            indexed = stats.indexed,
            listed = records.len(),
            missing = stats.missing,
            "listed collection"
        );
        Ok(Snapshot { records, stats })
    }

    /// Store a record and add its id to the index
    ///
    /// Writes the record first, then re-reads the index, appends the id and
    /// writes the index back. If the second step fails the record stays in
    /// the store as an orphan and the error is returned. Returns the stored
    /// record so callers do not need to list again.
    pub fn append(&self, record: Record) -> SyncResult<Record> {
        let key = self.layout.record_key(&record.id);
        let bytes = codec::encode_record(&record)?;
        self.store.write(&key, &bytes)?;

        if let Err(e) = self.link(&record.id) {
            error!(
                key = %key,
                error = %e,
                "record stored but index update failed; record is orphaned"
            );
            return Err(e);
        }
        debug!(key = %key, "record appended");
        Ok(record)
    }

    /// Read one record directly by id, bypassing the index
    ///
    /// Absent and undecodable records both read as `None`.
    pub fn read_record(&self, id: &RecordId) -> SyncResult<Option<Record>> {
        let key = self.layout.record_key(id);
        let Some(bytes) = self.store.read(&key)? else {
            return Ok(None);
        };
        match codec::decode_record(id.clone(), &bytes) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!(key = %key, error = %e, "undecodable record");
                Ok(None)
            }
        }
    }

    /// Ids currently in the index, in index order
    ///
    /// Absent or undecodable indexes read as empty.
    pub fn index_ids(&self) -> SyncResult<Vec<RecordId>> {
        Ok(self.read_index()?.unwrap_or_default())
    }

    /// Probe the store
    pub fn is_available(&self) -> SyncResult<bool> {
        Ok(self.store.is_available()?)
    }

    /// Read and decode the index
    ///
    /// `Ok(None)` means the index was present but undecodable.
    fn read_index(&self) -> SyncResult<Option<Vec<RecordId>>> {
        let index_key = self.layout.index_key();
        let Some(bytes) = self.store.read(index_key)? else {
            return Ok(Some(Vec::new()));
        };
        match codec::decode_index(&bytes) {
            Ok(ids) => Ok(Some(ids)),
            Err(e) => {
                warn!(key = %index_key, error = %e, "undecodable index, treating as empty");
                Ok(None)
            }
        }
    }

    /// Append `id` to a freshly read index
    fn link(&self, id: &RecordId) -> SyncResult<()> {
        let mut ids = self.index_ids()?;
        ids.push(id.clone());
        let bytes = codec::encode_index(&ids)?;
        self.store.write(self.layout.index_key(), &bytes)?;
        Ok(())
    }
}
