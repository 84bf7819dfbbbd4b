//! # recordsync
//!
//! Client-side synchronization of a record collection held in a remote
//! append-only key-value store that offers only `get(key)` and
//! `put(key, bytes)`.
//!
//! Since the store cannot list its keys, a single well-known index key holds
//! the ids of every record. recordsync centralizes that pattern:
//!
//! - [`IndexedCollection`] lists records through the index and appends new
//!   ones (record write, then index re-read and write)
//! - [`LifecycleTracker`] runs a guarded submission and exposes
//!   Idle/Pending/Succeeded/Failed with timed auto-reset
//! - [`RecordSync`] ties a store, an actor identity and a [`SyncConfig`]
//!   together
//!
//! ## Quick Start
//!
//! ```
//! use recordsync::prelude::*;
//!
//! let client = RecordSync::in_memory()?.with_actor("0xabc");
//!
//! let stored = client.submit("consumption", 7.5, b"opaque".to_vec())?;
//! assert!(matches!(client.current_state(), LifecycleState::Succeeded(_)));
//!
//! let snapshot = client.list()?;
//! assert_eq!(snapshot.records()[0].id, stored.id);
//! # Ok::<(), recordsync::Error>(())
//! ```
//!
//! ## Consistency
//!
//! Appends are not atomic across the two keys they touch and concurrent
//! writers can lose each other's index entries. Both are accepted
//! limitations of the two-primitive store; see [`recordsync_sync`].

#![warn(missing_docs)]

mod client;
mod config;
mod error;

pub mod prelude;

pub use client::{RecordSync, RecordSyncBuilder};
pub use config::SyncConfig;
pub use error::{Error, Result};

pub use recordsync_core::{Category, KeyLayout, Record, RecordId, Timestamp};
pub use recordsync_storage::{Fault, FaultyStore, MemoryStore, RecordStore, StoreError};
pub use recordsync_sync::{
    Clock, FailureReason, IndexedCollection, LifecycleState, LifecycleTracker, ManualClock,
    ResetDelays, Snapshot, SnapshotStats, SystemClock,
};
