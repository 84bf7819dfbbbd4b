//! Synchronization layer for recordsync
//!
//! The store has no way to list keys, so one well-known index key holds the
//! ids of every record. This crate owns everything built on that pattern:
//! - [`IndexedCollection`]: enumerate, fetch and append records via the index
//! - [`LifecycleTracker`]: guarded single-writer submissions with a
//!   user-visible state machine and timed auto-reset
//! - [`Clock`]: time source for the tracker's reset deadlines
//!
//! ## Accepted limitations
//!
//! `append` is two independent key writes (record, then index). A failure
//! between them leaves an orphan record that is readable by key but absent
//! from listings. Two writers appending concurrently may each re-write the
//! index from a read that predates the other's write; the index write that
//! lands last wins and the other id is dropped from the index. The store
//! offers no version token, so neither case is detected.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod collection;
pub mod error;
pub mod lifecycle;

pub use clock::{Clock, ManualClock, SystemClock};
pub use collection::{IndexedCollection, Snapshot, SnapshotStats};
pub use error::{SyncError, SyncResult};
pub use lifecycle::{FailureReason, LifecycleState, LifecycleTracker, ResetDelays};
