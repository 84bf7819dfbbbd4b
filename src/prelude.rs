//! Convenient imports for recordsync.
//!
//! ```
//! use recordsync::prelude::*;
//!
//! let client = RecordSync::in_memory()?;
//! assert!(client.list()?.is_empty());
//! # Ok::<(), recordsync::Error>(())
//! ```

// Main entry point
pub use crate::client::{RecordSync, RecordSyncBuilder};
pub use crate::config::SyncConfig;

// Error handling
pub use crate::error::{Error, Result};

// Records
pub use recordsync_core::{Category, Record, RecordId, Timestamp};

// Stores
pub use recordsync_storage::{MemoryStore, RecordStore};

// Synchronization
pub use recordsync_sync::{FailureReason, LifecycleState, Snapshot};
