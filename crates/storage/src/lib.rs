//! Storage boundary for recordsync
//!
//! The remote store exposes exactly two primitives, `read(key)` and
//! `write(key, bytes)`, over one flat namespace. It is atomic per key and
//! offers nothing else: no listing, no multi-key transactions, no version
//! tokens.
//!
//! This crate provides:
//! - [`RecordStore`]: the trait every backend implements
//! - [`MemoryStore`]: sharded in-process backend
//! - [`fault::FaultyStore`]: wrapper injecting backend faults and counting calls

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod fault;
pub mod memory;

pub use error::{StoreError, StoreResult};
pub use fault::{Fault, FaultyStore, StoreStats};
pub use memory::MemoryStore;

use std::sync::Arc;

/// A remote key→bytes store
///
/// Implementations are pure pass-throughs: no retries, no caching. A key
/// that was never written reads as `Ok(None)`, never as an error.
pub trait RecordStore: Send + Sync {
    /// Read the bytes stored under `key`
    fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Replace the bytes stored under `key`
    fn write(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Probe whether the store is currently serving requests
    fn is_available(&self) -> StoreResult<bool> {
        Ok(true)
    }
}

impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        (**self).write(key, value)
    }

    fn is_available(&self) -> StoreResult<bool> {
        (**self).is_available()
    }
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        (**self).write(key, value)
    }

    fn is_available(&self) -> StoreResult<bool> {
        (**self).is_available()
    }
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        (**self).write(key, value)
    }

    fn is_available(&self) -> StoreResult<bool> {
        (**self).is_available()
    }
}
