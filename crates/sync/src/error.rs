//! Synchronizer error types

use recordsync_core::{CodecError, ValidationError};
use recordsync_storage::StoreError;
use thiserror::Error;

/// Errors surfaced by the synchronizer and the tracker
///
/// Only backend-boundary failures and local precondition failures reach a
/// caller. Malformed data read back from the store is absorbed while listing.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Authorizing actor declined the write
    #[error("write rejected: {0}")]
    Rejected(String),

    /// Local precondition failed; the store was never contacted
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A record about to be written could not be encoded
    #[error("encoding failed: {0}")]
    Codec(#[from] CodecError),
}

impl From<StoreError> for SyncError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(msg) => SyncError::Unavailable(msg),
            StoreError::Rejected(msg) => SyncError::Rejected(msg),
        }
    }
}

impl SyncError {
    /// Check if the actor declined the write
    pub fn is_rejected(&self) -> bool {
        matches!(self, SyncError::Rejected(_))
    }

    /// Check if a local precondition failed
    pub fn is_validation(&self) -> bool {
        matches!(self, SyncError::Validation(_))
    }
}

/// Result type for synchronizer operations
pub type SyncResult<T> = std::result::Result<T, SyncError>;
