//! Store error types

use thiserror::Error;

/// Failure reported by the store boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The authorizing actor declined the write
    #[error("write rejected: {0}")]
    Rejected(String),
}

impl StoreError {
    /// Check if the actor declined the operation
    pub fn is_rejected(&self) -> bool {
        matches!(self, StoreError::Rejected(_))
    }

    /// Check if this is a transport failure
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;
