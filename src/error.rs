//! Unified error types for recordsync.
//!
//! This module provides a single error type that wraps the per-crate errors
//! and presents a consistent interface to callers.

use thiserror::Error;

/// All recordsync errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The authorizing actor declined the write
    #[error("rejected by user: {0}")]
    Rejected(String),

    /// Local precondition failed; nothing was sent to the store
    #[error("validation failed: {0}")]
    Validation(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration could not be parsed or is unusable
    #[error("config error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for recordsync operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is retryable.
    ///
    /// Only transport failures are worth retrying; a rejection or a
    /// validation failure will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Unavailable(_))
    }

    /// Check if the actor declined the write.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Error::Rejected(_))
    }

    /// Check if a local precondition failed.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

impl From<recordsync_sync::SyncError> for Error {
    fn from(e: recordsync_sync::SyncError) -> Self {
        use recordsync_sync::SyncError as SE;
        match e {
            SE::Unavailable(msg) => Error::Unavailable(msg),
            SE::Rejected(msg) => Error::Rejected(msg),
            SE::Validation(v) => Error::Validation(v.to_string()),
            SE::Codec(c) => Error::Serialization(c.to_string()),
        }
    }
}

impl From<recordsync_storage::StoreError> for Error {
    fn from(e: recordsync_storage::StoreError) -> Self {
        recordsync_sync::SyncError::from(e).into()
    }
}

impl From<recordsync_core::ValidationError> for Error {
    fn from(e: recordsync_core::ValidationError) -> Self {
        Error::Validation(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
