//! Error types for the core crate

use thiserror::Error;

/// A payload could not be encoded or decoded.
///
/// Decode failures are absorbed by the synchronizer when listing, so this
/// error rarely reaches a caller.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Bytes were not a valid JSON document of the expected shape
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The embedded record payload was not valid base64
    #[error("malformed record payload encoding: {0}")]
    PayloadEncoding(#[from] base64::DecodeError),

    /// The envelope decoded but violates a record invariant
    #[error("invalid record envelope: {0}")]
    Envelope(String),
}

/// A record or configuration failed a local precondition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Category was empty or whitespace
    #[error("category must not be empty")]
    EmptyCategory,

    /// Magnitude was zero, negative or not finite
    #[error("magnitude must be a positive number, got {0}")]
    NonPositiveMagnitude(String),

    /// Record id was empty
    #[error("record id must not be empty")]
    EmptyId,

    /// No actor identity available to stamp the record
    #[error("no actor configured")]
    MissingActor,

    /// Key layout is unusable
    #[error("invalid key layout: {0}")]
    KeyLayout(String),
}
