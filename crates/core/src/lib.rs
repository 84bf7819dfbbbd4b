//! Core types for recordsync
//!
//! This crate defines the data that flows between the remote store and the
//! synchronizer:
//! - [`Record`]: one economic observation submitted by an actor
//! - [`RecordId`], [`Category`], [`Timestamp`]: the record envelope fields
//! - [`KeyLayout`]: how the index key and record keys are laid out in the
//!   store's flat namespace
//! - [`codec`]: the JSON wire format for index and record payloads

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod error;
pub mod keys;
pub mod types;

pub use codec::{decode_index, decode_record, encode_index, encode_record};
pub use error::{CodecError, ValidationError};
pub use keys::{KeyLayout, DEFAULT_INDEX_KEY, DEFAULT_RECORD_PREFIX};
pub use types::{Category, Record, RecordId, Timestamp};
