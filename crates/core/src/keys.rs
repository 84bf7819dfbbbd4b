//! Store key layout
//!
//! The store is a single flat namespace. One well-known key holds the index;
//! every record lives under `record_prefix + id`. The layout guarantees the
//! index key can never be produced by a record id.

use crate::error::ValidationError;
use crate::types::RecordId;

/// Default well-known index key
pub const DEFAULT_INDEX_KEY: &str = "records:index";

/// Default prefix for record keys
pub const DEFAULT_RECORD_PREFIX: &str = "record:";

/// Index key and record key prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLayout {
    index_key: String,
    record_prefix: String,
}

impl KeyLayout {
    /// Build a layout, rejecting ones where keys could collide
    pub fn new(
        index_key: impl Into<String>,
        record_prefix: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let index_key = index_key.into();
        let record_prefix = record_prefix.into();
        if index_key.is_empty() {
            return Err(ValidationError::KeyLayout("index key is empty".into()));
        }
        if record_prefix.is_empty() {
            return Err(ValidationError::KeyLayout("record prefix is empty".into()));
        }
        if index_key.starts_with(&record_prefix) {
            return Err(ValidationError::KeyLayout(format!(
                "index key {:?} lies under record prefix {:?}",
                index_key, record_prefix
            )));
        }
        Ok(KeyLayout {
            index_key,
            record_prefix,
        })
    }

    /// The well-known index key
    pub fn index_key(&self) -> &str {
        &self.index_key
    }

    /// The record key prefix
    pub fn record_prefix(&self) -> &str {
        &self.record_prefix
    }

    /// Store key for a record id
    pub fn record_key(&self, id: &RecordId) -> String {
        format!("{}{}", self.record_prefix, id)
    }
}

impl Default for KeyLayout {
    fn default() -> Self {
        KeyLayout {
            index_key: DEFAULT_INDEX_KEY.to_string(),
            record_prefix: DEFAULT_RECORD_PREFIX.to_string(),
        }
    }
}
