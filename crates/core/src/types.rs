//! Record envelope types
//!
//! - [`RecordId`]: unique identifier, also the suffix of the record's store key
//! - [`Category`]: free-form tag (production, consumption, trade, ...)
//! - [`Timestamp`]: seconds since the Unix epoch, stamped by the writer
//! - [`Record`]: the full envelope plus its opaque payload

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a record
///
/// Ids generated here are UUID v4 strings, which keeps them collision
/// resistant across independent writers. Caller-supplied ids are accepted
/// as-is as long as they are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a new random id
    ///
    /// # Examples
    ///
    /// ```
    /// use recordsync_core::RecordId;
    ///
    /// let a = RecordId::generate();
    /// let b = RecordId::generate();
    /// assert_ne!(a, b);
    /// ```
    pub fn generate() -> Self {
        RecordId(Uuid::new_v4().to_string())
    }

    /// Wrap a caller-supplied id
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        Ok(RecordId(id))
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Record category tag
///
/// Only non-emptiness is enforced; the well-known tags exist for callers'
/// convenience.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Production observations
    pub const PRODUCTION: &'static str = "production";
    /// Consumption observations
    pub const CONSUMPTION: &'static str = "consumption";
    /// Trade observations
    pub const TRADE: &'static str = "trade";

    /// Create a category tag
    pub fn new(tag: impl Into<String>) -> Self {
        Category(tag.into())
    }

    /// Borrow the tag
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the tag is empty or only whitespace
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for Category {
    fn from(tag: &str) -> Self {
        Category::new(tag)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Seconds since the Unix epoch
///
/// Assigned by the writer at creation time. Clocks of different actors are
/// not synchronized, so ordering by timestamp is only a best-effort view.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Current wall-clock time
    pub fn now() -> Self {
        Timestamp(chrono::Utc::now().timestamp())
    }

    /// Construct from raw seconds
    pub const fn from_secs(secs: i64) -> Self {
        Timestamp(secs)
    }

    /// Raw seconds
    pub const fn as_secs(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One economic observation submitted by an actor
///
/// The payload is opaque: whatever encryption or encoding the caller applied
/// is preserved byte for byte.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Unique id
    pub id: RecordId,
    /// Category tag
    pub category: Category,
    /// Non-negative magnitude
    pub magnitude: f64,
    /// Writer-assigned creation time
    pub created_at: Timestamp,
    /// Identity of the writer
    pub owner: String,
    /// Opaque payload bytes
    pub payload: Vec<u8>,
}

impl Record {
    /// Create a record with a fresh id, stamped with the current time
    pub fn new(
        owner: impl Into<String>,
        category: impl Into<Category>,
        magnitude: f64,
        payload: impl Into<Vec<u8>>,
    ) -> Self {
        Record {
            id: RecordId::generate(),
            category: category.into(),
            magnitude,
            created_at: Timestamp::now(),
            owner: owner.into(),
            payload: payload.into(),
        }
    }

    /// Override the id
    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = id;
        self
    }

    /// Override the creation time
    pub fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = created_at;
        self
    }

    /// Check the submission preconditions
    ///
    /// A record is submittable when its category is non-empty and its
    /// magnitude is a finite number greater than zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.as_str().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if self.category.is_blank() {
            return Err(ValidationError::EmptyCategory);
        }
        if !self.magnitude.is_finite() || self.magnitude <= 0.0 {
            return Err(ValidationError::NonPositiveMagnitude(
                self.magnitude.to_string(),
            ));
        }
        Ok(())
    }

    /// True if `actor` owns this record
    ///
    /// Identities are compared case-insensitively, since wallet-style
    /// addresses come back in mixed case.
    pub fn is_owned_by(&self, actor: &str) -> bool {
        self.owner.eq_ignore_ascii_case(actor)
    }
}
