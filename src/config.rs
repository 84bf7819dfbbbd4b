//! Client configuration.
//!
//! All fields are optional in the TOML source:
//!
//! ```toml
//! index_key = "records:index"
//! record_prefix = "record:"
//! success_reset_ms = 2000
//! failure_reset_ms = 3000
//! ```

use crate::error::{Error, Result};
use recordsync_core::{KeyLayout, DEFAULT_INDEX_KEY, DEFAULT_RECORD_PREFIX};
use recordsync_sync::ResetDelays;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Key layout and lifecycle timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Well-known key holding the record index
    pub index_key: String,
    /// Prefix prepended to record ids to form their keys
    pub record_prefix: String,
    /// How long a success stays visible, in milliseconds
    pub success_reset_ms: u64,
    /// How long a failure stays visible, in milliseconds
    pub failure_reset_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            index_key: DEFAULT_INDEX_KEY.to_string(),
            record_prefix: DEFAULT_RECORD_PREFIX.to_string(),
            success_reset_ms: 2000,
            failure_reset_ms: 3000,
        }
    }
}

impl SyncConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: SyncConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Check the layout can be built
    pub fn validate(&self) -> Result<()> {
        self.key_layout().map(|_| ())
    }

    /// Key layout described by this config
    pub fn key_layout(&self) -> Result<KeyLayout> {
        KeyLayout::new(self.index_key.clone(), self.record_prefix.clone())
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Lifecycle display windows
    pub fn reset_delays(&self) -> ResetDelays {
        ResetDelays {
            success: Duration::from_millis(self.success_reset_ms),
            failure: Duration::from_millis(self.failure_reset_ms),
        }
    }
}
