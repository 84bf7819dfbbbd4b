//! Main client entry point for recordsync.
//!
//! This module provides the `RecordSync` struct, which ties a store, an actor
//! identity and a configuration together behind one handle.

use crate::config::SyncConfig;
use crate::error::{Error, Result};
use recordsync_core::{Category, Record, ValidationError};
use recordsync_storage::{MemoryStore, RecordStore};
use recordsync_sync::{
    Clock, IndexedCollection, LifecycleState, LifecycleTracker, Snapshot, SystemClock,
};
use std::sync::Arc;

/// The recordsync client.
///
/// Create one with [`RecordSync::builder`] or [`RecordSync::in_memory`].
///
/// # Example
///
/// ```
/// use recordsync::prelude::*;
///
/// let client = RecordSync::in_memory()?.with_actor("0xabc");
/// client.submit("production", 42.0, b"ciphertext".to_vec())?;
///
/// let snapshot = client.list()?;
/// assert_eq!(snapshot.len(), 1);
/// # Ok::<(), recordsync::Error>(())
/// ```
pub struct RecordSync<S> {
    tracker: LifecycleTracker<S>,
    actor: Option<String>,
    config: SyncConfig,
}

impl RecordSync<MemoryStore> {
    /// Client over a fresh in-process store with default settings.
    ///
    /// Nothing is shared with other clients unless the store is; use
    /// [`RecordSyncBuilder`] with an `Arc<MemoryStore>` for that.
    pub fn in_memory() -> Result<Self> {
        RecordSyncBuilder::new(MemoryStore::new()).open()
    }
}

impl<S: RecordStore> RecordSync<S> {
    /// Create a builder around a store.
    pub fn builder(store: S) -> RecordSyncBuilder<S> {
        RecordSyncBuilder::new(store)
    }

    /// Set or replace the actor identity used to stamp new records.
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// The configured actor, if any.
    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }

    /// The configuration this client was opened with.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// The underlying collection, for direct reads and appends.
    pub fn collection(&self) -> &IndexedCollection<S> {
        self.tracker.collection()
    }

    /// The lifecycle tracker guarding submissions.
    pub fn tracker(&self) -> &LifecycleTracker<S> {
        &self.tracker
    }

    /// Materialize every reachable record, newest first.
    pub fn list(&self) -> Result<Snapshot> {
        Ok(self.collection().list()?)
    }

    /// Build a record for the configured actor and submit it.
    ///
    /// Fails with a validation error, without touching the store or the
    /// lifecycle state, when no actor is configured.
    pub fn submit(
        &self,
        category: impl Into<Category>,
        magnitude: f64,
        payload: impl Into<Vec<u8>>,
    ) -> Result<Record> {
        let actor = self
            .actor
            .as_deref()
            .ok_or(Error::from(ValidationError::MissingActor))?;
        self.submit_record(Record::new(actor, category, magnitude, payload))
    }

    /// Submit a fully built record through the lifecycle tracker.
    pub fn submit_record(&self, record: Record) -> Result<Record> {
        Ok(self.tracker.submit(record)?)
    }

    /// Current lifecycle state.
    pub fn current_state(&self) -> LifecycleState {
        self.tracker.current_state()
    }

    /// Register a callback for lifecycle transitions.
    pub fn on_transition<F>(&self, listener: F)
    where
        F: Fn(&LifecycleState) + Send + Sync + 'static,
    {
        self.tracker.on_transition(listener);
    }

    /// Probe whether the store is serving requests.
    pub fn is_available(&self) -> Result<bool> {
        Ok(self.collection().is_available()?)
    }
}

impl<S> std::fmt::Debug for RecordSync<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordSync")
            .field("actor", &self.actor)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for client configuration.
///
/// # Example
///
/// ```
/// use recordsync::prelude::*;
/// use std::sync::Arc;
///
/// let shared = Arc::new(MemoryStore::new());
/// let alice = RecordSync::builder(shared.clone()).actor("alice").open()?;
/// let bob = RecordSync::builder(shared).actor("bob").open()?;
///
/// alice.submit("trade", 1.0, Vec::new())?;
/// assert_eq!(bob.list()?.len(), 1);
/// # Ok::<(), recordsync::Error>(())
/// ```
pub struct RecordSyncBuilder<S> {
    store: S,
    actor: Option<String>,
    config: SyncConfig,
    clock: Option<Arc<dyn Clock>>,
}

impl<S: RecordStore> RecordSyncBuilder<S> {
    /// Create a builder with default settings.
    pub fn new(store: S) -> Self {
        Self {
            store,
            actor: None,
            config: SyncConfig::default(),
            clock: None,
        }
    }

    /// Set the actor identity used to stamp records.
    pub fn actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Use a configuration.
    pub fn config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom clock for lifecycle reset deadlines.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Validate the configuration and open the client.
    pub fn open(self) -> Result<RecordSync<S>> {
        let layout = self.config.key_layout()?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let collection = IndexedCollection::with_layout(self.store, layout);
        let tracker =
            LifecycleTracker::with_options(collection, self.config.reset_delays(), clock);
        tracing::debug!(
            index_key = %self.config.index_key,
            actor = ?self.actor,
            "recordsync client opened"
        );
        Ok(RecordSync {
            tracker,
            actor: self.actor,
            config: self.config,
        })
    }
}
