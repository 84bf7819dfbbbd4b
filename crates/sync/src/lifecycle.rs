//! Write lifecycle tracking
//!
//! A [`LifecycleTracker`] runs one user-initiated write at a time through an
//! [`IndexedCollection`] and exposes its progress as a small state machine:
//!
//! ```text
//! Idle ──submit──> Pending ──ok──> Succeeded ──(success delay)──> Idle
//!   │                 └─────err──> Failed    ──(failure delay)──> Idle
//!   └──invalid──────────────────> Failed    ──(failure delay)──> Idle
//! ```
//!
//! Auto-reset is deadline based: a terminal state carries a reset instant and
//! reads as `Idle` once the tracker's [`Clock`] passes it. The reset is applied
//! (and `Idle` delivered to listeners) by the first read that observes the
//! elapsed deadline, either [`LifecycleTracker::current_state`] or
//! [`LifecycleTracker::reset_deadline`]. A new submission replaces any pending
//! deadline.
//!
//! Each submission takes a new generation number. When a submission finishes
//! after a newer one has started, its result is returned to its own caller
//! but not applied to the tracker state. The in-flight store call itself is
//! never cancelled.

use crate::clock::{Clock, SystemClock};
use crate::collection::IndexedCollection;
use crate::error::{SyncError, SyncResult};
use parking_lot::{Mutex, ReentrantMutex, RwLock};
use recordsync_core::Record;
use recordsync_storage::RecordStore;
use std::borrow::Cow;
use std::cell::Cell;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Why a submission failed
#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
    /// The authorizing actor declined the write
    UserRejected,
    /// The record failed a local precondition
    Invalid(String),
    /// Anything else, typically the store being unreachable
    Other(String),
}

impl FailureReason {
    fn classify(err: &SyncError) -> Self {
        match err {
            SyncError::Rejected(_) => FailureReason::UserRejected,
            SyncError::Validation(e) => FailureReason::Invalid(e.to_string()),
            other => FailureReason::Other(other.to_string()),
        }
    }
}

/// User-visible status of the current submission
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LifecycleState {
    /// Nothing to show
    #[default]
    Idle,
    /// Write in flight
    Pending,
    /// Write landed
    Succeeded(Record),
    /// Write failed
    Failed(FailureReason),
}

impl LifecycleState {
    /// Check if nothing is being shown
    pub fn is_idle(&self) -> bool {
        matches!(self, LifecycleState::Idle)
    }

    /// Check if a write is in flight
    pub fn is_pending(&self) -> bool {
        matches!(self, LifecycleState::Pending)
    }

    /// Check if this is a terminal state awaiting reset
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LifecycleState::Succeeded(_) | LifecycleState::Failed(_)
        )
    }

    /// Short name
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Idle => "Idle",
            LifecycleState::Pending => "Pending",
            LifecycleState::Succeeded(_) => "Succeeded",
            LifecycleState::Failed(_) => "Failed",
        }
    }

    /// Message to display, if any
    pub fn message(&self) -> Option<Cow<'static, str>> {
        match self {
            LifecycleState::Idle => None,
            LifecycleState::Pending => Some(Cow::Borrowed("Storing record...")),
            LifecycleState::Succeeded(_) => Some(Cow::Borrowed("Record stored")),
            LifecycleState::Failed(FailureReason::UserRejected) => {
                Some(Cow::Borrowed("Transaction rejected by user"))
            }
            LifecycleState::Failed(FailureReason::Invalid(reason)) => {
                Some(Cow::Owned(format!("Invalid record: {}", reason)))
            }
            LifecycleState::Failed(FailureReason::Other(reason)) => {
                Some(Cow::Owned(format!("Submission failed: {}", reason)))
            }
        }
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How long terminal states stay visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetDelays {
    /// Display window after a successful write
    pub success: Duration,
    /// Display window after a failed write
    pub failure: Duration,
}

impl Default for ResetDelays {
    fn default() -> Self {
        Self {
            success: Duration::from_millis(2000),
            failure: Duration::from_millis(3000),
        }
    }
}

type Listener = Box<dyn Fn(&LifecycleState) + Send + Sync>;

#[derive(Debug, Default)]
struct Inner {
    state: LifecycleState,
    reset_at: Option<Instant>,
    /// Bumped per submission
    generation: u64,
    /// Bumped per state change; orders listener delivery
    version: u64,
}

impl Inner {
    fn set(&mut self, state: LifecycleState) -> u64 {
        self.state = state;
        self.version += 1;
        self.version
    }

    /// Apply an elapsed reset deadline, returning the new version if it fired
    fn expire(&mut self, now: Instant) -> Option<u64> {
        match self.reset_at {
            Some(at) if now >= at => {
                self.reset_at = None;
                Some(self.set(LifecycleState::Idle))
            }
            _ => None,
        }
    }
}

/// Guarded single-writer submissions with timed auto-reset
///
/// # Example
///
/// ```
/// use recordsync_core::Record;
/// use recordsync_storage::MemoryStore;
/// use recordsync_sync::{IndexedCollection, LifecycleState, LifecycleTracker};
///
/// let tracker = LifecycleTracker::new(IndexedCollection::new(MemoryStore::new()));
/// tracker.submit(Record::new("0xab", "trade", 2.0, Vec::new())).unwrap();
/// assert!(matches!(tracker.current_state(), LifecycleState::Succeeded(_)));
/// ```
pub struct LifecycleTracker<S> {
    collection: IndexedCollection<S>,
    delays: ResetDelays,
    clock: Arc<dyn Clock>,
    inner: Mutex<Inner>,
    listeners: RwLock<Vec<Listener>>,
    /// Highest state version handed to listeners
    delivered: ReentrantMutex<Cell<u64>>,
}

impl<S: RecordStore> LifecycleTracker<S> {
    /// Track submissions with default delays and the wall clock
    pub fn new(collection: IndexedCollection<S>) -> Self {
        Self::with_options(collection, ResetDelays::default(), Arc::new(SystemClock))
    }

    /// Track submissions with explicit delays and clock
    pub fn with_options(
        collection: IndexedCollection<S>,
        delays: ResetDelays,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            collection,
            delays,
            clock,
            inner: Mutex::new(Inner::default()),
            listeners: RwLock::new(Vec::new()),
            delivered: ReentrantMutex::new(Cell::new(0)),
        }
    }

    /// The collection writes go through
    pub fn collection(&self) -> &IndexedCollection<S> {
        &self.collection
    }

    /// Configured display windows
    pub fn delays(&self) -> ResetDelays {
        self.delays
    }

    /// Register a callback invoked on state changes
    ///
    /// Callbacks run on the thread that caused the change, after the
    /// tracker's state lock is released, so they may call back into the
    /// tracker. Deliveries are ordered: a change that was overtaken by a newer
    /// one before reaching listeners is dropped, so the last state delivered
    /// is always the tracker's current state.
    ///
    /// The timed return to `Idle` is delivered by the first
    /// [`current_state`](Self::current_state) or
    /// [`reset_deadline`](Self::reset_deadline) call after the deadline
    /// passes. Callers driving a display only from this stream should poll
    /// one of them (for example at [`reset_deadline`](Self::reset_deadline)).
    pub fn on_transition<F>(&self, listener: F)
    where
        F: Fn(&LifecycleState) + Send + Sync + 'static,
    {
        self.listeners.write().push(Box::new(listener));
    }

    /// Current state, with any elapsed auto-reset applied
    pub fn current_state(&self) -> LifecycleState {
        self.poll().0
    }

    /// When the current terminal state will reset, if it will
    ///
    /// Applies an elapsed auto-reset the same way `current_state` does.
    pub fn reset_deadline(&self) -> Option<Instant> {
        self.poll().1
    }

    fn poll(&self) -> (LifecycleState, Option<Instant>) {
        let now = self.clock.now();
        let (state, reset_at, expired) = {
            let mut inner = self.inner.lock();
            let expired = inner.expire(now);
            (inner.state.clone(), inner.reset_at, expired)
        };
        if let Some(version) = expired {
            debug!(version, "lifecycle auto-reset to Idle");
            self.notify(version, &state);
        }
        (state, reset_at)
    }

    /// Submit a record
    ///
    /// Invalid records (blank category, non-positive magnitude) fail without
    /// contacting the store and show as `Failed(Invalid)`. Otherwise the
    /// tracker moves to `Pending`, appends the record and settles in
    /// `Succeeded` or `Failed`, each with its own reset window.
    pub fn submit(&self, record: Record) -> SyncResult<Record> {
        if let Err(e) = record.validate() {
            let err = SyncError::from(e);
            let generation = self.begin(None);
            self.settle(generation, LifecycleState::Failed(FailureReason::classify(&err)));
            return Err(err);
        }

        let generation = self.begin(Some(LifecycleState::Pending));
        let result = self.collection.append(record);
        let outcome = match &result {
            Ok(stored) => LifecycleState::Succeeded(stored.clone()),
            Err(e) => LifecycleState::Failed(FailureReason::classify(e)),
        };
        self.settle(generation, outcome);
        result
    }

    /// Start a new generation, optionally entering an interim state
    fn begin(&self, interim: Option<LifecycleState>) -> u64 {
        let (generation, version) = {
            let mut inner = self.inner.lock();
            inner.generation += 1;
            inner.reset_at = None;
            let version = interim.as_ref().map(|state| inner.set(state.clone()));
            (inner.generation, version)
        };
        if let (Some(state), Some(version)) = (interim, version) {
            debug!(generation, state = %state, "lifecycle transition");
            self.notify(version, &state);
        }
        generation
    }

    /// Enter a terminal state unless a newer submission has started
    fn settle(&self, generation: u64, state: LifecycleState) {
        let delay = match state {
            LifecycleState::Succeeded(_) => self.delays.success,
            _ => self.delays.failure,
        };
        let version = {
            let mut inner = self.inner.lock();
            if inner.generation != generation {
                debug!(
                    generation,
                    current = inner.generation,
                    "submission superseded, result ignored"
                );
                return;
            }
            inner.reset_at = Some(self.clock.now() + delay);
            inner.set(state.clone())
        };
        debug!(generation, state = %state, "lifecycle transition");
        self.notify(version, &state);
    }

    /// Deliver `state` unless a newer version already reached listeners
    fn notify(&self, version: u64, state: &LifecycleState) {
        let delivered = self.delivered.lock();
        if version <= delivered.get() {
            debug!(version, latest = delivered.get(), "stale transition dropped");
            return;
        }
        delivered.set(version);
        for listener in self.listeners.read().iter() {
            listener(state);
        }
    }
}

impl<S> std::fmt::Debug for LifecycleTracker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleTracker")
            .field("delays", &self.delays)
            .field("inner", &*self.inner.lock())
            .finish_non_exhaustive()
    }
}
