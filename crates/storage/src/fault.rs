//! Fault injection
//!
//! [`FaultyStore`] wraps another store and fails selected operations with a
//! chosen [`Fault`]. Every attempted call is counted in [`StoreStats`], so a
//! caller can assert that an operation never reached the backend.
//!
//! ```
//! use recordsync_storage::{Fault, FaultyStore, MemoryStore, RecordStore};
//!
//! let store = FaultyStore::new(MemoryStore::new());
//! store.fail_writes_to("index", Fault::Unavailable);
//!
//! assert!(store.write("record:1", b"x").is_ok());
//! assert!(store.write("index", b"[]").is_err());
//! assert_eq!(store.stats().writes(), 2);
//! ```

use crate::error::{StoreError, StoreResult};
use crate::RecordStore;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::debug;

/// Kind of failure to inject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Transport failure
    Unavailable,
    /// Authorizing actor declined
    Rejected,
}

impl Fault {
    fn to_error(self, op: &str, key: &str) -> StoreError {
        match self {
            Fault::Unavailable => {
                StoreError::Unavailable(format!("injected fault on {} {}", op, key))
            }
            Fault::Rejected => StoreError::Rejected("user rejected transaction".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Read,
    Write,
}

#[derive(Debug)]
struct Rule {
    op: Op,
    /// None matches every key
    key: Option<String>,
    fault: Fault,
    /// None fires forever
    remaining: Option<usize>,
}

impl Rule {
    fn matches(&self, op: Op, key: &str) -> bool {
        self.op == op && self.key.as_deref().map_or(true, |k| k == key)
    }
}

/// Per-operation call counters
#[derive(Debug, Default)]
pub struct StoreStats {
    reads: AtomicU64,
    writes: AtomicU64,
    failures: AtomicU64,
}

impl StoreStats {
    /// Read calls attempted
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Acquire)
    }

    /// Write calls attempted
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Acquire)
    }

    /// Calls that returned an injected fault
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Acquire)
    }

    /// All read and write calls
    pub fn total_calls(&self) -> u64 {
        self.reads() + self.writes()
    }
}

/// Store wrapper that injects faults and counts calls
#[derive(Debug)]
pub struct FaultyStore<S> {
    inner: S,
    rules: Mutex<Vec<Rule>>,
    offline: AtomicBool,
    serving: AtomicBool,
    stats: StoreStats,
}

impl<S: RecordStore> FaultyStore<S> {
    /// Wrap a store with no faults configured
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            rules: Mutex::new(Vec::new()),
            offline: AtomicBool::new(false),
            serving: AtomicBool::new(true),
            stats: StoreStats::default(),
        }
    }

    /// The wrapped store, bypassing faults and counters
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Call counters
    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    /// Fail every write to `key`
    pub fn fail_writes_to(&self, key: impl Into<String>, fault: Fault) {
        self.push_rule(Op::Write, Some(key.into()), fault, None);
    }

    /// Fail only the next write to `key`
    pub fn fail_next_write_to(&self, key: impl Into<String>, fault: Fault) {
        self.push_rule(Op::Write, Some(key.into()), fault, Some(1));
    }

    /// Fail every write regardless of key
    pub fn fail_all_writes(&self, fault: Fault) {
        self.push_rule(Op::Write, None, fault, None);
    }

    /// Fail every read of `key`
    pub fn fail_reads_of(&self, key: impl Into<String>, fault: Fault) {
        self.push_rule(Op::Read, Some(key.into()), fault, None);
    }

    /// Remove all configured faults
    pub fn clear_faults(&self) {
        self.rules.lock().clear();
    }

    /// Make every call fail as unreachable
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Release);
    }

    /// Set what the availability probe reports while online
    pub fn set_serving(&self, serving: bool) {
        self.serving.store(serving, Ordering::Release);
    }

    fn push_rule(&self, op: Op, key: Option<String>, fault: Fault, remaining: Option<usize>) {
        self.rules.lock().push(Rule {
            op,
            key,
            fault,
            remaining,
        });
    }

    fn check(&self, op: Op, key: &str) -> StoreResult<()> {
        let op_name = match op {
            Op::Read => "read",
            Op::Write => "write",
        };
        if self.offline.load(Ordering::Acquire) {
            self.stats.failures.fetch_add(1, Ordering::AcqRel);
            return Err(StoreError::Unavailable("store offline".to_string()));
        }

        let mut rules = self.rules.lock();
        let Some(pos) = rules.iter().position(|r| r.matches(op, key)) else {
            return Ok(());
        };
        let fault = rules[pos].fault;
        let exhausted = match rules[pos].remaining.as_mut() {
            Some(remaining) => {
                *remaining -= 1;
                *remaining == 0
            }
            None => false,
        };
        if exhausted {
            rules.remove(pos);
        }
        drop(rules);

        debug!(key = %key, op = op_name, ?fault, "injecting store fault");
        self.stats.failures.fetch_add(1, Ordering::AcqRel);
        Err(fault.to_error(op_name, key))
    }
}

impl<S: RecordStore> RecordStore for FaultyStore<S> {
    fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.stats.reads.fetch_add(1, Ordering::AcqRel);
        self.check(Op::Read, key)?;
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.stats.writes.fetch_add(1, Ordering::AcqRel);
        self.check(Op::Write, key)?;
        self.inner.write(key, value)
    }

    fn is_available(&self) -> StoreResult<bool> {
        if self.offline.load(Ordering::Acquire) {
            return Err(StoreError::Unavailable("store offline".to_string()));
        }
        Ok(self.serving.load(Ordering::Acquire))
    }
}
