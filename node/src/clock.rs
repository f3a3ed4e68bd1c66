//! The host clock source.
//!
//! Components never read the wall clock; the node samples its `Clock` once
//! at operation admission and threads the timestamp through. Tests drive a
//! `ManualClock` the way the original harness drove the chain's block time.

use breakfast_types::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A monotonic source of protocol time.
pub trait Clock: Send {
    fn now(&self) -> Timestamp;
}

/// Production clock backed by the system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A manually advanced clock for tests.
///
/// Cloning shares the underlying instant, so a test can keep a handle
/// while the node owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    secs: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            secs: Arc::new(AtomicU64::new(start.as_secs())),
        }
    }

    /// Move the clock forward by `secs` seconds.
    pub fn advance(&self, secs: u64) {
        self.secs.fetch_add(secs, Ordering::SeqCst);
    }

    /// Set an absolute time. Only moves forward.
    pub fn set(&self, to: Timestamp) {
        self.secs.fetch_max(to.as_secs(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.secs.load(Ordering::SeqCst))
    }
}
