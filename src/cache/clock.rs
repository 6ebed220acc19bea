//! Clock Module
//!
//! Time source used to stamp and check entry expiry.

use std::fmt::Debug;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::warn;

// == Clock Trait ==
/// Source of the current instant.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> Instant;
}

// == System Clock ==
/// Monotonic OS clock (`Instant::now`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

// == Manual Clock ==
/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    /// Creates a clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Moves the clock forward by `by`.
    ///
    /// An advance that would overflow `Instant` leaves the clock where it is.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        match now.checked_add(by) {
            Some(next) => *now = next,
            None => warn!(?by, "manual clock advance overflows, ignored"),
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}
