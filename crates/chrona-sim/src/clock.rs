//! The mutable virtual clock.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use chrona_kernel::{Clock, FrozenClock, SchedulerError};

/// A virtual clock owned by a simulated scheduler.
///
/// The scheduler's event loop is the only writer; actions never see this
/// clock directly — they get a [`FrozenClock`] snapshot pinned to their
/// event's due-time. The reading is non-decreasing over the clock's lifetime:
/// there is no way to set it backwards.
#[derive(Debug)]
pub struct SimulatedClock {
    now: RwLock<DateTime<Utc>>,
}

impl SimulatedClock {
    /// Create a clock starting at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Move the clock to `target`.
    ///
    /// # Panics
    ///
    /// Panics if `target` lies before the current reading. Advancing to the
    /// current reading is allowed and a no-op.
    pub fn advance_to(&self, target: DateTime<Utc>) {
        let mut now = self.now.write();

        if target < *now {
            panic!("{}", SchedulerError::ClockMovedBackwards);
        }

        *now = target;
    }

    /// A detached read-only clock pinned to the current reading.
    pub fn snapshot(&self) -> FrozenClock {
        FrozenClock::at(self.now())
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
