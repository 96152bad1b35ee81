//! Clock abstraction (injectable for testing).
//!
//! Reading the time through [`Clock`] instead of calling `Utc::now()` directly
//! is what makes timing-sensitive code deterministic in tests: the same code
//! runs unchanged against the system clock or against a simulated clock that
//! only advances when the test calls `forward`.

use chrono::{DateTime, Utc};

/// Provides the current time at nanosecond granularity.
///
/// Implemented by the system clock in `chrona-system`, by the simulated clock
/// in `chrona-sim`, and by every scheduler (a scheduler *is* a clock, so
/// production code can ask "what time is it" and "run this later" through the
/// same handle).
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// A detached clock pinned to a fixed instant.
///
/// This is what actions observe during a dispatch: a value-semantics snapshot
/// taken at the event's due-time. A snapshot can never see subsequent
/// advances of the scheduler's clock, which keeps an action's view of time
/// consistent no matter when its body actually runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrozenClock {
    now: DateTime<Utc>,
}

impl FrozenClock {
    /// Pin a clock to the given instant.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
