//! The host's clock behind the [`Clock`] contract.

use chrono::{DateTime, Utc};

use chrona_kernel::Clock;

/// The default [`Clock`] implementation, backed by the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
