//! A generator yielding events at a fixed interval.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tokio_util::sync::CancellationToken;

use chrona_kernel::{Action, SchedulerError};

use crate::event::Event;
use crate::generator::EventGenerator;

/// Yields events at `from + k * interval` for k >= 1, bounded by an optional
/// end and by cancellation.
///
/// The first event is one interval after `from`, never at `from` itself:
/// "every N, starting one interval in". With an `until` bound, events fire
/// strictly before `until` — the generator is finished as soon as its stored
/// current event reaches or passes the bound. Finished-ness is a function of
/// generator state only; the scheduler's clock never enters into it.
pub struct PeriodicEventGenerator {
    action: Arc<dyn Action>,
    from: DateTime<Utc>,
    until: Option<DateTime<Utc>>,
    interval: TimeDelta,

    current_event: Event,

    cancellation: CancellationToken,
}

impl PeriodicEventGenerator {
    /// # Panics
    ///
    /// Panics when `interval` is not positive, when `until` does not lie
    /// after `from`, or when `interval` does not fit within the span between
    /// `from` and `until` (not even the first event could fire).
    pub fn new(
        action: Arc<dyn Action>,
        from: DateTime<Utc>,
        until: Option<DateTime<Utc>>,
        interval: TimeDelta,
        cancellation: CancellationToken,
    ) -> Self {
        if interval <= TimeDelta::zero() {
            panic!("{}", SchedulerError::NonPositiveInterval);
        }

        if let Some(until) = until {
            if until <= from {
                panic!("{}", SchedulerError::UntilNotAfterStart);
            }

            if interval >= until - from {
                panic!("{}", SchedulerError::IntervalExceedsSpan);
            }
        }

        let first_event = Event::new(Arc::clone(&action), from + interval, cancellation.clone());

        Self {
            action,
            from,
            until,
            interval,

            current_event: first_event,

            cancellation,
        }
    }
}

impl EventGenerator for PeriodicEventGenerator {
    fn peek(&self) -> Event {
        if self.finished() {
            panic!("{}", SchedulerError::GeneratorFinished);
        }

        self.current_event.clone()
    }

    fn pop(&mut self) -> Event {
        if self.finished() {
            panic!("{}", SchedulerError::GeneratorFinished);
        }

        let successor = Event::new(
            Arc::clone(&self.action),
            self.current_event.due_time() + self.interval,
            self.cancellation.clone(),
        );

        std::mem::replace(&mut self.current_event, successor)
    }

    fn finished(&self) -> bool {
        if self.cancellation.is_cancelled() {
            return true;
        }

        match self.until {
            Some(until) => self.current_event.due_time() >= until,
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
