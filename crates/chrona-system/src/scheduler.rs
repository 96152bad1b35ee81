//! The tokio-backed wall-clock scheduler.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio_util::sync::CancellationToken;

use chrona_kernel::{Action, Clock, EventScheduler, FrozenClock, SchedulerError};

use crate::context::SystemActionContext;

/// Schedules actions against the host clock.
///
/// Each submission spawns a detached tokio task that sleeps until the due
/// instant and then performs the action, racing every wait against the
/// submission's cancellation token. There is no `forward`: time moves on its
/// own.
///
/// Must be used from within a tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEventScheduler;

impl SystemEventScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemEventScheduler {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl EventScheduler for SystemEventScheduler {
    fn perform_now(&self, action: Arc<dyn Action>, cancellation: CancellationToken) {
        let due_time = Utc::now();

        tokio::spawn(async move {
            if cancellation.is_cancelled() {
                return;
            }

            dispatch(action, due_time, cancellation).await;
        });
    }

    fn perform_after(
        &self,
        action: Arc<dyn Action>,
        duration: TimeDelta,
        cancellation: CancellationToken,
    ) {
        let due_time = Utc::now() + duration;
        // Negative durations are due immediately.
        let wait = duration.to_std().unwrap_or(Duration::ZERO);

        tokio::spawn(async move {
            tokio::select! {
                _ = cancellation.cancelled() => {}
                _ = tokio::time::sleep(wait) => {
                    dispatch(action, due_time, cancellation.clone()).await;
                }
            }
        });
    }

    fn perform_repeatedly(
        &self,
        action: Arc<dyn Action>,
        until: Option<DateTime<Utc>>,
        interval: TimeDelta,
        cancellation: CancellationToken,
    ) {
        let from = Utc::now();

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

        // The interval was validated positive, so the conversion cannot fail.
        let interval_wait = interval.to_std().unwrap_or(Duration::ZERO);
        let started = tokio::time::Instant::now();

        tokio::spawn(async move {
            let mut tick: u32 = 1;

            loop {
                let next_due = from + interval * (tick as i32);

                if let Some(until) = until {
                    if next_due >= until {
                        break;
                    }
                }

                // Deadlines are anchored at the submission instant, so one
                // slow action does not shift every later tick.
                let deadline = started + interval_wait * tick;

                tokio::select! {
                    _ = cancellation.cancelled() => break,
                    _ = tokio::time::sleep_until(deadline) => {
                        dispatch(Arc::clone(&action), next_due, cancellation.clone()).await;
                        tick += 1;
                    }
                }
            }
        });
    }
}

async fn dispatch(action: Arc<dyn Action>, due_time: DateTime<Utc>, cancellation: CancellationToken) {
    tracing::debug!(due_time = %due_time, "dispatching wall-clock event");

    let ctx = SystemActionContext::new(FrozenClock::at(due_time), cancellation);
    action.perform(Box::new(ctx)).await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
