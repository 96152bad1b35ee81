//! The serial driving discipline: every action runs inline.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use chrona_kernel::{Action, Clock, EventScheduler};

use crate::clock::SimulatedClock;
use crate::combinator::EventCombinator;
use crate::context::SimulatedActionContext;
use crate::event::Event;
use crate::generator::{EventGenerator, PeriodicEventGenerator, SingleEventGenerator};

/// Drives the combinator on the caller's task, invoking each due action
/// inline before looking at the combinator again.
///
/// Everything about a serial run is deterministic, including completion
/// order. Because an action runs inline, any events it submits are visible
/// before control returns to the loop — no coordination is needed, and
/// scheduling-action latches are ignored.
///
/// Submissions may come from inside a running action (the action holds its
/// own `Arc` of the scheduler); the combinator lock is never held across an
/// invocation, so that cannot deadlock.
pub struct SerialEventScheduler {
    clock: SimulatedClock,
    event_generators: Mutex<EventCombinator>,
}

impl SerialEventScheduler {
    /// Create a scheduler whose virtual clock starts at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            clock: SimulatedClock::new(now),
            event_generators: Mutex::new(EventCombinator::new()),
        }
    }

    /// Advance virtual time by `duration`, dispatching every event due within
    /// the span, in due-time order.
    ///
    /// When the scheduler returns, the clock reads exactly `now + duration`,
    /// no matter how many events fired — including zero. An action's panic
    /// unwinds straight to the caller.
    pub async fn forward(&self, duration: TimeDelta) {
        let target_time = self.clock.now() + duration;

        while self.perform_next_event(target_time).await {}
    }

    /// Advance exactly to the next event's due-time and dispatch that one
    /// event. Does nothing when no events are pending.
    pub async fn forward_to_next_event(&self) {
        let next_event = {
            let mut generators = self.event_generators.lock();
            if generators.finished() {
                None
            } else {
                Some(generators.pop())
            }
        };

        if let Some(event) = next_event {
            self.dispatch(event).await;
        }
    }

    /// Register a caller-supplied generator directly.
    pub fn add_generator(&self, generator: Box<dyn EventGenerator>) {
        self.event_generators.lock().add(generator);
    }

    async fn perform_next_event(&self, target_time: DateTime<Utc>) -> bool {
        let next_event = {
            let mut generators = self.event_generators.lock();

            if generators.finished() || generators.peek().due_time() > target_time {
                None
            } else {
                Some(generators.pop())
            }
        };

        let Some(event) = next_event else {
            self.clock.advance_to(target_time);
            return false;
        };

        self.dispatch(event).await;

        true
    }

    async fn dispatch(&self, event: Event) {
        // Past-due events are legal; the clock never moves backwards for them.
        self.clock.advance_to(event.due_time().max(self.clock.now()));

        tracing::debug!(due_time = %event.due_time(), "dispatching event inline");

        // The action runs inline, so its submissions are visible before the
        // loop re-examines the combinator; no latch is attached.
        let ctx = SimulatedActionContext::new(
            self.clock.snapshot(),
            event.cancellation().clone(),
            None,
        );

        let action = Arc::clone(event.action());
        action.perform(Box::new(ctx)).await;
    }
}

impl Clock for SerialEventScheduler {
    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

impl EventScheduler for SerialEventScheduler {
    fn perform_now(&self, action: Arc<dyn Action>, cancellation: CancellationToken) {
        self.add_generator(Box::new(SingleEventGenerator::new(
            action,
            self.clock.now(),
            cancellation,
        )));
    }

    fn perform_after(
        &self,
        action: Arc<dyn Action>,
        duration: TimeDelta,
        cancellation: CancellationToken,
    ) {
        self.add_generator(Box::new(SingleEventGenerator::new(
            action,
            self.clock.now() + duration,
            cancellation,
        )));
    }

    fn perform_repeatedly(
        &self,
        action: Arc<dyn Action>,
        until: Option<DateTime<Utc>>,
        interval: TimeDelta,
        cancellation: CancellationToken,
    ) {
        self.add_generator(Box::new(PeriodicEventGenerator::new(
            action,
            self.clock.now(),
            until,
            interval,
            cancellation,
        )));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
