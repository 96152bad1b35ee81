//! The asynchronous driving discipline: every action gets its own worker.

use std::any::Any;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use futures::future::join_all;
use parking_lot::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use chrona_kernel::{Action, Clock, EventScheduler};

use crate::clock::SimulatedClock;
use crate::combinator::EventCombinator;
use crate::context::SimulatedActionContext;
use crate::event::Event;
use crate::generator::{EventGenerator, PeriodicEventGenerator, SingleEventGenerator};

/// Drives the combinator like the serial scheduler, but launches every popped
/// event on a fresh worker task and only waits for workers when `forward`
/// is about to return.
///
/// Dispatch order is deterministic (non-decreasing due-times, insertion order
/// on ties); completion order is not — workers run concurrently with the loop
/// and with each other, observing only the frozen clock snapshot taken at
/// their due-time.
///
/// An action that submits follow-up events and needs the loop to see them
/// before it advances must be wrapped in
/// [`SchedulingAction`](crate::scheduling_action::SchedulingAction): the loop
/// recognizes the wrapper's latch, launches the worker, and parks until the
/// action calls `done_scheduling_new_events()`.
///
/// The combinator lock is released before a worker is launched and before the
/// latch is awaited — a worker submitting back into the scheduler takes the
/// write side, which must not find the loop still holding the lock.
pub struct AsyncEventScheduler {
    clock: SimulatedClock,
    event_generators: RwLock<EventCombinator>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl AsyncEventScheduler {
    /// Create a scheduler whose virtual clock starts at `now`.
    ///
    /// Must be driven from within a tokio runtime; workers are spawned on it.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            clock: SimulatedClock::new(now),
            event_generators: RwLock::new(EventCombinator::new()),
            workers: Mutex::new(Vec::new()),
        }
    }

    /// Advance virtual time by `duration`, launching every event due within
    /// the span, in due-time order.
    ///
    /// Returns once the clock reads `now + duration` *and* every launched
    /// worker has completed. If any worker panicked, the first panic (in
    /// dispatch order) is resumed on the caller after the drain; later ones
    /// are logged and do not mask it.
    pub async fn forward(&self, duration: TimeDelta) {
        let target_time = self.clock.now() + duration;

        while self.perform_next_event(target_time).await {}

        self.drain_workers().await;
    }

    /// Advance exactly to the next event's due-time, launch that one event,
    /// and wait for every in-flight worker. Does nothing when no events are
    /// pending.
    pub async fn forward_to_next_event(&self) {
        let next_event = {
            let mut generators = self.event_generators.write();
            if generators.finished() {
                None
            } else {
                Some(generators.pop())
            }
        };

        if let Some(event) = next_event {
            self.launch(event).await;
        }

        self.drain_workers().await;
    }

    /// Register a caller-supplied generator directly.
    pub fn add_generator(&self, generator: Box<dyn EventGenerator>) {
        self.event_generators.write().add(generator);
    }

    async fn perform_next_event(&self, target_time: DateTime<Utc>) -> bool {
        let next_event = {
            let mut generators = self.event_generators.write();

            if generators.finished() || generators.peek().due_time() > target_time {
                None
            } else {
                Some(generators.pop())
            }
        };
        // The lock is released here; the popped event is owned by this task.

        let Some(event) = next_event else {
            self.clock.advance_to(target_time);
            return false;
        };

        self.launch(event).await;

        true
    }

    async fn launch(&self, event: Event) {
        // Past-due events are legal; the clock never moves backwards for them.
        self.clock.advance_to(event.due_time().max(self.clock.now()));

        let latch = event.action().scheduling_latch();

        let ctx = SimulatedActionContext::new(
            self.clock.snapshot(),
            event.cancellation().clone(),
            latch.clone(),
        );

        tracing::debug!(
            due_time = %event.due_time(),
            scheduling = latch.is_some(),
            "launching event on worker"
        );

        let action = Arc::clone(event.action());
        let worker = tokio::spawn(async move {
            action.perform(Box::new(ctx)).await;
        });
        self.workers.lock().push(worker);

        // A scheduling-action parks the loop until its submissions are in, so
        // the next combinator examination sees the freshly-added generators.
        if let Some(latch) = latch {
            latch.wait().await;
        }
    }

    async fn drain_workers(&self) {
        let workers: Vec<JoinHandle<()>> = std::mem::take(&mut *self.workers.lock());

        let mut first_panic: Option<Box<dyn Any + Send>> = None;
        for result in join_all(workers).await {
            let Err(error) = result else { continue };

            if !error.is_panic() {
                // Workers are never aborted; anything else is a runtime
                // shutdown out of our hands.
                continue;
            }

            if first_panic.is_none() {
                first_panic = Some(error.into_panic());
            } else {
                tracing::error!(%error, "additional action failure");
            }
        }

        if let Some(payload) = first_panic {
            std::panic::resume_unwind(payload);
        }
    }
}

impl Clock for AsyncEventScheduler {
    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

impl EventScheduler for AsyncEventScheduler {
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
