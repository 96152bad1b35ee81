//! Per-dispatch context built by the simulated schedulers.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use chrona_kernel::{
    ACTION_CONTEXT_CLOCK_KEY, ACTION_CONTEXT_LATCH_KEY, ActionContext, Clock, ContextValue,
    FrozenClock, Latch,
};

/// What an action dispatched by a simulated scheduler gets to see: the clock
/// snapshot pinned to its event's due-time, the cancellation token of its
/// originating submission, and, for a scheduling-action under the async
/// scheduler, the latch parking the event loop.
pub struct SimulatedActionContext {
    clock: Arc<FrozenClock>,
    cancellation: CancellationToken,
    latch: Option<Arc<Latch>>,
}

impl SimulatedActionContext {
    pub fn new(
        clock: FrozenClock,
        cancellation: CancellationToken,
        latch: Option<Arc<Latch>>,
    ) -> Self {
        Self {
            clock: Arc::new(clock),
            cancellation,
            latch,
        }
    }
}

impl ActionContext for SimulatedActionContext {
    fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    fn done_scheduling_new_events(&self) {
        if let Some(latch) = &self.latch {
            latch.count_down();
        }
    }

    fn value(&self, key: &str) -> Option<ContextValue> {
        match key {
            ACTION_CONTEXT_CLOCK_KEY => {
                Some(ContextValue::Clock(Arc::clone(&self.clock) as Arc<dyn Clock>))
            }
            ACTION_CONTEXT_LATCH_KEY => self.latch.as_ref().map(|latch| {
                ContextValue::Latch(Arc::clone(latch))
            }),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
