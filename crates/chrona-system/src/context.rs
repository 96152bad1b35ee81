//! Per-dispatch context built by the system scheduler.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use chrona_kernel::{ACTION_CONTEXT_CLOCK_KEY, ActionContext, Clock, ContextValue, FrozenClock};

/// Context for a wall-clock dispatch.
///
/// Carries a clock frozen at the event's due-time and the submission's
/// cancellation token. There is never a latch: the wall clock advances on its
/// own, so there is no event loop to hold back —
/// `done_scheduling_new_events` is a no-op and the latch key resolves to
/// nothing.
pub struct SystemActionContext {
    clock: Arc<FrozenClock>,
    cancellation: CancellationToken,
}

impl SystemActionContext {
    pub fn new(clock: FrozenClock, cancellation: CancellationToken) -> Self {
        Self {
            clock: Arc::new(clock),
            cancellation,
        }
    }
}

impl ActionContext for SystemActionContext {
    fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    fn done_scheduling_new_events(&self) {
        // No event loop to release.
    }

    fn value(&self, key: &str) -> Option<ContextValue> {
        match key {
            ACTION_CONTEXT_CLOCK_KEY => {
                Some(ContextValue::Clock(Arc::clone(&self.clock) as Arc<dyn Clock>))
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
