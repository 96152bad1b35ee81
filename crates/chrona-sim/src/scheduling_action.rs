//! Adapter marking an action that schedules from inside its own body.

use std::sync::Arc;

use async_trait::async_trait;

use chrona_kernel::{Action, ActionContext, Latch};

/// Wraps an action that submits further events to the scheduler that invoked
/// it, and that relies on those events being visible to the event loop before
/// the loop advances further.
///
/// The wrapper carries a fresh single-use [`Latch`]. The async scheduler
/// recognizes the wrapper through [`Action::scheduling_latch`], launches the
/// worker, and parks on the latch until the action calls
/// `done_scheduling_new_events()` — exactly once — on its context. The serial
/// scheduler runs actions inline, so it ignores the latch; wrapping is
/// harmless there.
///
/// One wrapper backs one dispatch: the latch does not reset.
pub struct SchedulingAction {
    action: Arc<dyn Action>,
    latch: Arc<Latch>,
}

impl SchedulingAction {
    pub fn new(action: Arc<dyn Action>) -> Self {
        Self {
            action,
            latch: Arc::new(Latch::new()),
        }
    }

    /// The latch the event loop will park on.
    pub fn latch(&self) -> Arc<Latch> {
        Arc::clone(&self.latch)
    }
}

#[async_trait]
impl Action for SchedulingAction {
    async fn perform(&self, ctx: Box<dyn ActionContext>) {
        self.action.perform(ctx).await;
    }

    fn scheduling_latch(&self) -> Option<Arc<Latch>> {
        Some(Arc::clone(&self.latch))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
