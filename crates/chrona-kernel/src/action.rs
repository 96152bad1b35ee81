//! The action capability: a unit of work a scheduler can dispatch.

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::ActionContext;
use crate::latch::Latch;

/// A unit of work submitted to an [`EventScheduler`](crate::EventScheduler).
///
/// `perform` receives the [`ActionContext`] of the dispatch. A panic inside
/// `perform` is treated as a test failure and propagated by the scheduler,
/// never swallowed.
#[async_trait]
pub trait Action: Send + Sync {
    /// Execute the action.
    async fn perform(&self, ctx: Box<dyn ActionContext>);

    /// Capability query: the latch of a scheduling-action, if this is one.
    ///
    /// An action whose body submits further events to the same scheduler, and
    /// which relies on those events being visible to the event loop before the
    /// loop advances further, is wrapped in `chrona-sim`'s `SchedulingAction`
    /// adapter; the adapter answers this query with its latch. Plain actions
    /// keep the default `None` and are dispatched without a rendezvous.
    fn scheduling_latch(&self) -> Option<Arc<Latch>> {
        None
    }
}
