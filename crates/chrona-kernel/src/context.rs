//! Per-dispatch context handed to an action.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::clock::Clock;
use crate::latch::Latch;

/// Key under which [`ActionContext::value`] exposes the dispatch clock.
pub const ACTION_CONTEXT_CLOCK_KEY: &str = "chrona.action_context.clock";

/// Key under which [`ActionContext::value`] exposes the scheduling latch,
/// when one is attached to the dispatch.
pub const ACTION_CONTEXT_LATCH_KEY: &str = "chrona.action_context.latch";

/// A value returned by the opaque key/value lookup on [`ActionContext`].
#[derive(Clone)]
pub enum ContextValue {
    /// The clock snapshot of the dispatch.
    Clock(Arc<dyn Clock>),
    /// The latch coordinating a scheduling-action with the event loop.
    Latch(Arc<Latch>),
}

impl ContextValue {
    /// The contained clock, if this value is one.
    pub fn as_clock(&self) -> Option<Arc<dyn Clock>> {
        match self {
            ContextValue::Clock(clock) => Some(Arc::clone(clock)),
            _ => None,
        }
    }

    /// The contained latch, if this value is one.
    pub fn as_latch(&self) -> Option<Arc<Latch>> {
        match self {
            ContextValue::Latch(latch) => Some(Arc::clone(latch)),
            _ => None,
        }
    }
}

/// Everything an action may observe about the dispatch that invoked it.
///
/// A context is created by the scheduler at the moment it is about to invoke
/// an action and becomes unreachable when the action returns. It carries:
///
/// - a [`Clock`] snapshot pinned to the due-time of the originating event,
/// - the [`CancellationToken`] of the originating submission (not a new one),
/// - optionally, the latch of a scheduling-action dispatch.
pub trait ActionContext: Send + Sync {
    /// The clock snapshot taken at dispatch. It never observes later advances.
    fn clock(&self) -> &dyn Clock;

    /// The cancellation token associated with the originating submission.
    ///
    /// A long-running action that wants to stop early once its submission is
    /// cancelled checks this token itself; the scheduler never aborts an
    /// action that is already running.
    fn cancellation(&self) -> &CancellationToken;

    /// Signal that this action has finished submitting new events.
    ///
    /// With a latch attached, the event loop is parked until this is called;
    /// a second call is a contract violation and panics. Without a latch this
    /// is a no-op, so ordinary actions may call it unconditionally.
    fn done_scheduling_new_events(&self);

    /// Opaque key/value lookup.
    ///
    /// Recognized keys: [`ACTION_CONTEXT_CLOCK_KEY`] returns the clock,
    /// [`ACTION_CONTEXT_LATCH_KEY`] returns the latch (`None` when the
    /// dispatch carries none). Unknown keys return `None`.
    fn value(&self, key: &str) -> Option<ContextValue>;
}
