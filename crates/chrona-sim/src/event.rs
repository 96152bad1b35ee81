//! A scheduled occurrence of an action.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use chrona_kernel::Action;

/// An immutable (action, due-time, cancellation) triple.
///
/// Events are owned by the generator that will yield them and handed off
/// exclusively when popped. The cancellation token is the one given with the
/// originating submission; cloning an event shares the same token state.
#[derive(Clone)]
pub struct Event {
    action: Arc<dyn Action>,
    due_time: DateTime<Utc>,
    cancellation: CancellationToken,
}

impl Event {
    pub fn new(
        action: Arc<dyn Action>,
        due_time: DateTime<Utc>,
        cancellation: CancellationToken,
    ) -> Self {
        Self {
            action,
            due_time,
            cancellation,
        }
    }

    pub fn action(&self) -> &Arc<dyn Action> {
        &self.action
    }

    /// The virtual instant at which this event is meant to fire. Set at
    /// construction, never mutated.
    pub fn due_time(&self) -> DateTime<Utc> {
        self.due_time
    }

    /// The cancellation token of the originating submission.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("due_time", &self.due_time)
            .field("cancelled", &self.is_cancelled())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
