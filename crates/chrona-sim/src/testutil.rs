//! Hand-rolled test doubles shared by the unit tests in this crate.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use chrona_kernel::{Action, ActionContext};

/// Records every dispatch: the clock reading each invocation observed, in
/// completion order, plus a total count.
#[derive(Default)]
pub(crate) struct RecordingAction {
    observed: Mutex<Vec<DateTime<Utc>>>,
    count: AtomicU32,
}

impl RecordingAction {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn observed(&self) -> Vec<DateTime<Utc>> {
        self.observed.lock().clone()
    }

    pub(crate) fn count(&self) -> u32 {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Action for RecordingAction {
    async fn perform(&self, ctx: Box<dyn ActionContext>) {
        self.observed.lock().push(ctx.clock().now());
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

/// An action that always panics with the given message.
pub(crate) struct PanickingAction {
    message: &'static str,
}

impl PanickingAction {
    pub(crate) fn new(message: &'static str) -> Self {
        Self { message }
    }
}

#[async_trait]
impl Action for PanickingAction {
    async fn perform(&self, _ctx: Box<dyn ActionContext>) {
        panic!("{}", self.message);
    }
}

pub(crate) fn recording() -> Arc<RecordingAction> {
    Arc::new(RecordingAction::new())
}
