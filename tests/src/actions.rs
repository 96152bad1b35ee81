//! Hand-rolled action doubles used across the scenario tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use chrona_kernel::{Action, ActionContext};

/// Records, for every dispatch, the clock reading the action observed —
/// in completion order — plus a total invocation count.
#[derive(Default)]
pub struct RecordingAction {
    observed: Mutex<Vec<DateTime<Utc>>>,
    count: AtomicU32,
}

impl RecordingAction {
    pub fn arc() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Clock readings observed so far, in completion order.
    pub fn observed(&self) -> Vec<DateTime<Utc>> {
        self.observed.lock().clone()
    }

    pub fn count(&self) -> u32 {
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

/// Panics with its message on every dispatch.
pub struct PanickingAction {
    message: &'static str,
}

impl PanickingAction {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

#[async_trait]
impl Action for PanickingAction {
    async fn perform(&self, _ctx: Box<dyn ActionContext>) {
        panic!("{}", self.message);
    }
}
