//! A miniature piece of "production code" written against the kernel
//! contracts only.
//!
//! The register knows nothing about simulated or system schedulers; the
//! scenario tests drive the very same type with both, which is the whole
//! point of the library.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::TimeDelta;
use tokio_util::sync::CancellationToken;

use chrona_kernel::{Action, ActionContext, EventScheduler};

/// A counter that bumps itself once a minute on whatever scheduler it is
/// given.
#[derive(Default)]
pub struct Register {
    counter: AtomicU32,
}

impl Register {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn counter(&self) -> u32 {
        self.counter.load(Ordering::SeqCst)
    }

    /// Submit the once-a-minute increment for `register` to `scheduler`.
    pub fn increment_every_minute(
        register: &Arc<Self>,
        scheduler: &dyn EventScheduler,
        cancellation: CancellationToken,
    ) {
        scheduler.perform_repeatedly(
            Arc::clone(register) as Arc<dyn Action>,
            None,
            TimeDelta::minutes(1),
            cancellation,
        );
    }
}

#[async_trait]
impl Action for Register {
    async fn perform(&self, _ctx: Box<dyn ActionContext>) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }
}
