//! One-shot rendezvous between an action and the event loop.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

use crate::error::SchedulerError;

/// A single-use countdown latch initialized at one.
///
/// The asynchronous simulated scheduler launches a scheduling-action on its
/// own worker task and then parks on [`Latch::wait`]; the action calls
/// `done_scheduling_new_events()` (which counts this latch down) once all of
/// its submissions are in, and only then does the event loop look at the
/// combinator again. Exactly one signal, at most one waiter, no reset.
///
/// # Panics
///
/// [`Latch::count_down`] panics when called a second time.
#[derive(Debug, Default)]
pub struct Latch {
    released: AtomicBool,
    notify: Notify,
}

impl Latch {
    /// Create a latch with a count of one.
    pub fn new() -> Self {
        Self::default()
    }

    /// Release the latch, waking the waiter if one is parked.
    ///
    /// # Panics
    ///
    /// Panics if the latch was already released; it is single-use.
    pub fn count_down(&self) {
        if self.released.swap(true, Ordering::AcqRel) {
            panic!("{}", SchedulerError::LatchAlreadyReleased);
        }

        self.notify.notify_waiters();
    }

    /// Wait until the latch is released. Returns immediately if it already was.
    pub async fn wait(&self) {
        // Register interest before checking the flag, so a count_down landing
        // between the check and the await cannot be missed.
        let notified = self.notify.notified();

        if self.is_released() {
            return;
        }

        notified.await;
    }

    /// Whether `count_down` has been called.
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
