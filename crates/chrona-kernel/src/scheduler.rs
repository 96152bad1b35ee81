//! Scheduler kernel contract.
//!
//! # Architecture
//!
//! This module defines the submission surface that production code depends
//! on. Per chrona's kernel rules:
//!
//! - **Trait definitions** live here in `chrona-kernel`.
//! - **Concrete implementations** (`SerialEventScheduler`,
//!   `AsyncEventScheduler`, `SystemEventScheduler`) live in `chrona-sim` and
//!   `chrona-system`.
//! - The kernel must never depend on those crates.
//!
//! Submission methods are synchronous: they only register work, they never
//! run it. The simulated schedulers run registered work when a test drives
//! them with `forward`; the system scheduler runs it when the wall clock
//! says so.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tokio_util::sync::CancellationToken;

use crate::action::Action;
use crate::clock::Clock;

/// A service that dispatches actions at points in time.
///
/// Every scheduler is also a [`Clock`], so code holding a scheduler handle
/// reads the current time from the same source that will time its events.
///
/// Each submission carries a [`CancellationToken`]. Once the token is
/// cancelled, the submission stops producing events; an action that is
/// already running is not aborted (it may poll its own context if it wants to
/// stop early).
pub trait EventScheduler: Clock {
    /// Schedule `action` at the current time.
    ///
    /// On a simulated scheduler the action fires on the next `forward` call
    /// of any span, including `forward(0)`; on the system scheduler it runs
    /// immediately.
    fn perform_now(&self, action: Arc<dyn Action>, cancellation: CancellationToken);

    /// Schedule `action` once, `duration` from now.
    ///
    /// A non-positive `duration` is legal: the event is due immediately and
    /// fires on the very next dispatch opportunity.
    fn perform_after(
        &self,
        action: Arc<dyn Action>,
        duration: TimeDelta,
        cancellation: CancellationToken,
    );

    /// Schedule `action` every `interval`, starting one interval from now.
    ///
    /// The first event fires at `now + interval`, not at `now`. With an
    /// `until` bound, events fire strictly before `until`.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is not positive, or if `until` is given and does
    /// not leave room for at least one event
    /// (`until > now && interval < until - now` must hold).
    fn perform_repeatedly(
        &self,
        action: Arc<dyn Action>,
        until: Option<DateTime<Utc>>,
        interval: TimeDelta,
        cancellation: CancellationToken,
    );
}
