//! Crate-level error type for chrona's scheduling contracts.
//!
//! Every variant of [`SchedulerError`] describes a contract violation: a
//! programmer bug that is detected eagerly and must halt the offending test.
//! Implementations therefore `panic!` with the variant's `Display` message
//! rather than returning it, the same way `tokio::time::interval` panics on a
//! zero period. Keeping the taxonomy as a typed enum keeps the messages
//! uniform across crates and lets tests match them with
//! `#[should_panic(expected = ...)]`.

use thiserror::Error;

/// All contract violations that the scheduling crates can raise.
///
/// Marked `#[non_exhaustive]` so that new variants can be added in future
/// minor releases without breaking callers that match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SchedulerError {
    /// A periodic submission was made with a zero or negative interval.
    #[error("interval must be greater than zero")]
    NonPositiveInterval,

    /// A periodic submission's `until` bound does not lie after its start.
    #[error("until must be after the schedule start")]
    UntilNotAfterStart,

    /// A periodic submission's interval does not fit between start and `until`,
    /// so not even the first event could fire.
    #[error("interval must be shorter than the span between start and until")]
    IntervalExceedsSpan,

    /// `peek` or `pop` was called on a generator that already reported
    /// `finished()`. Never expected in normal use; it signals a bug in the
    /// caller or in the combinator driving the generator.
    #[error("event generator is already finished")]
    GeneratorFinished,

    /// An attempt was made to move a simulated clock backwards.
    #[error("clock can only move forward")]
    ClockMovedBackwards,

    /// `done_scheduling_new_events` was called twice on a context that
    /// carries a latch. The latch is single-use.
    #[error("scheduling latch released more than once")]
    LatchAlreadyReleased,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
