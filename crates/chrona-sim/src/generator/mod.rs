//! Lazy event generators.
//!
//! A generator is a lazy stream producing a monotonic, possibly infinite
//! sequence of [`Event`]s. The combinator drives generators exclusively
//! through this trait, so callers may register their own implementations via
//! `add_generator` alongside the built-in single and periodic ones.

use crate::event::Event;

mod periodic;
mod single;

pub use periodic::PeriodicEventGenerator;
pub use single::SingleEventGenerator;

/// A lazy, time-ordered stream of events.
///
/// # Contract
///
/// - `peek` is non-destructive and may be called repeatedly.
/// - `pop` hands off the peeked event and advances the stream.
/// - Due-times yielded by successive pops are non-decreasing.
/// - Once `finished` returns `true` it stays `true`, and `peek`/`pop` must
///   not be called any more: both panic with the
///   [`GeneratorFinished`](chrona_kernel::SchedulerError::GeneratorFinished)
///   message. The combinator never calls them on a finished generator; such
///   a panic in the wild signals a bug, not an expected condition.
pub trait EventGenerator: Send + Sync {
    /// The next event, without advancing the stream.
    fn peek(&self) -> Event;

    /// The next event, advancing the stream past it.
    fn pop(&mut self) -> Event;

    /// Whether the stream has run dry (exhausted, past its bound, or
    /// cancelled).
    fn finished(&self) -> bool;
}
