//! The driving disciplines.
//!
//! Both schedulers own a [`SimulatedClock`](crate::clock::SimulatedClock) and
//! an [`EventCombinator`](crate::combinator::EventCombinator) and advance
//! virtual time the same way: while the earliest pending event is due within
//! the forwarded span, pop it, move the clock to its due-time, dispatch it,
//! and look again — so actions that submit follow-ups contribute to the same
//! `forward` call. They differ only in *how* an action runs: inline on the
//! caller (serial) or on a fresh worker task (async).

mod asynchronous;
mod serial;

pub use asynchronous::AsyncEventScheduler;
pub use serial::SerialEventScheduler;
