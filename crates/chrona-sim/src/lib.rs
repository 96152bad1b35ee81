//! Simulated virtual-time event schedulers.
//!
//! This crate implements the `chrona-kernel` contracts against a clock that
//! only moves when a test asks it to. Submissions are wrapped in lazy event
//! generators, merged into one time-sorted stream by the
//! [`EventCombinator`](combinator::EventCombinator), and dispatched by one of
//! two driving disciplines:
//!
//! - [`SerialEventScheduler`](scheduler::SerialEventScheduler) runs every
//!   action inline on the caller's task — strictly deterministic, including
//!   completion order.
//! - [`AsyncEventScheduler`](scheduler::AsyncEventScheduler) launches every
//!   action on its own worker task; dispatch order stays deterministic,
//!   completion order does not. An action that schedules follow-up events
//!   from inside its body is wrapped in
//!   [`SchedulingAction`](scheduling_action::SchedulingAction) so the event
//!   loop waits for its submissions before advancing.
//!
//! Both schedulers advance their clock to each event's due-time before
//! dispatching it, and hand the action a frozen snapshot of that instant.

// virtual clock
pub mod clock;
pub use clock::SimulatedClock;

// event: action + due-time + cancellation
pub mod event;
pub use event::Event;

// lazy event generators
pub mod generator;
pub use generator::{EventGenerator, PeriodicEventGenerator, SingleEventGenerator};

// merge of all generators into one time-sorted stream
pub mod combinator;
pub use combinator::EventCombinator;

// per-dispatch context implementation
pub mod context;
pub use context::SimulatedActionContext;

// adapter marking actions that schedule from inside their body
pub mod scheduling_action;
pub use scheduling_action::SchedulingAction;

// the two driving disciplines
pub mod scheduler;
pub use scheduler::{AsyncEventScheduler, SerialEventScheduler};

#[cfg(test)]
pub(crate) mod testutil;
