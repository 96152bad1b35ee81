//! Scheduling contracts for the chrona framework.
//!
//! Production code depends on this crate alone: it submits work through the
//! [`EventScheduler`](scheduler::EventScheduler) trait and reads time through
//! the [`Clock`](clock::Clock) trait, never caring whether it is driven by the
//! wall clock (`chrona-system`) or by a simulated clock that only moves when a
//! test says so (`chrona-sim`).
//!
//! Per chrona's kernel rules:
//!
//! - **Trait definitions** live here.
//! - **Concrete implementations** live in `chrona-sim` and `chrona-system`.
//! - The kernel must never depend on either of them.

// clock abstraction
pub mod clock;
pub use clock::{Clock, FrozenClock};

// action capability
pub mod action;
pub use action::Action;

// per-dispatch context
pub mod context;
pub use context::{
    ACTION_CONTEXT_CLOCK_KEY, ACTION_CONTEXT_LATCH_KEY, ActionContext, ContextValue,
};

// one-shot rendezvous between an action and the event loop
pub mod latch;
pub use latch::Latch;

// scheduler contract
pub mod scheduler;
pub use scheduler::EventScheduler;

// error module
pub mod error;
pub use error::SchedulerError;
