//! A generator yielding exactly one event.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use chrona_kernel::{Action, SchedulerError};

use crate::event::Event;
use crate::generator::EventGenerator;

/// Yields one event at a fixed due-time, then is terminal.
///
/// Backs `perform_now` and `perform_after`: the scheduler wraps the submitted
/// action into one of these and registers it with its combinator.
pub struct SingleEventGenerator {
    event: Option<Event>,
}

impl SingleEventGenerator {
    pub fn new(
        action: Arc<dyn Action>,
        due_time: DateTime<Utc>,
        cancellation: CancellationToken,
    ) -> Self {
        Self {
            event: Some(Event::new(action, due_time, cancellation)),
        }
    }
}

impl EventGenerator for SingleEventGenerator {
    fn peek(&self) -> Event {
        match &self.event {
            Some(event) if !event.is_cancelled() => event.clone(),
            _ => panic!("{}", SchedulerError::GeneratorFinished),
        }
    }

    fn pop(&mut self) -> Event {
        match self.event.take() {
            Some(event) if !event.is_cancelled() => event,
            _ => panic!("{}", SchedulerError::GeneratorFinished),
        }
    }

    fn finished(&self) -> bool {
        match &self.event {
            Some(event) => event.is_cancelled(),
            None => true,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
