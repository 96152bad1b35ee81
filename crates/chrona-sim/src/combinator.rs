//! Merging a dynamic set of generators into one time-sorted stream.

use chrona_kernel::SchedulerError;

use crate::event::Event;
use crate::generator::EventGenerator;

/// Merges an arbitrary, growing population of [`EventGenerator`]s into a
/// single stream sorted by due-time.
///
/// Invariants:
///
/// - `active` is sorted non-decreasingly by `peek().due_time()`, using a
///   stable sort — generators submitted earlier win ties, and a periodic
///   generator re-sorted after a pop keeps its place ahead of later-inserted
///   equals.
/// - Finished generators never stay in `active`: they are drained into
///   `finished_pile` at the next operation that touches the set. A submission
///   whose cancellation fires is therefore dropped silently, never surfaced
///   as an error.
#[derive(Default)]
pub struct EventCombinator {
    active: Vec<Box<dyn EventGenerator>>,
    finished_pile: Vec<Box<dyn EventGenerator>>,
}

impl EventCombinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a generator, keeping `active` sorted. A generator that is
    /// already finished goes straight to the pile.
    pub fn add(&mut self, generator: Box<dyn EventGenerator>) {
        if generator.finished() {
            self.finished_pile.push(generator);
            return;
        }

        self.active.push(generator);
        self.sort_active();
    }

    /// The earliest pending event, without consuming it.
    ///
    /// # Panics
    ///
    /// Panics if the combinator is [`finished`](Self::finished).
    pub fn peek(&self) -> Event {
        match self.active.iter().find(|generator| !generator.finished()) {
            Some(generator) => generator.peek(),
            None => panic!("{}", SchedulerError::GeneratorFinished),
        }
    }

    /// Pop the earliest pending event, filing its generator into the pile if
    /// that pop exhausted it.
    ///
    /// # Panics
    ///
    /// Panics if the combinator is [`finished`](Self::finished).
    pub fn pop(&mut self) -> Event {
        self.drain_finished();

        if self.active.is_empty() {
            panic!("{}", SchedulerError::GeneratorFinished);
        }

        let next_event = self.active[0].pop();

        if self.active[0].finished() {
            let exhausted = self.active.remove(0);
            self.finished_pile.push(exhausted);
        }

        self.sort_active();

        next_event
    }

    /// Whether no pending events remain.
    pub fn finished(&self) -> bool {
        self.active.iter().all(|generator| generator.finished())
    }

    /// Number of generators still producing events. Test observability.
    pub fn active_len(&self) -> usize {
        self.active
            .iter()
            .filter(|generator| !generator.finished())
            .count()
    }

    fn drain_finished(&mut self) {
        let mut index = 0;
        while index < self.active.len() {
            if self.active[index].finished() {
                let finished = self.active.remove(index);
                self.finished_pile.push(finished);
            } else {
                index += 1;
            }
        }
    }

    fn sort_active(&mut self) {
        self.drain_finished();
        // Vec::sort_by_key is stable; ties keep their current relative order.
        self.active.sort_by_key(|generator| generator.peek().due_time());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
