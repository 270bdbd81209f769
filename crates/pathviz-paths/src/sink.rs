//! Consumers of the visitation event stream.
//!
//! A sink is handed to the engine when a run starts and is told about every
//! event as it is produced. The engine never calls into any other observer.

use std::sync::mpsc::Sender;

use crate::run::{Event, Outcome, Visit};

/// Receiver of search events. Both methods default to doing nothing.
pub trait EventSink {
    /// Called once per expanded cell (the start cell is never reported).
    fn on_visit(&mut self, _visit: &Visit) {}

    /// Called exactly once when the run terminates.
    fn on_finish(&mut self, _outcome: &Outcome) {}

    /// Dispatch an [`Event`] to the matching method.
    fn on_event(&mut self, event: &Event) {
        match event {
            Event::Visited(v) => self.on_visit(v),
            Event::Finished(o) => self.on_finish(o),
        }
    }
}

/// Discards every event.
impl EventSink for () {}

/// Records every event in order.
impl EventSink for Vec<Event> {
    fn on_visit(&mut self, visit: &Visit) {
        self.push(Event::Visited(*visit));
    }

    fn on_finish(&mut self, outcome: &Outcome) {
        self.push(Event::Finished(outcome.clone()));
    }
}

/// Forwards events over a channel. Once the receiver hangs up, events are
/// dropped silently.
impl EventSink for Sender<Event> {
    fn on_visit(&mut self, visit: &Visit) {
        let _ = self.send(Event::Visited(*visit));
    }

    fn on_finish(&mut self, outcome: &Outcome) {
        let _ = self.send(Event::Finished(outcome.clone()));
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn on_visit(&mut self, visit: &Visit) {
        (**self).on_visit(visit);
    }

    fn on_finish(&mut self, outcome: &Outcome) {
        (**self).on_finish(outcome);
    }
}
