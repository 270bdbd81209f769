//! Run statistics derived from the event stream.

use std::fmt;
use std::time::Duration;

use crate::run::{Event, Outcome, Visit};
use crate::sink::EventSink;

/// Running statistics of one search, built only from its events.
///
/// Telemetry never influences the search; a run without it finds the same
/// path in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Telemetry {
    /// Latest expansion count reported.
    pub expansions: usize,
    /// Number of visitation events seen.
    pub visited: usize,
    /// Latest elapsed time reported.
    pub elapsed: Duration,
    /// Cells on the found path, once terminated with success.
    pub path_len: Option<usize>,
    /// `Some(found)` once the run has terminated.
    pub found: Option<bool>,
}

impl Telemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate a sequence of events.
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a Event>) -> Self {
        let mut t = Self::new();
        for e in events {
            t.observe(e);
        }
        t
    }

    /// Fold one event into the statistics.
    pub fn observe(&mut self, event: &Event) {
        self.on_event(event);
    }

    pub fn is_finished(&self) -> bool {
        self.found.is_some()
    }

    /// Snapshot in the shape of a status panel.
    pub fn stats(&self) -> Stats {
        Stats {
            nodes: self.expansions,
            path_len: self.path_len,
            elapsed_ms: self.elapsed.as_millis(),
        }
    }
}

impl EventSink for Telemetry {
    fn on_visit(&mut self, visit: &Visit) {
        self.visited += 1;
        self.expansions = visit.expansions;
        self.elapsed = visit.elapsed;
    }

    fn on_finish(&mut self, outcome: &Outcome) {
        self.expansions = outcome.expansions();
        self.elapsed = outcome.elapsed();
        self.path_len = outcome.path_len();
        self.found = Some(outcome.is_found());
    }
}

/// Status-line statistics: expanded nodes, path length, elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub nodes: usize,
    pub path_len: Option<usize>,
    pub elapsed_ms: u128,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nodes: {}  Path: ", self.nodes)?;
        match self.path_len {
            Some(n) => write!(f, "{n}")?,
            None => f.write_str("-")?,
        }
        write!(f, "  Time: {} ms", self.elapsed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::Point;

    fn visit(x: i32, expansions: usize) -> Event {
        Event::Visited(Visit {
            cell: Point::new(x, 0),
            expansions,
            elapsed: Duration::from_millis(expansions as u64),
        })
    }

    #[test]
    fn aggregates_visits_and_outcome() {
        let events = vec![
            visit(1, 2),
            visit(2, 3),
            Event::Finished(Outcome::PathFound {
                path: vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0), Point::new(3, 0)],
                expansions: 3,
                elapsed: Duration::from_millis(12),
            }),
        ];
        let t = Telemetry::from_events(&events);
        assert_eq!(t.visited, 2);
        assert_eq!(t.expansions, 3);
        assert_eq!(t.path_len, Some(4));
        assert_eq!(t.found, Some(true));
        assert_eq!(t.stats().to_string(), "Nodes: 3  Path: 4  Time: 12 ms");
    }

    #[test]
    fn running_values_before_termination() {
        let mut t = Telemetry::new();
        t.observe(&visit(1, 2));
        assert!(!t.is_finished());
        assert_eq!(t.expansions, 2);
        assert_eq!(t.elapsed, Duration::from_millis(2));
        assert_eq!(t.stats().path_len, None);
    }

    #[test]
    fn exhausted_has_no_path() {
        let mut t = Telemetry::new();
        t.observe(&Event::Finished(Outcome::Exhausted {
            expansions: 7,
            elapsed: Duration::ZERO,
        }));
        assert_eq!(t.found, Some(false));
        assert_eq!(t.stats().to_string(), "Nodes: 7  Path: -  Time: 0 ms");
    }
}
