use std::fmt;

use pathviz_core::Point;
use thiserror::Error;

/// Which end of a search a precondition failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// Errors reported by the search engine.
///
/// Running out of frontier is not an error; see [`Outcome::Exhausted`](crate::Outcome::Exhausted).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("{which} {at} is outside the grid")]
    OutOfBounds { which: Endpoint, at: Point },
    #[error("{which} {at} is blocked")]
    Blocked { which: Endpoint, at: Point },
    #[error("search state is already in use by another run")]
    Busy,
    #[error("search state holds {capacity} cells but the grid needs {needed}")]
    StateTooSmall { needed: usize, capacity: usize },
    /// The backpointer chain from the goal did not reach the start. This is
    /// an engine defect, never a property of the input grid.
    #[error("backpointer chain from {goal} broken after {steps} steps")]
    BrokenChain { goal: Point, steps: usize },
}

impl SearchError {
    /// Whether the error is a rejected precondition (as opposed to an
    /// internal consistency failure).
    pub fn is_precondition(&self) -> bool {
        !matches!(self, Self::BrokenChain { .. })
    }
}

/// Error returned when parsing a [`Strategy`](crate::Strategy) name fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy \u{201c}{0}\u{201d} (expected bfs, dfs or astar)")]
pub struct ParseStrategyError(pub String);
