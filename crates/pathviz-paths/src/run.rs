//! The step-driven search engine: [`Pathfinder`], [`Run`] and the events a
//! run produces.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use pathviz_core::{Grid, Point};

use crate::astar::Astar;
use crate::bfs::Bfs;
use crate::dfs::Dfs;
use crate::error::{Endpoint, SearchError};
use crate::path;
use crate::sink::EventSink;
use crate::state::SearchState;
use crate::strategy::{SearchConfig, Strategy};

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// One expanded cell, with the run's statistics at that moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Visit {
    pub cell: Point,
    /// Expansions so far, this one and the start cell included.
    pub expansions: usize,
    pub elapsed: Duration,
}

/// Terminal result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The goal was reached. `path` runs from start to goal inclusive.
    PathFound {
        path: Vec<Point>,
        expansions: usize,
        elapsed: Duration,
    },
    /// The frontier emptied without reaching the goal.
    Exhausted { expansions: usize, elapsed: Duration },
}

impl Outcome {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::PathFound { .. })
    }

    /// The route, if one was found.
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            Self::PathFound { path, .. } => Some(path),
            Self::Exhausted { .. } => None,
        }
    }

    /// Number of cells on the route, both ends included.
    pub fn path_len(&self) -> Option<usize> {
        self.path().map(<[Point]>::len)
    }

    /// Number of steps along the route (`path_len - 1`).
    pub fn path_cost(&self) -> Option<usize> {
        self.path_len().map(|n| n.saturating_sub(1))
    }

    pub fn expansions(&self) -> usize {
        match self {
            Self::PathFound { expansions, .. } | Self::Exhausted { expansions, .. } => *expansions,
        }
    }

    pub fn elapsed(&self) -> Duration {
        match self {
            Self::PathFound { elapsed, .. } | Self::Exhausted { elapsed, .. } => *elapsed,
        }
    }
}

/// An item of a run's event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    Visited(Visit),
    Finished(Outcome),
}

// ---------------------------------------------------------------------------
// Frontier dispatch
// ---------------------------------------------------------------------------

/// Result of one dequeue cycle of a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Advance {
    /// The cell was taken off the frontier and its neighbours examined.
    Expanded(usize),
    /// The dequeued entry was a duplicate (DFS) or stale (A*).
    Discarded,
    /// The goal was dequeued.
    Reached,
    /// The frontier is empty.
    Exhausted,
}

#[derive(Debug)]
enum Frontier {
    Bfs(Bfs),
    Dfs(Dfs),
    Astar(Astar),
}

impl Frontier {
    fn new(strategy: Strategy, goal: Point) -> Self {
        match strategy {
            Strategy::Bfs => Self::Bfs(Bfs::default()),
            Strategy::Dfs => Self::Dfs(Dfs::default()),
            Strategy::Astar => Self::Astar(Astar::new(goal)),
        }
    }

    fn seed(&mut self, state: &mut SearchState, start: usize) {
        match self {
            Self::Bfs(f) => f.seed(state, start),
            Self::Dfs(f) => f.seed(state, start),
            Self::Astar(f) => f.seed(state, start),
        }
    }

    fn advance(&mut self, grid: &Grid, state: &mut SearchState, goal: usize) -> Advance {
        match self {
            Self::Bfs(f) => f.advance(grid, state, goal),
            Self::Dfs(f) => f.advance(grid, state, goal),
            Self::Astar(f) => f.advance(grid, state, goal),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Bfs(f) => f.len(),
            Self::Dfs(f) => f.len(),
            Self::Astar(f) => f.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Pathfinder
// ---------------------------------------------------------------------------

/// Entry point of the engine: owns a [`SearchState`] and hands it to one
/// [`Run`] at a time.
///
/// Cloning a `Pathfinder` yields another handle to the **same** state, so
/// every clone observes the single-run restriction.
#[derive(Debug, Clone)]
pub struct Pathfinder {
    state: Rc<RefCell<SearchState>>,
    /// Set while a run holds the state. Kept outside the `RefCell` so a run
    /// can always release it, even while the state is borrowed.
    active: Rc<Cell<bool>>,
}

impl Pathfinder {
    /// Create a pathfinder for grids of up to `width × height` cells.
    pub fn new(width: i32, height: i32) -> Self {
        Self::from_state(SearchState::new(width, height))
    }

    pub fn for_grid(grid: &Grid) -> Self {
        Self::from_state(SearchState::for_grid(grid))
    }

    pub fn from_state(state: SearchState) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
            active: Rc::new(Cell::new(false)),
        }
    }

    /// Whether a run currently owns the state.
    pub fn is_busy(&self) -> bool {
        self.active.get() || self.state.try_borrow().is_err()
    }

    /// Inspect the search state, typically after a run has finished.
    pub fn with_state<R>(&self, f: impl FnOnce(&SearchState) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Start a run whose events are only returned from [`Run::step`].
    pub fn start<'g>(
        &self,
        grid: &'g Grid,
        strategy: Strategy,
        start: Point,
        goal: Point,
    ) -> Result<Run<'g>, SearchError> {
        self.start_with_sink(grid, strategy, start, goal, ())
    }

    /// Start a run that also reports every event to `sink`.
    ///
    /// Preconditions are checked before anything is touched: the state must
    /// be large enough for `grid`, both endpoints must be in bounds and open,
    /// and no other run may own the state.
    pub fn start_with_sink<'g, S: EventSink>(
        &self,
        grid: &'g Grid,
        strategy: Strategy,
        start: Point,
        goal: Point,
        sink: S,
    ) -> Result<Run<'g, S>, SearchError> {
        let checked = self.check(grid, start, goal);
        let (start_idx, goal_idx) = match checked {
            Ok(indices) => indices,
            Err(e) => {
                log::warn!("{strategy} run from {start} to {goal} rejected: {e}");
                return Err(e);
            }
        };

        let mut frontier = Frontier::new(strategy, goal);
        {
            let mut st = self.state.borrow_mut();
            st.reset(grid);
            if start_idx != goal_idx {
                frontier.seed(&mut st, start_idx);
            }
        }
        log::debug!(
            "{strategy} run from {start} to {goal} on {}x{} grid",
            grid.width(),
            grid.height()
        );

        Ok(Run {
            grid,
            lease: Lease::take(&self.state, &self.active),
            strategy,
            start,
            goal,
            goal_idx,
            frontier,
            expansions: 0,
            clock: Instant::now(),
            outcome: None,
            failure: None,
            sink,
        })
    }

    fn check(&self, grid: &Grid, start: Point, goal: Point) -> Result<(usize, usize), SearchError> {
        let st = self.state.try_borrow().map_err(|_| SearchError::Busy)?;
        if st.capacity() < grid.len() {
            return Err(SearchError::StateTooSmall {
                needed: grid.len(),
                capacity: st.capacity(),
            });
        }
        let locate = |which, at| grid.index(at).ok_or(SearchError::OutOfBounds { which, at });
        let start_idx = locate(Endpoint::Start, start)?;
        let goal_idx = locate(Endpoint::Goal, goal)?;
        if grid.is_blocked(start) {
            return Err(SearchError::Blocked {
                which: Endpoint::Start,
                at: start,
            });
        }
        if grid.is_blocked(goal) {
            return Err(SearchError::Blocked {
                which: Endpoint::Goal,
                at: goal,
            });
        }
        if self.active.get() {
            return Err(SearchError::Busy);
        }
        Ok((start_idx, goal_idx))
    }

    /// Run `config.strategy` to completion, or until `config.max_steps`
    /// steps have been taken (`Ok(None)`).
    pub fn run_config(
        &self,
        grid: &Grid,
        config: &SearchConfig,
        start: Point,
        goal: Point,
    ) -> Result<Option<Outcome>, SearchError> {
        let mut run = self.start(grid, config.strategy, start, goal)?;
        match config.max_steps {
            Some(max) => run.finish_within(max),
            None => run.finish().map(Some),
        }
    }
}

/// Run one search to completion on a fresh state.
pub fn search(grid: &Grid, strategy: Strategy, start: Point, goal: Point) -> Result<Outcome, SearchError> {
    Pathfinder::for_grid(grid)
        .start(grid, strategy, start, goal)?
        .finish()
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// A run's claim on the shared state. Dropping it clears the active flag.
#[derive(Debug)]
struct Lease {
    state: Rc<RefCell<SearchState>>,
    active: Rc<Cell<bool>>,
    held: bool,
}

impl Lease {
    fn take(state: &Rc<RefCell<SearchState>>, active: &Rc<Cell<bool>>) -> Self {
        active.set(true);
        Self {
            state: Rc::clone(state),
            active: Rc::clone(active),
            held: true,
        }
    }

    fn release(&mut self) {
        if self.held {
            self.held = false;
            self.active.set(false);
        }
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        self.release();
    }
}

/// A search in progress.
///
/// A run exclusively owns its pathfinder's state until it terminates or is
/// dropped; dropping a run part-way is how a driver cancels it. The grid is
/// borrowed for the run's whole lifetime, so it cannot be edited mid-run.
#[derive(Debug)]
pub struct Run<'g, S: EventSink = ()> {
    grid: &'g Grid,
    lease: Lease,
    strategy: Strategy,
    start: Point,
    goal: Point,
    goal_idx: usize,
    frontier: Frontier,
    expansions: usize,
    clock: Instant,
    outcome: Option<Outcome>,
    failure: Option<SearchError>,
    sink: S,
}

impl<S: EventSink> Run<'_, S> {
    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    /// Cells expanded so far, the start cell included.
    #[inline]
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Wall-clock time since the run started.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// The terminal outcome, once reached.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Entries currently on the frontier (for A*, stale entries included).
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Borrow the event sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the run and return its sink, releasing the state.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Advance until the next event.
    ///
    /// Each call performs as many dequeue cycles as it takes to produce one
    /// [`Event::Visited`] or the terminal [`Event::Finished`]; expanding the
    /// start cell and skipping duplicate or stale frontier entries produce
    /// no event. After the terminal event every call returns `Ok(None)`;
    /// after an error every call returns that error again.
    pub fn step(&mut self) -> Result<Option<Event>, SearchError> {
        if let Some(e) = &self.failure {
            return Err(e.clone());
        }
        if self.outcome.is_some() {
            return Ok(None);
        }
        if self.start == self.goal {
            let path = vec![self.start];
            return Ok(Some(self.conclude(Some(path))));
        }

        loop {
            let advance = {
                let mut st = self.lease.state.borrow_mut();
                self.frontier.advance(self.grid, &mut st, self.goal_idx)
            };
            match advance {
                Advance::Discarded => continue,
                Advance::Expanded(ci) => {
                    self.expansions += 1;
                    let cell = self.lease.state.borrow().point(ci);
                    if cell == self.start {
                        continue;
                    }
                    let visit = Visit {
                        cell,
                        expansions: self.expansions,
                        elapsed: self.elapsed(),
                    };
                    self.sink.on_visit(&visit);
                    return Ok(Some(Event::Visited(visit)));
                }
                Advance::Reached => {
                    let traced =
                        path::reconstruct(&self.lease.state.borrow(), self.start, self.goal);
                    return match traced {
                        Ok(route) => Ok(Some(self.conclude(Some(route)))),
                        Err(e) => {
                            log::error!(
                                "{} run from {} to {}: {e}",
                                self.strategy,
                                self.start,
                                self.goal
                            );
                            self.lease.release();
                            self.failure = Some(e.clone());
                            Err(e)
                        }
                    };
                }
                Advance::Exhausted => return Ok(Some(self.conclude(None))),
            }
        }
    }

    /// Drive the run to its terminal outcome.
    pub fn finish(&mut self) -> Result<Outcome, SearchError> {
        loop {
            if let Some(outcome) = &self.outcome {
                return Ok(outcome.clone());
            }
            self.step()?;
        }
    }

    /// Take at most `max_steps` steps. Returns the outcome if the run
    /// terminated within the budget (or had already terminated), `None`
    /// otherwise. The run can be resumed afterwards.
    pub fn finish_within(&mut self, max_steps: usize) -> Result<Option<Outcome>, SearchError> {
        for _ in 0..max_steps {
            if self.outcome.is_some() {
                break;
            }
            self.step()?;
        }
        Ok(self.outcome.clone())
    }

    fn conclude(&mut self, route: Option<Vec<Point>>) -> Event {
        let expansions = self.expansions;
        let elapsed = self.elapsed();
        let outcome = match route {
            Some(path) => Outcome::PathFound {
                path,
                expansions,
                elapsed,
            },
            None => Outcome::Exhausted {
                expansions,
                elapsed,
            },
        };
        match outcome.path_len() {
            Some(len) => log::debug!(
                "{} found a {len}-cell path after {expansions} expansions",
                self.strategy
            ),
            None => log::debug!(
                "{} exhausted the frontier after {expansions} expansions",
                self.strategy
            ),
        }
        self.lease.release();
        self.sink.on_finish(&outcome);
        self.outcome = Some(outcome.clone());
        Event::Finished(outcome)
    }
}

impl<S: EventSink> Iterator for Run<'_, S> {
    type Item = Result<Event, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        // The error is yielded once; the iterator ends after it.
        if self.failure.is_some() {
            return None;
        }
        self.step().transpose()
    }
}
