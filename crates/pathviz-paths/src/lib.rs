//! Step-by-step grid search for visualization.
//!
//! This crate runs **breadth-first search**, **depth-first search** and
//! **A\*** on a [`Grid`](pathviz_core::Grid) one expansion at a time, so a
//! caller can replay the exploration at whatever pace it likes:
//!
//! - [`Pathfinder`] owns the reusable [`SearchState`] and starts runs.
//! - [`Run::step`] yields one [`Event`] per expanded cell and finally an
//!   [`Outcome`] (`PathFound` or `Exhausted`).
//! - An [`EventSink`] passed at start receives every event as it happens;
//!   [`Telemetry`] is one such sink.
//! - [`reconstruct`] turns the terminal backpointers into a route.
//!
//! ```
//! use pathviz_core::{Grid, Point};
//! use pathviz_paths::{Pathfinder, Strategy};
//!
//! let grid = Grid::new(5, 5);
//! let finder = Pathfinder::for_grid(&grid);
//! let mut run = finder
//!     .start(&grid, Strategy::Bfs, Point::new(0, 0), Point::new(4, 4))
//!     .unwrap();
//! let outcome = run.finish().unwrap();
//! assert_eq!(outcome.path_len(), Some(9));
//! ```

mod astar;
mod bfs;
mod dfs;
mod error;
mod path;
mod run;
mod sink;
mod state;
mod strategy;
mod telemetry;

pub use error::{Endpoint, ParseStrategyError, SearchError};
pub use path::reconstruct;
pub use pathviz_core::manhattan;
pub use run::{Event, Outcome, Pathfinder, Run, Visit, search};
pub use sink::EventSink;
pub use state::SearchState;
pub use strategy::{SearchConfig, Strategy};
pub use telemetry::{Stats, Telemetry};
