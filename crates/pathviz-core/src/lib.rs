//! **pathviz-core** — grid index and level types for step-by-step
//! pathfinding visualization.
//!
//! This crate holds everything the search engine reads but never owns:
//! geometry primitives, the open/blocked [`Grid`], the text [`Level`]
//! format and a handful of preset levels.

pub mod geom;
pub mod grid;
pub mod level;
pub mod presets;

pub use geom::{Point, Range, manhattan};
pub use grid::Grid;
pub use level::{Level, LevelError};
