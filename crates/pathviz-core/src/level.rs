//! Text level format.
//!
//! A level is drawn one row per line:
//!
//! ```text
//! S..#....
//! .#.#.##.
//! .#...#.G
//! ```
//!
//! `#` is a blocked cell, `.` an open one, `S` the start and `G` the goal
//! (both open). Every line must have the same width. Leading and trailing
//! blank lines are ignored; trailing whitespace on a line is not.

use std::fmt;

use thiserror::Error;

use crate::geom::Point;
use crate::grid::Grid;

pub const WALL: char = '#';
pub const FLOOR: char = '.';
pub const START: char = 'S';
pub const GOAL: char = 'G';
pub const PATH: char = '*';
pub const EXPLORED: char = 'o';

/// Errors produced by [`Level::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("level is empty")]
    Empty,
    #[error("line {line} has width {found}, expected {expected}")]
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid character \u{201c}{ch}\u{201d} at {pos}")]
    InvalidChar { ch: char, pos: Point },
    #[error("second \u{201c}{ch}\u{201d} marker at {pos}")]
    DuplicateMarker { ch: char, pos: Point },
}

/// A grid plus optional start and goal markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub grid: Grid,
    pub start: Option<Point>,
    pub goal: Option<Point>,
}

impl Level {
    /// Parse a level from its text form.
    pub fn parse(s: &str) -> Result<Self, LevelError> {
        let lines: Vec<&str> = s
            .trim_matches(|c| c == '\n' || c == '\r')
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .collect();
        if lines.is_empty() || lines[0].is_empty() {
            return Err(LevelError::Empty);
        }

        let width = lines[0].chars().count();
        for (i, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(LevelError::InconsistentWidth {
                    line: i,
                    expected: width,
                    found,
                });
            }
        }

        let mut grid = Grid::new(width as i32, lines.len() as i32);
        let mut start = None;
        let mut goal = None;
        for (y, line) in lines.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                match ch {
                    WALL => {
                        grid.set_blocked(pos, true);
                    }
                    FLOOR => {}
                    START | GOAL => {
                        let slot = if ch == START { &mut start } else { &mut goal };
                        if slot.is_some() {
                            return Err(LevelError::DuplicateMarker { ch, pos });
                        }
                        *slot = Some(pos);
                    }
                    _ => return Err(LevelError::InvalidChar { ch, pos }),
                }
            }
        }

        Ok(Self { grid, start, goal })
    }

    /// Render the level, overlaying explored cells and a path.
    ///
    /// Precedence from highest: start/goal markers, path, explored, terrain.
    pub fn render(&self, path: &[Point], explored: &[Point]) -> String {
        let w = self.grid.width().max(0) as usize;
        let mut chars: Vec<char> = self
            .grid
            .bounds()
            .iter()
            .map(|p| if self.grid.is_blocked(p) { WALL } else { FLOOR })
            .collect();
        let mut paint = |p: Point, ch: char| {
            if let Some(i) = self.grid.index(p) {
                chars[i] = ch;
            }
        };
        for &p in explored {
            paint(p, EXPLORED);
        }
        for &p in path {
            paint(p, PATH);
        }
        if let Some(p) = self.start {
            paint(p, START);
        }
        if let Some(p) = self.goal {
            paint(p, GOAL);
        }

        let mut out = String::with_capacity(chars.len() + self.grid.height().max(0) as usize);
        for (i, row) in chars.chunks(w.max(1)).enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row);
        }
        out
    }
}

impl std::str::FromStr for Level {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&[], &[]))
    }
}
