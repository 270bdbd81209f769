//! Built-in levels.

use crate::level::{Level, LevelError};

/// Names accepted by [`get`], in menu order.
pub const NAMES: [&str; 3] = ["open", "maze", "walled"];

/// An empty 20×10 field.
pub const OPEN: &str = "\
S...................
....................
....................
....................
....................
....................
....................
....................
....................
...................G";

/// A winding maze with the goal in the far corner.
pub const MAZE: &str = "\
S...#.......#.......
.##.#.#####.#.#####.
.#..#.#...#.#.#...#.
.#.##.#.#.#.#.#.#.#.
.#....#.#...#...#.#.
.####.#.#####.###.#.
.#....#.....#...#.#.
.#.########.###.#.#.
...#........#.....#G
##...######...####..";

/// The goal sits in a sealed room; every search ends exhausted.
pub const WALLED: &str = "\
S...........#.......
............#.......
............#.......
............#..###..
............#..#G#..
............#..###..
............#.......
............#.......
............#.......
............#.......";

/// The text of a preset by name.
pub fn source(name: &str) -> Option<&'static str> {
    match name {
        "open" => Some(OPEN),
        "maze" => Some(MAZE),
        "walled" => Some(WALLED),
        _ => None,
    }
}

/// Parse a preset by name. `None` if the name is unknown.
pub fn get(name: &str) -> Option<Result<Level, LevelError>> {
    source(name).map(Level::parse)
}
