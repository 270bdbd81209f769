//! Level resolution for the demo: presets, level files and JSON scenarios.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use pathviz_core::{Level, Point, presets};
use pathviz_paths::Strategy;
use serde::{Deserialize, Serialize};

/// A saved search setup.
///
/// ```json
/// { "level": "S..\n.#.\n..G", "strategy": "bfs" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Level text; markers in it are overridden by `start` / `goal`.
    pub level: String,
    #[serde(default)]
    pub start: Option<Point>,
    #[serde(default)]
    pub goal: Option<Point>,
    #[serde(default)]
    pub strategy: Option<Strategy>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }

    /// Parse the level and apply the endpoint overrides.
    pub fn level(&self) -> Result<Level> {
        let mut level = Level::parse(&self.level).context("parsing scenario level")?;
        if self.start.is_some() {
            level.start = self.start;
        }
        if self.goal.is_some() {
            level.goal = self.goal;
        }
        Ok(level)
    }
}

/// Resolve `name` as a preset, falling back to a level file on disk.
pub fn load_level(name: &str) -> Result<Level> {
    if let Some(src) = presets::source(name) {
        return Level::parse(src).with_context(|| format!("parsing preset {name}"));
    }
    let path = Path::new(name);
    if !path.exists() {
        bail!(
            "no preset or file named {name:?} (presets: {})",
            presets::NAMES.join(", ")
        );
    }
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Level::parse(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Parse `x,y` into a point.
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(Point::new(x, y))
}
