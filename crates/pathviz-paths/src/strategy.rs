use std::fmt;
use std::str::FromStr;

use crate::error::ParseStrategyError;

/// Search strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strategy {
    /// Breadth-first search: FIFO frontier, shortest path in steps.
    Bfs,
    /// Depth-first search: LIFO frontier, any path.
    Dfs,
    /// A* with the Manhattan heuristic: shortest path, fewer expansions.
    #[default]
    Astar,
}

impl Strategy {
    /// Every strategy, in menu order.
    pub const ALL: [Strategy; 3] = [Strategy::Bfs, Strategy::Dfs, Strategy::Astar];

    /// Whether the strategy always returns a shortest path.
    pub fn is_optimal(self) -> bool {
        !matches!(self, Self::Dfs)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bfs => "BFS",
            Self::Dfs => "DFS",
            Self::Astar => "A*",
        })
    }
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "dfs" => Ok(Self::Dfs),
            "astar" | "a*" | "a-star" => Ok(Self::Astar),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Per-run settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub strategy: Strategy,
    /// Upper bound on the number of steps a driver takes before giving up.
    /// `None` runs to completion.
    pub max_steps: Option<usize>,
}

impl SearchConfig {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            max_steps: None,
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_from_partial_json() {
        let cfg: SearchConfig = serde_json::from_str(r#"{"strategy":"dfs"}"#).unwrap();
        assert_eq!(cfg, SearchConfig::new(Strategy::Dfs));
    }
}
