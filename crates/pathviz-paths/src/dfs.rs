//! Depth-first search.

use pathviz_core::Grid;

use crate::run::Advance;
use crate::state::SearchState;

/// LIFO frontier. Cells are marked visited when popped, not when pushed: a
/// cell may sit on the stack several times, and only its first pop counts.
#[derive(Debug, Default)]
pub(crate) struct Dfs {
    stack: Vec<usize>,
}

impl Dfs {
    pub(crate) fn seed(&mut self, state: &mut SearchState, start: usize) {
        state.node_mut(start).g = 0;
        self.stack.push(start);
    }

    pub(crate) fn advance(&mut self, grid: &Grid, state: &mut SearchState, goal: usize) -> Advance {
        let Some(ci) = self.stack.pop() else {
            return Advance::Exhausted;
        };

        let current = state.node_mut(ci);
        if current.visited {
            return Advance::Discarded;
        }
        current.visited = true;
        let depth = current.g;
        if ci == goal {
            return Advance::Reached;
        }

        let cp = state.point(ci);
        for np in grid.open_neighbors(cp) {
            let Some(ni) = state.idx(np) else {
                continue;
            };
            let n = state.node_mut(ni);
            if n.visited {
                continue;
            }
            // The last push wins the parent, and the last push is also the
            // first to be popped.
            n.g = depth + 1;
            n.parent = Some(ci);
            self.stack.push(ni);
        }
        Advance::Expanded(ci)
    }

    pub(crate) fn len(&self) -> usize {
        self.stack.len()
    }
}
