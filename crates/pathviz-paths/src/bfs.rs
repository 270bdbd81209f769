//! Breadth-first search.

use std::collections::VecDeque;

use pathviz_core::Grid;

use crate::run::Advance;
use crate::state::SearchState;

/// FIFO frontier. Cells are marked visited when discovered, so each cell
/// enters the queue at most once.
#[derive(Debug, Default)]
pub(crate) struct Bfs {
    queue: VecDeque<usize>,
}

impl Bfs {
    pub(crate) fn seed(&mut self, state: &mut SearchState, start: usize) {
        let n = state.node_mut(start);
        n.visited = true;
        n.g = 0;
        self.queue.push_back(start);
    }

    pub(crate) fn advance(&mut self, grid: &Grid, state: &mut SearchState, goal: usize) -> Advance {
        let Some(ci) = self.queue.pop_front() else {
            return Advance::Exhausted;
        };
        if ci == goal {
            return Advance::Reached;
        }

        let depth = state.node(ci).g;
        let cp = state.point(ci);
        for np in grid.open_neighbors(cp) {
            let Some(ni) = state.idx(np) else {
                continue;
            };
            let n = state.node_mut(ni);
            if n.visited {
                continue;
            }
            n.visited = true;
            n.g = depth + 1;
            n.parent = Some(ci);
            self.queue.push_back(ni);
        }
        Advance::Expanded(ci)
    }

    pub(crate) fn len(&self) -> usize {
        self.queue.len()
    }
}
