//! A* with the Manhattan heuristic.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use pathviz_core::{Grid, Point, manhattan};

use crate::run::Advance;
use crate::state::SearchState;

/// Cost of one orthogonal step on the unweighted grid.
const STEP_COST: i32 = 1;

/// Open-set entry, ordered so that `BinaryHeap` pops the smallest `f`,
/// then the smallest `h`, then the earliest push.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct OpenEntry {
    f: i32,
    h: i32,
    seq: u64,
    /// `g` at push time; the entry is stale once the node's `g` improves.
    g: i32,
    idx: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Open set as a binary heap with lazy deletion: improving a node pushes a
/// fresh entry and the superseded one is skipped when popped.
#[derive(Debug)]
pub(crate) struct Astar {
    open: BinaryHeap<OpenEntry>,
    seq: u64,
    goal: Point,
}

impl Astar {
    pub(crate) fn new(goal: Point) -> Self {
        Self {
            open: BinaryHeap::new(),
            seq: 0,
            goal,
        }
    }

    fn push(&mut self, idx: usize, g: i32, h: i32) {
        let seq = self.seq;
        self.seq += 1;
        self.open.push(OpenEntry {
            f: g + h,
            h,
            seq,
            g,
            idx,
        });
    }

    pub(crate) fn seed(&mut self, state: &mut SearchState, start: usize) {
        let h = manhattan(state.point(start), self.goal);
        let n = state.node_mut(start);
        n.g = 0;
        n.h = h;
        n.open = true;
        self.push(start, 0, h);
    }

    pub(crate) fn advance(&mut self, grid: &Grid, state: &mut SearchState, goal: usize) -> Advance {
        let Some(entry) = self.open.pop() else {
            return Advance::Exhausted;
        };
        let ci = entry.idx;

        let current = state.node_mut(ci);
        if !current.open || current.g != entry.g {
            return Advance::Discarded;
        }
        current.open = false;
        current.visited = true;
        let current_g = current.g;
        if ci == goal {
            return Advance::Reached;
        }

        let cp = state.point(ci);
        for np in grid.open_neighbors(cp) {
            let Some(ni) = state.idx(np) else {
                continue;
            };
            let candidate = current_g + STEP_COST;
            let h = manhattan(np, self.goal);
            let n = state.node_mut(ni);
            if n.visited {
                continue;
            }
            if n.open && candidate >= n.g {
                continue;
            }
            n.g = candidate;
            n.h = h;
            n.parent = Some(ci);
            n.open = true;
            self.push(ni, candidate, h);
        }
        Advance::Expanded(ci)
    }

    /// Heap size, stale entries included.
    pub(crate) fn len(&self) -> usize {
        self.open.len()
    }
}
