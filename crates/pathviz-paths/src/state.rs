use pathviz_core::{Grid, Point};

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// Per-cell, per-run search record.
///
/// `parent` is an index into the same arena, never an owning edge. A node
/// whose `generation` differs from the state's current generation is
/// treated as freshly zeroed.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) h: i32,
    pub(crate) parent: Option<usize>,
    /// Visited (BFS, DFS) or closed (A*).
    pub(crate) visited: bool,
    /// In the A* open set.
    pub(crate) open: bool,
    pub(crate) generation: u32,
}

impl Node {
    const FRESH: Node = Node {
        g: 0,
        h: 0,
        parent: None,
        visited: false,
        open: false,
        generation: 0,
    };
}

impl Default for Node {
    fn default() -> Self {
        Self::FRESH
    }
}

// ---------------------------------------------------------------------------
// SearchState
// ---------------------------------------------------------------------------

/// Mutable bookkeeping for one search run: visitation marks, tentative
/// costs and backpointers, stored in a flat arena indexed like the grid.
///
/// The arena is reused between runs. Starting a run bumps a generation
/// counter, which lazily invalidates every record in O(1).
#[derive(Debug)]
pub struct SearchState {
    nodes: Vec<Node>,
    generation: u32,
    width: usize,
    height: usize,
}

impl SearchState {
    /// Create a state able to serve grids of up to `width × height` cells.
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(0) as usize;
        let h = height.max(0) as usize;
        Self {
            nodes: vec![Node::default(); w * h],
            generation: 0,
            width: w,
            height: h,
        }
    }

    /// Create a state sized for `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.width(), grid.height())
    }

    /// Number of node records in the arena.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Invalidate every record and adopt the dimensions of `grid`.
    ///
    /// The caller checks that the arena is large enough.
    pub(crate) fn reset(&mut self, grid: &Grid) {
        self.width = grid.width().max(0) as usize;
        self.height = grid.height().max(0) as usize;
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stale records could now look current.
            self.nodes.fill(Node::FRESH);
            self.generation = 1;
        }
    }

    /// Read a record; stale records read as fresh.
    #[inline]
    pub(crate) fn node(&self, idx: usize) -> Node {
        let n = self.nodes[idx];
        if n.generation == self.generation {
            n
        } else {
            Node::FRESH
        }
    }

    /// Mutable access to a record, zeroing it first if stale.
    #[inline]
    pub(crate) fn node_mut(&mut self, idx: usize) -> &mut Node {
        let generation = self.generation;
        let n = &mut self.nodes[idx];
        if n.generation != generation {
            *n = Node {
                generation,
                ..Node::FRESH
            };
        }
        n
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Flat index of `p` in the current run's grid, or `None` if outside.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x as usize >= self.width || p.y as usize >= self.height {
            return None;
        }
        Some((p.y as usize) * self.width + (p.x as usize))
    }

    /// Cells in the current run's grid.
    #[inline]
    pub(crate) fn grid_len(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let w = self.width.max(1);
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    /// Whether `p` was marked visited (BFS, DFS) or closed (A*) in the last run.
    pub fn visited(&self, p: Point) -> bool {
        self.idx(p).is_some_and(|i| self.node(i).visited)
    }

    /// Cost from start recorded for `p`: depth for BFS/DFS, best known path
    /// length for A*. `None` if the cell was never reached.
    pub fn g_cost(&self, p: Point) -> Option<i32> {
        let i = self.idx(p)?;
        let n = self.node(i);
        (n.visited || n.open || n.parent.is_some()).then_some(n.g)
    }

    /// Heuristic estimate recorded for `p` (A* only, 0 otherwise).
    pub fn h_cost(&self, p: Point) -> i32 {
        self.idx(p).map_or(0, |i| self.node(i).h)
    }

    /// `g + h` for `p`, if the cell was reached.
    pub fn f_cost(&self, p: Point) -> Option<i32> {
        Some(self.g_cost(p)? + self.h_cost(p))
    }

    /// The cell `p` was reached from in the last run.
    pub fn parent(&self, p: Point) -> Option<Point> {
        let i = self.idx(p)?;
        self.node(i).parent.map(|pi| self.point(pi))
    }

    /// Number of cells marked visited (or closed) in the last run.
    pub fn visited_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.generation == self.generation && n.visited)
            .count()
    }
}
