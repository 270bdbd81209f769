//! The [`Grid`] type: a fixed-size matrix of open / blocked cells.
//!
//! The grid is the only piece of state that outlives a search run. Its
//! dimensions never change after construction; the `blocked` flags may be
//! edited freely between runs. Search runs borrow the grid immutably, so the
//! borrow checker rules out edits while a run is in progress.

use rand::{Rng, RngExt};

use crate::geom::{Point, Range};

/// A `width × height` matrix of cells, each either open or blocked.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    width: i32,
    height: i32,
    blocked: Vec<bool>,
}

impl Grid {
    /// Create a grid of the given dimensions with every cell open.
    ///
    /// Negative dimensions are clamped to zero.
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(0);
        let h = height.max(0);
        Self {
            width: w,
            height: h,
            blocked: vec![false; (w as usize) * (h as usize)],
        }
    }

    /// Create a grid with the given cells blocked. Out-of-bounds walls are
    /// ignored.
    pub fn with_walls(width: i32, height: i32, walls: impl IntoIterator<Item = Point>) -> Self {
        let mut grid = Self::new(width, height);
        for p in walls {
            grid.set_blocked(p, true);
        }
        grid
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The bounding range `[(0, 0), (width, height))`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Number of cells (`width × height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Flat row-major index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.in_bounds(p) {
            return None;
        }
        Some((p.y as usize) * (self.width as usize) + (p.x as usize))
    }

    /// Point at a flat row-major index. The index must be `< len()`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.width.max(1) as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// Whether `p` is blocked. Cells outside the grid count as blocked.
    #[inline]
    pub fn is_blocked(&self, p: Point) -> bool {
        match self.index(p) {
            Some(i) => self.blocked[i],
            None => true,
        }
    }

    /// Whether `p` is inside the grid and open.
    #[inline]
    pub fn is_open(&self, p: Point) -> bool {
        !self.is_blocked(p)
    }

    /// The in-bounds orthogonal neighbours of `p`, in the fixed order
    /// up, down, right, left. Blocked cells are included.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.neighbors_4().into_iter().filter(|&n| self.in_bounds(n))
    }

    /// Like [`neighbors`](Self::neighbors) but skipping blocked cells.
    pub fn open_neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.neighbors_4().into_iter().filter(|&n| self.is_open(n))
    }

    /// Set the blocked flag of `p`. Returns whether the cell changed.
    /// Out-of-bounds points are ignored.
    pub fn set_blocked(&mut self, p: Point, blocked: bool) -> bool {
        let Some(i) = self.index(p) else {
            return false;
        };
        if self.blocked[i] == blocked {
            return false;
        }
        self.blocked[i] = blocked;
        true
    }

    /// Flip the blocked flag of `p`. Returns the new state, or `None` if `p`
    /// is out of bounds.
    pub fn toggle(&mut self, p: Point) -> Option<bool> {
        let i = self.index(p)?;
        self.blocked[i] = !self.blocked[i];
        Some(self.blocked[i])
    }

    /// Open every cell.
    pub fn clear(&mut self) {
        self.blocked.fill(false);
    }

    /// Number of blocked cells.
    pub fn count_blocked(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    /// Row-major iterator over the open cells.
    pub fn open_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.bounds().iter().filter(|&p| self.is_open(p))
    }

    /// Pick a uniformly random open cell that is not in `exclude`.
    ///
    /// Returns `None` when every open cell is excluded.
    pub fn random_open_cell(&self, rng: &mut impl Rng, exclude: &[Point]) -> Option<Point> {
        let candidates: Vec<Point> = self
            .open_cells()
            .filter(|p| !exclude.contains(p))
            .collect();
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[rng.random_range(0..candidates.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_open() {
        let g = Grid::new(4, 3);
        assert_eq!(g.len(), 12);
        assert_eq!(g.count_blocked(), 0);
        assert!(g.is_open(Point::new(3, 2)));
        assert_eq!(g.bounds(), Range::new(0, 0, 4, 3));
    }

    #[test]
    fn out_of_bounds_is_blocked() {
        let g = Grid::new(2, 2);
        assert!(g.is_blocked(Point::new(-1, 0)));
        assert!(g.is_blocked(Point::new(2, 0)));
        assert!(!g.in_bounds(Point::new(0, 2)));
        assert_eq!(g.index(Point::new(0, 2)), None);
    }

    #[test]
    fn index_point_round_trip() {
        let g = Grid::new(5, 3);
        for p in g.bounds() {
            let i = g.index(p).unwrap();
            assert_eq!(g.point(i), p);
        }
    }

    #[test]
    fn set_blocked_reports_changes() {
        let mut g = Grid::new(3, 3);
        let p = Point::new(1, 1);
        assert!(g.set_blocked(p, true));
        assert!(!g.set_blocked(p, true));
        assert!(g.is_blocked(p));
        assert!(!g.set_blocked(Point::new(9, 9), true));
        assert_eq!(g.toggle(p), Some(false));
        assert_eq!(g.toggle(Point::new(-1, -1)), None);
    }

    #[test]
    fn neighbors_are_clipped_and_ordered() {
        let g = Grid::with_walls(3, 3, [Point::new(1, 0)]);
        let corner: Vec<_> = g.neighbors(Point::new(0, 0)).collect();
        assert_eq!(corner, vec![Point::new(0, 1), Point::new(1, 0)]);
        let open: Vec<_> = g.open_neighbors(Point::new(0, 0)).collect();
        assert_eq!(open, vec![Point::new(0, 1)]);
        let center: Vec<_> = g.neighbors(Point::new(1, 1)).collect();
        assert_eq!(
            center,
            vec![
                Point::new(1, 0),
                Point::new(1, 2),
                Point::new(2, 1),
                Point::new(0, 1)
            ]
        );
    }

    #[test]
    fn clear_opens_everything() {
        let mut g = Grid::with_walls(3, 1, [Point::new(0, 0), Point::new(2, 0)]);
        assert_eq!(g.count_blocked(), 2);
        g.clear();
        assert_eq!(g.count_blocked(), 0);
        assert_eq!(g.open_cells().count(), 3);
    }

    #[test]
    fn random_open_cell_respects_walls_and_exclusions() {
        let g = Grid::with_walls(3, 1, [Point::new(0, 0)]);
        let mut rng = rand::rng();
        for _ in 0..20 {
            let p = g.random_open_cell(&mut rng, &[Point::new(1, 0)]).unwrap();
            assert_eq!(p, Point::new(2, 0));
        }
        assert_eq!(
            g.random_open_cell(&mut rng, &[Point::new(1, 0), Point::new(2, 0)]),
            None
        );
    }

    #[test]
    fn negative_dimensions_clamp() {
        let g = Grid::new(-3, 4);
        assert!(g.is_empty());
        assert_eq!(g.width(), 0);
        assert_eq!(g.open_cells().count(), 0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_keeps_walls_through_json() {
        let g = Grid::with_walls(3, 2, [Point::new(1, 0), Point::new(2, 1)]);
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
        assert!(back.is_blocked(Point::new(1, 0)));
        assert!(back.is_open(Point::new(0, 1)));
    }
}
