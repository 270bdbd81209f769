//! Path reconstruction from backpointers.

use pathviz_core::Point;

use crate::error::SearchError;
use crate::state::SearchState;

/// Walk backpointers from `goal` to `start` and return the route in
/// start→goal order, both ends included.
///
/// The walk is bounded by the number of cells in the searched grid. A chain
/// that runs past that bound, dead-ends, or leaves the grid before reaching
/// `start` yields [`SearchError::BrokenChain`].
pub fn reconstruct(state: &SearchState, start: Point, goal: Point) -> Result<Vec<Point>, SearchError> {
    let limit = state.grid_len();
    let broken = |steps| SearchError::BrokenChain { goal, steps };

    let mut path = Vec::new();
    let mut cur = goal;
    loop {
        if path.len() >= limit {
            return Err(broken(path.len()));
        }
        path.push(cur);
        if cur == start {
            break;
        }
        cur = state.parent(cur).ok_or_else(|| broken(path.len()))?;
    }
    path.reverse();
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::Grid;

    fn state_with_parents(grid: &Grid, links: &[(Point, Point)]) -> SearchState {
        let mut st = SearchState::for_grid(grid);
        st.reset(grid);
        for &(child, parent) in links {
            let ci = grid.index(child).unwrap();
            let pi = grid.index(parent).unwrap();
            st.node_mut(ci).parent = Some(pi);
        }
        st
    }

    #[test]
    fn walks_chain_in_order() {
        let grid = Grid::new(3, 2);
        let st = state_with_parents(
            &grid,
            &[
                (Point::new(1, 0), Point::new(0, 0)),
                (Point::new(1, 1), Point::new(1, 0)),
                (Point::new(2, 1), Point::new(1, 1)),
            ],
        );
        let path = reconstruct(&st, Point::new(0, 0), Point::new(2, 1)).unwrap();
        assert_eq!(
            path,
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(1, 1),
                Point::new(2, 1)
            ]
        );
    }

    #[test]
    fn start_equals_goal() {
        let grid = Grid::new(2, 2);
        let st = state_with_parents(&grid, &[]);
        let p = Point::new(1, 1);
        assert_eq!(reconstruct(&st, p, p), Ok(vec![p]));
    }

    #[test]
    fn cycle_is_reported() {
        let grid = Grid::new(2, 2);
        let a = Point::new(1, 0);
        let b = Point::new(1, 1);
        let st = state_with_parents(&grid, &[(a, b), (b, a)]);
        assert_eq!(
            reconstruct(&st, Point::new(0, 0), b),
            Err(SearchError::BrokenChain { goal: b, steps: 4 })
        );
    }

    #[test]
    fn dead_end_is_reported() {
        let grid = Grid::new(3, 1);
        let st = state_with_parents(&grid, &[(Point::new(2, 0), Point::new(1, 0))]);
        assert!(matches!(
            reconstruct(&st, Point::new(0, 0), Point::new(2, 0)),
            Err(SearchError::BrokenChain { steps: 2, .. })
        ));
    }
}
