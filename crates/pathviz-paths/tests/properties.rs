//! Randomized checks of the engine against an independent distance map.

use std::collections::{HashSet, VecDeque};

use pathviz_core::{Grid, Point};
use pathviz_paths::{Event, Outcome, Pathfinder, Strategy};
use rand::{Rng, RngExt};

const ROUNDS: usize = 300;

fn random_grid(rng: &mut impl Rng) -> Grid {
    let w = rng.random_range(1..12);
    let h = rng.random_range(1..12);
    let mut grid = Grid::new(w, h);
    for p in grid.bounds() {
        if rng.random_range(0..100) < 30 {
            grid.set_blocked(p, true);
        }
    }
    grid
}

/// Plain BFS distances from `start`; `None` for unreachable cells.
fn distances(grid: &Grid, start: Point) -> Vec<Option<usize>> {
    let mut dist = vec![None; grid.len()];
    let mut queue = VecDeque::new();
    dist[grid.index(start).unwrap()] = Some(0);
    queue.push_back(start);
    while let Some(c) = queue.pop_front() {
        let d = dist[grid.index(c).unwrap()].unwrap();
        for n in grid.open_neighbors(c) {
            let i = grid.index(n).unwrap();
            if dist[i].is_none() {
                dist[i] = Some(d + 1);
                queue.push_back(n);
            }
        }
    }
    dist
}

struct Case {
    grid: Grid,
    start: Point,
    goal: Point,
}

fn random_case(rng: &mut impl Rng) -> Option<Case> {
    let grid = random_grid(rng);
    let start = grid.random_open_cell(rng, &[])?;
    let goal = grid.random_open_cell(rng, &[])?;
    Some(Case { grid, start, goal })
}

fn replay(case: &Case, strategy: Strategy) -> (Vec<Point>, Outcome) {
    let finder = Pathfinder::for_grid(&case.grid);
    let mut run = finder
        .start(&case.grid, strategy, case.start, case.goal)
        .unwrap();
    let mut cells = Vec::new();
    loop {
        match run.step().unwrap() {
            Some(Event::Visited(v)) => cells.push(v.cell),
            Some(Event::Finished(o)) => return (cells, o),
            None => unreachable!("run ended without an outcome"),
        }
    }
}

fn check_path(case: &Case, path: &[Point]) {
    assert_eq!(path.first(), Some(&case.start));
    assert_eq!(path.last(), Some(&case.goal));
    for w in path.windows(2) {
        assert!(w[0].is_adjacent(w[1]));
    }
    assert!(path.iter().all(|&c| case.grid.is_open(c)));
}

#[test]
fn optimal_strategies_match_reference_distance() {
    let mut rng = rand::rng();
    for _ in 0..ROUNDS {
        let Some(case) = random_case(&mut rng) else {
            continue;
        };
        let dist = distances(&case.grid, case.start);
        let expected = dist[case.grid.index(case.goal).unwrap()];
        for strategy in Strategy::ALL.into_iter().filter(|s| s.is_optimal()) {
            let (_, outcome) = replay(&case, strategy);
            assert_eq!(outcome.path_cost(), expected, "{strategy}");
            if let Some(path) = outcome.path() {
                check_path(&case, path);
            }
        }
    }
}

#[test]
fn dfs_terminates_with_valid_path_when_reachable() {
    let mut rng = rand::rng();
    for _ in 0..ROUNDS {
        let Some(case) = random_case(&mut rng) else {
            continue;
        };
        let dist = distances(&case.grid, case.start);
        let reachable = dist[case.grid.index(case.goal).unwrap()].is_some();
        let (_, outcome) = replay(&case, Strategy::Dfs);
        assert_eq!(outcome.is_found(), reachable);
        if let Some(path) = outcome.path() {
            check_path(&case, path);
        }
    }
}

#[test]
fn each_cell_is_reported_at_most_once() {
    let mut rng = rand::rng();
    for _ in 0..ROUNDS {
        let Some(case) = random_case(&mut rng) else {
            continue;
        };
        for strategy in Strategy::ALL {
            let (cells, outcome) = replay(&case, strategy);
            let unique: HashSet<Point> = cells.iter().copied().collect();
            assert_eq!(unique.len(), cells.len(), "{strategy}");
            assert!(cells.len() <= case.grid.len(), "{strategy}");
            assert!(!cells.contains(&case.start), "{strategy}");
            assert!(cells.iter().all(|&c| case.grid.is_open(c)), "{strategy}");
            if case.start != case.goal {
                assert_eq!(outcome.expansions(), cells.len() + 1, "{strategy}");
            } else {
                assert_eq!(outcome.expansions(), 0, "{strategy}");
            }
        }
    }
}

#[test]
fn exhausted_runs_expand_the_whole_component() {
    let mut rng = rand::rng();
    for _ in 0..ROUNDS {
        let Some(case) = random_case(&mut rng) else {
            continue;
        };
        let dist = distances(&case.grid, case.start);
        if dist[case.grid.index(case.goal).unwrap()].is_some() {
            continue;
        }
        let component = dist.iter().filter(|d| d.is_some()).count();
        for strategy in Strategy::ALL {
            let (_, outcome) = replay(&case, strategy);
            assert!(!outcome.is_found(), "{strategy}");
            assert_eq!(outcome.expansions(), component, "{strategy}");
        }
    }
}

#[test]
fn astar_never_expands_more_than_bfs() {
    let mut rng = rand::rng();
    for _ in 0..ROUNDS {
        let Some(case) = random_case(&mut rng) else {
            continue;
        };
        let (_, bfs) = replay(&case, Strategy::Bfs);
        let (_, astar) = replay(&case, Strategy::Astar);
        assert!(astar.expansions() <= bfs.expansions());
    }
}

#[test]
fn reused_pathfinder_matches_fresh_one() {
    let mut rng = rand::rng();
    let shared = Pathfinder::new(12, 12);
    for _ in 0..ROUNDS {
        let Some(case) = random_case(&mut rng) else {
            continue;
        };
        let strategy = Strategy::ALL[rng.random_range(0..3)];
        let reused = shared
            .start(&case.grid, strategy, case.start, case.goal)
            .unwrap()
            .finish()
            .unwrap();
        let (_, fresh) = replay(&case, strategy);
        assert_eq!(reused.path(), fresh.path());
        assert_eq!(reused.expansions(), fresh.expansions());
    }
}
