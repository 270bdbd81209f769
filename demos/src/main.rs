//! Terminal replay of a grid search.
//!
//! Run: cargo run --bin pathviz -- --level maze --strategy bfs --replay

mod scenario;

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use pathviz_core::{Level, Point};
use pathviz_paths::{Event, Outcome, Pathfinder, Stats, Strategy, Telemetry};
use serde::Serialize;

use crate::scenario::{Scenario, load_level, parse_point};

#[derive(Parser, Debug)]
#[command(name = "pathviz", about = "Replay BFS, DFS or A* on a grid, one expansion at a time")]
struct Cli {
    /// Preset name (open, maze, walled) or path to a level file.
    #[arg(short, long, default_value = "maze")]
    level: String,

    /// Saved scenario (JSON). Overrides --level.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// bfs, dfs or astar.
    #[arg(short, long)]
    strategy: Option<Strategy>,

    /// Start cell as x,y (overrides the level's S marker).
    #[arg(long, value_parser = parse_point, conflicts_with = "random_start")]
    start: Option<Point>,

    /// Goal cell as x,y (overrides the level's G marker).
    #[arg(long, value_parser = parse_point, conflicts_with = "random_goal")]
    goal: Option<Point>,

    /// Place the start on a random open cell.
    #[arg(long)]
    random_start: bool,

    /// Place the goal on a random open cell.
    #[arg(long)]
    random_goal: bool,

    /// Print the map after every expansion.
    #[arg(long)]
    replay: bool,

    /// Pause between replay frames.
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Print a JSON summary instead of the map.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Summary<'a> {
    strategy: Strategy,
    start: Point,
    goal: Point,
    found: bool,
    path: Option<&'a [Point]>,
    explored: &'a [Point],
    stats: Stats,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let (mut level, saved_strategy) = match &cli.scenario {
        Some(path) => {
            let sc = Scenario::load(path)?;
            (sc.level()?, sc.strategy)
        }
        None => (load_level(&cli.level)?, None),
    };
    let strategy = cli.strategy.or(saved_strategy).unwrap_or_default();
    place_endpoints(&mut level, &cli)?;
    let start = level.start.ok_or_else(|| anyhow!("level has no start; pass --start or --random-start"))?;
    let goal = level.goal.ok_or_else(|| anyhow!("level has no goal; pass --goal or --random-goal"))?;

    let finder = Pathfinder::for_grid(&level.grid);
    let mut run = finder
        .start_with_sink(&level.grid, strategy, start, goal, Telemetry::new())
        .with_context(|| format!("starting {strategy}"))?;

    let mut explored = Vec::new();
    let outcome = loop {
        match run.step()? {
            Some(Event::Visited(v)) => {
                explored.push(v.cell);
                if cli.replay {
                    println!("{}\n{}\n", level.render(&[], &explored), run.sink().stats());
                    if cli.delay_ms > 0 {
                        thread::sleep(Duration::from_millis(cli.delay_ms));
                    }
                }
            }
            Some(Event::Finished(o)) => break o,
            None => return Err(anyhow!("run ended without an outcome")),
        }
    };
    let stats = run.into_sink().stats();

    if cli.json {
        let summary = Summary {
            strategy,
            start,
            goal,
            found: outcome.is_found(),
            path: outcome.path(),
            explored: &explored,
            stats,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", level.render(outcome.path().unwrap_or(&[]), &explored));
    match &outcome {
        Outcome::PathFound { .. } => println!("{strategy} found the target!"),
        Outcome::Exhausted { .. } => println!("{strategy}: target not found"),
    }
    println!("{stats}");
    Ok(())
}

/// Apply command-line overrides and random placement to the level markers.
fn place_endpoints(level: &mut Level, cli: &Cli) -> Result<()> {
    let mut rng = rand::rng();
    if let Some(p) = cli.start {
        level.start = Some(p);
    }
    if let Some(p) = cli.goal {
        level.goal = Some(p);
    }
    if cli.random_start {
        let exclude: Vec<Point> = level.goal.into_iter().collect();
        level.start = Some(
            level
                .grid
                .random_open_cell(&mut rng, &exclude)
                .context("no open cell left for the start")?,
        );
    }
    if cli.random_goal {
        let exclude: Vec<Point> = level.start.into_iter().collect();
        level.goal = Some(
            level
                .grid
                .random_open_cell(&mut rng, &exclude)
                .context("no open cell left for the goal")?,
        );
    }
    log::debug!("start {:?}, goal {:?}", level.start, level.goal);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_and_random_endpoints_conflict() {
        assert!(Cli::try_parse_from(["pathviz", "--start", "1,1", "--random-start"]).is_err());
        assert!(Cli::try_parse_from(["pathviz", "--goal", "2,0", "--random-goal"]).is_err());
    }

    #[test]
    fn explicit_start_with_random_goal() {
        let cli = Cli::try_parse_from(["pathviz", "--start", "1,1", "--random-goal"]).unwrap();
        assert_eq!(cli.start, Some(Point::new(1, 1)));
        assert!(cli.random_goal);
        assert!(!cli.random_start);
    }
}
