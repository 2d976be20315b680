//! Loads a board file, searches it and prints the annotated board.
//!
//! Usage:
//!   grid_astar board.txt --start 0,0 --goal 0,4
//!   RUST_LOG=debug grid_astar board.txt --route-only

use anyhow::{Context, Result};
use clap::Parser;
use grid_util::point::Point;
use std::path::PathBuf;

use grid_astar::{loader, search_with, Marking, SearchSettings, TieBreak};

/// A* search on a comma separated obstacle grid
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Board file, one row per line, `0` for empty cells
    #[arg(default_value = "board.txt")]
    board: PathBuf,

    /// Start cell as `row,column`
    #[arg(short, long, default_value = "0,0", value_parser = parse_point)]
    start: Point,

    /// Goal cell as `row,column`
    #[arg(short, long, default_value = "0,4", value_parser = parse_point)]
    goal: Point,

    /// Expand the earliest queued node among equal costs instead of the latest
    #[arg(long)]
    oldest_first: bool,

    /// Only mark the final route instead of every expanded cell
    #[arg(long)]
    route_only: bool,

    /// Check connectivity before searching
    #[arg(long)]
    precheck: bool,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `row,column`, got `{s}`"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<i32>()
            .map_err(|e| format!("invalid coordinate `{v}`: {e}"))
    };
    Ok(Point::new(parse(x)?, parse(y)?))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut board = loader::load_board(&args.board)
        .with_context(|| format!("failed to load {}", args.board.display()))?;
    let settings = SearchSettings {
        tie_break: if args.oldest_first {
            TieBreak::Oldest
        } else {
            TieBreak::Newest
        },
        marking: if args.route_only {
            Marking::Route
        } else {
            Marking::Expanded
        },
        precheck_components: args.precheck,
    };

    match search_with(&mut board, args.start, args.goal, &settings)? {
        Some(path) => {
            print!("{}", board);
            println!(
                "{} steps, {} cells expanded",
                path.steps(),
                path.expanded
            );
        }
        None => println!("No path from {} to {}", args.start, args.goal),
    }
    Ok(())
}
