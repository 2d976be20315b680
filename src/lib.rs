//! # grid_astar
//!
//! Shortest paths on a 2D obstacle grid using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic and
//! 4-directional unit-cost movement. The search annotates the [Board] in place: queued cells
//! become [Closed](CellState::Closed), expanded cells [Path](CellState::Path), and on success the
//! endpoints are recoloured to [Start](CellState::Start) and [Finish](CellState::Finish).
//!
//! ```no_run
//! use grid_astar::{loader, search};
//! use grid_util::point::Point;
//!
//! let mut board = loader::read_board_file("board.txt");
//! match search(&mut board, Point::new(0, 0), Point::new(0, 4)) {
//!     Ok(Some(path)) => print!("{}\n{} steps", board, path.steps()),
//!     Ok(None) => println!("no path"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
pub mod board;
pub mod cell;
pub mod components;
pub mod error;
pub mod loader;
pub mod render;
pub mod search;

pub use board::Board;
pub use cell::CellState;
pub use components::Components;
pub use error::{BoardError, InvalidReason, SearchError};
pub use render::render;
pub use search::{
    heuristic, is_valid, search, search_with, Marking, SearchPath, SearchSettings, TieBreak,
};
