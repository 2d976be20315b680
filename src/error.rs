use grid_util::point::Point;
use thiserror::Error;

use crate::cell::CellState;

/// Why a start or goal coordinate was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    #[error("outside the {height}x{width} board")]
    OutOfBounds { height: usize, width: usize },
    #[error("cell is {0:?}, expected Empty")]
    Occupied(CellState),
}

/// Precondition violations detected before a search touches the board. An unreachable goal is
/// not an error; see [search](crate::search::search).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid coordinate {point}: {reason}")]
    InvalidCoordinate { point: Point, reason: InvalidReason },
}

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("could not read board: {0}")]
    Io(#[from] std::io::Error),

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}
