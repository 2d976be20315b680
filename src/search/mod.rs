use grid_util::point::Point;

use crate::board::Board;
use crate::cell::CellState;
use crate::error::SearchError;

pub mod astar;
pub mod open_set;

pub use astar::{AstarSearch, SearchState};
pub use open_set::{OpenNode, OpenSet};

/// Orthogonal neighbour offsets in expansion order: up, left, down, right.
pub const NEIGHBOURS: [(i32, i32); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

/// Which of several frontier nodes with equal `f` is expanded first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// The most recently queued node.
    #[default]
    Newest,
    /// The earliest queued node.
    Oldest,
}

/// What ends up marked as [Path](CellState::Path) after a successful search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Marking {
    /// Every expanded cell.
    #[default]
    Expanded,
    /// Only cells on the returned route; other expanded cells are left [Closed](CellState::Closed).
    Route,
}

#[derive(Clone, Debug, Default)]
pub struct SearchSettings {
    pub tie_break: TieBreak,
    pub marking: Marking,
    /// Consult the connected components of the board before searching. An unreachable goal is
    /// then reported without touching the board.
    pub precheck_components: bool,
}

impl SearchSettings {
    pub fn new() -> SearchSettings {
        SearchSettings::default()
    }
}

/// Route found by a successful search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchPath {
    /// Cells from start to goal inclusive, each a single orthogonal step from the previous one.
    pub route: Vec<Point>,
    /// Number of nodes taken off the open set.
    pub expanded: usize,
}

impl SearchPath {
    /// Number of unit moves along the route.
    pub fn steps(&self) -> usize {
        self.route.len() - 1
    }

    pub fn start(&self) -> Point {
        self.route[0]
    }

    pub fn goal(&self) -> Point {
        self.route[self.route.len() - 1]
    }
}

/// Manhattan distance between `(x1, y1)` and `(x2, y2)`. Admissible and consistent for unit-cost
/// 4-directional movement. Saturates at [u32::MAX] for coordinates far outside any board.
pub fn heuristic(x1: i32, y1: i32, x2: i32, y2: i32) -> u32 {
    x1.abs_diff(x2).saturating_add(y1.abs_diff(y2))
}

pub fn manhattan(p1: &Point, p2: &Point) -> u32 {
    heuristic(p1.x, p1.y, p2.x, p2.y)
}

/// A cell may be queued iff it lies on the board and is still [Empty](CellState::Empty). Marking a
/// cell [Closed](CellState::Closed) when it is queued is what keeps it from being queued twice.
pub fn is_valid(x: i32, y: i32, board: &Board) -> bool {
    board.get(x, y) == Some(CellState::Empty)
}

/// Runs A* from `start` to `goal` with default [SearchSettings], annotating `board` in place.
/// Returns `Ok(None)` when the goal cannot be reached.
pub fn search(
    board: &mut Board,
    start: Point,
    goal: Point,
) -> Result<Option<SearchPath>, SearchError> {
    search_with(board, start, goal, &SearchSettings::default())
}

pub fn search_with(
    board: &mut Board,
    start: Point,
    goal: Point,
    settings: &SearchSettings,
) -> Result<Option<SearchPath>, SearchError> {
    Ok(AstarSearch::new(board, start, goal, settings)?.run())
}
