use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;

use crate::cell::CellState;
use crate::error::{BoardError, SearchError};
use crate::search::search;

/// Rectangular grid of [CellState] values stored row-major. Points address the board as
/// `x = row`, `y = column`, so `(0, 0)` is the top-left cell and `x` grows downwards. The
/// underlying [SimpleGrid] is indexed the other way around, `(column, row)`.
#[derive(Clone, Debug, Default)]
pub struct Board {
    grid: SimpleGrid<CellState>,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.grid.width == other.grid.width
            && self.grid.height == other.grid.height
            && self.grid.values == other.grid.values
    }
}

impl Eq for Board {}

impl Board {
    pub fn new(height: usize, width: usize) -> Board {
        Board::filled(height, width, CellState::Empty)
    }

    pub fn filled(height: usize, width: usize, state: CellState) -> Board {
        Board {
            grid: SimpleGrid::new(width, height, state),
        }
    }

    /// Builds a board from nested rows. The first row fixes the width and every other row has to
    /// match it.
    pub fn from_rows(rows: Vec<Vec<CellState>>) -> Result<Board, BoardError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        let mut values = Vec::with_capacity(height * width);
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != width {
                return Err(BoardError::RaggedRow {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
            values.extend(cells);
        }
        Ok(Board {
            grid: SimpleGrid {
                width,
                height,
                values,
            },
        })
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// A board without any cells, which is also what the lenient loader hands out on failure.
    pub fn is_empty(&self) -> bool {
        self.grid.values.is_empty()
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.grid.point_in_bounds(Point::new(y, x))
    }

    pub fn point_in_bounds(&self, point: &Point) -> bool {
        self.in_bounds(point.x, point.y)
    }

    /// Row-major index of an in-bounds point.
    pub fn ix(&self, point: &Point) -> Option<usize> {
        self.point_in_bounds(point)
            .then(|| self.grid.get_ix(point.y as usize, point.x as usize))
    }

    pub fn get(&self, x: i32, y: i32) -> Option<CellState> {
        self.in_bounds(x, y).then(|| self.grid.get(y as usize, x as usize))
    }

    pub fn get_point(&self, point: &Point) -> Option<CellState> {
        self.get(point.x, point.y)
    }

    /// Overwrites a cell.
    ///
    /// # Panics
    /// If `(x, y)` lies outside the board.
    pub fn set(&mut self, x: i32, y: i32, state: CellState) {
        assert!(
            self.in_bounds(x, y),
            "({x}, {y}) is outside the {}x{} board",
            self.height(),
            self.width()
        );
        self.grid.set(y as usize, x as usize, state);
    }

    pub fn set_point(&mut self, point: &Point, state: CellState) {
        self.set(point.x, point.y, state);
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> + '_ {
        // chunks(0) panics, an empty board simply has no rows
        self.grid.values.chunks(self.width().max(1))
    }

    pub fn count(&self, state: CellState) -> usize {
        self.grid.values.iter().filter(|&&c| c == state).count()
    }

    /// All points currently holding `state`, in row-major order.
    pub fn points_with(&self, state: CellState) -> impl Iterator<Item = Point> + '_ {
        let width = self.width();
        self.grid
            .values
            .iter()
            .enumerate()
            .filter(move |&(_, &c)| c == state)
            .map(move |(ix, _)| Point::new((ix / width) as i32, (ix % width) as i32))
    }

    /// Resets every cell written by a previous search back to [Empty](CellState::Empty).
    /// Obstacles are left alone.
    pub fn clear_search_marks(&mut self) {
        for cell in self.grid.values.iter_mut().filter(|c| c.is_search_mark()) {
            *cell = CellState::Empty;
        }
    }

    /// Searches a copy of the board and returns the annotated copy, or [None] if the goal cannot
    /// be reached. `self` is not modified.
    pub fn solved(&self, start: Point, goal: Point) -> Result<Option<Board>, SearchError> {
        let mut board = self.clone();
        Ok(search(&mut board, start, goal)?.map(|_| board))
    }
}
