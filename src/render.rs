use core::fmt;
use itertools::Itertools;

use crate::board::Board;
use crate::cell::CellState;

/// Renders a board one row per line, every cell as its fixed-width [token](CellState::token).
pub fn render(board: &Board) -> String {
    board.to_string()
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", row.iter().map(|&c| CellState::token(c)).join(""))?;
        }
        Ok(())
    }
}
