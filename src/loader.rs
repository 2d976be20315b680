//! Reads boards from text: one row per line, each cell an integer followed by a comma, for
//! example `0,1,0,0,0,`. `0` is an empty cell, any other integer an obstacle.
use log::{debug, warn};
use std::fs;
use std::path::Path;

use crate::board::Board;
use crate::cell::CellState;
use crate::error::BoardError;

/// Reads an optionally signed integer after skipping whitespace, returning it with the rest of
/// the input.
fn take_integer(input: &str) -> Option<(i64, &str)> {
    let input = input.trim_start();
    let sign_len = usize::from(input.starts_with(['+', '-']));
    let digits = input[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    let (number, rest) = input.split_at(sign_len + digits);
    number.parse().ok().map(|value| (value, rest))
}

/// Parses a single row. Cells are read as `<integer> ,` pairs and the row ends at the first pair
/// that does not match, so anything after a malformed token (including a final integer without
/// a trailing comma) is dropped.
pub fn parse_line(line: &str) -> Vec<CellState> {
    let mut row = Vec::new();
    let mut rest = line;
    while let Some((value, after)) = take_integer(rest) {
        match after.trim_start().strip_prefix(',') {
            Some(after_comma) => {
                row.push(CellState::from_value(value));
                rest = after_comma;
            }
            None => break,
        }
    }
    row
}

/// Parses a whole board. Blank lines are skipped; rows of differing length are an error.
pub fn parse_board(text: &str) -> Result<Board, BoardError> {
    let rows = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect::<Vec<_>>();
    Board::from_rows(rows)
}

pub fn load_board<P: AsRef<Path>>(path: P) -> Result<Board, BoardError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let board = parse_board(&text)?;
    debug!(
        "Loaded {}x{} board from {}",
        board.height(),
        board.width(),
        path.display()
    );
    Ok(board)
}

/// Like [load_board], but any failure is logged and yields the empty board.
pub fn read_board_file<P: AsRef<Path>>(path: P) -> Board {
    let path = path.as_ref();
    load_board(path).unwrap_or_else(|e| {
        warn!("Using an empty board, {} could not be loaded: {}", path.display(), e);
        Board::default()
    })
}
