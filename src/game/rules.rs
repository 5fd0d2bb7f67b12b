//! Win and draw detection.

use super::types::{Board, Cell, Mark};
use tracing::instrument;

/// The 8 winning lines, scanned in this order: rows, columns, diagonals.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Checks if there is a winner on the board.
///
/// Returns the mark holding the first complete line, `None` otherwise.
#[instrument]
pub(crate) fn check_winner(board: &Board) -> Option<Mark> {
    for [a, b, c] in LINES {
        if let Some(Cell::Occupied(mark)) = board.get(a)
            && board.get(b) == Some(Cell::Occupied(mark))
            && board.get(c) == Some(Cell::Occupied(mark))
        {
            return Some(mark);
        }
    }

    None
}

/// Checks if all 9 cells are occupied.
#[instrument]
pub(crate) fn is_board_full(board: &Board) -> bool {
    board.cells().iter().all(|cell| *cell != Cell::Empty)
}
