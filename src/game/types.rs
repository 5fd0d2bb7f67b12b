//! Core domain types for fading tic-tac-toe.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Mark a player places on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Mark {
    /// The X mark (moves first after a reset).
    #[display("X")]
    X,
    /// The O mark.
    #[display("O")]
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    Empty,
    /// Cell holding a mark.
    Occupied(Mark),
}

/// 3x3 board with cells 0-8 in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Sets the cell at the given index. Callers validate bounds.
    pub(crate) fn set(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    /// Checks whether the cell at the given index is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Returns all cells as an array slice.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Returns the indices of all empty cells.
    pub fn empty_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                let symbol = match self.cells[index] {
                    Cell::Empty => (index + 1).to_string(),
                    Cell::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Record of a live move: where it landed and whose mark it carries.
///
/// The engine keeps these in play order; the front of the history is the
/// next mark to fade once the window is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Cell the mark occupies (0-8).
    pub index: usize,
    /// Mark that was placed.
    pub mark: Mark,
}

/// Game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum GameMode {
    /// Two humans sharing the board.
    #[display("pvp")]
    #[serde(rename = "pvp")]
    Pvp,
    /// Human versus the random CPU.
    #[display("cpu")]
    #[serde(rename = "cpu")]
    VsCpu,
}

/// Current outcome of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Game is ongoing.
    InProgress,
    /// Game ended with a winning mark.
    Win(Mark),
    /// Game ended with no winner.
    Draw,
}

impl Outcome {
    /// True once the game has ended.
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }

    /// The winning mark, if any.
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::Win(mark) => Some(mark),
            _ => None,
        }
    }
}
