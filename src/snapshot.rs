//! Read-only state view for rendering shells.

use crate::game::{Cell, GameMode, Mark, MoveRecord, Outcome};
use serde::Serialize;

/// Snapshot of everything a renderer needs for one frame.
///
/// Produced by [`GameEngine::snapshot`]; serializable so a shell on the
/// other side of a process or socket boundary can render it too.
///
/// [`GameEngine::snapshot`]: crate::GameEngine::snapshot
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    /// Cells 0-8, row-major.
    pub board: [Cell; 9],
    /// Mark holding the turn (meaningless once the game is over).
    pub current_mark: Mark,
    /// Active game mode.
    pub mode: GameMode,
    /// Win, draw, or in-progress.
    pub outcome: Outcome,
    /// Human-readable status line.
    pub status: String,
    /// Live move records, oldest first.
    pub history: Vec<MoveRecord>,
    /// Index of the mark about to fade, when the window is full.
    pub fading: Option<usize>,
}
