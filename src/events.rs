//! Observer events emitted after engine mutations.

use crate::game::{GameMode, Mark, Outcome};

/// Messages sent from the engine (and scheduler) to a rendering observer.
///
/// One event per mutation, so a shell can redraw without polling the
/// engine. Events carry enough to animate the change; the full picture is
/// always available from [`GameEngine::snapshot`].
///
/// [`GameEngine::snapshot`]: crate::GameEngine::snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A mark was placed on the board.
    MoveApplied {
        /// Mark that was placed.
        mark: Mark,
        /// Cell it landed on.
        index: usize,
    },
    /// The oldest mark faded off the board.
    MarkFaded {
        /// Cell that was cleared.
        index: usize,
    },
    /// The scheduler armed a CPU move; the CPU is "thinking".
    CpuThinking,
    /// The game mode changed (implies a reset).
    ModeChanged(GameMode),
    /// The game was reset.
    GameReset,
    /// The starting mark (and in vs-CPU mode the mark assignment) was
    /// rerolled.
    StartRandomized {
        /// Mark that now holds the turn.
        current: Mark,
    },
    /// The game ended.
    GameOver {
        /// Final outcome.
        outcome: Outcome,
    },
}
