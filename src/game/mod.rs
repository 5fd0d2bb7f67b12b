//! Game rules: domain types, win detection, and the engine.

mod engine;
mod rules;
mod types;

pub use engine::{FADE_WINDOW, GameEngine};
pub use types::{Board, Cell, GameMode, Mark, MoveRecord, Outcome};
