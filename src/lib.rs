//! Fading tic-tac-toe engine.
//!
//! Tic-tac-toe with a short memory: only the six most recent marks stay on
//! the board, and the oldest fades away as new ones land. Games are played
//! player-vs-player or against a uniform-random CPU opponent driven by a
//! timer-based scheduler.
//!
//! # Architecture
//!
//! - [`GameEngine`] owns all mutable game state and enforces the rules.
//!   Illegal interactions (occupied cell, move after the game ended, move
//!   out of turn) are silent no-ops rather than errors.
//! - [`CpuPolicy`] is the seam for CPU move selection; [`RandomCpu`] is the
//!   uniform-random implementation.
//! - [`CpuScheduler`] polls a shared engine and plays CPU moves after a
//!   fixed thinking delay, with at most one move pending at a time.
//! - [`GameEvent`] notifies an observer after each mutation, and
//!   [`GameSnapshot`] is the read-only view a rendering shell draws from.
//!
//! # Example
//!
//! ```
//! use fading_tictactoe::{GameEngine, GameMode, Outcome};
//!
//! let mut engine = GameEngine::seeded(7);
//! engine.set_mode(GameMode::Pvp);
//! assert!(engine.place_move(4));
//! assert_eq!(engine.outcome(), Outcome::InProgress);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cpu;
mod events;
mod game;
mod scheduler;
mod snapshot;

// Crate-level exports - CPU policies
pub use cpu::{CpuPolicy, RandomCpu};

// Crate-level exports - observer events
pub use events::GameEvent;

// Crate-level exports - game types and engine
pub use game::{Board, Cell, FADE_WINDOW, GameEngine, GameMode, Mark, MoveRecord, Outcome};

// Crate-level exports - scheduler
pub use scheduler::{CPU_MOVE_DELAY, POLL_INTERVAL, CpuScheduler, SchedulerHandle};

// Crate-level exports - rendering view
pub use snapshot::GameSnapshot;
