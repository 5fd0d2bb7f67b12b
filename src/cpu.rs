//! CPU opponent policies.

use crate::game::Board;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Chooses a cell for the CPU to play.
///
/// The seam between the engine and move selection: the scheduler holds a
/// boxed policy and the engine applies whatever it picks through the
/// standard placement path.
pub trait CpuPolicy: Send {
    /// Picks an empty cell index, or `None` when the board has none.
    fn choose(&mut self, board: &Board) -> Option<usize>;
}

/// Uniform-random move selection.
///
/// Picks uniformly among the empty cells. Deliberately non-strategic: no
/// blocking or winning heuristic. Uniformity is part of the game's
/// contract, not a placeholder for something smarter.
#[derive(Debug)]
pub struct RandomCpu {
    rng: StdRng,
}

impl RandomCpu {
    /// Creates a policy seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a deterministic policy, for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomCpu {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuPolicy for RandomCpu {
    fn choose(&mut self, board: &Board) -> Option<usize> {
        let open = board.empty_indices();
        if open.is_empty() {
            return None;
        }
        let index = open[self.rng.gen_range(0..open.len())];
        debug!(index, options = open.len(), "CPU chose a cell");
        Some(index)
    }
}
