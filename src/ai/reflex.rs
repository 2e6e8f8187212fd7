//! Random-move baseline player.

use super::Agent;
use crate::game::{Grid, Position, Side};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Picks uniformly among its legal moves. No lookahead, no evaluation.
#[derive(Debug, Clone)]
pub struct ReflexAgent {
    side: Side,
    rng: ChaCha8Rng,
}

impl ReflexAgent {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(side: Side, seed: u64) -> Self {
        Self {
            side,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Agent for ReflexAgent {
    fn side(&self) -> Side {
        self.side
    }

    fn best_move(&mut self, grid: &Grid) -> Option<Position> {
        if grid.is_game_over {
            return None;
        }
        grid.legal_moves_for(self.side)
            .choose(&mut self.rng)
            .copied()
    }
}
