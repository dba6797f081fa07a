//! Random-move engine.
//!
//! Selects uniformly from legal moves and is primarily used as a weak
//! opponent in engine matches and for integration testing.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use tracing::debug;

use crate::chess_errors::ChessResult;
use crate::engines::engine_config::EngineConfig;
use crate::engines::engine_trait::Engine;
use crate::game_state::position::Position;
use crate::move_generation::chess_move::ChessMove;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;

pub struct RandomEngine {
    config: EngineConfig,
    rng: StdRng,
}

impl RandomEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            rng: config.make_rng(),
            config,
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Verdant Random"
    }

    fn new_game(&mut self) {
        self.rng = self.config.make_rng();
    }

    /// Search options are accepted but have no effect here.
    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        self.config.set_option(name, value)?;
        self.rng = self.config.make_rng();
        Ok(())
    }

    fn choose_move(&mut self, position: &mut Position) -> ChessResult<Option<ChessMove>> {
        let side = position.side_to_move();
        let legal_moves = LegalMoveGenerator.all_possible_moves(position, side);
        debug!(engine = self.name(), legal_moves = legal_moves.len(), "choosing move");
        Ok(legal_moves.choose(&mut self.rng).cloned())
    }
}
