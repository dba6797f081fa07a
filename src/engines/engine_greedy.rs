//! One-ply look-ahead engine.
//!
//! Tries every legal move, scores the resulting material balance and keeps
//! the best, breaking ties at random. No recursion, so it happily walks into
//! recaptures.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use tracing::debug;

use crate::chess_errors::ChessResult;
use crate::engines::engine_config::EngineConfig;
use crate::engines::engine_trait::Engine;
use crate::game_state::position::Position;
use crate::move_generation::chess_move::ChessMove;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::search::board_scoring::{BoardScorer, MaterialScorer};

pub struct GreedyEngine {
    config: EngineConfig,
    rng: StdRng,
    scorer: Box<dyn BoardScorer>,
}

impl GreedyEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_scorer(config, Box::new(MaterialScorer))
    }

    pub fn with_scorer(config: EngineConfig, scorer: Box<dyn BoardScorer>) -> Self {
        Self {
            rng: config.make_rng(),
            config,
            scorer,
        }
    }
}

impl Default for GreedyEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine for GreedyEngine {
    fn name(&self) -> &str {
        "Verdant Greedy"
    }

    fn new_game(&mut self) {
        self.rng = self.config.make_rng();
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        self.config.set_option(name, value)?;
        self.rng = self.config.make_rng();
        Ok(())
    }

    fn choose_move(&mut self, position: &mut Position) -> ChessResult<Option<ChessMove>> {
        let side = position.side_to_move();
        let legal_moves = LegalMoveGenerator.all_possible_moves(position, side);

        let mut best_value = i32::MIN;
        let mut best_moves = Vec::new();

        for mut mv in legal_moves {
            mv.execute_quiet(position)?;
            let value = self.scorer.score(position, side);
            mv.undo_quiet(position)?;

            if value > best_value {
                best_value = value;
                best_moves.clear();
                best_moves.push(mv);
            } else if value == best_value {
                best_moves.push(mv);
            }
        }

        debug!(
            engine = self.name(),
            best_value,
            ties = best_moves.len(),
            "choosing move"
        );
        Ok(best_moves.choose(&mut self.rng).cloned())
    }
}
