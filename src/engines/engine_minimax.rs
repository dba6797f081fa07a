//! Minimax engine: runs a fixed-depth [`MinimaxSearch`] and picks uniformly
//! among the tied best root moves.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rand::rngs::StdRng;
use tracing::info;

use crate::chess_errors::ChessResult;
use crate::engines::engine_config::EngineConfig;
use crate::engines::engine_trait::Engine;
use crate::game_state::position::Position;
use crate::move_generation::chess_move::ChessMove;
use crate::search::minimax::{MinimaxSearch, SearchReport};

pub struct MinimaxEngine {
    config: EngineConfig,
    rng: StdRng,
    search: MinimaxSearch,
    last_report: Option<SearchReport>,
}

impl MinimaxEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            rng: config.make_rng(),
            search: MinimaxSearch::new(config.search_config()),
            config,
            last_report: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_stop_flag(&mut self, stop: Option<Arc<AtomicBool>>) {
        self.search.set_stop_flag(stop);
    }

    /// Diagnostics from the most recent `choose_move`.
    pub fn last_report(&self) -> Option<&SearchReport> {
        self.last_report.as_ref()
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "Verdant Minimax"
    }

    fn new_game(&mut self) {
        self.rng = self.config.make_rng();
        self.last_report = None;
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        self.config.set_option(name, value)?;
        self.search.set_config(self.config.search_config());
        self.rng = self.config.make_rng();
        Ok(())
    }

    fn choose_move(&mut self, position: &mut Position) -> ChessResult<Option<ChessMove>> {
        let report = self.search.search(position)?;
        info!(
            engine = self.name(),
            depth = report.depth,
            elapsed_ms = report.elapsed.as_millis() as u64,
            leaf_nodes = report.leaf_nodes,
            "search complete"
        );
        let picked = report.pick_best(&mut self.rng);
        self.last_report = Some(report);
        Ok(picked)
    }
}
