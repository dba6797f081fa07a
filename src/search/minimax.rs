//! Fixed-depth minimax with alpha-beta pruning and a transposition cache.
//!
//! Scores are material swings accumulated along the line being searched: each
//! capture by the engine's side adds the captured piece's value, each capture
//! by the opponent subtracts it. A side with no legal move at an interior node
//! scores `±TERMINAL_SCORE` (checkmate and stalemate alike).
//!
//! The search executes and undoes moves quietly on the caller's position, so
//! the position is back in its original state when `search` returns, whether
//! it succeeds or fails.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::prelude::IndexedRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::chess_errors::ChessResult;
use crate::game_state::position::Position;
use crate::move_generation::chess_move::ChessMove;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::search::board_scoring::TERMINAL_SCORE;
use crate::search::transposition_table::{CacheStats, SearchKey, TranspositionCache};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched below each root move.
    pub depth: u8,
    pub alpha_beta: bool,
    pub use_cache: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            alpha_beta: true,
            use_cache: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    /// Every root move that reached `best_score`.
    pub best_moves: Vec<ChessMove>,
    pub best_score: i32,
    pub depth: u8,
    pub leaf_nodes: u64,
    pub cache: CacheStats,
    pub elapsed: Duration,
    /// True if the stop flag cut the search short.
    pub stopped: bool,
}

impl SearchReport {
    /// First of the tied best moves, in generation order.
    pub fn best_move(&self) -> Option<&ChessMove> {
        self.best_moves.first()
    }

    /// Uniform random pick among the tied best moves.
    pub fn pick_best<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<ChessMove> {
        self.best_moves.choose(rng).cloned()
    }
}

#[derive(Debug, Default)]
pub struct MinimaxSearch {
    config: SearchConfig,
    cache: TranspositionCache,
    stop: Option<Arc<AtomicBool>>,
    leaf_nodes: u64,
    stopped: bool,
}

impl MinimaxSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Cooperative cancellation: the flag is polled between root moves and on
    /// entry to every interior call.
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }

    pub fn set_stop_flag(&mut self, stop: Option<Arc<AtomicBool>>) {
        self.stop = stop;
    }

    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// Searches the side to move's options. An empty `best_moves` means that
    /// side has no legal move.
    pub fn search(&mut self, position: &mut Position) -> ChessResult<SearchReport> {
        let started = Instant::now();
        self.cache.clear();
        self.leaf_nodes = 0;
        self.stopped = false;

        let side = position.side_to_move();
        let root_moves = LegalMoveGenerator.all_possible_moves(position, side);

        let mut best_score = -TERMINAL_SCORE;
        let mut best_moves: Vec<ChessMove> = Vec::new();

        for mut mv in root_moves {
            if self.stop_requested() {
                break;
            }

            // Children only need to prove they cannot tie the current best.
            let alpha = if best_moves.is_empty() {
                i32::MIN
            } else {
                best_score.saturating_sub(1)
            };

            mv.execute_quiet(position)?;
            let scored = self.minimax(
                position,
                mv.capture_value(),
                self.config.depth,
                false,
                alpha,
                i32::MAX,
            );
            mv.undo_quiet(position)?;
            let score = scored?;

            if self.stopped {
                break;
            }
            trace!(mv = %mv, score, "root move scored");

            if best_moves.is_empty() || score > best_score {
                best_score = score;
                best_moves.clear();
                best_moves.push(mv);
            } else if score == best_score {
                best_moves.push(mv);
            }
        }

        let report = SearchReport {
            best_moves,
            best_score,
            depth: self.config.depth,
            leaf_nodes: self.leaf_nodes,
            cache: self.cache.stats(),
            elapsed: started.elapsed(),
            stopped: self.stopped,
        };
        debug!(
            depth = report.depth,
            leaf_nodes = report.leaf_nodes,
            cache_hits = report.cache.hits,
            elapsed_ms = report.elapsed.as_millis() as u64,
            best_score = report.best_score,
            ties = report.best_moves.len(),
            "minimax search finished"
        );
        Ok(report)
    }

    fn minimax(
        &mut self,
        position: &mut Position,
        score: i32,
        depth: u8,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> ChessResult<i32> {
        if self.stop_requested() {
            return Ok(score);
        }

        let key = self
            .config
            .use_cache
            .then(|| SearchKey::new(position, depth));
        if let Some(key) = &key {
            if let Some(cached) = self.cache.lookup(key) {
                return Ok(cached);
            }
        }

        if depth == 0 {
            self.leaf_nodes += 1;
            if let Some(key) = key {
                self.cache.store(key, score);
            }
            return Ok(score);
        }

        let side = position.side_to_move();
        let moves = LegalMoveGenerator.all_possible_moves(position, side);
        if moves.is_empty() {
            return Ok(if maximizing {
                -TERMINAL_SCORE
            } else {
                TERMINAL_SCORE
            });
        }

        let (alpha_orig, beta_orig) = (alpha, beta);
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for mut mv in moves {
            let child_score = if maximizing {
                score + mv.capture_value()
            } else {
                score - mv.capture_value()
            };

            mv.execute_quiet(position)?;
            let value = self.minimax(position, child_score, depth - 1, !maximizing, alpha, beta);
            mv.undo_quiet(position)?;
            let value = value?;

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }
            if self.config.alpha_beta && beta <= alpha {
                break;
            }
        }

        let exact = !self.config.alpha_beta || (alpha_orig < best && best < beta_orig);
        if exact && !self.stopped {
            if let Some(key) = key {
                self.cache.store(key, best);
            }
        }
        Ok(best)
    }

    fn stop_requested(&mut self) -> bool {
        if !self.stopped {
            if let Some(stop) = &self.stop {
                self.stopped = stop.load(Ordering::Relaxed);
            }
        }
        self.stopped
    }
}
