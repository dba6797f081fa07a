//! Minimal head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other on one position until
//! the side to move has no legal move or the ply limit is reached. The core
//! reports "no legal move" without classifying it; this harness tells mate
//! from stalemate by looking at check.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::Engine;
use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Checkmate { winner: Color },
    Stalemate,
    PlyLimit,
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub plies: u32,
    /// White material minus Black material at the end of the match.
    pub material_balance: i32,
    pub played_moves: Vec<String>,
    pub white_time: Duration,
    pub black_time: Duration,
}

/// Play from `position` as it stands, mutating it move by move.
///
/// `white` moves whenever White is to move and `black` likewise, so a match
/// can start from a position with either side on turn.
pub fn play_match(
    position: &mut Position,
    white: &mut dyn Engine,
    black: &mut dyn Engine,
    max_plies: u32,
) -> ChessResult<MatchResult> {
    white.new_game();
    black.new_game();

    let mut played_moves = Vec::new();
    let mut white_time = Duration::ZERO;
    let mut black_time = Duration::ZERO;
    let mut plies = 0u32;

    let outcome = loop {
        let side = position.side_to_move();
        if position.is_checkmate(side) {
            break classify_terminal(position, side);
        }
        if plies >= max_plies {
            break MatchOutcome::PlyLimit;
        }

        let started = Instant::now();
        let played = match side {
            Color::White => white.play_turn(position)?,
            Color::Black => black.play_turn(position)?,
        };
        let spent = started.elapsed();
        match side {
            Color::White => white_time += spent,
            Color::Black => black_time += spent,
        }

        let Some(mv) = played else {
            break classify_terminal(position, side);
        };
        debug!(ply = plies + 1, %mv, "match move");
        played_moves.push(mv.to_string());
        plies += 1;
    };

    let material_balance =
        position.evaluate_score(Color::White) - position.evaluate_score(Color::Black);
    info!(?outcome, plies, material_balance, "match finished");

    Ok(MatchResult {
        outcome,
        plies,
        material_balance,
        played_moves,
        white_time,
        black_time,
    })
}

fn classify_terminal(position: &Position, side: Color) -> MatchOutcome {
    if position.is_in_check(side) {
        MatchOutcome::Checkmate {
            winner: side.opposite(),
        }
    } else {
        MatchOutcome::Stalemate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_config::EngineConfig;
    use crate::engines::engine_minimax::MinimaxEngine;
    use crate::engines::engine_random::RandomEngine;

    #[test]
    fn random_match_respects_ply_limit() {
        let mut position = Position::standard();
        let mut white = RandomEngine::new(EngineConfig::default().with_seed(1));
        let mut black = RandomEngine::new(EngineConfig::default().with_seed(2));
        let result = play_match(&mut position, &mut white, &mut black, 40).expect("match runs");
        assert!(result.plies <= 40);
        assert_eq!(result.played_moves.len(), result.plies as usize);
        assert_eq!(position.history_len(), result.plies as usize);
        if result.outcome == MatchOutcome::PlyLimit {
            assert_eq!(result.plies, 40);
        }
    }

    #[test]
    fn minimax_delivers_fools_mate() {
        let mut position = Position::from_fen(
            "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq g3 0 2",
        )
        .expect("valid FEN");
        let mut white = RandomEngine::new(EngineConfig::default().with_seed(4));
        let mut black = MinimaxEngine::new(EngineConfig::default().with_depth(1).with_seed(4));
        let result = play_match(&mut position, &mut white, &mut black, 10).expect("match runs");
        assert_eq!(
            result.outcome,
            MatchOutcome::Checkmate {
                winner: Color::Black
            }
        );
        assert_eq!(result.plies, 1);
        assert_eq!(result.played_moves, vec!["Black Queen d8->h4".to_owned()]);
    }

    #[test]
    fn stalemate_is_not_reported_as_mate() {
        let mut position = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("valid FEN");
        let mut white = RandomEngine::default();
        let mut black = RandomEngine::default();
        let result = play_match(&mut position, &mut white, &mut black, 10).expect("match runs");
        assert_eq!(result.outcome, MatchOutcome::Stalemate);
        assert_eq!(result.plies, 0);
        assert_eq!(result.material_balance, 9);
    }

    /// Total White material lead over a fixed set of seeded games between a
    /// White minimax engine of `depth` and a random Black.
    fn total_balance_against_random(depth: u8) -> i32 {
        (0..8u64)
            .map(|seed| {
                let mut position = Position::standard();
                let mut white =
                    MinimaxEngine::new(EngineConfig::default().with_depth(depth).with_seed(seed));
                let mut black = RandomEngine::new(EngineConfig::default().with_seed(100 + seed));
                play_match(&mut position, &mut white, &mut black, 24)
                    .expect("match runs")
                    .material_balance
            })
            .sum()
    }

    #[test]
    fn deeper_search_scores_no_worse_against_random() {
        let shallow = total_balance_against_random(0);
        let deep = total_balance_against_random(2);
        assert!(
            deep >= shallow,
            "depth 2 total balance {deep} fell below depth 0 total {shallow}"
        );
    }
}
