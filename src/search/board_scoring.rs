//! Static board evaluation.
//!
//! Strategies that need a one-shot judgement of a position (the greedy
//! engine, match reports) go through the `BoardScorer` trait so alternate
//! heuristics can be swapped without touching the callers.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

/// Score returned by search when the side to act has no legal move.
pub const TERMINAL_SCORE: i32 = 1000;

pub trait BoardScorer: Send + Sync {
    /// Score from `perspective`'s point of view; higher is better for it.
    fn score(&self, position: &Position, perspective: Color) -> i32;
}

/// Sum of piece values for one color.
pub fn material_score(position: &Position, color: Color) -> i32 {
    PieceKind::ALL
        .iter()
        .map(|kind| position.pieces_bitboard(color, *kind).count_ones() as i32 * kind.value())
        .sum()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, position: &Position, perspective: Color) -> i32 {
        material_score(position, perspective) - material_score(position, perspective.opposite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_position_is_balanced() {
        let position = Position::standard();
        assert_eq!(material_score(&position, Color::White), 139);
        assert_eq!(MaterialScorer.score(&position, Color::Black), 0);
    }

    #[test]
    fn missing_queen_costs_nine() {
        let mut position = Position::standard();
        let d8 = "d8".parse().expect("valid square");
        position.remove_piece(d8).expect("black queen on d8");
        assert_eq!(MaterialScorer.score(&position, Color::White), 9);
        assert_eq!(MaterialScorer.score(&position, Color::Black), -9);
    }
}
