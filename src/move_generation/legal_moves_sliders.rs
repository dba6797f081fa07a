//! Bishop, rook and queen destinations. Each ray stops at the first occupied
//! square; that square is offered only if it holds an enemy piece.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::slider_attacks::{bishop_attacks, queen_attacks, rook_attacks};

#[inline]
pub fn bishop_candidates(position: &Position, from: Square, color: Color) -> u64 {
    bishop_attacks(from, position.occupancy_all()) & !position.occupancy(color)
}

#[inline]
pub fn rook_candidates(position: &Position, from: Square, color: Color) -> u64 {
    rook_attacks(from, position.occupancy_all()) & !position.occupancy(color)
}

#[inline]
pub fn queen_candidates(position: &Position, from: Square, color: Color) -> u64 {
    queen_attacks(from, position.occupancy_all()) & !position.occupancy(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    #[test]
    fn rays_stop_at_ally_and_include_enemy() {
        let mut position = Position::empty();
        position
            .add_piece(Piece::new(Color::White, PieceKind::Rook), sq("a1"))
            .expect("free");
        position
            .add_piece(Piece::new(Color::White, PieceKind::Pawn), sq("a3"))
            .expect("free");
        position
            .add_piece(Piece::new(Color::Black, PieceKind::Knight), sq("c1"))
            .expect("free");

        let targets: Vec<Square> =
            squares_in(rook_candidates(&position, sq("a1"), Color::White)).collect();
        assert_eq!(targets, vec![sq("b1"), sq("c1"), sq("a2")]);
    }

    #[test]
    fn queen_in_open_centre_reaches_27_squares() {
        let mut position = Position::empty();
        position
            .add_piece(Piece::new(Color::Black, PieceKind::Queen), sq("d4"))
            .expect("free");
        let targets = queen_candidates(&position, sq("d4"), Color::Black);
        assert_eq!(targets.count_ones(), 27);
        assert_eq!(
            targets,
            bishop_candidates(&position, sq("d4"), Color::Black)
                | rook_candidates(&position, sq("d4"), Color::Black)
        );
    }
}
