//! Pawn destinations: pushes, double pushes from the start rank, diagonal
//! captures and en-passant captures onto the target square.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::leaper_attacks::pawn_attacks;

pub fn pawn_candidates(position: &Position, from: Square, color: Color) -> u64 {
    let empty = !position.occupancy_all();
    let enemy_occ = position.occupancy(color.opposite());
    let dir = color.pawn_direction();
    let mut targets = 0u64;

    if let Some(one_step) = from.offset(0, dir) {
        if one_step.mask() & empty != 0 {
            targets |= one_step.mask();

            if from.rank() == color.pawn_start_rank() {
                if let Some(two_step) = one_step.offset(0, dir) {
                    targets |= two_step.mask() & empty;
                }
            }
        }
    }

    let attacks = pawn_attacks(color, from);
    targets |= attacks & enemy_occ;

    if let Some(target) = position.en_passant_target() {
        if attacks & target.mask() & empty != 0 && has_en_passant_victim(position, target, color) {
            targets |= target.mask();
        }
    }

    targets
}

/// The pawn an en-passant capture onto `target` would take sits one rank
/// behind the target from the capturer's point of view.
pub fn en_passant_victim_square(target: Square, capturer: Color) -> Option<Square> {
    target.offset(0, -capturer.pawn_direction())
}

fn has_en_passant_victim(position: &Position, target: Square, capturer: Color) -> bool {
    en_passant_victim_square(target, capturer)
        .and_then(|square| position.piece_at(square))
        .is_some_and(|piece| piece == Piece::new(capturer.opposite(), PieceKind::Pawn))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    fn targets(position: &Position, from: &str, color: Color) -> Vec<Square> {
        squares_in(pawn_candidates(position, sq(from), color)).collect()
    }

    #[test]
    fn start_rank_pawn_has_single_and_double_push() {
        let position = Position::standard();
        assert_eq!(targets(&position, "e2", Color::White), vec![sq("e3"), sq("e4")]);
        assert_eq!(targets(&position, "d7", Color::Black), vec![sq("d5"), sq("d6")]);
    }

    #[test]
    fn blocked_pawn_cannot_jump() {
        let mut position = Position::standard();
        position
            .add_piece(Piece::new(Color::Black, PieceKind::Knight), sq("e3"))
            .expect("e3 is free");
        assert!(targets(&position, "e2", Color::White).is_empty());
        assert_eq!(
            targets(&position, "d2", Color::White),
            vec![sq("d3"), sq("e3"), sq("d4")]
        );
    }

    #[test]
    fn en_passant_requires_enemy_pawn_behind_target() {
        let mut position = Position::empty();
        position
            .add_piece(Piece::new(Color::White, PieceKind::Pawn), sq("e5"))
            .expect("free");
        position.set_en_passant_target(Some(sq("d6")));
        assert_eq!(targets(&position, "e5", Color::White), vec![sq("e6")]);

        position
            .add_piece(Piece::new(Color::Black, PieceKind::Pawn), sq("d5"))
            .expect("free");
        assert_eq!(targets(&position, "e5", Color::White), vec![sq("d6"), sq("e6")]);
    }

    #[test]
    fn pawn_never_captures_forward() {
        let mut position = Position::empty();
        position
            .add_piece(Piece::new(Color::White, PieceKind::Pawn), sq("g7"))
            .expect("free");
        position
            .add_piece(Piece::new(Color::Black, PieceKind::Rook), sq("g8"))
            .expect("free");
        assert!(targets(&position, "g7", Color::White).is_empty());
    }
}
