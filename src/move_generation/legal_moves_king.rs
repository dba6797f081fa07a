//! King destinations including castling.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::moves::leaper_attacks::king_attacks;
use crate::moves::slider_attacks::squares_between;

pub fn king_candidates(position: &Position, from: Square, color: Color) -> u64 {
    let steps = king_attacks(from) & !position.occupancy(color);
    steps | castling_candidates(position, from, color)
}

/// Two-file king moves for every side where castling is currently allowed.
fn castling_candidates(position: &Position, king_from: Square, color: Color) -> u64 {
    if king_from.file() != KING_HOME_FILE || king_from.rank() != color.home_rank() {
        return 0;
    }

    let enemy = color.opposite();
    // Cannot castle out of check.
    if is_square_attacked(position, king_from, enemy) {
        return 0;
    }

    let mut targets = 0u64;
    for side in CastleSide::ALL {
        if let Some(destination) = castle_destination(position, king_from, color, side) {
            targets |= destination.mask();
        }
    }
    targets
}

fn castle_destination(
    position: &Position,
    king_from: Square,
    color: Color,
    side: CastleSide,
) -> Option<Square> {
    if !position.can_castle(color, side) {
        return None;
    }

    let rook_sq = Square::at(side.rook_home_file(), color.home_rank())?;
    if position.piece_at(rook_sq) != Some(Piece::new(color, PieceKind::Rook)) {
        return None;
    }
    if squares_between(king_from, rook_sq) & position.occupancy_all() != 0 {
        return None;
    }

    let direction = side.file_direction();
    let transit = king_from.offset(direction, 0)?;
    let destination = king_from.offset(2 * direction, 0)?;
    let enemy = color.opposite();
    if is_square_attacked(position, transit, enemy) || is_square_attacked(position, destination, enemy)
    {
        return None;
    }

    Some(destination)
}

/// Rook start and end squares for a king move that castles, if it is one.
pub fn castle_rook_squares(king_from: Square, king_to: Square) -> Option<(Square, Square)> {
    let file_delta = king_to.file() as i8 - king_from.file() as i8;
    if king_from.rank() != king_to.rank() || file_delta.abs() != 2 {
        return None;
    }
    let side = CastleSide::from_file_direction(file_delta.signum())?;
    let rook_from = Square::at(side.rook_home_file(), king_from.rank())?;
    let rook_to = king_from.offset(side.file_direction(), 0)?;
    Some((rook_from, rook_to))
}
