//! Attack queries used for check detection and castling safety.
//!
//! Every query works from raw attack tables against the current occupancy, so
//! asking whether a square is attacked never generates (or check-filters) the
//! attacker's own moves.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::leaper_attacks::{king_attacks, knight_attacks, pawn_attacks};
use crate::moves::slider_attacks::{bishop_attacks, rook_attacks};

/// A color without a king on the board is never in check.
#[inline]
pub fn is_king_in_check(position: &Position, color: Color) -> bool {
    let Some(king_sq) = position.king_square(color) else {
        return false;
    };
    is_square_attacked(position, king_sq, color.opposite())
}

pub fn is_square_attacked(position: &Position, square: Square, attacker_color: Color) -> bool {
    // A pawn of `attacker_color` hits `square` iff a pawn of the other color
    // standing on `square` would hit the attacker's square.
    let attacker_pawns = position.pieces_bitboard(attacker_color, PieceKind::Pawn);
    if pawn_attacks(attacker_color.opposite(), square) & attacker_pawns != 0 {
        return true;
    }

    let attacker_knights = position.pieces_bitboard(attacker_color, PieceKind::Knight);
    if knight_attacks(square) & attacker_knights != 0 {
        return true;
    }

    let attacker_kings = position.pieces_bitboard(attacker_color, PieceKind::King);
    if king_attacks(square) & attacker_kings != 0 {
        return true;
    }

    let queens = position.pieces_bitboard(attacker_color, PieceKind::Queen);
    let bishops_queens = position.pieces_bitboard(attacker_color, PieceKind::Bishop) | queens;
    if bishop_attacks(square, position.occupancy_all()) & bishops_queens != 0 {
        return true;
    }

    let rooks_queens = position.pieces_bitboard(attacker_color, PieceKind::Rook) | queens;
    rook_attacks(square, position.occupancy_all()) & rooks_queens != 0
}

/// Squares of every `attacker_color` piece that attacks `square`.
pub fn attackers_to_square(position: &Position, square: Square, attacker_color: Color) -> Vec<Square> {
    let occupancy = position.occupancy_all();
    let queens = position.pieces_bitboard(attacker_color, PieceKind::Queen);
    let attackers = (pawn_attacks(attacker_color.opposite(), square)
        & position.pieces_bitboard(attacker_color, PieceKind::Pawn))
        | (knight_attacks(square) & position.pieces_bitboard(attacker_color, PieceKind::Knight))
        | (king_attacks(square) & position.pieces_bitboard(attacker_color, PieceKind::King))
        | (bishop_attacks(square, occupancy)
            & (position.pieces_bitboard(attacker_color, PieceKind::Bishop) | queens))
        | (rook_attacks(square, occupancy)
            & (position.pieces_bitboard(attacker_color, PieceKind::Rook) | queens));
    squares_in(attackers).collect()
}
