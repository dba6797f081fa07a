//! Per-kind movement rules and the shared legality test.
//!
//! `candidate_squares` is pseudo-legal: it follows the piece's movement pattern
//! but does not look at the safety of the mover's own king. `is_legal_move`
//! adds that filter by probing the move on the board.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::chess_move::trial_leaves_king_in_check;
use crate::move_generation::legal_moves_king::king_candidates;
use crate::move_generation::legal_moves_knight::knight_candidates;
use crate::move_generation::legal_moves_pawn::pawn_candidates;
use crate::move_generation::legal_moves_sliders::{
    bishop_candidates, queen_candidates, rook_candidates,
};

/// Pseudo-legal destinations of `piece` standing on `from`, as a bitboard.
pub fn candidate_mask(position: &Position, piece: Piece, from: Square) -> u64 {
    let color = piece.color;
    match piece.kind {
        PieceKind::Pawn => pawn_candidates(position, from, color),
        PieceKind::Knight => knight_candidates(position, from, color),
        PieceKind::Bishop => bishop_candidates(position, from, color),
        PieceKind::Rook => rook_candidates(position, from, color),
        PieceKind::Queen => queen_candidates(position, from, color),
        PieceKind::King => king_candidates(position, from, color),
    }
}

/// Pseudo-legal destinations of whatever stands on `from`; empty if nothing does.
pub fn candidate_squares(position: &Position, from: Square) -> SquareIter {
    let mask = position
        .piece_at(from)
        .map_or(0, |piece| candidate_mask(position, piece, from));
    squares_in(mask)
}

/// [`candidate_mask`] minus the enemy king's square; kings are never captured.
pub fn safe_candidate_mask(position: &Position, piece: Piece, from: Square) -> u64 {
    candidate_mask(position, piece, from)
        & !position.pieces_bitboard(piece.color.opposite(), PieceKind::King)
}

/// True iff the piece on `from` may move to `to` without leaving its own king
/// in check. A piece can never move onto its own square.
pub fn is_legal_move(position: &mut Position, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    let Some(piece) = position.piece_at(from) else {
        return false;
    };
    if safe_candidate_mask(position, piece, from) & to.mask() == 0 {
        return false;
    }
    !trial_leaves_king_in_check(position, from, to)
}
