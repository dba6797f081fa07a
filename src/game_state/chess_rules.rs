//! Canonical chess-rule constants.

use crate::game_state::chess_types::PieceKind;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Standard starting position as a 64-character board string (rank 8 first).
pub const STARTING_BOARD_STRING: &str =
    "rnbqkbnrpppppppp--------------------------------PPPPPPPPRNBQKBNR";

/// Back-rank arrangement from the a-file to the h-file.
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Promotion piece used when the caller does not pick one.
pub const DEFAULT_PROMOTION: PieceKind = PieceKind::Queen;
