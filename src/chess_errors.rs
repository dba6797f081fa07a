//! Errors used throughout the chess core.
//!
//! `ChessError` is the single error type returned by board setup, move
//! execution/undo, string parsing and engine configuration. Every variant is a
//! recoverable, local condition: the operation that produced it left the
//! position exactly as it was before the call. Callers decide whether to retry,
//! ignore, or surface the failure to a user.

use thiserror::Error;

use crate::game_state::chess_types::{Color, PieceKind, Square};

/// Unified error type for the chess core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// `execute` was called on a move that is not legal in the current
    /// position (bad geometry, leaves own king in check, wrong turn, or the
    /// move was already executed).
    #[error("illegal move attempted: {description}")]
    IllegalMoveAttempted { description: String },

    /// `undo` was called on a move that is not the most recently executed one.
    #[error("out-of-order undo: {description} is not the most recent move")]
    OutOfOrderUndo { description: String },

    /// Raw board coordinates fell outside `0..8`.
    #[error("invalid piece placement at file {file}, rank {rank}")]
    InvalidPiecePlacement { file: i8, rank: i8 },

    /// A FEN-like or 64-character board string could not be parsed.
    #[error("malformed input string: {reason}")]
    MalformedInputString { reason: String },

    /// A move or removal referenced an empty square.
    #[error("no piece on square {0}")]
    NoPieceOnSquare(Square),

    /// A piece was added to a square that already holds one.
    #[error("square {0} is already occupied")]
    SquareOccupied(Square),

    /// A second king of the same color was added.
    #[error("{0} already has a king on the board")]
    DuplicateKing(Color),

    /// Pawns may only promote to a knight, bishop, rook or queen.
    #[error("cannot promote to {0}")]
    InvalidPromotionChoice(PieceKind),

    /// Unknown engine option name or unparsable value.
    #[error("invalid engine option {name}={value}")]
    InvalidEngineOption { name: String, value: String },
}

impl ChessError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ChessError::MalformedInputString {
            reason: reason.into(),
        }
    }
}

pub type ChessResult<T> = Result<T, ChessError>;
