//! Compact 64-character board form.
//!
//! One character per square, rank 8 down to rank 1 and file a to h within
//! each rank; FEN piece letters for occupied squares and `-` for empty ones.
//! Line breaks are ignored on input so a board may be written as eight lines.
//! Only placement is carried: a parsed position otherwise has the defaults of
//! [`Position::empty`].

use tracing::warn;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

const EMPTY_SQUARE: char = '-';

pub fn parse_board_string(board: &str) -> ChessResult<Position> {
    build_position(board).inspect_err(|e| warn!(error = %e, "rejected board string"))
}

fn build_position(board: &str) -> ChessResult<Position> {
    let cells: Vec<char> = board.chars().filter(|ch| !matches!(ch, '\n' | '\r')).collect();
    if cells.len() != 64 {
        return Err(ChessError::malformed(format!(
            "board string must have 64 squares, found {}",
            cells.len()
        )));
    }

    let mut position = Position::empty();
    for (offset, ch) in cells.into_iter().enumerate() {
        if ch == EMPTY_SQUARE {
            continue;
        }
        let piece = Piece::from_char(ch).ok_or_else(|| {
            ChessError::malformed(format!("invalid piece character '{ch}' in board string"))
        })?;
        let square = square_for_offset(offset)
            .ok_or_else(|| ChessError::malformed("board string offset out of range"))?;
        position
            .add_piece(piece, square)
            .map_err(|e| ChessError::malformed(e.to_string()))?;
    }

    Ok(position)
}

pub fn generate_board_string(position: &Position) -> String {
    (0..64)
        .map(|offset| {
            square_for_offset(offset)
                .and_then(|square| position.piece_at(square))
                .map_or(EMPTY_SQUARE, Piece::to_char)
        })
        .collect()
}

/// String offset 0 is a8, 63 is h1.
fn square_for_offset(offset: usize) -> Option<Square> {
    let rank = 7 - (offset / 8) as u8;
    let file = (offset % 8) as u8;
    Square::at(file, rank)
}
