//! FEN-to-Position parser.
//!
//! Builds a fresh position from a Forsyth-Edwards Notation string. The
//! position is only returned once every field has parsed, so malformed input
//! never leaves a half-populated board behind.

use tracing::warn;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<Position> {
    build_position(fen).inspect_err(|e| warn!(%fen, error = %e, "rejected FEN"))
}

fn build_position(fen: &str) -> ChessResult<Position> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| missing("board layout"))?;
    let side_part = parts.next().ok_or_else(|| missing("side to move"))?;
    let castling_part = parts.next().ok_or_else(|| missing("castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| missing("en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| missing("halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| missing("fullmove number"))?;

    if parts.next().is_some() {
        return Err(ChessError::malformed("FEN has extra trailing fields"));
    }

    let mut position = Position::empty();

    parse_board(board_part, &mut position)?;
    position.set_side_to_move(parse_side_to_move(side_part)?);
    position.set_castling_rights(parse_castling_rights(castling_part)?);
    position.set_en_passant_target(parse_en_passant_square(en_passant_part)?);
    let halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| ChessError::malformed(format!("invalid halfmove clock: {halfmove_part}")))?;
    let fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| ChessError::malformed(format!("invalid fullmove number: {fullmove_part}")))?;
    position.set_move_counters(halfmove_clock, fullmove_number);

    Ok(position)
}

fn missing(field: &str) -> ChessError {
    ChessError::malformed(format!("missing {field} in FEN"))
}

fn parse_board(board_part: &str, position: &mut Position) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::malformed("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessError::malformed(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(ChessError::malformed("board rank has too many files"));
                }
                continue;
            }

            let piece = Piece::from_char(ch).ok_or_else(|| {
                ChessError::malformed(format!("invalid piece character '{ch}' in board layout"))
            })?;
            let square = Square::at(file, board_rank)
                .ok_or_else(|| ChessError::malformed("board rank has too many files"))?;
            position
                .add_piece(piece, square)
                .map_err(|e| ChessError::malformed(e.to_string()))?;
            file += 1;
        }

        if file != 8 {
            return Err(ChessError::malformed("board rank does not sum to 8 files"));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessError::malformed(format!(
            "invalid side-to-move field: {side_part}"
        ))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_WHITE_KINGSIDE,
            'Q' => rights |= CASTLE_WHITE_QUEENSIDE,
            'k' => rights |= CASTLE_BLACK_KINGSIDE,
            'q' => rights |= CASTLE_BLACK_QUEENSIDE,
            _ => {
                return Err(ChessError::malformed(format!(
                    "invalid castling rights character: {ch}"
                )))
            }
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    algebraic_to_square(en_passant_part).map(Some)
}
