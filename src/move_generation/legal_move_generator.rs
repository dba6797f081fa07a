//! Full legal move generation.
//!
//! Walks every piece of the requested color, takes its pseudo-legal
//! destinations from the per-kind rules and keeps those whose trial leaves the
//! mover's king safe. Generation ignores whose turn it is; turn order is
//! enforced when a move is executed.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::chess_move::{trial_leaves_king_in_check, ChessMove};
use crate::move_generation::piece_rules::safe_candidate_mask;

pub struct LegalMoveGenerator;

impl LegalMoveGenerator {
    /// Every legal move of `color`, one per (piece, destination).
    pub fn all_possible_moves(&self, position: &mut Position, color: Color) -> Vec<ChessMove> {
        let mut legal = Vec::with_capacity(48);
        for (from, piece) in position.pieces_of(color) {
            for to in squares_in(safe_candidate_mask(position, piece, from)) {
                if !trial_leaves_king_in_check(position, from, to) {
                    legal.push(ChessMove::from_legal(position, piece, from, to));
                }
            }
        }
        legal
    }

    /// Legal moves of the piece standing on `from`; empty if the square is.
    pub fn moves_from(&self, position: &mut Position, from: Square) -> Vec<ChessMove> {
        let Some(piece) = position.piece_at(from) else {
            return Vec::new();
        };
        let mut legal = Vec::new();
        for to in squares_in(safe_candidate_mask(position, piece, from)) {
            if !trial_leaves_king_in_check(position, from, to) {
                legal.push(ChessMove::from_legal(position, piece, from, to));
            }
        }
        legal
    }

    /// Stops at the first legal move found.
    pub fn has_legal_move(&self, position: &mut Position, color: Color) -> bool {
        for (from, piece) in position.pieces_of(color) {
            for to in squares_in(safe_candidate_mask(position, piece, from)) {
                if !trial_leaves_king_in_check(position, from, to) {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    fn setup(pieces: &[(&str, Color, PieceKind)]) -> Position {
        let mut position = Position::empty();
        for (square, color, kind) in pieces {
            position
                .add_piece(Piece::new(*color, *kind), sq(square))
                .expect("setup square is free");
        }
        position
    }

    #[test]
    fn startpos_has_twenty_moves_for_each_side() {
        let mut position = Position::standard();
        assert_eq!(LegalMoveGenerator.all_possible_moves(&mut position, Color::White).len(), 20);
        assert_eq!(LegalMoveGenerator.all_possible_moves(&mut position, Color::Black).len(), 20);
    }

    #[test]
    fn generation_leaves_position_untouched() {
        let mut position = Position::standard();
        let before = position.snapshot();
        LegalMoveGenerator.all_possible_moves(&mut position, Color::White);
        assert_eq!(position.snapshot(), before);
    }

    #[test]
    fn king_walks_around_own_pawn_and_captures_enemy_pawn() {
        let mut position = setup(&[
            ("e4", Color::Black, PieceKind::King),
            ("e5", Color::White, PieceKind::Pawn),
            ("f4", Color::Black, PieceKind::Pawn),
        ]);
        position.set_side_to_move(Color::Black);
        let king_moves = LegalMoveGenerator.moves_from(&mut position, sq("e4"));
        assert_eq!(king_moves.len(), 7);
        assert!(king_moves.iter().any(|mv| mv.to() == sq("e5")));
    }

    #[test]
    fn king_avoids_queen_lines() {
        let mut position = setup(&[
            ("d3", Color::White, PieceKind::King),
            ("d2", Color::White, PieceKind::Pawn),
            ("f3", Color::Black, PieceKind::Queen),
        ]);
        let moves = LegalMoveGenerator.all_possible_moves(&mut position, Color::White);
        let mut targets: Vec<Square> = moves.iter().map(ChessMove::to).collect();
        targets.sort();
        assert_eq!(targets, vec![sq("c2"), sq("c4"), sq("d4")]);
    }

    #[test]
    fn king_that_would_walk_into_check_has_no_moves() {
        let mut position = setup(&[
            ("a1", Color::White, PieceKind::King),
            ("c2", Color::Black, PieceKind::Rook),
            ("b3", Color::Black, PieceKind::Rook),
            ("h8", Color::Black, PieceKind::King),
        ]);
        assert!(LegalMoveGenerator
            .all_possible_moves(&mut position, Color::White)
            .is_empty());
        assert!(!position.is_in_check(Color::White));
    }

    #[test]
    fn back_rank_mate_is_detected() {
        let mut position = setup(&[
            ("b3", Color::White, PieceKind::Rook),
            ("a2", Color::White, PieceKind::Rook),
            ("f1", Color::Black, PieceKind::King),
        ]);
        assert!(!position.is_checkmate(Color::Black));

        let mut mv = ChessMove::new(&mut position, sq("b3"), sq("b1")).expect("rook on b3");
        mv.execute(&mut position).expect("legal move");

        assert!(position.is_in_check(Color::Black));
        assert!(position.is_checkmate(Color::Black));
        assert!(position.all_possible_moves(Color::Black).is_empty());
    }

    #[test]
    fn enemy_king_square_is_never_a_destination() {
        let mut position = setup(&[
            ("e1", Color::White, PieceKind::King),
            ("e8", Color::Black, PieceKind::King),
            ("e4", Color::White, PieceKind::Rook),
        ]);
        position.set_side_to_move(Color::Black);
        let white_moves = LegalMoveGenerator.all_possible_moves(&mut position, Color::White);
        assert!(white_moves.iter().all(|mv| mv.to() != sq("e8")));
        assert!(!white_moves.is_empty());
    }

    #[test]
    fn pinned_blocker_cannot_interpose() {
        let mut position = Position::from_fen("4k3/8/8/8/1b6/8/3N4/r3K3 w - - 0 1")
            .expect("valid FEN");
        let moves = LegalMoveGenerator.all_possible_moves(&mut position, Color::White);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|mv| mv.piece().kind == PieceKind::King));
    }

    #[test]
    fn pinned_knight_has_no_moves_from_its_square() {
        let mut position = Position::from_fen("4k3/8/8/8/1b6/8/3N4/r3K3 w - - 0 1")
            .expect("valid FEN");
        let before = position.snapshot();
        assert!(LegalMoveGenerator.moves_from(&mut position, sq("d2")).is_empty());
        assert!(LegalMoveGenerator.moves_from(&mut position, sq("h5")).is_empty());
        assert_eq!(position.snapshot(), before);
    }

    #[test]
    fn moves_from_matches_full_generation_for_one_piece() {
        let mut position = Position::standard();
        let knight: Vec<Square> = LegalMoveGenerator
            .moves_from(&mut position, sq("g1"))
            .iter()
            .map(ChessMove::to)
            .collect();
        assert_eq!(knight, vec![sq("f3"), sq("h3")]);
    }
}
