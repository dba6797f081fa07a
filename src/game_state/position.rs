//! Mutable board state.
//!
//! `Position` stores a square-indexed mailbox for O(1) piece lookup together
//! with per-color/per-kind bitboards and occupancy caches used by the attack
//! tables. It is mutated only through piece placement/removal and through
//! [`ChessMove`] execution and undo, which keep every representation in sync.

use std::fmt;

use tracing::debug;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board_events::{BoardEvent, ListenerId, Listeners};
use crate::game_state::chess_rules::BACK_RANK;
use crate::game_state::chess_types::*;
use crate::move_generation::chess_move::{ChessMove, MoveRecord};
use crate::move_generation::legal_move_checks::{attackers_to_square, is_king_in_check};
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::search::board_scoring::material_score;
use crate::utils::board_string::{generate_board_string, parse_board_string};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::render_position::render_position;

/// Occupancy-only encoding of the board: one byte per square, `0` for empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardKey([u8; 64]);

impl BoardKey {
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

/// Comparable copy of everything undo must restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionSnapshot {
    pub squares: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

#[derive(Debug, Clone)]
pub struct Position {
    squares: [Option<Piece>; 64],

    // [color][piece_kind]
    pieces: [[u64; 6]; 2],
    occupancy_by_color: [u64; 2],
    occupancy_all: u64,

    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,

    halfmove_clock: u16,
    fullmove_number: u16,

    history: Vec<MoveRecord>,
    // Serials of quiet plies currently applied, innermost last.
    quiet_plies: Vec<u64>,
    next_serial: u64,

    listeners: Listeners,
}

impl Default for Position {
    fn default() -> Self {
        Self::empty()
    }
}

impl Position {
    /// Empty board, White to move. All castling rights start set because
    /// nothing has moved yet; castling still needs the rook on its corner.
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
            side_to_move: Color::White,
            castling_rights: CASTLE_ALL,
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
            quiet_plies: Vec::new(),
            next_serial: 0,
            listeners: Listeners::default(),
        }
    }

    /// Standard starting arrangement.
    pub fn standard() -> Self {
        let mut position = Self::empty();
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            for color in Color::ALL {
                if let Some(square) = Square::at(file, color.home_rank()) {
                    position.put(square, Piece::new(color, *kind));
                }
                if let Some(square) = Square::at(file, color.pawn_start_rank()) {
                    position.put(square, Piece::new(color, PieceKind::Pawn));
                }
            }
        }
        position
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    pub fn from_board_string(board: &str) -> ChessResult<Self> {
        parse_board_string(board)
    }

    pub fn board_string(&self) -> String {
        generate_board_string(self)
    }

    // --- Queries ---

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Lookup by raw view coordinates; off-board coordinates hold nothing.
    pub fn piece_at_coords(&self, file: i8, rank: i8) -> Option<Piece> {
        Square::from_coords(file, rank)
            .ok()
            .and_then(|square| self.piece_at(square))
    }

    /// Every piece with its square, in square order.
    pub fn all_pieces(&self) -> Vec<(Square, Piece)> {
        Square::all()
            .filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
            .collect()
    }

    pub fn pieces_of(&self, color: Color) -> Vec<(Square, Piece)> {
        squares_in(self.occupancy_by_color[color.index()])
            .filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
            .collect()
    }

    #[inline]
    pub fn pieces_bitboard(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> u64 {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn occupancy_all(&self) -> u64 {
        self.occupancy_all
    }

    /// Square of `color`'s king, if it has one on the board.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces_bitboard(color, PieceKind::King);
        (kings != 0).then(|| Square::from_lowest_bit(kings))
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Setup-time override of the side to move; fires a turn notification.
    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
        self.emit(BoardEvent::NewPlayerTurn(color));
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.castling_rights = rights & CASTLE_ALL;
    }

    /// Reads the castling-rights flag for `color` on `side`.
    #[inline]
    pub fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        self.castling_rights & castling_flag(color, side) != 0
    }

    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    pub fn set_en_passant_target(&mut self, target: Option<Square>) {
        self.en_passant_target = target;
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    pub fn set_move_counters(&mut self, halfmove_clock: u16, fullmove_number: u16) {
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
    }

    /// Committed moves, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn most_recent_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// True if a committed move started or ended on `square`, meaning the
    /// piece standing there has not stayed put since history began. A castle
    /// counts for the rook's squares as well as the king's.
    pub fn has_moved(&self, square: Square) -> bool {
        self.history.iter().any(|record| {
            record.from == square
                || record.to == square
                || record
                    .castle_rook
                    .is_some_and(|(rook_from, rook_to)| rook_from == square || rook_to == square)
        })
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        is_king_in_check(self, color)
    }

    /// Enemy pieces currently attacking `color`'s king.
    pub fn checkers(&self, color: Color) -> Vec<Square> {
        match self.king_square(color) {
            Some(king) => attackers_to_square(self, king, color.opposite()),
            None => Vec::new(),
        }
    }

    /// True iff `color` has no legal move. Check and stalemate are not
    /// distinguished here; combine with [`Position::is_in_check`] for that.
    pub fn is_checkmate(&mut self, color: Color) -> bool {
        !LegalMoveGenerator.has_legal_move(self, color)
    }

    pub fn all_possible_moves(&mut self, color: Color) -> Vec<ChessMove> {
        LegalMoveGenerator.all_possible_moves(self, color)
    }

    /// Total material of `color`'s pieces.
    pub fn evaluate_score(&self, color: Color) -> i32 {
        material_score(self, color)
    }

    pub fn snapshot(&self) -> PositionSnapshot {
        PositionSnapshot {
            squares: self.squares,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant_target: self.en_passant_target,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    pub fn board_key(&self) -> BoardKey {
        let mut bytes = [0u8; 64];
        for (byte, slot) in bytes.iter_mut().zip(self.squares.iter()) {
            if let Some(piece) = slot {
                *byte = 1 + (piece.color.index() * 6 + piece.kind.index()) as u8;
            }
        }
        BoardKey(bytes)
    }

    // --- Setup commands ---

    /// Places `piece` on an empty square and notifies listeners.
    pub fn add_piece(&mut self, piece: Piece, square: Square) -> ChessResult<()> {
        if self.piece_at(square).is_some() {
            return Err(ChessError::SquareOccupied(square));
        }
        if piece.kind == PieceKind::King && self.king_square(piece.color).is_some() {
            return Err(ChessError::DuplicateKing(piece.color));
        }
        self.put(square, piece);
        self.emit(BoardEvent::PieceAdded { piece, square });
        Ok(())
    }

    /// [`Position::add_piece`] from raw coordinates.
    pub fn place_at(&mut self, piece: Piece, file: i8, rank: i8) -> ChessResult<Square> {
        let square = Square::from_coords(file, rank)?;
        self.add_piece(piece, square)?;
        Ok(square)
    }

    /// Detaches the piece on `square` and notifies listeners.
    pub fn remove_piece(&mut self, square: Square) -> ChessResult<Piece> {
        let piece = self.take(square).ok_or(ChessError::NoPieceOnSquare(square))?;
        self.emit(BoardEvent::PieceRemoved { piece, square });
        Ok(piece)
    }

    /// Moves a piece without any rule checks or history entry. Intended for
    /// editors and test setups.
    pub fn relocate_piece(&mut self, from: Square, to: Square) -> ChessResult<()> {
        let piece = self.piece_at(from).ok_or(ChessError::NoPieceOnSquare(from))?;
        if from == to {
            return Ok(());
        }
        if self.piece_at(to).is_some() {
            return Err(ChessError::SquareOccupied(to));
        }
        self.remove_piece(from)?;
        self.add_piece(piece, to)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&BoardEvent) + Send + 'static) -> ListenerId {
        self.listeners.subscribe(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // --- Raw mutation used by move execution ---

    pub(crate) fn put(&mut self, square: Square, piece: Piece) {
        if let Some(previous) = self.squares[square.index()] {
            self.clear_bits(square, previous);
        }
        self.squares[square.index()] = Some(piece);
        let mask = square.mask();
        self.pieces[piece.color.index()][piece.kind.index()] |= mask;
        self.occupancy_by_color[piece.color.index()] |= mask;
        self.occupancy_all |= mask;
    }

    pub(crate) fn take(&mut self, square: Square) -> Option<Piece> {
        let piece = self.squares[square.index()].take()?;
        self.clear_bits(square, piece);
        Some(piece)
    }

    fn clear_bits(&mut self, square: Square, piece: Piece) {
        let mask = !square.mask();
        self.pieces[piece.color.index()][piece.kind.index()] &= mask;
        self.occupancy_by_color[piece.color.index()] &= mask;
        self.occupancy_all &= mask;
    }

    pub(crate) fn flip_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
    }

    pub(crate) fn restore_state(
        &mut self,
        castling_rights: CastlingRights,
        en_passant_target: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) {
        self.castling_rights = castling_rights;
        self.en_passant_target = en_passant_target;
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
    }

    pub(crate) fn revoke_castling(&mut self, flags: CastlingRights) {
        self.castling_rights &= !flags;
    }

    pub(crate) fn push_history(&mut self, mut record: MoveRecord) -> u64 {
        let serial = self.next_serial;
        self.next_serial += 1;
        record.serial = serial;
        self.history.push(record);
        serial
    }

    pub(crate) fn pop_history(&mut self) -> Option<MoveRecord> {
        self.history.pop()
    }

    pub(crate) fn push_quiet_ply(&mut self) -> u64 {
        let serial = self.next_serial;
        self.next_serial += 1;
        self.quiet_plies.push(serial);
        serial
    }

    pub(crate) fn pop_quiet_ply(&mut self) -> Option<u64> {
        self.quiet_plies.pop()
    }

    pub(crate) fn latest_quiet_ply(&self) -> Option<u64> {
        self.quiet_plies.last().copied()
    }

    /// True while quiet (search) plies are applied on top of the committed
    /// history.
    pub(crate) fn has_quiet_plies(&self) -> bool {
        !self.quiet_plies.is_empty()
    }

    pub(crate) fn emit(&mut self, event: BoardEvent) {
        if self.listeners.is_empty() {
            return;
        }
        debug!(?event, "board event");
        self.listeners.emit(&event);
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_position(self))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    #[test]
    fn standard_setup_has_thirty_two_pieces_and_sixteen_pawns() {
        let position = Position::standard();
        assert_eq!(position.all_pieces().len(), 32);
        let pawns = position
            .all_pieces()
            .iter()
            .filter(|(_, piece)| piece.kind == PieceKind::Pawn)
            .count();
        assert_eq!(pawns, 16);
        assert_eq!(position.king_square(Color::White), Some(sq("e1")));
        assert_eq!(position.king_square(Color::Black), Some(sq("e8")));
    }

    #[test]
    fn standard_setup_material_is_139_per_side() {
        let position = Position::standard();
        assert_eq!(position.evaluate_score(Color::White), 139);
        assert_eq!(position.evaluate_score(Color::Black), 139);
    }

    #[test]
    fn add_piece_rejects_occupied_square_and_second_king() {
        let mut position = Position::empty();
        let king = Piece::new(Color::White, PieceKind::King);
        position.add_piece(king, sq("e1")).expect("first king");
        assert_eq!(
            position.add_piece(Piece::new(Color::White, PieceKind::Rook), sq("e1")),
            Err(ChessError::SquareOccupied(sq("e1")))
        );
        assert_eq!(
            position.add_piece(king, sq("e2")),
            Err(ChessError::DuplicateKing(Color::White))
        );
        assert_eq!(position.all_pieces().len(), 1);
    }

    #[test]
    fn place_at_out_of_bounds_leaves_board_untouched() {
        let mut position = Position::empty();
        let result = position.place_at(Piece::new(Color::Black, PieceKind::Pawn), 3, 9);
        assert_eq!(result, Err(ChessError::InvalidPiecePlacement { file: 3, rank: 9 }));
        assert!(position.all_pieces().is_empty());
        assert_eq!(position.piece_at_coords(3, 9), None);
    }

    #[test]
    fn remove_piece_clears_king_registry() {
        let mut position = Position::standard();
        let removed = position.remove_piece(sq("e8")).expect("black king present");
        assert_eq!(removed, Piece::new(Color::Black, PieceKind::King));
        assert_eq!(position.king_square(Color::Black), None);
        assert_eq!(
            position.remove_piece(sq("e8")),
            Err(ChessError::NoPieceOnSquare(sq("e8")))
        );
    }

    #[test]
    fn listeners_receive_add_and_remove_notifications() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut position = Position::empty();
        let id = position.subscribe(move |event| {
            if let Ok(mut events) = sink.lock() {
                events.push(event.clone());
            }
        });

        let rook = Piece::new(Color::White, PieceKind::Rook);
        position.add_piece(rook, sq("a1")).expect("empty square");
        position.remove_piece(sq("a1")).expect("rook present");
        assert!(position.unsubscribe(id));
        position.add_piece(rook, sq("a1")).expect("empty square");

        let events = seen.lock().expect("lock").clone();
        assert_eq!(
            events,
            vec![
                BoardEvent::PieceAdded { piece: rook, square: sq("a1") },
                BoardEvent::PieceRemoved { piece: rook, square: sq("a1") },
            ]
        );
    }

    #[test]
    fn relocated_pawn_changes_white_move_count_to_28() {
        let mut position = Position::standard();
        position
            .relocate_piece(sq("d2"), sq("d4"))
            .expect("d4 is empty");
        assert_eq!(position.all_possible_moves(Color::White).len(), 28);
        assert!(position.history().is_empty());
    }

    #[test]
    fn board_key_ignores_side_to_move() {
        let mut position = Position::standard();
        let before = position.board_key();
        position.set_side_to_move(Color::Black);
        assert_eq!(position.board_key(), before);
        position.remove_piece(sq("a2")).expect("pawn present");
        assert_ne!(position.board_key(), before);
    }

    #[test]
    fn checkers_lists_every_attacker_of_the_king() {
        let position = Position::from_fen("4k3/8/8/8/1b6/8/4r3/4K3 w - - 0 1")
            .expect("valid FEN");
        let mut checkers = position.checkers(Color::White);
        checkers.sort();
        assert_eq!(checkers, vec![sq("e2"), sq("b4")]);
        assert!(position.checkers(Color::Black).is_empty());
    }

    #[test]
    fn castling_marks_the_rook_as_moved() {
        let mut position = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1")
            .expect("valid FEN");
        assert!(!position.has_moved(sq("h1")));
        let mut castle = ChessMove::new(&mut position, sq("e1"), sq("g1")).expect("king on e1");
        castle.execute(&mut position).expect("castling is legal");

        assert!(position.has_moved(sq("g1")));
        assert!(position.has_moved(sq("f1")));
        assert!(position.has_moved(sq("h1")));
        assert!(!position.has_moved(sq("e8")));
    }
}
