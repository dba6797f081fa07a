//! Reversible single-ply moves.
//!
//! A [`MoveRecord`] captures everything needed to apply a ply and to invert it
//! exactly: the captured piece and where it stood (which differs from the
//! destination for en passant), the castle rook's hop, the promotion piece and
//! snapshots of the position state that the ply overwrites.
//!
//! [`ChessMove`] wraps a record with its lifecycle:
//!
//! ```text
//! Illegal                       (terminal; execute errors, undo is a no-op)
//! Pending ──execute──> Executed ──undo──> Undone
//! ```
//!
//! Moves run in one of three modes. Committed execution notifies listeners and
//! is recorded in the position's history; quiet execution (search, perft) only
//! flips the side to move; trials (legality checks) touch nothing but the
//! pieces and are always reverted before returning.

use std::fmt;
use std::hash::{Hash, Hasher};

use tracing::{debug, warn};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board_events::BoardEvent;
use crate::game_state::chess_rules::DEFAULT_PROMOTION;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_king::castle_rook_squares;
use crate::move_generation::legal_moves_pawn::en_passant_victim_square;
use crate::move_generation::piece_rules::is_legal_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    /// Captured piece and the square it was taken from.
    pub captured: Option<(Piece, Square)>,
    /// Rook origin and destination when the king castles.
    pub castle_rook: Option<(Square, Square)>,
    pub promotion: Option<PieceKind>,
    pub prior_en_passant: Option<Square>,
    pub prior_castling_rights: CastlingRights,
    pub prior_halfmove_clock: u16,
    pub prior_fullmove_number: u16,
    /// Ply serial, taken from the history for committed moves and from the
    /// quiet-ply stack for quiet ones.
    pub serial: u64,
}

impl MoveRecord {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        self.castle_rook.is_some()
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        matches!(self.captured, Some((_, square)) if square != self.to)
    }

    /// Material value of the captured piece, `0` for quiet moves.
    #[inline]
    pub fn capture_value(&self) -> i32 {
        self.captured.map_or(0, |(piece, _)| piece.value())
    }

    /// The piece standing on the destination once the move has been applied.
    #[inline]
    pub fn landed_piece(&self) -> Piece {
        match self.promotion {
            Some(kind) => Piece::new(self.piece.color, kind),
            None => self.piece,
        }
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}->{}", self.piece, self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "={kind}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveState {
    Illegal,
    Pending,
    Executed,
    Undone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ApplyMode {
    Committed,
    Quiet,
    Trial,
}

/// Describes `piece` moving `from -> to` against the current position.
pub(crate) fn plan_move(
    position: &Position,
    piece: Piece,
    from: Square,
    to: Square,
    promotion_choice: PieceKind,
) -> MoveRecord {
    let captured = match position.piece_at(to) {
        Some(target) => Some((target, to)),
        None if piece.kind == PieceKind::Pawn
            && from.file() != to.file()
            && position.en_passant_target() == Some(to) =>
        {
            en_passant_victim_square(to, piece.color)
                .and_then(|square| position.piece_at(square).map(|victim| (victim, square)))
        }
        None => None,
    };

    let castle_rook = if piece.kind == PieceKind::King {
        castle_rook_squares(from, to)
    } else {
        None
    };

    let promotion = (piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank())
        .then_some(promotion_choice);

    MoveRecord {
        piece,
        from,
        to,
        captured,
        castle_rook,
        promotion,
        prior_en_passant: position.en_passant_target(),
        prior_castling_rights: position.castling_rights(),
        prior_halfmove_clock: position.halfmove_clock(),
        prior_fullmove_number: position.fullmove_number(),
        serial: 0,
    }
}

/// Castling rights lost by playing `record`: the king moving, a piece
/// leaving a rook corner, or a capture on a rook corner.
fn castling_revoked_by(record: &MoveRecord) -> CastlingRights {
    let mut revoked = 0;
    if record.piece.kind == PieceKind::King {
        revoked |= castling_flags_for(record.piece.color);
    }
    for color in Color::ALL {
        for side in CastleSide::ALL {
            let Some(corner) = Square::at(side.rook_home_file(), color.home_rank()) else {
                continue;
            };
            let captured_on_corner = matches!(record.captured, Some((_, square)) if square == corner);
            if record.from == corner || captured_on_corner {
                revoked |= castling_flag(color, side);
            }
        }
    }
    revoked
}

pub(crate) fn apply_record(position: &mut Position, record: &MoveRecord, mode: ApplyMode) {
    let notify = mode == ApplyMode::Committed;
    let mover = record.piece;

    position.take(record.from);
    if let Some((captured, square)) = record.captured {
        position.take(square);
        if notify {
            position.emit(BoardEvent::PieceRemoved { piece: captured, square });
        }
    }
    position.put(record.to, mover);

    if let Some((rook_from, rook_to)) = record.castle_rook {
        if let Some(rook) = position.take(rook_from) {
            position.put(rook_to, rook);
        }
    }

    let double_step =
        mover.kind == PieceKind::Pawn && record.from.rank().abs_diff(record.to.rank()) == 2;
    let en_passant = if double_step {
        record.from.offset(0, mover.color.pawn_direction())
    } else {
        None
    };
    position.set_en_passant_target(en_passant);
    position.revoke_castling(castling_revoked_by(record));

    if let Some(kind) = record.promotion {
        let promoted = Piece::new(mover.color, kind);
        position.put(record.to, promoted);
        if notify {
            position.emit(BoardEvent::PieceRemoved { piece: mover, square: record.to });
            position.emit(BoardEvent::PieceAdded { piece: promoted, square: record.to });
        }
    }

    let halfmove_clock = if mover.kind == PieceKind::Pawn || record.is_capture() {
        0
    } else {
        record.prior_halfmove_clock.saturating_add(1)
    };
    let fullmove_number = match mover.color {
        Color::White => record.prior_fullmove_number,
        Color::Black => record.prior_fullmove_number.saturating_add(1),
    };
    position.set_move_counters(halfmove_clock, fullmove_number);

    if mode != ApplyMode::Trial {
        position.flip_side_to_move();
    }
}

pub(crate) fn revert_record(position: &mut Position, record: &MoveRecord, mode: ApplyMode) {
    let notify = mode == ApplyMode::Committed;

    if record.promotion.is_some() {
        let promoted = record.landed_piece();
        position.put(record.to, record.piece);
        if notify {
            position.emit(BoardEvent::PieceRemoved { piece: promoted, square: record.to });
            position.emit(BoardEvent::PieceAdded { piece: record.piece, square: record.to });
        }
    }

    if let Some((rook_from, rook_to)) = record.castle_rook {
        if let Some(rook) = position.take(rook_to) {
            position.put(rook_from, rook);
        }
    }

    position.take(record.to);
    position.put(record.from, record.piece);

    if let Some((captured, square)) = record.captured {
        position.put(square, captured);
        if notify {
            position.emit(BoardEvent::PieceAdded { piece: captured, square });
        }
    }

    position.restore_state(
        record.prior_castling_rights,
        record.prior_en_passant,
        record.prior_halfmove_clock,
        record.prior_fullmove_number,
    );

    if mode != ApplyMode::Trial {
        position.flip_side_to_move();
    }
}

/// Applies the move, asks whether the mover's king is attacked, and reverts.
/// Leaves side to move, history and listeners untouched.
pub(crate) fn trial_leaves_king_in_check(
    position: &mut Position,
    from: Square,
    to: Square,
) -> bool {
    let Some(piece) = position.piece_at(from) else {
        return false;
    };
    let record = plan_move(position, piece, from, to, DEFAULT_PROMOTION);
    apply_record(position, &record, ApplyMode::Trial);
    let in_check = is_king_in_check(position, piece.color);
    revert_record(position, &record, ApplyMode::Trial);
    in_check
}

/// A single ply with an execute/undo lifecycle.
///
/// Equality and hashing use only the moving piece and the origin and
/// destination squares, so a set of moves never holds two entries for the same
/// piece and destination.
#[derive(Debug, Clone)]
pub struct ChessMove {
    record: MoveRecord,
    state: MoveState,
    executed_mode: Option<ApplyMode>,
    promotion_choice: PieceKind,
}

impl ChessMove {
    /// Builds the move of the piece on `from` to `to`, evaluating its legality
    /// against the current position. Turn order is checked when executing.
    pub fn new(position: &mut Position, from: Square, to: Square) -> ChessResult<Self> {
        let piece = position
            .piece_at(from)
            .ok_or(ChessError::NoPieceOnSquare(from))?;
        let state = if is_legal_move(position, from, to) {
            MoveState::Pending
        } else {
            MoveState::Illegal
        };
        Ok(Self {
            record: plan_move(position, piece, from, to, DEFAULT_PROMOTION),
            state,
            executed_mode: None,
            promotion_choice: DEFAULT_PROMOTION,
        })
    }

    /// Wraps a destination the generator has already proven legal.
    pub(crate) fn from_legal(position: &Position, piece: Piece, from: Square, to: Square) -> Self {
        Self {
            record: plan_move(position, piece, from, to, DEFAULT_PROMOTION),
            state: MoveState::Pending,
            executed_mode: None,
            promotion_choice: DEFAULT_PROMOTION,
        }
    }

    #[inline]
    pub fn piece(&self) -> Piece {
        self.record.piece
    }

    #[inline]
    pub fn from(&self) -> Square {
        self.record.from
    }

    #[inline]
    pub fn to(&self) -> Square {
        self.record.to
    }

    #[inline]
    pub fn captured_piece(&self) -> Option<Piece> {
        self.record.captured.map(|(piece, _)| piece)
    }

    /// Promotion piece if this move promotes a pawn.
    #[inline]
    pub fn promotion_piece(&self) -> Option<PieceKind> {
        self.record.promotion
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        self.record.is_castle()
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.record.is_en_passant()
    }

    #[inline]
    pub fn capture_value(&self) -> i32 {
        self.record.capture_value()
    }

    #[inline]
    pub fn is_legal(&self) -> bool {
        self.state != MoveState::Illegal
    }

    #[inline]
    pub fn state(&self) -> MoveState {
        self.state
    }

    #[inline]
    pub fn record(&self) -> &MoveRecord {
        &self.record
    }

    /// Plays the move: notifies listeners, appends it to history and hands the
    /// turn to the opponent.
    pub fn execute(&mut self, position: &mut Position) -> ChessResult<()> {
        self.prepare(position, true)?;
        if position.has_quiet_plies() {
            return Err(self.rejected("quiet moves are still applied"));
        }

        apply_record(position, &self.record, ApplyMode::Committed);
        self.record.serial = position.push_history(self.record);
        self.state = MoveState::Executed;
        self.executed_mode = Some(ApplyMode::Committed);

        debug!(mv = %self, "move executed");
        position.emit(BoardEvent::MoveExecuted(self.record));
        let next = position.side_to_move();
        position.emit(BoardEvent::NewPlayerTurn(next));
        Ok(())
    }

    /// Plays the move without history or notifications; only the side to
    /// move flips. Legality established at construction is trusted.
    pub fn execute_quiet(&mut self, position: &mut Position) -> ChessResult<()> {
        self.prepare(position, false)?;

        apply_record(position, &self.record, ApplyMode::Quiet);
        self.record.serial = position.push_quiet_ply();
        self.state = MoveState::Executed;
        self.executed_mode = Some(ApplyMode::Quiet);
        Ok(())
    }

    /// Reverts an executed move in the mode it was executed with. Undoing a
    /// move that is not executed does nothing.
    pub fn undo(&mut self, position: &mut Position) -> ChessResult<()> {
        if self.state != MoveState::Executed {
            return Ok(());
        }

        match self.executed_mode {
            Some(ApplyMode::Committed) => {
                let on_top = position.most_recent_move().map(|record| record.serial)
                    == Some(self.record.serial);
                if !on_top || position.has_quiet_plies() {
                    return Err(self.out_of_order());
                }
                revert_record(position, &self.record, ApplyMode::Committed);
                position.pop_history();

                debug!(mv = %self, "move undone");
                position.emit(BoardEvent::MoveUndone(self.record));
                let next = position.side_to_move();
                position.emit(BoardEvent::NewPlayerTurn(next));
            }
            _ => {
                if position.latest_quiet_ply() != Some(self.record.serial) {
                    return Err(self.out_of_order());
                }
                revert_record(position, &self.record, ApplyMode::Quiet);
                position.pop_quiet_ply();
            }
        }

        self.state = MoveState::Undone;
        self.executed_mode = None;
        Ok(())
    }

    /// Counterpart of [`ChessMove::execute_quiet`]; same as [`ChessMove::undo`].
    #[inline]
    pub fn undo_quiet(&mut self, position: &mut Position) -> ChessResult<()> {
        self.undo(position)
    }

    /// Chooses what a promoting pawn becomes. An executed move is undone,
    /// updated and executed again in the same mode.
    pub fn set_promotion_piece(&mut self, position: &mut Position, kind: PieceKind) -> ChessResult<()> {
        if !kind.is_promotion_choice() {
            return Err(ChessError::InvalidPromotionChoice(kind));
        }

        if self.state != MoveState::Executed {
            self.promotion_choice = kind;
            if self.record.promotion.is_some() {
                self.record.promotion = Some(kind);
            }
            return Ok(());
        }

        let mode = self.executed_mode;
        self.undo(position)?;
        self.promotion_choice = kind;
        match mode {
            Some(ApplyMode::Committed) => self.execute(position),
            _ => self.execute_quiet(position),
        }
    }

    /// Validates the move against the current position and refreshes the
    /// record's captured piece and state snapshots.
    fn prepare(&mut self, position: &mut Position, recheck_legality: bool) -> ChessResult<()> {
        match self.state {
            MoveState::Illegal => return Err(self.rejected("the move is illegal")),
            MoveState::Executed => return Err(self.rejected("the move was already executed")),
            MoveState::Pending | MoveState::Undone => {}
        }

        let piece = self.record.piece;
        if position.piece_at(self.record.from) != Some(piece) {
            return Err(self.rejected("the piece is no longer on its origin square"));
        }
        if position.side_to_move() != piece.color {
            return Err(self.rejected("it is not this side's turn"));
        }
        if recheck_legality && !is_legal_move(position, self.record.from, self.record.to) {
            return Err(self.rejected("the move is not legal in this position"));
        }

        self.record = plan_move(
            position,
            piece,
            self.record.from,
            self.record.to,
            self.promotion_choice,
        );
        Ok(())
    }

    fn rejected(&self, reason: &str) -> ChessError {
        warn!(mv = %self, reason, "illegal move attempted");
        ChessError::IllegalMoveAttempted {
            description: format!("{self}: {reason}"),
        }
    }

    fn out_of_order(&self) -> ChessError {
        warn!(mv = %self, "out-of-order undo");
        ChessError::OutOfOrderUndo {
            description: self.to_string(),
        }
    }
}

impl PartialEq for ChessMove {
    fn eq(&self, other: &Self) -> bool {
        self.record.piece == other.record.piece
            && self.record.from == other.record.from
            && self.record.to == other.record.to
    }
}

impl Eq for ChessMove {}

impl Hash for ChessMove {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.record.piece.hash(state);
        self.record.from.hash(state);
        self.record.to.hash(state);
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.record, f)
    }
}
