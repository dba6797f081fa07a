//! Engine abstraction shared by the computer opponents.
//!
//! An engine plays for whichever side is to move. `choose_move` inspects the
//! position (it may execute and undo moves quietly, but always restores it)
//! and `play_turn` additionally commits the chosen move.

use crate::chess_errors::ChessResult;
use crate::game_state::position::Position;
use crate::move_generation::chess_move::ChessMove;

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()>;

    /// `None` when the side to move has no legal move.
    fn choose_move(&mut self, position: &mut Position) -> ChessResult<Option<ChessMove>>;

    fn play_turn(&mut self, position: &mut Position) -> ChessResult<Option<ChessMove>> {
        let Some(mut mv) = self.choose_move(position)? else {
            return Ok(None);
        };
        mv.execute(position)?;
        Ok(Some(mv))
    }
}
