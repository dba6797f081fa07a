use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::leaper_attacks::knight_attacks;

#[inline]
pub fn knight_candidates(position: &Position, from: Square, color: Color) -> u64 {
    knight_attacks(from) & !position.occupancy(color)
}
