//! Search-scoped transposition cache.
//!
//! Maps a position (placement plus side to move, castling rights, en-passant
//! target) and the remaining search depth to an exact minimax value. The cache
//! is cleared at the start of every top-level search.

use std::collections::HashMap;

use crate::game_state::chess_types::{CastlingRights, Color, Square};
use crate::game_state::position::{BoardKey, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchKey {
    board: BoardKey,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant: Option<Square>,
    depth: u8,
}

impl SearchKey {
    pub fn new(position: &Position, depth: u8) -> Self {
        Self {
            board: position.board_key(),
            side_to_move: position.side_to_move(),
            castling_rights: position.castling_rights(),
            en_passant: position.en_passant_target(),
            depth,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub lookups: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug, Clone, Default)]
pub struct TranspositionCache {
    entries: HashMap<SearchKey, i32>,
    stats: CacheStats,
}

impl TranspositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = CacheStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn lookup(&mut self, key: &SearchKey) -> Option<i32> {
        self.stats.lookups += 1;
        let hit = self.entries.get(key).copied();
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    /// Later stores for the same key overwrite earlier ones.
    pub fn store(&mut self, key: SearchKey, value: i32) {
        self.stats.stores += 1;
        self.entries.insert(key, value);
    }
}
