//! Push notifications for a presentation layer.
//!
//! Listeners run synchronously inside the mutating call that produced the
//! event. Quiet (search) execution and internal legality trials never emit.

use std::fmt;

use crate::game_state::chess_types::{Color, Piece, Square};
use crate::move_generation::chess_move::MoveRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    PieceAdded { piece: Piece, square: Square },
    PieceRemoved { piece: Piece, square: Square },
    MoveExecuted(MoveRecord),
    MoveUndone(MoveRecord),
    NewPlayerTurn(Color),
}

/// Handle returned by [`crate::game_state::position::Position::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&BoardEvent) + Send>;

#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn emit(&mut self, event: &BoardEvent) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Clones of a position start without listeners.
impl Clone for Listeners {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
