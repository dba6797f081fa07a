//! Crate root module declarations for the Verdant chess core.
//!
//! Exposes the rules engine (board state, move rules, legal move generation
//! and the execute/undo move state machine), the minimax search with its
//! computer opponents, and the string/diagnostic helpers consumed by a
//! presentation layer.

pub mod chess_errors;

pub mod game_state {
    pub mod board_events;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod position;
}

pub mod moves {
    pub mod leaper_attacks;
    pub mod slider_attacks;
}

pub mod move_generation {
    pub mod chess_move;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_sliders;
    pub mod perft;
    pub mod piece_rules;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
    pub mod transposition_table;
}

pub mod engines {
    pub mod engine_config;
    pub mod engine_greedy;
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod algebraic;
    pub mod board_string;
    pub mod engine_match;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod render_position;
}
