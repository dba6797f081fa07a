//! Move-path enumeration used to validate the generator.
//!
//! Walks the tree with quiet execute/undo on a single position and reports
//! leaf statistics at the requested depth.

use crate::chess_errors::ChessResult;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
    }
}

/// Leaf counts `depth` plies below the side to move. Promotions count once per
/// destination (the default promotion piece).
pub fn perft(position: &mut Position, depth: u8) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    let side = position.side_to_move();
    for mut mv in LegalMoveGenerator.all_possible_moves(position, side) {
        mv.execute_quiet(position)?;
        if depth == 1 {
            let record = mv.record();
            total.merge(PerftCounts {
                nodes: 1,
                captures: usize::from(record.is_capture()),
                en_passant: usize::from(record.is_en_passant()),
                castles: usize::from(record.is_castle()),
                promotions: usize::from(record.promotion.is_some()),
                checks: usize::from(position.is_in_check(position.side_to_move())),
            });
        } else {
            total.merge(perft(position, depth - 1)?);
        }
        mv.undo_quiet(position)?;
    }

    Ok(total)
}

/// Node count below each root move, in generation order.
pub fn perft_divide(position: &mut Position, depth: u8) -> ChessResult<Vec<(String, usize)>> {
    let side = position.side_to_move();
    let mut split = Vec::new();
    for mut mv in LegalMoveGenerator.all_possible_moves(position, side) {
        mv.execute_quiet(position)?;
        let nodes = perft(position, depth.saturating_sub(1))?.nodes;
        mv.undo_quiet(position)?;
        split.push((mv.to_string(), nodes));
    }
    Ok(split)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE_FEN: &str =
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0";
    const POSITION_3_FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

    fn nodes(fen: &str, depth: u8) -> usize {
        let mut position = Position::from_fen(fen).expect("valid FEN");
        perft(&mut position, depth).expect("perft should run").nodes
    }

    #[test]
    fn depth_zero_counts_single_node() {
        let mut position = Position::standard();
        assert_eq!(
            perft(&mut position, 0).expect("perft should run"),
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn startpos_matches_reference_counts() {
        let mut position = Position::standard();
        let before = position.snapshot();
        assert_eq!(perft(&mut position, 1).expect("perft").nodes, 20);
        assert_eq!(perft(&mut position, 2).expect("perft").nodes, 400);
        let depth_three = perft(&mut position, 3).expect("perft");
        assert_eq!(
            depth_three,
            PerftCounts {
                nodes: 8902,
                captures: 34,
                en_passant: 0,
                castles: 0,
                promotions: 0,
                checks: 12,
            }
        );
        assert_eq!(position.snapshot(), before);
    }

    #[test]
    fn kiwipete_matches_reference_counts() {
        assert_eq!(nodes(KIWIPETE_FEN, 1), 48);
        let mut position = Position::from_fen(KIWIPETE_FEN).expect("valid FEN");
        let depth_two = perft(&mut position, 2).expect("perft");
        assert_eq!(
            depth_two,
            PerftCounts {
                nodes: 2039,
                captures: 351,
                en_passant: 1,
                castles: 91,
                promotions: 0,
                checks: 3,
            }
        );
        assert_eq!(nodes(KIWIPETE_FEN, 3), 97_862);
    }

    #[test]
    fn position_3_matches_reference_counts() {
        assert_eq!(nodes(POSITION_3_FEN, 1), 14);
        assert_eq!(nodes(POSITION_3_FEN, 2), 191);
        assert_eq!(nodes(POSITION_3_FEN, 3), 2812);
    }

    #[test]
    fn divide_sums_to_total() {
        let mut position = Position::standard();
        let split = perft_divide(&mut position, 2).expect("perft should run");
        assert_eq!(split.len(), 20);
        assert_eq!(split.iter().map(|(_, n)| n).sum::<usize>(), 400);
    }
}
