//! Occupancy-aware ray attacks for bishops, rooks and queens.
//!
//! Each ray includes the first occupied square it meets; callers mask out
//! their own pieces afterwards.

use crate::game_state::chess_types::Square;

pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, -1), (1, -1), (-1, 1)];
pub const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub fn ray_attacks(from: Square, directions: &[(i8, i8)], occupancy: u64) -> u64 {
    let mut attacks = 0u64;

    for &(d_file, d_rank) in directions {
        let mut cursor = from.offset(d_file, d_rank);
        while let Some(target) = cursor {
            attacks |= target.mask();
            if occupancy & target.mask() != 0 {
                break;
            }
            cursor = target.offset(d_file, d_rank);
        }
    }

    attacks
}

#[inline]
pub fn bishop_attacks(from: Square, occupancy: u64) -> u64 {
    ray_attacks(from, &DIAGONAL_DIRECTIONS, occupancy)
}

#[inline]
pub fn rook_attacks(from: Square, occupancy: u64) -> u64 {
    ray_attacks(from, &ORTHOGONAL_DIRECTIONS, occupancy)
}

#[inline]
pub fn queen_attacks(from: Square, occupancy: u64) -> u64 {
    bishop_attacks(from, occupancy) | rook_attacks(from, occupancy)
}

/// Squares strictly between two squares on the same rank, file or diagonal;
/// zero when they are not aligned.
pub fn squares_between(a: Square, b: Square) -> u64 {
    let d_file = b.file() as i8 - a.file() as i8;
    let d_rank = b.rank() as i8 - a.rank() as i8;
    let aligned = d_file == 0 || d_rank == 0 || d_file.abs() == d_rank.abs();
    if a == b || !aligned {
        return 0;
    }

    let step = (d_file.signum(), d_rank.signum());
    let mut between = 0u64;
    let mut cursor = a.offset(step.0, step.1);
    while let Some(square) = cursor {
        if square == b {
            break;
        }
        between |= square.mask();
        cursor = square.offset(step.0, step.1);
    }
    between
}
