//! Precomputed attack sets, built once from the per-kind offset tables.

use once_cell::sync::Lazy;

use super::types::{Bitboard, Color, Square};

/// (file, rank) steps of a knight.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// (file, rank) steps of a king; also the eight sliding directions.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

pub(crate) const ROOK_DIRECTIONS: [usize; 4] = [0, 1, 2, 3];
pub(crate) const BISHOP_DIRECTIONS: [usize; 4] = [4, 5, 6, 7];

fn step_table(offsets: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    for (idx, entry) in table.iter_mut().enumerate() {
        let from = Square::from_index(idx);
        for &(df, dr) in offsets {
            if let Some(to) = from.offset(df, dr) {
                entry.insert(to);
            }
        }
    }
    table
}

pub(crate) static KNIGHT_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| step_table(&KNIGHT_OFFSETS));

pub(crate) static KING_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| step_table(&KING_OFFSETS));

/// Squares a pawn of the given color attacks from each square.
pub(crate) static PAWN_ATTACKS: Lazy<[[Bitboard; 64]; 2]> = Lazy::new(|| {
    let mut attacks = [[Bitboard::EMPTY; 64]; 2];
    for color in Color::BOTH {
        let dr = color.pawn_direction();
        attacks[color.index()] = step_table(&[(-1, dr), (1, dr)]);
    }
    attacks
});

/// Full ray from each square in each of the eight `KING_OFFSETS` directions,
/// excluding the origin.
static RAYS: Lazy<[[Bitboard; 64]; 8]> = Lazy::new(|| {
    let mut rays = [[Bitboard::EMPTY; 64]; 8];
    for (dir, &(df, dr)) in KING_OFFSETS.iter().enumerate() {
        for idx in 0..64 {
            let mut current = Square::from_index(idx).offset(df, dr);
            while let Some(sq) = current {
                rays[dir][idx].insert(sq);
                current = sq.offset(df, dr);
            }
        }
    }
    rays
});

/// Directions whose square indices grow along the ray (north, east, north-east, north-west).
fn is_increasing(dir: usize) -> bool {
    let (df, dr) = KING_OFFSETS[dir];
    dr > 0 || (dr == 0 && df > 0)
}

fn ray_attacks(from: Square, dir: usize, occupancy: Bitboard) -> Bitboard {
    let ray = RAYS[dir][from.index()];
    let blockers = ray & occupancy;
    if blockers.is_empty() {
        return ray;
    }
    let nearest = if is_increasing(dir) {
        blockers.0.trailing_zeros() as usize
    } else {
        63 - blockers.0.leading_zeros() as usize
    };
    Bitboard(ray.0 ^ RAYS[dir][nearest].0)
}

/// Squares reached from `from` along `directions`, stopping at (and including)
/// the first occupied square of each ray.
pub(crate) fn slider_attacks(from: Square, occupancy: Bitboard, directions: &[usize]) -> Bitboard {
    directions
        .iter()
        .fold(Bitboard::EMPTY, |acc, &dir| acc | ray_attacks(from, dir, occupancy))
}
