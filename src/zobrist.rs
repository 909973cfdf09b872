//! Zobrist hashing for chess positions.
//!
//! Keys come from a fixed-seed generator so hashes are stable across runs.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{CastlingRights, Color, Piece, Square};

pub(crate) struct ZobristKeys {
    // piece_keys[kind][color][square]
    piece_keys: [[[u64; 64]; 2]; 6],
    black_to_move: u64,
    // one key per castling bitmask value
    castling_keys: [u64; 16],
    // only the file of the en passant target matters
    en_passant_keys: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(0x5EED_C0DE_2024);
        let mut piece_keys = [[[0; 64]; 2]; 6];
        for kind in &mut piece_keys {
            for color in kind.iter_mut() {
                for key in color.iter_mut() {
                    *key = rng.gen();
                }
            }
        }
        let black_to_move = rng.gen();
        let mut castling_keys = [0; 16];
        // The empty set hashes to nothing.
        for key in castling_keys.iter_mut().skip(1) {
            *key = rng.gen();
        }
        let mut en_passant_keys = [0; 8];
        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            black_to_move,
            castling_keys,
            en_passant_keys,
        }
    }

    #[inline]
    pub(crate) fn piece(&self, piece: Piece, sq: Square) -> u64 {
        self.piece_keys[piece.kind.index()][piece.color.index()][sq.index()]
    }

    #[inline]
    pub(crate) fn side(&self, side_to_move: Color) -> u64 {
        match side_to_move {
            Color::White => 0,
            Color::Black => self.black_to_move,
        }
    }

    #[inline]
    pub(crate) fn castling(&self, rights: CastlingRights) -> u64 {
        self.castling_keys[usize::from(rights.bits())]
    }

    #[inline]
    pub(crate) fn en_passant(&self, target: Option<Square>) -> u64 {
        target.map_or(0, |sq| self.en_passant_keys[usize::from(sq.file())])
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);
