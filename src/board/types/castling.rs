//! Castling rights type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;

const WHITE_KINGSIDE: u8 = 1 << 0;
const WHITE_QUEENSIDE: u8 = 1 << 1;
const BLACK_KINGSIDE: u8 = 1 << 2;
const BLACK_QUEENSIDE: u8 = 1 << 3;

/// Four independent castling flags. Once cleared a flag is never set again
/// during play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(WHITE_KINGSIDE | WHITE_QUEENSIDE | BLACK_KINGSIDE | BLACK_QUEENSIDE)
    }

    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, kingside: bool) -> bool {
        self.0 & Self::bit_for(color, kingside) != 0
    }

    #[inline]
    pub fn set(&mut self, color: Color, kingside: bool) {
        self.0 |= Self::bit_for(color, kingside);
    }

    #[inline]
    pub fn remove(&mut self, color: Color, kingside: bool) {
        self.0 &= !Self::bit_for(color, kingside);
    }

    /// Drop both rights of one color (king moved).
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove(color, true);
        self.remove(color, false);
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw bitmask, used to pick Zobrist keys.
    #[inline]
    #[must_use]
    pub(crate) const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    const fn bit_for(color: Color, kingside: bool) -> u8 {
        match (color, kingside) {
            (Color::White, true) => WHITE_KINGSIDE,
            (Color::White, false) => WHITE_QUEENSIDE,
            (Color::Black, true) => BLACK_KINGSIDE,
            (Color::Black, false) => BLACK_QUEENSIDE,
        }
    }
}

/// FEN castling field ("KQkq", "-", ...).
impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for (color, kingside, c) in [
            (Color::White, true, 'K'),
            (Color::White, false, 'Q'),
            (Color::Black, true, 'k'),
            (Color::Black, false, 'q'),
        ] {
            if self.has(color, kingside) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
