//! Square type.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

/// A square on the board. File 0 is the a-file, rank 0 is the first rank.
///
/// Both coordinates are always in `0..8`; the only way to build a square from
/// raw numbers is [`Square::new`], which checks the bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(u8);

impl Square {
    #[must_use]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// Square from a 0-63 index (a1=0, b1=1, ..., h8=63). Wraps out-of-range input.
    #[inline]
    #[must_use]
    pub(crate) const fn from_index(idx: usize) -> Self {
        Square((idx & 63) as u8)
    }

    #[inline]
    #[must_use]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    #[inline]
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The square `df` files and `dr` ranks away, if it is on the board.
    #[must_use]
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        let file = self.file() as i8 + df;
        let rank = self.rank() as i8 + dr;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Square::new(file as u8, rank as u8)
        } else {
            None
        }
    }

    /// Light squares are the ones where file and rank parity differ (h1, a8, ...).
    #[inline]
    #[must_use]
    pub const fn is_light(self) -> bool {
        (self.file() + self.rank()) % 2 == 1
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (self.file() + b'a') as char, self.rank() + 1)
    }
}

impl TryFrom<(u8, u8)> for Square {
    type Error = SquareError;

    fn try_from((file, rank): (u8, u8)) -> Result<Self, Self::Error> {
        if file >= 8 {
            return Err(SquareError::FileOutOfBounds { file });
        }
        if rank >= 8 {
            return Err(SquareError::RankOutOfBounds { rank });
        }
        Ok(Square(rank * 8 + file))
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SquareError::InvalidNotation {
            notation: s.to_string(),
        };
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        match (bytes[0], bytes[1]) {
            (f @ b'a'..=b'h', r @ b'1'..=b'8') => Ok(Square((r - b'1') * 8 + (f - b'a'))),
            _ => Err(invalid()),
        }
    }
}
