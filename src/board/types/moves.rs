//! Move types and move list.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::PieceKind;
use super::square::Square;

// Move flags (4 bits, values 0-15)
const FLAG_QUIET: u16 = 0;
const FLAG_DOUBLE_PAWN: u16 = 1;
const FLAG_CASTLE_KINGSIDE: u16 = 2;
const FLAG_CASTLE_QUEENSIDE: u16 = 3;
const FLAG_CAPTURE: u16 = 4;
const FLAG_EN_PASSANT: u16 = 5;
// 6-7 unused
const FLAG_PROMOTION: u16 = 8;
const FLAG_PROMOTION_CAPTURE: u16 = 12;

/// Compact 16-bit move.
///
/// Encoding:
/// - bits 0-5:   from square (0-63)
/// - bits 6-11:  to square (0-63)
/// - bits 12-15: flags; for promotions bit 14 marks a capture and bits 12-13
///   select the piece (knight, bishop, rook, queen)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u16);

impl Move {
    #[inline]
    #[must_use]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Move::with_flag(from, to, FLAG_QUIET)
    }

    #[inline]
    #[must_use]
    pub const fn capture(from: Square, to: Square) -> Self {
        Move::with_flag(from, to, FLAG_CAPTURE)
    }

    #[inline]
    #[must_use]
    pub const fn double_pawn_push(from: Square, to: Square) -> Self {
        Move::with_flag(from, to, FLAG_DOUBLE_PAWN)
    }

    #[inline]
    #[must_use]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Move::with_flag(from, to, FLAG_EN_PASSANT)
    }

    /// King move of a castle; `to` is the king's destination.
    #[inline]
    #[must_use]
    pub const fn castle(from: Square, to: Square) -> Self {
        let flag = if to.file() > from.file() {
            FLAG_CASTLE_KINGSIDE
        } else {
            FLAG_CASTLE_QUEENSIDE
        };
        Move::with_flag(from, to, flag)
    }

    /// Promotion to `kind`. Pawn and king fall back to a queen.
    #[inline]
    #[must_use]
    pub const fn promotion(from: Square, to: Square, kind: PieceKind, capture: bool) -> Self {
        let piece_bits = match kind {
            PieceKind::Knight => 0,
            PieceKind::Bishop => 1,
            PieceKind::Rook => 2,
            _ => 3,
        };
        let base = if capture {
            FLAG_PROMOTION_CAPTURE
        } else {
            FLAG_PROMOTION
        };
        Move::with_flag(from, to, base | piece_bits)
    }

    #[inline]
    const fn with_flag(from: Square, to: Square, flag: u16) -> Self {
        Move(from.index() as u16 | ((to.index() as u16) << 6) | (flag << 12))
    }

    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        Square::from_index((self.0 & 0x3F) as usize)
    }

    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        Square::from_index(((self.0 >> 6) & 0x3F) as usize)
    }

    #[inline]
    const fn flag(self) -> u16 {
        self.0 >> 12
    }

    /// True for captures, en passant included
    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        let f = self.flag();
        f == FLAG_CAPTURE || f == FLAG_EN_PASSANT || f >= FLAG_PROMOTION_CAPTURE
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        self.flag() == FLAG_EN_PASSANT
    }

    #[inline]
    #[must_use]
    pub const fn is_castling(self) -> bool {
        let f = self.flag();
        f == FLAG_CASTLE_KINGSIDE || f == FLAG_CASTLE_QUEENSIDE
    }

    #[inline]
    #[must_use]
    pub const fn is_castle_kingside(self) -> bool {
        self.flag() == FLAG_CASTLE_KINGSIDE
    }

    #[inline]
    #[must_use]
    pub const fn is_double_pawn_push(self) -> bool {
        self.flag() == FLAG_DOUBLE_PAWN
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        self.flag() >= FLAG_PROMOTION
    }

    #[inline]
    #[must_use]
    pub const fn promotion_kind(self) -> Option<PieceKind> {
        if !self.is_promotion() {
            return None;
        }
        match self.flag() & 0b11 {
            0 => Some(PieceKind::Knight),
            1 => Some(PieceKind::Bishop),
            2 => Some(PieceKind::Rook),
            _ => Some(PieceKind::Queen),
        }
    }

    /// Same origin, destination and promotion choice. Flags are derived from
    /// the position, so callers compare moves built by hand with this.
    #[inline]
    #[must_use]
    pub fn same_squares(self, other: Move) -> bool {
        self.from() == other.from()
            && self.to() == other.to()
            && self.promotion_kind() == other.promotion_kind()
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{}", self.from(), self.to())?;
        if let Some(kind) = self.promotion_kind() {
            write!(f, "={}", kind.to_char().to_ascii_uppercase())?;
        }
        if self.is_capture() {
            write!(f, " cap")?;
        }
        if self.is_castling() {
            write!(f, " castle")?;
        }
        if self.is_en_passant() {
            write!(f, " ep")?;
        }
        if self.is_double_pawn_push() {
            write!(f, " double")?;
        }
        write!(f, ")")
    }
}

/// Coordinate notation: `e2e4`, `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(kind) = self.promotion_kind() {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

// Upper bound on legal moves in any reachable position is 218.
pub(crate) const MAX_MOVES: usize = 256;

const EMPTY_MOVE: Move = Move(0);

/// Move list with a fixed-size backing array.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList {
            moves: [EMPTY_MOVE; MAX_MOVES],
            len: 0,
        }
    }

    pub(crate) fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES, "move list overflow");
        if self.len < MAX_MOVES {
            self.moves[self.len] = mv;
            self.len += 1;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// The listed move with the same squares and promotion choice as `mv`.
    #[must_use]
    pub fn find(&self, mv: Move) -> Option<Move> {
        self.iter().copied().find(|m| m.same_squares(mv))
    }

    #[must_use]
    pub fn contains(&self, mv: Move) -> bool {
        self.find(mv).is_some()
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(Move) -> bool) {
        let mut write = 0;
        for read in 0..self.len {
            let mv = self.moves[read];
            if keep(mv) {
                self.moves[write] = mv;
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.as_slice()[idx]
    }
}
