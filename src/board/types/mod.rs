//! Core chess types.
//!
//! - `PieceKind`, `Color` and `Piece` - what stands on a square
//! - `Square` - bounds-checked board coordinate
//! - `Bitboard` - set of squares
//! - `Move` and `MoveList` - move representation
//! - `CastlingRights` - castling state

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::CastlingRights;
pub use moves::{Move, MoveList};
pub use piece::{Color, Piece, PieceKind, PROMOTION_KINDS};
pub use square::Square;
