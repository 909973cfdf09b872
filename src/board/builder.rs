//! Fluent builder for constructing chess positions.
//!
//! Allows creating positions piece by piece rather than parsing FEN strings.
//!
//! # Example
//! ```
//! use chess_session::board::{Color, PieceKind, PositionBuilder, Square};
//!
//! let e1 = Square::new(4, 0).unwrap();
//! let e8 = Square::new(4, 7).unwrap();
//! let position = PositionBuilder::new()
//!     .piece(e1, Color::White, PieceKind::King)
//!     .piece(e8, Color::Black, PieceKind::King)
//!     .side_to_move(Color::Black)
//!     .build()
//!     .unwrap();
//! assert!(position.is_insufficient_material());
//! ```

use super::error::PositionError;
use super::state::Position;
use super::types::{CastlingRights, Color, Piece, PieceKind, Square};

/// A fluent builder for constructing `Position` values.
#[derive(Clone, Debug)]
pub struct PositionBuilder {
    pieces: Vec<(Square, Piece)>,
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Default for PositionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionBuilder {
    /// Create a builder for an empty board with White to move.
    #[must_use]
    pub fn new() -> Self {
        PositionBuilder {
            pieces: Vec::new(),
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Create a builder holding the standard initial position.
    #[must_use]
    pub fn starting_position() -> Self {
        let start = Position::new();
        PositionBuilder {
            pieces: start.iter_pieces().collect(),
            castling: start.castling_rights(),
            ..Self::new()
        }
    }

    /// Place a piece, replacing whatever stood on the square.
    #[must_use]
    pub fn piece(mut self, square: Square, color: Color, kind: PieceKind) -> Self {
        self.pieces.retain(|(sq, _)| *sq != square);
        self.pieces.push((square, Piece::new(color, kind)));
        self
    }

    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.pieces.retain(|(sq, _)| *sq != square);
        self
    }

    #[must_use]
    pub const fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    #[must_use]
    pub const fn castling(mut self, rights: CastlingRights) -> Self {
        self.castling = rights;
        self
    }

    #[must_use]
    pub const fn en_passant(mut self, target: Square) -> Self {
        self.en_passant = Some(target);
        self
    }

    #[must_use]
    pub const fn halfmove_clock(mut self, plies: u32) -> Self {
        self.halfmove_clock = plies;
        self
    }

    #[must_use]
    pub const fn fullmove_number(mut self, number: u32) -> Self {
        self.fullmove_number = number;
        self
    }

    /// Build and validate the position.
    pub fn build(self) -> Result<Position, PositionError> {
        let mut position = Position::empty();
        for (sq, piece) in self.pieces {
            position.put(sq, piece);
        }
        position.side_to_move = self.side_to_move;
        position.castling = self.castling;
        position.en_passant = self.en_passant;
        position.halfmove_clock = self.halfmove_clock;
        position.fullmove_number = self.fullmove_number.max(1);
        position.validate()?;
        position.hash = position.compute_hash();
        Ok(position)
    }
}
