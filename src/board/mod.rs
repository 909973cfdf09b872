//! Chess board representation and rules.
//!
//! Uses bitboards for move generation and attack detection. Supports the full
//! rules of chess including castling, en passant and promotions.
//!
//! # Example
//! ```
//! use chess_session::board::{GameOutcome, Position, RuleEngine};
//!
//! let position = Position::new();
//! println!("Starting position has {} legal moves", position.legal_moves().len());
//! assert_eq!(RuleEngine::evaluate(&position), GameOutcome::InProgress);
//! ```

mod attack_tables;
mod builder;
mod error;
mod fen;
mod make_move;
mod movegen;
mod rules;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use builder::PositionBuilder;
pub use error::{FenError, MoveParseError, PositionError, SquareError};
pub use fen::START_FEN;
pub use rules::{CheckStatus, GameOutcome, RuleEngine};
pub use state::Position;
pub use types::{
    Bitboard, BitboardIter, CastlingRights, Color, Move, MoveList, Piece, PieceKind, Square,
    PROMOTION_KINDS,
};
