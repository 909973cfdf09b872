//! Error types for board construction and parsing.

use std::fmt;

use super::types::{Color, Square};

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has too few fields (needs at least 4)
    TooFewParts { found: usize },
    /// Invalid piece character in the placement field
    InvalidPiece { char: char },
    /// Invalid castling character
    InvalidCastling { char: char },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// Placement field does not have exactly 8 ranks
    WrongRankCount { found: usize },
    /// A rank does not describe exactly 8 files
    WrongFileCount { rank: usize, files: usize },
    /// Halfmove clock or fullmove number is not a number
    InvalidCounter { found: String },
    /// The placement parsed but is not a playable position
    InvalidPosition(PositionError),
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN must have at least 4 parts, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in FEN")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::WrongRankCount { found } => {
                write!(f, "FEN placement must have 8 ranks, found {found}")
            }
            FenError::WrongFileCount { rank, files } => {
                write!(f, "Rank {rank} of FEN describes {files} files, expected 8")
            }
            FenError::InvalidCounter { found } => {
                write!(f, "Invalid move counter '{found}' in FEN")
            }
            FenError::InvalidPosition(err) => write!(f, "Invalid position: {err}"),
        }
    }
}

impl std::error::Error for FenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FenError::InvalidPosition(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PositionError> for FenError {
    fn from(err: PositionError) -> Self {
        FenError::InvalidPosition(err)
    }
}

/// A placement that breaks a board invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// Each side needs exactly one king
    KingCount { color: Color, found: u32 },
    /// Pawns never stand on the first or last rank
    PawnOnBackRank { square: Square },
    /// The side that just moved is still in check
    OpponentInCheck { color: Color },
    /// The en passant target does not follow a double pawn push
    InvalidEnPassant { square: Square },
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::KingCount { color, found } => {
                write!(f, "{color} must have exactly one king, found {found}")
            }
            PositionError::PawnOnBackRank { square } => {
                write!(f, "Pawn on back rank square {square}")
            }
            PositionError::OpponentInCheck { color } => {
                write!(f, "{color} is in check but it is not their move")
            }
            PositionError::InvalidEnPassant { square } => {
                write!(f, "No double pawn push passed over {square}")
            }
        }
    }
}

impl std::error::Error for PositionError {}

/// Error type for move text parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// Invalid square notation in move
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
    /// Move is not legal in the current position
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "Move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
            MoveParseError::IllegalMove { notation } => {
                write!(f, "Illegal move '{notation}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Rank out of bounds (must be 0-7)
    RankOutOfBounds { rank: u8 },
    /// File out of bounds (must be 0-7)
    FileOutOfBounds { file: u8 },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "Rank {rank} out of bounds (must be 0-7)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "File {file} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}
