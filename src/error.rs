//! Errors returned by game-level operations.
//!
//! All of them are recoverable: the session is left unchanged when one is returned.

use std::fmt;

use crate::board::{GameOutcome, MoveParseError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The move is not in the legal set of the live position
    IllegalMove { notation: String },
    /// A move was submitted after the game ended
    GameOver { outcome: GameOutcome },
    /// Only the initial position is left, nothing to undo
    EmptyHistory,
    /// The history cursor is not on the live position
    NotAtLiveState { index: usize, live: usize },
    /// Browse target past the end of the history
    IndexOutOfRange { index: usize, len: usize },
    /// Undo is switched off for this game
    UndoDisabled,
    /// Move text could not be parsed
    InvalidMove(MoveParseError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::IllegalMove { notation } => write!(f, "Illegal move '{notation}'"),
            GameError::GameOver { outcome } => write!(f, "Game is over: {outcome}"),
            GameError::EmptyHistory => write!(f, "No moves to undo!"),
            GameError::NotAtLiveState { index, live } => {
                write!(f, "Viewing history entry {index}, live position is {live}")
            }
            GameError::IndexOutOfRange { index, len } => {
                write!(f, "History index {index} out of range (length {len})")
            }
            GameError::UndoDisabled => write!(f, "Undo is disabled for this game"),
            GameError::InvalidMove(err) => write!(f, "Invalid move: {err}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::InvalidMove(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MoveParseError> for GameError {
    fn from(err: MoveParseError) -> Self {
        match err {
            MoveParseError::IllegalMove { notation } => GameError::IllegalMove { notation },
            other => GameError::InvalidMove(other),
        }
    }
}
