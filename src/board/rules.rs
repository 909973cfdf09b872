//! Move application and game-end detection.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::GameError;

use super::state::Position;
use super::types::{Color, Move};

/// Whether the side to move is in check after a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckStatus {
    Clear,
    Check,
}

impl CheckStatus {
    #[must_use]
    pub const fn is_check(self) -> bool {
        matches!(self, CheckStatus::Check)
    }
}

/// State of a game. Anything but `InProgress` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameOutcome {
    #[default]
    InProgress,
    CheckmateBy(Color),
    Stalemate,
    DrawInsufficientMaterial,
    TimeoutWinner(Color),
}

impl GameOutcome {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    /// The winning side, `None` for draws and unfinished games.
    #[must_use]
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameOutcome::CheckmateBy(color) | GameOutcome::TimeoutWinner(color) => Some(color),
            GameOutcome::InProgress | GameOutcome::Stalemate | GameOutcome::DrawInsufficientMaterial => {
                None
            }
        }
    }

    #[must_use]
    pub const fn is_draw(self) -> bool {
        matches!(self, GameOutcome::Stalemate | GameOutcome::DrawInsufficientMaterial)
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::InProgress => write!(f, "Game in progress"),
            GameOutcome::CheckmateBy(winner) => write!(f, "{winner} wins by checkmate!"),
            GameOutcome::Stalemate => write!(f, "Stalemate - Draw!"),
            GameOutcome::DrawInsufficientMaterial => write!(f, "Draw - Insufficient Material!"),
            GameOutcome::TimeoutWinner(winner) => write!(
                f,
                "{} ran out of time! {winner} wins by timeout.",
                winner.opponent()
            ),
        }
    }
}

/// Owner of the authoritative game outcome.
///
/// Terminal outcomes are sticky: once set, only [`RuleEngine::restore`] (used
/// by undo) can change them.
#[derive(Clone, Debug, Default)]
pub struct RuleEngine {
    outcome: GameOutcome,
}

impl RuleEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Play `mv` on `position` if it is legal there.
    ///
    /// Moves are matched by origin, destination and promotion choice, so a
    /// hand-built `Move::quiet(e2, e4)` finds the generated double push.
    pub fn apply_move(position: &Position, mv: Move) -> Result<(Position, CheckStatus), GameError> {
        let illegal = || GameError::IllegalMove {
            notation: mv.to_string(),
        };
        let legal = position.legal_moves().find(mv).ok_or_else(illegal)?;
        let next = position.after_move(legal).ok_or_else(illegal)?;
        let status = if next.is_in_check(next.side_to_move()) {
            CheckStatus::Check
        } else {
            CheckStatus::Clear
        };
        Ok((next, status))
    }

    /// Classify `position`: checkmate, then stalemate, then insufficient
    /// material, otherwise in progress.
    #[must_use]
    pub fn evaluate(position: &Position) -> GameOutcome {
        let mover = position.side_to_move();
        if !position.has_legal_moves() {
            if position.is_in_check(mover) {
                return GameOutcome::CheckmateBy(mover.opponent());
            }
            return GameOutcome::Stalemate;
        }
        if position.is_insufficient_material() {
            return GameOutcome::DrawInsufficientMaterial;
        }
        GameOutcome::InProgress
    }

    #[must_use]
    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    /// Re-evaluate after a move. A terminal outcome is kept as is.
    pub fn record_position(&mut self, position: &Position) -> GameOutcome {
        if !self.outcome.is_terminal() {
            self.outcome = Self::evaluate(position);
        }
        self.outcome
    }

    /// `loser` ran out of time. Ignored if the game already ended.
    pub fn record_timeout(&mut self, loser: Color) -> GameOutcome {
        if !self.outcome.is_terminal() {
            self.outcome = GameOutcome::TimeoutWinner(loser.opponent());
        }
        self.outcome
    }

    pub fn restore(&mut self, outcome: GameOutcome) {
        self.outcome = outcome;
    }
}
