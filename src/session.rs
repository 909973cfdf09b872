//! One game: rules, history and clock behind a single owned value.
//!
//! A `GameSession` is the whole interface a front end needs. It is a plain
//! value with no shared state, so any number of games can run side by side.

use std::fmt;

use log::{debug, info, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{
    CheckStatus, Color, FenError, GameOutcome, Move, MoveList, Position, RuleEngine, Square,
};
use crate::clock::{Clock, ClockState, TimeControl};
use crate::error::GameError;
use crate::history::{HistoryEntry, HistoryLedger, PlayedMove};

/// Settings chosen when a game starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameConfig {
    pub time_control_enabled: bool,
    pub minutes_per_player: u32,
    pub increment_seconds: u32,
    pub undo_enabled: bool,
    /// Per-move limit in seconds, 0 for none. Only used with time control.
    pub move_time_limit_seconds: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            time_control_enabled: false,
            minutes_per_player: 10,
            increment_seconds: 0,
            undo_enabled: true,
            move_time_limit_seconds: 0,
        }
    }
}

impl GameConfig {
    /// Enable time control with the given budget.
    #[must_use]
    pub fn with_time_control(mut self, minutes_per_player: u32, increment_seconds: u32) -> Self {
        self.time_control_enabled = true;
        self.minutes_per_player = minutes_per_player;
        self.increment_seconds = increment_seconds;
        self
    }

    #[must_use]
    pub fn with_undo(mut self, enabled: bool) -> Self {
        self.undo_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_move_time_limit(mut self, seconds: u32) -> Self {
        self.move_time_limit_seconds = seconds;
        self
    }

    /// The clock budget, `None` when time control is off.
    #[must_use]
    pub fn time_control(&self) -> Option<TimeControl> {
        self.time_control_enabled.then(|| {
            TimeControl::from_minutes(self.minutes_per_player, self.increment_seconds)
                .with_move_limit_seconds(self.move_time_limit_seconds)
        })
    }
}

/// Which side is drawn at the bottom of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    WhiteAtBottom,
    BlackAtBottom,
}

impl Orientation {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Orientation::WhiteAtBottom => Orientation::BlackAtBottom,
            Orientation::BlackAtBottom => Orientation::WhiteAtBottom,
        }
    }
}

/// A draw either player could claim. Never applied automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawClaim {
    FiftyMoves,
    ThreefoldRepetition,
}

impl fmt::Display for DrawClaim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawClaim::FiftyMoves => write!(f, "Draw can be claimed - Fifty-move rule"),
            DrawClaim::ThreefoldRepetition => {
                write!(f, "Draw can be claimed - Threefold repetition")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    engine: RuleEngine,
    ledger: HistoryLedger,
    clock: Clock,
    orientation: Orientation,
    // Set by `pause`, cleared only by `resume`
    paused_by_user: bool,
}

impl GameSession {
    /// Start a game from the standard initial position.
    #[must_use]
    pub fn new_game(config: GameConfig) -> Self {
        Self::from_position(config, Position::new())
    }

    /// Start a game from a FEN position.
    pub fn from_fen(config: GameConfig, fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_position(config, Position::from_fen(fen)?))
    }

    /// Start a game from the initial position and replay `moves`, given in
    /// coordinate notation separated by whitespace.
    pub fn from_moves(config: GameConfig, moves: &str) -> Result<Self, GameError> {
        let mut session = Self::new_game(config);
        for text in moves.split_whitespace() {
            session.submit_uci(text)?;
        }
        Ok(session)
    }

    #[must_use]
    pub fn from_position(config: GameConfig, position: Position) -> Self {
        let mut engine = RuleEngine::new();
        let outcome = engine.record_position(&position);
        let mut clock = Clock::new(config.time_control());
        if !outcome.is_terminal() {
            clock.start(position.side_to_move());
        }
        info!(
            "new game: {} (time control: {}, undo: {})",
            position.to_fen(),
            config.time_control_enabled,
            config.undo_enabled
        );
        GameSession {
            config,
            engine,
            ledger: HistoryLedger::new(position),
            clock,
            orientation: Orientation::default(),
            paused_by_user: false,
        }
    }

    /// Discard the current game and start over with `config`.
    pub fn reset(&mut self, config: GameConfig) {
        let orientation = self.orientation;
        *self = Self::new_game(config);
        self.orientation = orientation;
    }

    fn ensure_accepting_moves(&self) -> Result<(), GameError> {
        let outcome = self.engine.outcome();
        if outcome.is_terminal() {
            return Err(GameError::GameOver { outcome });
        }
        if !self.ledger.is_at_live() {
            return Err(GameError::NotAtLiveState {
                index: self.ledger.current_index(),
                live: self.ledger.live_index(),
            });
        }
        Ok(())
    }

    /// Play `mv` on the live position.
    ///
    /// The move is matched by origin, destination and promotion choice.
    /// Returns the outcome after the move.
    pub fn submit_move(&mut self, mv: Move) -> Result<GameOutcome, GameError> {
        self.ensure_accepting_moves()?;

        let before = self.ledger.live_position().clone();
        let (after, status) = match RuleEngine::apply_move(&before, mv) {
            Ok(applied) => applied,
            Err(err) => {
                debug!("rejected {mv}: {err}");
                return Err(err);
            }
        };
        let mv = before.legal_moves().find(mv).unwrap_or(mv);
        let mover = before.side_to_move();

        let elapsed_ms = self.clock.move_elapsed_ms();
        let outcome_before = self.engine.outcome();
        let clock_before = self.clock.complete_move(mover, after.side_to_move());
        let played = PlayedMove {
            before,
            mv,
            elapsed_ms,
            clock_before,
            outcome_before,
        };
        self.ledger.append(HistoryEntry::after(played, after))?;

        let outcome = self.engine.record_position(self.ledger.live_position());
        debug!(
            "{mover} played {mv} in {elapsed_ms} ms{}",
            if status == CheckStatus::Check { ", check" } else { "" }
        );
        if outcome.is_terminal() {
            self.clock.stop();
            info!("game over: {outcome}");
        }
        Ok(outcome)
    }

    /// Parse `text` in coordinate notation against the live position and play it.
    pub fn submit_uci(&mut self, text: &str) -> Result<GameOutcome, GameError> {
        self.ensure_accepting_moves()?;
        let mv = self.current_position().parse_move(text)?;
        self.submit_move(mv)
    }

    /// Take back the last move.
    ///
    /// Restores the clock times and outcome from before that move and
    /// restarts the clock for the side that made it, unless the game is paused.
    pub fn undo(&mut self) -> Result<Move, GameError> {
        if !self.config.undo_enabled {
            return Err(GameError::UndoDisabled);
        }
        let entry = self.ledger.undo_last()?;
        let played = entry.played().ok_or(GameError::EmptyHistory)?;
        self.engine.restore(played.outcome_before);
        self.clock
            .restore(played.clock_before, played.before.side_to_move());
        if !played.outcome_before.is_terminal() && !self.paused_by_user {
            self.clock.resume();
        }
        debug!("undid {}", played.mv);
        Ok(played.mv)
    }

    pub fn flip_display_orientation(&mut self) -> Orientation {
        self.orientation = self.orientation.flipped();
        self.orientation
    }

    /// Show the position at history entry `index`. The live game is untouched.
    pub fn browse_to_index(&mut self, index: usize) -> Result<&Position, GameError> {
        debug!("browsing to history entry {index}");
        self.ledger.navigate_to(index)
    }

    pub fn browse_first(&mut self) -> &Position {
        self.ledger.first()
    }

    pub fn browse_back(&mut self) -> &Position {
        self.ledger.back()
    }

    pub fn browse_forward(&mut self) -> &Position {
        self.ledger.forward()
    }

    pub fn return_to_live(&mut self) -> &Position {
        self.ledger.return_to_live()
    }

    /// Advance the clock. Returns the final outcome if this tick ran a flag down.
    pub fn tick(&mut self, elapsed_ms: u64) -> Option<GameOutcome> {
        if self.engine.outcome().is_terminal() {
            return None;
        }
        let loser = self.clock.tick(elapsed_ms)?;
        let outcome = self.engine.record_timeout(loser);
        warn!("{loser} ran out of time");
        info!("game over: {outcome}");
        Some(outcome)
    }

    /// Stop the clock. Ticks are ignored until `resume`.
    pub fn pause(&mut self) {
        self.paused_by_user = true;
        self.clock.stop();
    }

    pub fn resume(&mut self) {
        self.paused_by_user = false;
        if !self.engine.outcome().is_terminal() {
            self.clock.resume();
        }
    }

    /// The live position, whatever entry is being browsed.
    #[must_use]
    pub fn current_position(&self) -> &Position {
        self.ledger.live_position()
    }

    #[must_use]
    pub fn displayed_position(&self) -> &Position {
        self.ledger.displayed_position()
    }

    #[must_use]
    pub fn current_outcome(&self) -> GameOutcome {
        self.engine.outcome()
    }

    #[must_use]
    pub fn remaining_time_ms(&self, color: Color) -> u64 {
        self.clock.remaining_ms(color)
    }

    #[must_use]
    pub fn clock_state(&self) -> ClockState {
        self.clock.state()
    }

    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.current_position().is_in_check(color)
    }

    #[must_use]
    pub fn history_length(&self) -> usize {
        self.ledger.len()
    }

    #[must_use]
    pub fn current_history_index(&self) -> usize {
        self.ledger.current_index()
    }

    #[must_use]
    pub fn history(&self) -> &HistoryLedger {
        &self.ledger
    }

    /// Legal moves for the live position. Empty once the game is over or
    /// while browsing.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        if self.ensure_accepting_moves().is_err() {
            return MoveList::new();
        }
        self.current_position().legal_moves()
    }

    #[must_use]
    pub fn legal_moves_from(&self, square: Square) -> MoveList {
        if self.ensure_accepting_moves().is_err() {
            return MoveList::new();
        }
        self.current_position().legal_moves_from(square)
    }

    /// Status line text for the board being shown.
    #[must_use]
    pub fn status_message(&self) -> String {
        if let Some(label) = self.ledger.label() {
            return label;
        }
        let outcome = self.engine.outcome();
        if outcome.is_terminal() {
            return outcome.to_string();
        }
        let mover = self.current_position().side_to_move();
        if self.is_in_check(mover) {
            format!("{mover} is in check!")
        } else {
            outcome.to_string()
        }
    }

    #[must_use]
    pub fn clock_label(&self, color: Color) -> String {
        self.clock.label(color)
    }

    #[must_use]
    pub fn history_label(&self) -> Option<String> {
        self.ledger.label()
    }

    /// A draw the players could claim on the live position.
    #[must_use]
    pub fn claimable_draw(&self) -> Option<DrawClaim> {
        if self.engine.outcome().is_terminal() {
            return None;
        }
        let position = self.current_position();
        if self.ledger.repetition_count(position.hash()) >= 3 {
            Some(DrawClaim::ThreefoldRepetition)
        } else if position.is_fifty_move_draw() {
            Some(DrawClaim::FiftyMoves)
        } else {
            None
        }
    }

    /// Moves played so far in coordinate notation.
    #[must_use]
    pub fn move_list(&self) -> String {
        self.ledger.to_move_list()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}
