//! Per-player countdown clock with Fischer increment.
//!
//! The clock never reads the system time. It is advanced by `tick` with an
//! elapsed duration supplied by the caller, so tests can drive it with
//! synthetic times.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::Color;

/// Time budget for a game. All values in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeControl {
    pub initial_ms: u64,
    pub increment_ms: u64,
    /// Longest a single move may take, if limited
    pub move_limit_ms: Option<u64>,
}

impl TimeControl {
    /// Create a time control from whole minutes and seconds, as entered in game settings.
    #[must_use]
    pub fn from_minutes(minutes: u32, increment_seconds: u32) -> Self {
        TimeControl {
            initial_ms: u64::from(minutes) * 60_000,
            increment_ms: u64::from(increment_seconds) * 1000,
            move_limit_ms: None,
        }
    }

    /// Create a time control from Duration values.
    #[must_use]
    pub fn new(initial: Duration, increment: Duration) -> Self {
        TimeControl {
            initial_ms: initial.as_millis() as u64,
            increment_ms: increment.as_millis() as u64,
            move_limit_ms: None,
        }
    }

    /// Limit each move to `seconds`. Zero removes the limit.
    #[must_use]
    pub fn with_move_limit_seconds(mut self, seconds: u32) -> Self {
        self.move_limit_ms = (seconds > 0).then(|| u64::from(seconds) * 1000);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClockState {
    Stopped,
    Running(Color),
    /// Terminal: this side's time ran out
    Expired(Color),
}

/// Remaining times captured just before a move completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockSnapshot {
    remaining_ms: [u64; 2],
}

impl ClockSnapshot {
    #[must_use]
    pub fn remaining_ms(&self, color: Color) -> u64 {
        self.remaining_ms[color.index()]
    }
}

#[derive(Debug, Clone)]
pub struct Clock {
    control: Option<TimeControl>,
    remaining_ms: [u64; 2],
    // Side whose move is being timed; set even without time control so
    // the time spent per move can still be measured.
    turn: Option<Color>,
    paused: bool,
    expired: Option<Color>,
    move_elapsed_ms: u64,
}

impl Clock {
    /// A stopped clock. `None` disables time control.
    #[must_use]
    pub fn new(control: Option<TimeControl>) -> Self {
        let initial = control.map_or(0, |tc| tc.initial_ms);
        Clock {
            control,
            remaining_ms: [initial; 2],
            turn: None,
            paused: false,
            expired: None,
            move_elapsed_ms: 0,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.control.is_some()
    }

    #[must_use]
    pub fn time_control(&self) -> Option<TimeControl> {
        self.control
    }

    #[must_use]
    pub fn state(&self) -> ClockState {
        match (self.expired, self.turn) {
            (Some(loser), _) => ClockState::Expired(loser),
            (None, Some(side)) if self.is_enabled() && !self.paused => ClockState::Running(side),
            _ => ClockState::Stopped,
        }
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn remaining_ms(&self, color: Color) -> u64 {
        self.remaining_ms[color.index()]
    }

    /// Time spent so far on the move in progress.
    #[must_use]
    pub fn move_elapsed_ms(&self) -> u64 {
        self.move_elapsed_ms
    }

    #[must_use]
    pub fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            remaining_ms: self.remaining_ms,
        }
    }

    /// Begin timing `side`'s move.
    pub fn start(&mut self, side: Color) {
        if self.expired.is_some() {
            return;
        }
        self.turn = Some(side);
        self.paused = false;
        self.move_elapsed_ms = 0;
    }

    /// Hand the turn from `mover` to `next`.
    ///
    /// Returns the remaining times as they were before the increment was
    /// credited to `mover`.
    pub fn complete_move(&mut self, mover: Color, next: Color) -> ClockSnapshot {
        let snapshot = self.snapshot();
        if let Some(control) = self.control {
            let remaining = &mut self.remaining_ms[mover.index()];
            *remaining = remaining.saturating_add(control.increment_ms);
        }
        self.move_elapsed_ms = 0;
        if self.expired.is_none() {
            self.turn = Some(next);
        }
        snapshot
    }

    /// Advance the running side's countdown by `elapsed_ms`.
    ///
    /// Returns the side whose time ran out, exactly once. Ticks are ignored
    /// while paused, before `start`, and after expiry.
    pub fn tick(&mut self, elapsed_ms: u64) -> Option<Color> {
        if self.paused || self.expired.is_some() {
            return None;
        }
        let side = self.turn?;
        self.move_elapsed_ms = self.move_elapsed_ms.saturating_add(elapsed_ms);
        let control = self.control?;

        let remaining = &mut self.remaining_ms[side.index()];
        *remaining = remaining.saturating_sub(elapsed_ms);
        let over_move_limit = control
            .move_limit_ms
            .is_some_and(|limit| self.move_elapsed_ms >= limit);
        if *remaining == 0 || over_move_limit {
            self.expired = Some(side);
            return Some(side);
        }
        None
    }

    /// Pause the countdown.
    pub fn stop(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Put back the times of `snapshot` and time `side`'s move from zero.
    pub fn restore(&mut self, snapshot: ClockSnapshot, side: Color) {
        self.remaining_ms = snapshot.remaining_ms;
        self.expired = None;
        self.turn = Some(side);
        self.move_elapsed_ms = 0;
    }

    /// Display label such as `White: 04:59`, with `--:--` when untimed.
    #[must_use]
    pub fn label(&self, color: Color) -> String {
        if self.is_enabled() {
            format!("{color}: {}", format_clock(self.remaining_ms(color)))
        } else {
            format!("{color}: --:--")
        }
    }
}

impl fmt::Display for ClockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockState::Stopped => write!(f, "stopped"),
            ClockState::Running(side) => write!(f, "running for {side}"),
            ClockState::Expired(side) => write!(f, "expired for {side}"),
        }
    }
}

/// Format milliseconds as `mm:ss`, rounding partial seconds up.
#[must_use]
pub fn format_clock(ms: u64) -> String {
    let total_seconds = ms.div_ceil(1000);
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
