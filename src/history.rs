//! Append-only record of a game with a browse cursor.
//!
//! Entry 0 holds the initial position. Each later entry owns the position
//! before its move and the position after it, so browsing never needs to
//! replay moves. Moving the cursor leaves the entries untouched.

use std::collections::HashMap;

use crate::board::{GameOutcome, Move, Position};
use crate::clock::ClockSnapshot;
use crate::error::GameError;

/// What happened on one ply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    pub before: Position,
    pub mv: Move,
    /// Time the mover spent on this move
    pub elapsed_ms: u64,
    /// Clock times just before the move completed
    pub clock_before: ClockSnapshot,
    pub outcome_before: GameOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    position: Position,
    played: Option<PlayedMove>,
}

impl HistoryEntry {
    #[must_use]
    pub fn initial(position: Position) -> Self {
        HistoryEntry {
            position,
            played: None,
        }
    }

    #[must_use]
    pub fn after(played: PlayedMove, position: Position) -> Self {
        HistoryEntry {
            position,
            played: Some(played),
        }
    }

    /// Position after this entry's move.
    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[must_use]
    pub fn played(&self) -> Option<&PlayedMove> {
        self.played.as_ref()
    }

    #[must_use]
    pub fn mv(&self) -> Option<Move> {
        self.played.as_ref().map(|p| p.mv)
    }

    #[must_use]
    pub fn before(&self) -> Option<&Position> {
        self.played.as_ref().map(|p| &p.before)
    }
}

#[derive(Clone, Debug, Default)]
struct RepetitionTable {
    counts: HashMap<u64, u32>,
}

impl RepetitionTable {
    fn get(&self, hash: u64) -> u32 {
        self.counts.get(&hash).copied().unwrap_or(0)
    }

    fn increment(&mut self, hash: u64) {
        *self.counts.entry(hash).or_insert(0) += 1;
    }

    fn decrement(&mut self, hash: u64) {
        if let Some(count) = self.counts.get_mut(&hash) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&hash);
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct HistoryLedger {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    repetitions: RepetitionTable,
}

impl HistoryLedger {
    #[must_use]
    pub fn new(initial: Position) -> Self {
        let mut repetitions = RepetitionTable::default();
        repetitions.increment(initial.hash());
        HistoryLedger {
            entries: vec![HistoryEntry::initial(initial)],
            cursor: 0,
            repetitions,
        }
    }

    /// Number of entries, the initial one included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the initial entry cannot be removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn live_index(&self) -> usize {
        self.entries.len() - 1
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn is_at_live(&self) -> bool {
        self.cursor == self.live_index()
    }

    fn ensure_live(&self) -> Result<(), GameError> {
        if self.is_at_live() {
            Ok(())
        } else {
            Err(GameError::NotAtLiveState {
                index: self.cursor,
                live: self.live_index(),
            })
        }
    }

    /// Add an entry at the tail. The cursor follows it.
    pub fn append(&mut self, entry: HistoryEntry) -> Result<(), GameError> {
        self.ensure_live()?;
        self.repetitions.increment(entry.position.hash());
        self.entries.push(entry);
        self.cursor = self.live_index();
        Ok(())
    }

    /// Remove and return the tail entry.
    pub fn undo_last(&mut self) -> Result<HistoryEntry, GameError> {
        self.ensure_live()?;
        if self.entries.len() <= 1 {
            return Err(GameError::EmptyHistory);
        }
        let entry = self.entries.pop().ok_or(GameError::EmptyHistory)?;
        self.repetitions.decrement(entry.position.hash());
        self.cursor = self.live_index();
        Ok(entry)
    }

    /// Move the browse cursor to `index` and return the position shown there.
    pub fn navigate_to(&mut self, index: usize) -> Result<&Position, GameError> {
        if index >= self.entries.len() {
            return Err(GameError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        self.cursor = index;
        Ok(self.displayed_position())
    }

    pub fn first(&mut self) -> &Position {
        self.cursor = 0;
        self.displayed_position()
    }

    pub fn back(&mut self) -> &Position {
        self.cursor = self.cursor.saturating_sub(1);
        self.displayed_position()
    }

    pub fn forward(&mut self) -> &Position {
        self.cursor = (self.cursor + 1).min(self.live_index());
        self.displayed_position()
    }

    pub fn return_to_live(&mut self) -> &Position {
        self.cursor = self.live_index();
        self.displayed_position()
    }

    #[must_use]
    pub fn live_position(&self) -> &Position {
        &self.entries[self.live_index()].position
    }

    #[must_use]
    pub fn displayed_position(&self) -> &Position {
        &self.entries[self.cursor].position
    }

    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Browse banner text, `None` while showing the live position.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        if self.is_at_live() {
            None
        } else if self.cursor == 0 {
            Some("Viewing history - Initial position".to_string())
        } else {
            Some(format!(
                "Viewing history - Move {} of {}",
                self.cursor,
                self.live_index()
            ))
        }
    }

    /// All moves played, in order.
    #[must_use]
    pub fn moves(&self) -> Vec<Move> {
        self.entries.iter().filter_map(HistoryEntry::mv).collect()
    }

    /// Moves in coordinate notation separated by spaces.
    #[must_use]
    pub fn to_move_list(&self) -> String {
        self.moves()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// How often a position with this hash occurs in the history.
    #[must_use]
    pub fn repetition_count(&self, hash: u64) -> u32 {
        self.repetitions.get(hash)
    }
}
