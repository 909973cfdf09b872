//! Two-player chess game core.
//!
//! [`GameSession`] ties together rule enforcement, an append-only move
//! history with undo and browsing, and an optional clock with increment.
//! Rendering and input belong to the caller.
//!
//! ```
//! use chess_session::{GameConfig, GameOutcome, GameSession};
//! use chess_session::board::Color;
//!
//! let mut game = GameSession::new_game(GameConfig::default());
//! for mv in ["f2f3", "e7e5", "g2g4"] {
//!     game.submit_uci(mv).unwrap();
//! }
//! let outcome = game.submit_uci("d8h4").unwrap();
//! assert_eq!(outcome, GameOutcome::CheckmateBy(Color::Black));
//! ```

pub mod board;
pub mod clock;
pub mod error;
pub mod history;
pub mod session;
pub mod sync;
pub mod ticker;
mod zobrist;

pub use board::{GameOutcome, Move, Position};
pub use clock::{Clock, ClockState, TimeControl};
pub use error::GameError;
pub use history::{HistoryEntry, HistoryLedger};
pub use session::{GameConfig, GameSession};
pub use ticker::{SharedSession, Ticker};
