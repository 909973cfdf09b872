//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Node counts for move generation correctness
//! - `rules.rs` - Game-end detection and draw material
//! - `edge_cases.rs` - Castling, en passant and promotion corner cases
//! - `proptest.rs` - Property-based tests over random playouts

mod edge_cases;
mod perft;
