use crate::zobrist::ZOBRIST;

use super::state::Position;
use super::types::{Color, Move, Piece, PieceKind, Square};

/// Rook start and castled squares for one side, as (file from, file to).
const fn castle_rook_files(kingside: bool) -> (u8, u8) {
    if kingside {
        (7, 5)
    } else {
        (0, 3)
    }
}

/// The castling right tied to a rook's home corner.
fn corner_right(sq: Square) -> Option<(Color, bool)> {
    let color = match sq.rank() {
        0 => Color::White,
        7 => Color::Black,
        _ => return None,
    };
    match sq.file() {
        0 => Some((color, false)),
        7 => Some((color, true)),
        _ => None,
    }
}

impl Position {
    /// The position reached by playing `mv`, or `None` when the move does not
    /// start from a piece of the side to move.
    ///
    /// The move is assumed to be at least pseudo-legal; king safety is not checked.
    pub(crate) fn after_move(&self, mv: Move) -> Option<Position> {
        let mover = self.side_to_move;
        let piece = self.piece_at(mv.from()).filter(|p| p.color == mover)?;
        let mut next = self.clone();
        let mut hash = self.hash;

        hash ^= ZOBRIST.castling(self.castling) ^ ZOBRIST.en_passant(self.en_passant);

        let captured_sq = if mv.is_en_passant() {
            Square::new(mv.to().file(), mv.from().rank())?
        } else {
            mv.to()
        };
        let captured = if mv.is_castling() {
            None
        } else {
            self.piece_at(captured_sq).filter(|p| p.color != mover)
        };
        if let Some(victim) = captured {
            next.take(captured_sq, victim);
            hash ^= ZOBRIST.piece(victim, captured_sq);
        }

        let placed = match mv.promotion_kind() {
            Some(kind) => Piece::new(mover, kind),
            None => piece,
        };
        next.take(mv.from(), piece);
        next.put(mv.to(), placed);
        hash ^= ZOBRIST.piece(piece, mv.from()) ^ ZOBRIST.piece(placed, mv.to());

        if mv.is_castling() {
            let (rook_from, rook_to) = castle_rook_files(mv.is_castle_kingside());
            let rank = mover.back_rank();
            let from = Square::new(rook_from, rank)?;
            let to = Square::new(rook_to, rank)?;
            let rook = Piece::new(mover, PieceKind::Rook);
            next.take(from, rook);
            next.put(to, rook);
            hash ^= ZOBRIST.piece(rook, from) ^ ZOBRIST.piece(rook, to);
        }

        if piece.kind == PieceKind::King {
            next.castling.remove_color(mover);
        }
        for sq in [mv.from(), mv.to()] {
            if let Some((color, kingside)) = corner_right(sq) {
                next.castling.remove(color, kingside);
            }
        }

        next.en_passant = if mv.is_double_pawn_push() {
            mv.from().offset(0, mover.pawn_direction())
        } else {
            None
        };

        if piece.kind == PieceKind::Pawn || captured.is_some() {
            next.halfmove_clock = 0;
        } else {
            next.halfmove_clock = next.halfmove_clock.saturating_add(1);
        }
        if mover == Color::Black {
            next.fullmove_number = next.fullmove_number.saturating_add(1);
        }
        next.side_to_move = mover.opponent();

        hash ^= ZOBRIST.castling(next.castling) ^ ZOBRIST.en_passant(next.en_passant);
        hash ^= ZOBRIST.side(mover) ^ ZOBRIST.side(next.side_to_move);
        next.hash = hash;
        debug_assert_eq!(next.hash, next.compute_hash(), "incremental hash drifted after {mv}");

        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_double_push_sets_en_passant_target() {
        let start = Position::new();
        let next = start
            .after_move(Move::double_pawn_push(sq("e2"), sq("e4")))
            .unwrap();
        assert_eq!(next.en_passant_target(), Some(sq("e3")));
        assert_eq!(next.side_to_move(), Color::Black);
        assert_eq!(next.halfmove_clock(), 0);
        assert_eq!(next.fullmove_number(), 1);
    }

    #[test]
    fn test_knight_move_counts_halfmoves() {
        let start = Position::new();
        let next = start.after_move(Move::quiet(sq("g1"), sq("f3"))).unwrap();
        let next = next.after_move(Move::quiet(sq("g8"), sq("f6"))).unwrap();
        assert_eq!(next.halfmove_clock(), 2);
        assert_eq!(next.fullmove_number(), 2);
        assert_eq!(next.en_passant_target(), None);
    }

    #[test]
    fn test_wrong_side_is_rejected() {
        let start = Position::new();
        assert!(start.after_move(Move::quiet(sq("e7"), sq("e6"))).is_none());
        assert!(start.after_move(Move::quiet(sq("e4"), sq("e5"))).is_none());
    }

    #[test]
    fn test_counters_saturate() {
        let position =
            Position::from_fen("4k3/8/8/8/8/8/8/R3K3 b - - 4294967295 4294967295").unwrap();
        let next = position.after_move(Move::quiet(sq("e8"), sq("d8"))).unwrap();
        assert_eq!(next.halfmove_clock(), u32::MAX);
        assert_eq!(next.fullmove_number(), u32::MAX);
        assert!(next.is_fifty_move_draw());
    }

    #[test]
    fn test_corner_rights() {
        assert_eq!(corner_right(sq("h1")), Some((Color::White, true)));
        assert_eq!(corner_right(sq("a8")), Some((Color::Black, false)));
        assert_eq!(corner_right(sq("e1")), None);
    }
}
