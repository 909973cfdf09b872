//! Legal move generation.
//!
//! Pseudo-legal moves come from the per-kind generators in the submodules.
//! Each candidate is then played on a copy of the position and dropped if the
//! mover's king is left attacked.

mod kings;
mod knights;
mod pawns;
mod sliders;

use super::state::Position;
use super::types::{Bitboard, Move, MoveList, PieceKind, Square};

use sliders::slider_directions;

impl Position {
    /// Every legal move for the side to move.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = self.pseudo_legal_moves();
        self.retain_legal(&mut moves);
        moves
    }

    /// Legal moves of the piece on `from`. Empty when the square is empty or
    /// holds a piece of the side not to move.
    #[must_use]
    pub fn legal_moves_from(&self, from: Square) -> MoveList {
        let mut moves = MoveList::new();
        if let Some(piece) = self.piece_at(from).filter(|p| p.color == self.side_to_move) {
            self.generate_piece_moves(from, piece.kind, &mut moves);
            self.retain_legal(&mut moves);
        }
        moves
    }

    /// The legal move matching the given squares and promotion choice.
    #[must_use]
    pub fn find_move(&self, from: Square, to: Square, promotion: Option<PieceKind>) -> Option<Move> {
        self.legal_moves_from(from)
            .iter()
            .copied()
            .find(|mv| mv.to() == to && mv.promotion_kind() == promotion)
    }

    /// Whether the side to move has at least one legal move.
    #[must_use]
    pub fn has_legal_moves(&self) -> bool {
        let mover = self.side_to_move;
        self.pseudo_legal_moves()
            .iter()
            .any(|&mv| self.after_move(mv).is_some_and(|next| !next.is_in_check(mover)))
    }

    /// Count leaf nodes of the legal move tree to `depth`.
    #[must_use]
    pub fn perft(&self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        moves
            .iter()
            .filter_map(|&mv| self.after_move(mv))
            .map(|next| next.perft(depth - 1))
            .sum()
    }

    fn pseudo_legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        for kind in PieceKind::ALL {
            for from in self.pieces(self.side_to_move, kind) {
                self.generate_piece_moves(from, kind, &mut moves);
            }
        }
        moves
    }

    fn generate_piece_moves(&self, from: Square, kind: PieceKind, moves: &mut MoveList) {
        match kind {
            PieceKind::Pawn => self.generate_pawn_moves(from, moves),
            PieceKind::Knight => self.generate_knight_moves(from, moves),
            PieceKind::King => self.generate_king_moves(from, moves),
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                if let Some(directions) = slider_directions(kind) {
                    self.generate_slider_moves(from, directions, moves);
                }
            }
        }
    }

    fn retain_legal(&self, moves: &mut MoveList) {
        let mover = self.side_to_move;
        moves.retain(|mv| self.after_move(mv).is_some_and(|next| !next.is_in_check(mover)));
    }

    /// Push a quiet move or capture from `from` to each target square.
    fn push_targets(&self, from: Square, targets: Bitboard, moves: &mut MoveList) {
        let enemies = self.occupied_by(self.side_to_move.opponent());
        for to in targets {
            if enemies.contains(to) {
                moves.push(Move::capture(from, to));
            } else {
                moves.push(Move::quiet(from, to));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_start_position_has_twenty_moves() {
        let position = Position::new();
        assert_eq!(position.legal_moves().len(), 20);
        assert!(position.has_legal_moves());
    }

    #[test]
    fn test_legal_moves_from_knight() {
        let position = Position::new();
        let moves = position.legal_moves_from(sq("g1"));
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|mv| mv.from() == sq("g1")));
        assert!(position.legal_moves_from(sq("g8")).is_empty());
        assert!(position.legal_moves_from(sq("e4")).is_empty());
    }

    #[test]
    fn test_find_move_requires_promotion_match() {
        let position: Position = "8/4P3/8/8/8/8/k7/4K3 w - - 0 1".parse().unwrap();
        assert!(position.find_move(sq("e7"), sq("e8"), None).is_none());
        let mv = position
            .find_move(sq("e7"), sq("e8"), Some(PieceKind::Knight))
            .unwrap();
        assert!(mv.is_promotion());
    }

    #[test]
    fn test_square_attacked_and_check() {
        let position: Position = "4k3/8/8/8/8/8/8/4R1K1 b - - 0 1".parse().unwrap();
        assert!(position.is_square_attacked(sq("e8"), Color::White));
        assert!(position.is_in_check(Color::Black));
        assert!(!position.is_in_check(Color::White));
    }

    #[test]
    fn test_perft_depth_two() {
        assert_eq!(Position::new().perft(2), 400);
    }
}
