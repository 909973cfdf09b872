use super::super::attack_tables::{
    slider_attacks, BISHOP_DIRECTIONS, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS,
    ROOK_DIRECTIONS,
};
use super::super::state::Position;
use super::super::types::{Color, Move, MoveList, Piece, PieceKind, Square};

impl Position {
    pub(crate) fn generate_king_moves(&self, from: Square, moves: &mut MoveList) {
        let color = self.side_to_move;
        let own = self.occupied_by(color);
        self.push_targets(from, KING_ATTACKS[from.index()] & !own, moves);

        let rank = color.back_rank();
        if from != square(4, rank) || self.is_in_check(color) {
            return;
        }
        for kingside in [true, false] {
            if let Some(mv) = self.castle_move(color, kingside) {
                moves.push(mv);
            }
        }
    }

    /// Castling is offered when the right is held, the rook stands on its
    /// corner, every square between king and rook is empty and the square the
    /// king crosses is not attacked. The destination is left to the legality
    /// filter.
    fn castle_move(&self, color: Color, kingside: bool) -> Option<Move> {
        if !self.castling.has(color, kingside) {
            return None;
        }
        let rank = color.back_rank();
        let (rook_file, between, transit, dest) = if kingside {
            (7, &[5u8, 6][..], 5, 6)
        } else {
            (0, &[1u8, 2, 3][..], 3, 2)
        };
        let rook = Piece::new(color, PieceKind::Rook);
        if self.piece_at(square(rook_file, rank)) != Some(rook) {
            return None;
        }
        if between.iter().any(|&file| !self.is_empty(square(file, rank))) {
            return None;
        }
        if self.is_square_attacked(square(transit, rank), color.opponent()) {
            return None;
        }
        Some(Move::castle(square(4, rank), square(dest, rank)))
    }

    /// Whether any piece of `by` attacks `target`.
    #[must_use]
    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        let idx = target.index();
        let pawn_sources = PAWN_ATTACKS[by.opponent().index()][idx];
        if !(self.pieces(by, PieceKind::Pawn) & pawn_sources).is_empty() {
            return true;
        }
        if !(self.pieces(by, PieceKind::Knight) & KNIGHT_ATTACKS[idx]).is_empty() {
            return true;
        }
        if !(self.pieces(by, PieceKind::King) & KING_ATTACKS[idx]).is_empty() {
            return true;
        }

        let queens = self.pieces(by, PieceKind::Queen);
        let rook_like = self.pieces(by, PieceKind::Rook) | queens;
        let bishop_like = self.pieces(by, PieceKind::Bishop) | queens;
        let occupancy = self.all_occupied();

        !(slider_attacks(target, occupancy, &ROOK_DIRECTIONS) & rook_like).is_empty()
            || !(slider_attacks(target, occupancy, &BISHOP_DIRECTIONS) & bishop_like).is_empty()
    }

    /// Whether the king of `color` is attacked. A side without a king is never in check.
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_square_attacked(king, color.opponent()))
    }
}

fn square(file: u8, rank: u8) -> Square {
    Square::from_index(usize::from(rank) * 8 + usize::from(file))
}
