use super::super::attack_tables::PAWN_ATTACKS;
use super::super::state::Position;
use super::super::types::{Move, MoveList, Square, PROMOTION_KINDS};

impl Position {
    pub(crate) fn generate_pawn_moves(&self, from: Square, moves: &mut MoveList) {
        let color = self.side_to_move;
        let dir = color.pawn_direction();
        let promotion_rank = color.promotion_rank();

        let push_or_promote = |moves: &mut MoveList, to: Square, capture: bool| {
            if to.rank() == promotion_rank {
                for kind in PROMOTION_KINDS {
                    moves.push(Move::promotion(from, to, kind, capture));
                }
            } else if capture {
                moves.push(Move::capture(from, to));
            } else {
                moves.push(Move::quiet(from, to));
            }
        };

        if let Some(one) = from.offset(0, dir).filter(|&sq| self.is_empty(sq)) {
            push_or_promote(moves, one, false);
            if from.rank() == color.pawn_start_rank() {
                if let Some(two) = one.offset(0, dir).filter(|&sq| self.is_empty(sq)) {
                    moves.push(Move::double_pawn_push(from, two));
                }
            }
        }

        let attacks = PAWN_ATTACKS[color.index()][from.index()];
        for to in attacks & self.occupied_by(color.opponent()) {
            push_or_promote(moves, to, true);
        }

        if let Some(target) = self.en_passant {
            if attacks.contains(target) {
                moves.push(Move::en_passant(from, target));
            }
        }
    }
}
