use super::super::attack_tables::KNIGHT_ATTACKS;
use super::super::state::Position;
use super::super::types::{MoveList, Square};

impl Position {
    pub(crate) fn generate_knight_moves(&self, from: Square, moves: &mut MoveList) {
        let own = self.occupied_by(self.side_to_move);
        let targets = KNIGHT_ATTACKS[from.index()] & !own;
        self.push_targets(from, targets, moves);
    }
}
