use super::super::attack_tables::{slider_attacks, BISHOP_DIRECTIONS, ROOK_DIRECTIONS};
use super::super::state::Position;
use super::super::types::{MoveList, PieceKind, Square};

/// Directions a sliding piece may travel, `None` for non-sliders.
pub(crate) fn slider_directions(kind: PieceKind) -> Option<&'static [usize]> {
    const QUEEN_DIRECTIONS: [usize; 8] = [0, 1, 2, 3, 4, 5, 6, 7];
    match kind {
        PieceKind::Bishop => Some(&BISHOP_DIRECTIONS),
        PieceKind::Rook => Some(&ROOK_DIRECTIONS),
        PieceKind::Queen => Some(&QUEEN_DIRECTIONS),
        PieceKind::Pawn | PieceKind::Knight | PieceKind::King => None,
    }
}

impl Position {
    pub(crate) fn generate_slider_moves(
        &self,
        from: Square,
        directions: &[usize],
        moves: &mut MoveList,
    ) {
        let own = self.occupied_by(self.side_to_move);
        let targets = slider_attacks(from, self.all_occupied(), directions) & !own;
        self.push_targets(from, targets, moves);
    }
}
