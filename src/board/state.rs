use crate::zobrist::ZOBRIST;

use super::error::PositionError;
use super::types::{Bitboard, CastlingRights, Color, Piece, PieceKind, Square};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// One ply of a game: board contents plus the state that rules depend on.
///
/// A `Position` is never edited in place during play. Applying a move yields a
/// new value, so a history can keep every position it has seen.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: u64,
}

impl Position {
    /// The standard initial position.
    #[must_use]
    pub fn new() -> Self {
        let mut position = Position::empty();
        for (file, &kind) in (0u8..).zip(BACK_RANK.iter()) {
            for color in Color::BOTH {
                let back = color.back_rank();
                let pawns = color.pawn_start_rank();
                position.put(sq(file, back), Piece::new(color, kind));
                position.put(sq(file, pawns), Piece::new(color, PieceKind::Pawn));
            }
        }
        position.castling = CastlingRights::all();
        position.hash = position.compute_hash();
        position
    }

    pub(crate) fn empty() -> Self {
        Position {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
        }
    }

    pub(crate) fn put(&mut self, sq: Square, piece: Piece) {
        self.pieces[piece.color.index()][piece.kind.index()].insert(sq);
        self.occupied[piece.color.index()].insert(sq);
    }

    pub(crate) fn take(&mut self, sq: Square, piece: Piece) {
        self.pieces[piece.color.index()][piece.kind.index()].remove(sq);
        self.occupied[piece.color.index()].remove(sq);
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        let color = Color::BOTH
            .into_iter()
            .find(|c| self.occupied[c.index()].contains(sq))?;
        PieceKind::ALL
            .into_iter()
            .find(|k| self.pieces[color.index()][k.index()].contains(sq))
            .map(|kind| Piece::new(color, kind))
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self, sq: Square) -> bool {
        !self.all_occupied().contains(sq)
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    /// Plies since the last capture or pawn move.
    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    #[must_use]
    pub fn pieces(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    #[must_use]
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn all_occupied(&self) -> Bitboard {
        self.occupied[0] | self.occupied[1]
    }

    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color, PieceKind::King).first()
    }

    /// Every occupied square with its piece, a1 first.
    pub fn iter_pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.all_occupied()
            .iter()
            .filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    pub(crate) fn compute_hash(&self) -> u64 {
        let mut hash = self
            .iter_pieces()
            .fold(0u64, |acc, (sq, piece)| acc ^ ZOBRIST.piece(piece, sq));
        hash ^= ZOBRIST.side(self.side_to_move);
        hash ^= ZOBRIST.castling(self.castling);
        hash ^= ZOBRIST.en_passant(self.en_passant);
        hash
    }

    /// Check the invariants every playable position satisfies.
    pub fn validate(&self) -> Result<(), PositionError> {
        for color in Color::BOTH {
            let found = self.pieces(color, PieceKind::King).count();
            if found != 1 {
                return Err(PositionError::KingCount { color, found });
            }
        }
        let pawns = self.pieces(Color::White, PieceKind::Pawn) | self.pieces(Color::Black, PieceKind::Pawn);
        if let Some(square) = (pawns & Bitboard::BACK_RANKS).first() {
            return Err(PositionError::PawnOnBackRank { square });
        }
        let waiting = self.side_to_move.opponent();
        if self.is_in_check(waiting) {
            return Err(PositionError::OpponentInCheck { color: waiting });
        }
        if let Some(square) = self.en_passant {
            if !self.is_plausible_en_passant(square) {
                return Err(PositionError::InvalidEnPassant { square });
            }
        }
        Ok(())
    }

    // The waiting side's pawn stands just past the target, and both the
    // target and the pawn's start square are empty.
    fn is_plausible_en_passant(&self, target: Square) -> bool {
        let pusher = self.side_to_move.opponent();
        let dir = pusher.pawn_direction();
        if target.rank() != pusher.pawn_start_rank().wrapping_add_signed(dir) {
            return false;
        }
        let (Some(pawn), Some(origin)) = (target.offset(0, dir), target.offset(0, -dir)) else {
            return false;
        };
        self.pieces(pusher, PieceKind::Pawn).contains(pawn)
            && self.is_empty(target)
            && self.is_empty(origin)
    }

    /// True when neither side can ever deliver mate.
    ///
    /// Recognized: bare kings, a single minor piece, and any number of
    /// bishops that all stand on squares of one color.
    #[must_use]
    pub fn is_insufficient_material(&self) -> bool {
        let heavy_or_pawn = [PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen];
        let present = |kind: PieceKind| !self.pieces_of_both(kind).is_empty();
        if heavy_or_pawn.into_iter().any(present) {
            return false;
        }

        let knights = self.pieces_of_both(PieceKind::Knight);
        let bishops = self.pieces_of_both(PieceKind::Bishop);
        if knights.count() + bishops.count() <= 1 {
            return true;
        }
        if !knights.is_empty() {
            return false;
        }
        (bishops & Bitboard::LIGHT_SQUARES).is_empty() || (bishops & Bitboard::DARK_SQUARES).is_empty()
    }

    /// Halfmove clock has reached 100 plies; a draw may be claimed.
    #[must_use]
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    fn pieces_of_both(&self, kind: PieceKind) -> Bitboard {
        self.pieces(Color::White, kind) | self.pieces(Color::Black, kind)
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

fn sq(file: u8, rank: u8) -> Square {
    Square::from_index(usize::from(rank) * 8 + usize::from(file))
}
