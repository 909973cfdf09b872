//! Castling, en passant and promotion corner cases.

use crate::board::{CastlingRights, Color, Move, Piece, PieceKind, Position, RuleEngine, Square};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn has_move(position: &Position, text: &str) -> bool {
    position.parse_move(text).is_ok()
}

fn play(position: &Position, text: &str) -> Position {
    let mv = position.parse_move(text).unwrap();
    RuleEngine::apply_move(position, mv).unwrap().0
}

#[test]
fn test_castling_both_sides() {
    let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let short = play(&position, "e1g1");
    assert_eq!(
        short.piece_at(sq("f1")),
        Some(Piece::new(Color::White, PieceKind::Rook))
    );
    assert!(short.is_empty(sq("h1")));
    assert!(!short.castling_rights().has(Color::White, true));
    assert!(!short.castling_rights().has(Color::White, false));
    assert!(short.castling_rights().has(Color::Black, false));

    let long = play(&short, "e8c8");
    assert_eq!(
        long.piece_at(sq("d8")),
        Some(Piece::new(Color::Black, PieceKind::Rook))
    );
    assert_eq!(long.castling_rights(), CastlingRights::none());
}

#[test]
fn test_cannot_castle_through_attacked_square() {
    let position = Position::from_fen("r3kr2/8/8/8/8/8/8/R3K2R w KQq - 0 1").unwrap();
    assert!(!has_move(&position, "e1g1"));
    assert!(has_move(&position, "e1c1"));
}

#[test]
fn test_cannot_castle_out_of_check() {
    let position = Position::from_fen("4k3/8/8/8/8/8/8/R3K2r w Q - 0 1").unwrap();
    assert!(position.is_in_check(Color::White));
    assert!(!has_move(&position, "e1c1"));
}

#[test]
fn test_cannot_castle_into_check() {
    let position = Position::from_fen("4k1r1/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    assert!(!has_move(&position, "e1g1"));
}

#[test]
fn test_queenside_castle_with_attacked_b_file() {
    let position = Position::from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
    assert!(has_move(&position, "e1c1"));
}

#[test]
fn test_castle_requires_empty_squares_and_right() {
    let blocked = Position::from_fen("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1").unwrap();
    assert!(!has_move(&blocked, "e1c1"));
    assert!(has_move(&blocked, "e1g1"));
    let no_right = Position::from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
    assert!(!has_move(&no_right, "e1g1"));
}

#[test]
fn test_capturing_rook_removes_right() {
    let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let next = play(&position, "a1a8");
    assert_eq!(next.castling_rights().to_string(), "Kk");
}

#[test]
fn test_en_passant_capture() {
    let position =
        Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3").unwrap();
    let mv = position.parse_move("e5f6").unwrap();
    assert!(mv.is_en_passant());
    let next = play(&position, "e5f6");
    assert!(next.is_empty(sq("f5")));
    assert_eq!(
        next.piece_at(sq("f6")),
        Some(Piece::new(Color::White, PieceKind::Pawn))
    );
    assert_eq!(next.en_passant_target(), None);
}

#[test]
fn test_en_passant_expires_after_one_ply() {
    let start = Position::from_fen("3k4/3p4/8/4P3/8/8/8/4K3 b - - 0 1").unwrap();
    let pushed = play(&start, "d7d5");
    assert_eq!(pushed.en_passant_target(), Some(sq("d6")));
    assert!(has_move(&pushed, "e5d6"));
    let waited = play(&play(&pushed, "e1e2"), "d8c7");
    assert!(!has_move(&waited, "e5d6"));
}

#[test]
fn test_en_passant_exposing_king_is_illegal() {
    let position = Position::from_fen("8/8/8/KPp4r/8/8/8/7k w - c6 0 1").unwrap();
    assert!(!has_move(&position, "b5c6"));
    assert!(has_move(&position, "b5b6"));
}

#[test]
fn test_promotion_expands_to_four_moves() {
    let position = Position::from_fen("8/P7/8/8/8/8/8/k1K5 w - - 0 1").unwrap();
    let promotions: Vec<Move> = position
        .legal_moves_from(sq("a7"))
        .iter()
        .copied()
        .collect();
    assert_eq!(promotions.len(), 4);
    let kinds: Vec<_> = promotions.iter().filter_map(|m| m.promotion_kind()).collect();
    assert!(kinds.contains(&PieceKind::Queen));
    assert!(kinds.contains(&PieceKind::Rook));
    assert!(kinds.contains(&PieceKind::Bishop));
    assert!(kinds.contains(&PieceKind::Knight));

    let next = play(&position, "a7a8n");
    assert_eq!(
        next.piece_at(sq("a8")),
        Some(Piece::new(Color::White, PieceKind::Knight))
    );
}

#[test]
fn test_promotion_capture_takes_corner_rook_right() {
    let position = Position::from_fen("r3k3/1P6/8/8/8/8/8/4K3 w q - 0 1").unwrap();
    let next = play(&position, "b7a8q");
    assert_eq!(
        next.piece_at(sq("a8")),
        Some(Piece::new(Color::White, PieceKind::Queen))
    );
    assert!(next.castling_rights().is_empty());
    assert!(next.is_in_check(Color::Black));
}

#[test]
fn test_pinned_piece_cannot_move() {
    let position = Position::from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
    assert!(position.legal_moves_from(sq("e2")).is_empty());
}

#[test]
fn test_double_check_only_king_moves() {
    let position = Position::from_fen("4k3/8/8/8/1b6/8/8/R3K2r w Q - 0 1").unwrap();
    assert!(position.is_in_check(Color::White));
    assert!(!position.legal_moves().is_empty());
    assert!(position
        .legal_moves()
        .iter()
        .all(|mv| mv.from() == sq("e1")));
}
