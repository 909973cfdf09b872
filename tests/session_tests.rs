use chess_session::board::{Color, Move, Square};
use chess_session::clock::ClockState;
use chess_session::session::DrawClaim;
use chess_session::{GameConfig, GameError, GameOutcome, GameSession};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn timed(minutes: u32, increment: u32) -> GameConfig {
    GameConfig::default().with_time_control(minutes, increment)
}

#[test]
fn test_undo_restores_exact_positions() {
    let moves = ["e2e4", "d7d5", "e4d5", "c7c5", "d5c6", "g8f6", "g1f3", "e7e6", "f1e2", "f8e7", "e1g1"];
    let mut session = GameSession::new_game(GameConfig::default());
    let mut before = Vec::new();
    for mv in moves {
        before.push(session.current_position().clone());
        session.submit_uci(mv).unwrap();
    }
    assert!(session.current_position().castling_rights().has(Color::Black, true));

    while let Some(expected) = before.pop() {
        session.undo().unwrap();
        assert_eq!(session.current_position(), &expected);
        assert_eq!(session.current_position().to_fen(), expected.to_fen());
    }
    assert_eq!(session.undo(), Err(GameError::EmptyHistory));
    assert_eq!(session.history_length(), 1);
}

#[test]
fn test_browsing_never_touches_live_game() {
    let mut session =
        GameSession::from_moves(GameConfig::default(), "d2d4 d7d5 c2c4 e7e6 b1c3").unwrap();
    let live = session.current_position().clone();
    let length = session.history_length();

    for index in 0..length {
        let shown = session.browse_to_index(index).unwrap().clone();
        assert_eq!(session.displayed_position(), &shown);
        assert_eq!(session.history_length(), length);
        assert_eq!(session.current_position(), &live);
    }
    assert_eq!(
        session.browse_to_index(length),
        Err(GameError::IndexOutOfRange { index: length, len: length })
    );

    session.browse_first();
    assert_eq!(session.status_message(), "Viewing history - Initial position");
    session.browse_forward();
    session.browse_forward();
    assert_eq!(session.status_message(), "Viewing history - Move 2 of 5");
    assert_eq!(session.undo(), Err(GameError::NotAtLiveState { index: 2, live: 5 }));

    assert_eq!(session.return_to_live(), &live);
    assert_eq!(session.history_label(), None);
    assert_eq!(session.current_history_index(), 5);
}

#[test]
fn test_one_minute_runs_out_for_white() {
    let mut session = GameSession::new_game(timed(1, 0));
    assert_eq!(session.clock_state(), ClockState::Running(Color::White));
    assert_eq!(session.clock_label(Color::White), "White: 01:00");

    let mut outcome = None;
    for _ in 0..(60_000 / 250) {
        outcome = session.tick(250).or(outcome);
    }
    assert_eq!(outcome, Some(GameOutcome::TimeoutWinner(Color::Black)));
    assert_eq!(session.current_outcome(), GameOutcome::TimeoutWinner(Color::Black));
    assert_eq!(session.remaining_time_ms(Color::White), 0);
    assert_eq!(session.clock_state(), ClockState::Expired(Color::White));
    assert_eq!(
        session.status_message(),
        "White ran out of time! Black wins by timeout."
    );
    assert_eq!(
        session.submit_uci("e2e4"),
        Err(GameError::GameOver {
            outcome: GameOutcome::TimeoutWinner(Color::Black)
        })
    );
    assert_eq!(session.tick(1_000), None);
}

#[test]
fn test_untimed_game_never_times_out() {
    let mut session = GameSession::new_game(GameConfig::default());
    assert_eq!(session.tick(24 * 60 * 60 * 1000), None);
    assert_eq!(session.clock_state(), ClockState::Stopped);
    assert_eq!(session.current_outcome(), GameOutcome::InProgress);
    assert_eq!(session.clock_label(Color::Black), "Black: --:--");
}

#[test]
fn test_pause_stops_timeouts() {
    let mut session = GameSession::new_game(timed(1, 0));
    session.tick(30_000);
    session.pause();
    assert_eq!(session.tick(120_000), None);
    assert_eq!(session.remaining_time_ms(Color::White), 30_000);
    session.resume();
    assert_eq!(
        session.tick(30_000),
        Some(GameOutcome::TimeoutWinner(Color::Black))
    );
}

#[test]
fn test_undo_keeps_clock_paused() {
    let mut session = GameSession::new_game(timed(1, 0));
    session.submit_uci("e2e4").unwrap();
    session.pause();
    session.undo().unwrap();
    assert_eq!(session.clock_state(), ClockState::Stopped);
    assert_eq!(session.tick(60_000), None);
    assert_eq!(session.current_outcome(), GameOutcome::InProgress);

    session.resume();
    assert_eq!(session.clock_state(), ClockState::Running(Color::White));
}

#[test]
fn test_increment_and_undo_restore_clock() {
    let mut session = GameSession::new_game(timed(5, 2));
    session.tick(4_000);
    session.submit_uci("e2e4").unwrap();
    assert_eq!(session.remaining_time_ms(Color::White), 298_000);
    assert_eq!(session.clock_state(), ClockState::Running(Color::Black));

    session.tick(1_500);
    session.submit_uci("e7e5").unwrap();
    assert_eq!(session.remaining_time_ms(Color::Black), 300_500);

    session.undo().unwrap();
    assert_eq!(session.remaining_time_ms(Color::Black), 298_500);
    assert_eq!(session.remaining_time_ms(Color::White), 298_000);
    assert_eq!(session.clock_state(), ClockState::Running(Color::Black));

    let entry = session.history().entry(1).unwrap();
    assert_eq!(entry.played().map(|p| p.elapsed_ms), Some(4_000));
}

#[test]
fn test_move_time_limit() {
    let config = timed(10, 0).with_move_time_limit(15);
    let mut session = GameSession::new_game(config);
    session.tick(10_000);
    session.submit_uci("e2e4").unwrap();
    assert_eq!(session.tick(14_000), None);
    assert_eq!(
        session.tick(1_000),
        Some(GameOutcome::TimeoutWinner(Color::White))
    );
}

#[test]
fn test_undo_after_checkmate_reopens_game() {
    let mut session =
        GameSession::from_moves(GameConfig::default(), "f2f3 e7e5 g2g4 d8h4").unwrap();
    assert_eq!(session.current_outcome(), GameOutcome::CheckmateBy(Color::Black));
    assert!(session.is_in_check(Color::White));
    assert!(session.legal_moves().is_empty());

    let undone = session.undo().unwrap();
    assert_eq!(undone.to_string(), "d8h4");
    assert_eq!(session.current_outcome(), GameOutcome::InProgress);
    assert!(!session.is_in_check(Color::White));
    assert!(!session.legal_moves().is_empty());
}

#[test]
fn test_illegal_moves_leave_session_unchanged() {
    let mut session = GameSession::new_game(GameConfig::default());
    let before = session.current_position().clone();
    assert_eq!(
        session.submit_move(Move::quiet(sq("e2"), sq("e5"))),
        Err(GameError::IllegalMove {
            notation: "e2e5".to_string()
        })
    );
    assert!(matches!(session.submit_uci("e2"), Err(GameError::InvalidMove(_))));
    assert_eq!(session.current_position(), &before);
    assert_eq!(session.history_length(), 1);
}

#[test]
fn test_bare_kings_end_immediately() {
    let session =
        GameSession::from_fen(GameConfig::default(), "8/8/8/4k3/8/8/8/4K3 w - - 0 1").unwrap();
    assert_eq!(session.current_outcome(), GameOutcome::DrawInsufficientMaterial);
    assert!(session.legal_moves().is_empty());
}

#[test]
fn test_huge_fen_counters_are_playable() {
    let mut session = GameSession::from_fen(
        GameConfig::default(),
        "4k3/8/8/8/8/8/8/R3K3 w - - 4294967295 1",
    )
    .unwrap();
    assert_eq!(session.claimable_draw(), Some(DrawClaim::FiftyMoves));
    assert_eq!(session.submit_uci("a1a7"), Ok(GameOutcome::InProgress));
    assert_eq!(session.current_position().halfmove_clock(), u32::MAX);
}

#[test]
fn test_threefold_is_only_claimable() {
    let mut session = GameSession::new_game(GameConfig::default());
    for _ in 0..2 {
        for mv in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            session.submit_uci(mv).unwrap();
        }
    }
    assert_eq!(session.claimable_draw(), Some(DrawClaim::ThreefoldRepetition));
    assert_eq!(session.current_outcome(), GameOutcome::InProgress);
}

#[test]
fn test_sessions_are_independent() {
    let mut first = GameSession::new_game(GameConfig::default());
    let second = GameSession::new_game(GameConfig::default());
    first.submit_uci("e2e4").unwrap();
    assert_eq!(second.history_length(), 1);
    assert_eq!(second.current_position().side_to_move(), Color::White);
}
