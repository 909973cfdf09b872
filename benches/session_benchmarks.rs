//! Benchmarks for move generation and game bookkeeping.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chess_session::board::{Position, RuleEngine};
use chess_session::{GameConfig, GameSession};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

const OPENING: &str = "e2e4 e7e5 g1f3 b8c6 f1b5 a7a6 b5a4 g8f6 e1g1 f8e7 f1e1 b7b5 a4b3 d7d6 c2c3 e8g8";

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    let start = Position::new();
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| start.perft(black_box(depth)))
        });
    }

    let kiwipete = Position::from_fen(KIWIPETE).unwrap();
    for depth in 1..=2 {
        group.bench_with_input(BenchmarkId::new("kiwipete", depth), &depth, |b, &depth| {
            b.iter(|| kiwipete.perft(black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let startpos = Position::new();
    group.bench_function("startpos", |b| b.iter(|| black_box(startpos.legal_moves())));

    let middlegame =
        Position::from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4")
            .unwrap();
    group.bench_function("middlegame", |b| {
        b.iter(|| black_box(middlegame.legal_moves()))
    });

    let kiwipete = Position::from_fen(KIWIPETE).unwrap();
    group.bench_function("kiwipete", |b| b.iter(|| black_box(kiwipete.legal_moves())));
    group.bench_function("kiwipete_evaluate", |b| {
        b.iter(|| black_box(RuleEngine::evaluate(&kiwipete)))
    });

    group.finish();
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");

    group.bench_function("replay_opening", |b| {
        b.iter(|| GameSession::from_moves(GameConfig::default(), black_box(OPENING)))
    });

    group.bench_function("replay_and_undo", |b| {
        b.iter(|| {
            let mut session = GameSession::from_moves(GameConfig::default(), OPENING).unwrap();
            while session.undo().is_ok() {}
            black_box(session.history_length())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_perft, bench_movegen, bench_session);
criterion_main!(benches);
