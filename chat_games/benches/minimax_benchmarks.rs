use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use chat_games::tictactoe::{Board, GameRegistry, PlayerId, Symbol, minimax};
use std::hint::black_box;

/// Benchmark the computer's answer at different stages of a game
fn bench_best_move(c: &mut Criterion) {
    let positions = [
        ("one_move", Board::from_rows(["---", "-X-", "---"])),
        ("three_moves", Board::from_rows(["X--", "-O-", "--X"])),
        ("five_moves", Board::from_rows(["XOX", "-O-", "-X-"])),
    ];

    let mut group = c.benchmark_group("best_move");
    for (name, board) in positions {
        group.bench_with_input(BenchmarkId::from_parameter(name), &board, |b, board| {
            b.iter(|| minimax::best_move(black_box(board), Symbol::O));
        });
    }
    group.finish();
}

/// Benchmark a full start-and-move round trip through the registry
fn bench_registry_opening(c: &mut Criterion) {
    let alice = PlayerId::human("@alice");

    c.bench_function("registry_opening_move", |b| {
        b.iter(|| {
            let mut registry = GameRegistry::new();
            registry.create_game(1, alice.clone(), "X", None).unwrap();
            registry.submit_move(1, &alice, 1, 1).unwrap()
        });
    });
}

criterion_group!(computer_opponent, bench_best_move, bench_registry_opening);

criterion_main!(computer_opponent);
