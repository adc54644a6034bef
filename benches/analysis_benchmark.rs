//! Benchmarks for board analysis.
//!
//! The 101-state Chutes and Ladders chain is the realistic workload; the
//! matrix-power path is measured for comparison with curve propagation.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use chutes::board::presets;
use chutes::{Absorption, Board, Distribution, Game, SearchConfig};
use criterion::{Criterion, criterion_group, criterion_main};

fn bench_build_board(c: &mut Criterion) {
    let config = presets::chutes_and_ladders();

    c.bench_function("build_chutes_and_ladders", |b| {
        b.iter(|| black_box(Board::build(black_box(&config))));
    });
}

fn bench_fundamental_matrix(c: &mut Criterion) {
    let board = Board::build(&presets::chutes_and_ladders()).unwrap();

    c.bench_function("fundamental_matrix_101", |b| {
        b.iter(|| black_box(Absorption::from_board(black_box(&board))));
    });
}

fn bench_distribution(c: &mut Criterion) {
    let board = Board::build(&presets::chutes_and_ladders()).unwrap();

    c.bench_function("completion_curve_101", |b| {
        b.iter(|| black_box(Distribution::new(black_box(&board), SearchConfig::default())));
    });

    c.bench_function("step_matrix_101_k128", |b| {
        b.iter(|| black_box(board.step_matrix(black_box(128))));
    });
}

fn bench_full_game(c: &mut Criterion) {
    let config = presets::chutes_and_ladders();

    c.bench_function("game_summary_chutes_and_ladders", |b| {
        b.iter(|| {
            let game = Game::new(black_box(&config)).unwrap();
            black_box(game.summary())
        });
    });
}

criterion_group!(
    benches,
    bench_build_board,
    bench_fundamental_matrix,
    bench_distribution,
    bench_full_game
);
criterion_main!(benches);
