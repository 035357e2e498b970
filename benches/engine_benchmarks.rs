//! Criterion benchmarks: move generation throughput and fixed-depth search.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use argent::board::Board;
use argent::search::{SearchContext, SearchMode};
use argent::sync::StopFlag;

fn perft_benchmark(c: &mut Criterion) {
    let startpos = Board::new();
    c.bench_function("perft_3_startpos", |b| {
        b.iter(|| black_box(&startpos).perft(3));
    });

    let kiwipete =
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    c.bench_function("perft_2_kiwipete", |b| {
        b.iter(|| black_box(&kiwipete).perft(2));
    });
}

fn search_benchmark(c: &mut Criterion) {
    let board = Board::new();
    c.bench_function("search_depth_5_startpos", |b| {
        b.iter(|| {
            let mut ctx = SearchContext::new(16, StopFlag::new());
            ctx.get_best_move(black_box(&board), SearchMode::Depth(5))
        });
    });

    let middlegame =
        Board::from_fen("r1bq1rk1/pp2ppbp/2np1np1/8/2BNP3/2N1BP2/PPPQ2PP/R3K2R w KQ - 3 9");
    c.bench_function("search_depth_4_middlegame", |b| {
        b.iter(|| {
            let mut ctx = SearchContext::new(16, StopFlag::new());
            ctx.get_best_move(black_box(&middlegame), SearchMode::Depth(4))
        });
    });
}

criterion_group!(benches, perft_benchmark, search_benchmark);
criterion_main!(benches);
