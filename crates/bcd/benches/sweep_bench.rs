//! Criterion benches for the column sweep on random rooms.
//!
//! - `decompose`: fresh graph per run, rooms of side 64, 128 and 256.
//! - `decomposer`: one engine reused across runs (graph storage is recycled).
//!
//! Rooms are drawn once per size outside the timed loop. Failed decompositions
//! (stacked obstacles) are timed like successful ones.

use bcd::map::rand::{draw_room, ObstacleCount, ReplayToken, RoomCfg};
use bcd::{decompose, Decomposer};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn room(side: usize) -> bcd::OccupancyMap {
    let cfg = RoomCfg {
        width: side,
        height: side * 3 / 4,
        obstacles: ObstacleCount::Fixed(side / 16),
        max_extent_frac: 0.2,
        border_walls: true,
    };
    draw_room(cfg, ReplayToken { seed: 42, index: side as u64 })
}

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");
    for side in [64usize, 128, 256] {
        let map = room(side);
        group.bench_with_input(BenchmarkId::new("decompose", side), &map, |b, m| {
            b.iter(|| {
                let _ = black_box(decompose(black_box(m)));
            })
        });
        group.bench_with_input(BenchmarkId::new("decomposer", side), &map, |b, m| {
            let mut engine = Decomposer::new();
            b.iter(|| {
                let _ = black_box(engine.run(black_box(m)));
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sweep);
criterion_main!(benches);
