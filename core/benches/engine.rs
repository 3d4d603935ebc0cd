use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use lifesweeper_core::*;
use std::hint::black_box;

const SIZES: [Coord2; 3] = [(10, 10), (64, 64), (255, 255)];

fn bench_initialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("initialize");
    for size in SIZES {
        let config = GridConfig::new(size, GridConfig::DEFAULT_MINE_PROBABILITY);
        group.bench_function(format!("{}x{}", size.0, size.1), |b| {
            b.iter(|| GridEngine::initialize(black_box(config), BernoulliMineGenerator::from_seed(1)))
        });
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");
    for size in SIZES {
        let layout = MineLayout::empty(size).expect("valid size");
        group.bench_function(format!("{}x{}", size.0, size.1), |b| {
            b.iter_batched(
                || GridEngine::new(layout.clone()),
                |mut engine| engine.reveal(0, 0),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");
    for size in SIZES {
        let mut engine = GridEngine::initialize(
            GridConfig::new(size, GridConfig::DEFAULT_MINE_PROBABILITY),
            BernoulliMineGenerator::from_seed(2),
        );
        for x in (0..i32::from(size.0)).step_by(3) {
            for y in (0..i32::from(size.1)).step_by(3) {
                engine.reveal(x, y);
            }
        }
        group.bench_function(format!("{}x{}", size.0, size.1), |b| {
            b.iter_batched(
                || engine.clone(),
                |mut engine| engine.step(),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_initialize, bench_flood_fill, bench_step);
criterion_main!(benches);
