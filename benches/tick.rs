//! Benchmarks for the per-frame simulation and raster paths.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fireworks_field::{FieldConfig, Pixmap, RecordingSurface, Simulation, Surface, Vec2};

fn config() -> FieldConfig {
    FieldConfig {
        seed: Some(1),
        ..FieldConfig::default()
    }
}

fn bench_spawn(c: &mut Criterion) {
    c.bench_function("spawn_burst_60", |b| {
        b.iter_batched(
            || Simulation::init(RecordingSurface::new(1280, 720), config()).unwrap(),
            |mut sim| {
                sim.spawn_burst(black_box(Vec2::new(640.0, 300.0)), 60, 5.0);
                sim
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for bursts in [1usize, 10, 50] {
        group.bench_with_input(BenchmarkId::new("recording", bursts), &bursts, |b, &bursts| {
            b.iter_batched(
                || {
                    let mut sim = Simulation::init(RecordingSurface::new(1280, 720), config()).unwrap();
                    for i in 0..bursts {
                        sim.spawn_burst(Vec2::new(100.0 + (i % 10) as f32 * 100.0, 300.0), 60, 5.0);
                    }
                    sim
                },
                |mut sim| black_box(sim.tick()),
                criterion::BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("pixmap", bursts), &bursts, |b, &bursts| {
            let mut sim = Simulation::init(Pixmap::new(1280, 720), config()).unwrap();
            for i in 0..bursts {
                sim.spawn_burst(Vec2::new(100.0 + (i % 10) as f32 * 100.0, 300.0), 60, 5.0);
            }
            b.iter(|| black_box(sim.tick()))
        });
    }

    group.finish();
}

fn bench_raster(c: &mut Criterion) {
    let mut group = c.benchmark_group("raster");

    group.bench_function("fade_1280x720", |b| {
        let mut pixmap = Pixmap::new(1280, 720);
        b.iter(|| pixmap.fade(black_box(fireworks_field::Color::NIGHT), 0.08))
    });

    group.bench_function("fill_circle_r4", |b| {
        let mut pixmap = Pixmap::new(1280, 720);
        b.iter(|| {
            pixmap.fill_circle(
                black_box(Vec2::new(640.0, 360.0)),
                4.0,
                fireworks_field::Color::GOLD,
                0.7,
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_spawn, bench_tick, bench_raster);
criterion_main!(benches);
