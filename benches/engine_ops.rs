use grid_2048::engine::{Direction, EngineConfig, GridEngine, Notification};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

/// Engine advanced by a deterministic sequence of moves so boards have some density.
fn warmed_engine(seed: u64, rows: usize, columns: usize, moves: usize) -> GridEngine {
    let config = EngineConfig::new(rows, columns, 1 << 20).unwrap();
    let mut engine = GridEngine::with_seed(config, seed);
    engine.start_new_game().unwrap();
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..moves {
        if engine.pending_notification() == Some(Notification::Lost) {
            break;
        }
        let dir = Direction::ALL[rng.gen_range(0..4)];
        engine.request_move(dir).unwrap();
    }
    engine.take_events();
    engine
}

fn bench_request_move(c: &mut Criterion) {
    for (rows, columns) in [(4usize, 4usize), (8, 8)] {
        for dir in Direction::ALL {
            c.bench_function(&format!("request_move/{rows}x{columns}/{dir}"), |bch| {
                bch.iter_batched(
                    || warmed_engine(42, rows, columns, 30),
                    |mut engine| {
                        let moved = engine.request_move(dir).unwrap();
                        black_box((moved, engine.take_events().len()))
                    },
                    BatchSize::SmallInput,
                )
            });
        }
    }
}

fn bench_new_game(c: &mut Criterion) {
    c.bench_function("start_new_game/4x4", |bch| {
        let mut engine = GridEngine::with_seed(EngineConfig::default(), 7);
        bch.iter(|| {
            engine.start_new_game().unwrap();
            black_box(engine.take_events())
        })
    });
}

fn bench_has_any_move(c: &mut Criterion) {
    let engine = warmed_engine(9, 4, 4, 200);
    c.bench_function("has_any_move/4x4", |bch| bch.iter(|| black_box(engine.has_any_move())));
}

fn bench_full_game(c: &mut Criterion) {
    c.bench_function("random_game/4x4", |bch| {
        bch.iter_batched(
            || (GridEngine::with_seed(EngineConfig::default(), 3), StdRng::seed_from_u64(3)),
            |(mut engine, mut rng)| {
                engine.start_new_game().unwrap();
                while engine.pending_notification() != Some(Notification::Lost) {
                    if engine.pending_notification().is_some() {
                        engine.acknowledge().unwrap();
                    }
                    let dir = Direction::ALL[rng.gen_range(0..4)];
                    engine.request_move(dir).unwrap();
                    engine.take_events();
                }
                black_box(engine.moves_made())
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    engine_ops,
    bench_request_move,
    bench_new_game,
    bench_has_any_move,
    bench_full_game
);
criterion_main!(engine_ops);
