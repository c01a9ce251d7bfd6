// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use understory_motion::{AnimationEngine, ManualClock, decay_step};
use understory_transform_state::{ScaleBoundaries, TransformState, TransformStore};

fn bounds() -> ScaleBoundaries {
    ScaleBoundaries::new(
        0.5,
        8.0,
        1.0,
        Size::new(1600.0, 1200.0),
        Size::new(1920.0, 1080.0),
    )
}

fn bench_motion(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_motion");

    group.bench_function("decay_step", |b| {
        b.iter(|| {
            let mut scale = 1.0;
            for _ in 0..60 {
                scale = decay_step(black_box(scale), 4.0, 12.0, 1.0 / 60.0);
            }
            black_box(scale);
        });
    });

    group.bench_function("zoom_to_rest", |b| {
        b.iter_batched(
            || {
                let store = TransformStore::new(TransformState::new(Vec2::ZERO, 1.0));
                let engine = AnimationEngine::new(ManualClock::new(), bounds());
                (engine, store)
            },
            |(mut engine, mut store)| {
                for _ in 0..8 {
                    engine.animate_scale_by(&mut store, 1.05, Some(Point::new(700.0, 400.0)));
                }
                let mut now = Duration::ZERO;
                while let Some(handle) = engine.clock().current() {
                    now += Duration::from_millis(16);
                    black_box(engine.on_frame(&mut store, handle, now));
                }
                black_box(store.value().scale);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_motion);
criterion_main!(benches);
