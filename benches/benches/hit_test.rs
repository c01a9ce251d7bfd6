// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use understory_view_hit::{Alignment, SubjectHitTester, SubjectTransform};

/// A grid of sample points covering the viewport and a margin around it.
fn sample_points(viewport: Size, step: f64) -> Vec<Point> {
    let mut points = Vec::new();
    let mut y = -50.0;
    while y < viewport.height + 50.0 {
        let mut x = -50.0;
        while x < viewport.width + 50.0 {
            points.push(Point::new(x, y));
            x += step;
        }
        y += step;
    }
    points
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_view_hit");
    let viewport = Size::new(1920.0, 1080.0);
    let tester = SubjectHitTester::new(Size::new(800.0, 600.0), viewport, Alignment::CENTER);
    let points = sample_points(viewport, 8.0);

    for (name, transform) in [
        (
            "unrotated",
            SubjectTransform {
                position: Vec2::new(35.0, -12.0),
                scale: 1.6,
                rotation: 0.0,
            },
        ),
        (
            "rotated",
            SubjectTransform {
                position: Vec2::new(35.0, -12.0),
                scale: 1.6,
                rotation: 0.3,
            },
        ),
    ] {
        group.bench_function(format!("is_over_subject({name}, n={})", points.len()), |b| {
            b.iter(|| {
                let hits = points
                    .iter()
                    .filter(|p| tester.is_over_subject(**p, black_box(&transform)))
                    .count();
                black_box(hits);
            });
        });
    }

    group.bench_function("recalculate_layout", |b| {
        let mut tester = tester;
        let mut wide = false;
        b.iter(|| {
            wide = !wide;
            let width = if wide { 2560.0 } else { 1920.0 };
            black_box(tester.recalculate_layout(
                Size::new(800.0, 600.0),
                Size::new(width, 1080.0),
                Alignment::CENTER,
            ));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_hit_test);
criterion_main!(benches);
