//! Benchmarks for polygon overlay and unary union.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use planum::{intersection, relate, unary_union, union, Geometry, LineString, Polygon};

/// Generates a star-shaped polygon with `n` vertices, centered at `(cx, cy)`.
fn generate_star(n: usize, cx: f64, cy: f64) -> Geometry<f64> {
    let mut coords: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            let angle = i as f64 / n as f64 * 2.0 * std::f64::consts::PI;
            let radius = if i % 2 == 0 { 10.0 } else { 6.0 + ((i * 7) % 10) as f64 / 10.0 };
            (cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect();
    coords.push(coords[0]);
    Polygon::new(LineString::from(coords), vec![]).into()
}

/// Generates a `side` x `side` grid of unit tiles.
fn generate_grid(side: usize) -> Geometry<f64> {
    let mut tiles = Vec::with_capacity(side * side);
    for i in 0..side {
        for j in 0..side {
            let (x, y) = (i as f64, j as f64);
            tiles.push(Polygon::new(
                LineString::from(vec![
                    (x, y),
                    (x + 1.0, y),
                    (x + 1.0, y + 1.0),
                    (x, y + 1.0),
                    (x, y),
                ]),
                vec![],
            ));
        }
    }
    Geometry::MultiPolygon(tiles)
}

fn bench_overlay(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlay");

    for size in [16, 64, 256, 1024] {
        let a = generate_star(size, 0.0, 0.0);
        let b = generate_star(size, 3.0, 1.0);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(
            BenchmarkId::new("intersection", size),
            &(&a, &b),
            |bench, (a, b)| bench.iter(|| intersection(black_box(*a), black_box(*b))),
        );
        group.bench_with_input(
            BenchmarkId::new("union", size),
            &(&a, &b),
            |bench, (a, b)| bench.iter(|| union(black_box(*a), black_box(*b))),
        );
    }

    group.finish();
}

fn bench_relate(c: &mut Criterion) {
    let mut group = c.benchmark_group("relate");

    for size in [16, 256, 1024] {
        let a = generate_star(size, 0.0, 0.0);
        let b = generate_star(size, 3.0, 1.0);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("stars", size), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| relate(black_box(*a), black_box(*b)))
        });
    }

    group.finish();
}

fn bench_unary_union(c: &mut Criterion) {
    let mut group = c.benchmark_group("unary_union");
    group.sample_size(20);

    for side in [4, 8, 16] {
        let grid = generate_grid(side);
        group.throughput(Throughput::Elements((side * side) as u64));

        group.bench_with_input(BenchmarkId::new("grid", side), &grid, |bench, g| {
            bench.iter(|| unary_union(black_box(g)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_overlay, bench_relate, bench_unary_union);
criterion_main!(benches);
