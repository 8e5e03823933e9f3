use bug_eval::centroids::{extract_centroids, ExtractConfig};
use bug_eval::matching::match_points;
use bug_eval::raster::points_to_raster;
use bug_eval::types::Point;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn grid_points(n: usize, spacing: f64) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let row = (i / 10) as f64;
            let col = (i % 10) as f64;
            Point::new(col * spacing, row * spacing)
        })
        .collect()
}

fn bench_match_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_points");

    for size in [10, 30, 60].iter() {
        let truth = grid_points(*size, 12.0);
        // predictions jittered off the truth by one pixel
        let predicted: Vec<Point> = truth
            .iter()
            .map(|p| Point::new(p.x + 1.0, p.y + 1.0))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| match_points(black_box(&truth), black_box(&predicted), 10.0));
        });
    }
    group.finish();
}

fn bench_extract_centroids(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_centroids");

    for size in [20, 50, 100].iter() {
        let points = grid_points(*size, 20.0);
        let raster = points_to_raster(&points, 512, 512, 1.0).unwrap();
        let config = ExtractConfig::default();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| extract_centroids(black_box(&raster), &config));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_match_points, bench_extract_centroids);
criterion_main!(benches);
