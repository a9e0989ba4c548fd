//! Benchmarks for centerline extraction

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use geo::{LineString, Polygon};
use skelgis_algorithms::skeleton::{extract_centerlines, CenterlineParams};

fn rectangle(width: f64, height: f64) -> Polygon<f64> {
    Polygon::new(
        LineString::from(vec![
            (0.0, 0.0),
            (width, 0.0),
            (width, height),
            (0.0, height),
            (0.0, 0.0),
        ]),
        vec![],
    )
}

fn holed_square(size: f64) -> Polygon<f64> {
    let third = size / 3.0;
    Polygon::new(
        LineString::from(vec![
            (0.0, 0.0),
            (size, 0.0),
            (size, size),
            (0.0, size),
            (0.0, 0.0),
        ]),
        vec![LineString::from(vec![
            (third, third),
            (2.0 * third, third),
            (2.0 * third, 2.0 * third),
            (third, 2.0 * third),
            (third, third),
        ])],
    )
}

fn bench_rectangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("skeleton/rectangle");
    let polygon = rectangle(100.0, 10.0);
    for step in [5.0, 2.5, 1.25] {
        let params = CenterlineParams { max_segment_length: step, ..Default::default() };
        group.bench_with_input(BenchmarkId::from_parameter(step), &step, |b, _| {
            b.iter(|| extract_centerlines(black_box(&polygon), &params).unwrap())
        });
    }
    group.finish();
}

fn bench_holed_square(c: &mut Criterion) {
    let mut group = c.benchmark_group("skeleton/holed_square");
    let polygon = holed_square(30.0);
    for step in [2.5, 1.25] {
        let params = CenterlineParams {
            max_segment_length: step,
            min_spur_length: Some(8.0),
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(step), &step, |b, _| {
            b.iter(|| extract_centerlines(black_box(&polygon), &params).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rectangle, bench_holed_square);
criterion_main!(benches);
