//! Steering benchmarks: full distance queries and control emission.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::f64::consts::{FRAC_PI_2, PI};

use sarathi_steer::{HcReedsSheppSpace, State};

fn benchmark_pairs() -> Vec<(State, State)> {
    let origin = State::new(0.0, 0.0, 0.0, 0.0, 0.0);
    vec![
        (origin, State::new(5.0, 0.0, 0.0, 0.0, 0.0)),
        (origin, State::new(3.0, 3.0, FRAC_PI_2, 0.0, 0.0)),
        (origin, State::new(-2.0, 1.5, PI, 0.0, 0.0)),
        (origin, State::new(0.5, -0.5, 4.0, 0.0, 0.0)),
        (
            State::new(0.0, 0.0, 0.0, 1.0, 0.0),
            State::new(4.0, 0.0, 0.0, -1.0, 0.0),
        ),
    ]
}

fn bench_get_distance(c: &mut Criterion) {
    let space = HcReedsSheppSpace::new(1.0, 1.0, 0.1).unwrap();
    let pairs = benchmark_pairs();
    c.bench_function("get_distance", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for (s1, s2) in &pairs {
                total += space.get_distance(black_box(s1), black_box(s2));
            }
            total
        })
    });
}

fn bench_get_controls(c: &mut Criterion) {
    let space = HcReedsSheppSpace::new(1.0, 1.0, 0.1).unwrap();
    let pairs = benchmark_pairs();
    c.bench_function("get_controls", |b| {
        b.iter(|| {
            let mut count = 0;
            for (s1, s2) in &pairs {
                count += space.get_controls(black_box(s1), black_box(s2)).len();
            }
            count
        })
    });
}

fn bench_get_path(c: &mut Criterion) {
    let space = HcReedsSheppSpace::new(1.0, 1.0, 0.1).unwrap();
    let pairs = benchmark_pairs();
    c.bench_function("get_path", |b| {
        b.iter(|| {
            let mut count = 0;
            for (s1, s2) in &pairs {
                count += space.get_path(black_box(s1), black_box(s2)).len();
            }
            count
        })
    });
}

criterion_group!(benches, bench_get_distance, bench_get_controls, bench_get_path);
criterion_main!(benches);
