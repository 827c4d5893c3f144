use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slidemedian::{activity_notifications, SlidingWindowMedian};

/// Seeded spending-like data, so runs are comparable
fn generate_data(len: usize) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(0x2545F4914F6CDD1D);
    (0..len).map(|_| rng.random_range(0..200)).collect()
}

/// Median of the window by re-sorting it, for comparison
fn sorted_doubled_median(window: &[i64]) -> i64 {
    let mut sorted = window.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();
    sorted[(n - 1) / 2] + sorted[n / 2]
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let data = generate_data(20_000);

    let mut group = c.benchmark_group("benches");
    group
        .measurement_time(Duration::from_secs_f32(10.))
        .sample_size(100);

    for window_size in [5, 101, 1001] {
        group.bench_with_input(
            BenchmarkId::new("two heaps", window_size),
            &window_size,
            |b, &window_size| {
                b.iter(|| {
                    let mut window = SlidingWindowMedian::new(window_size).unwrap();
                    let mut total = 0;

                    for v in data.iter() {
                        window.add_sample_point(*v).unwrap();
                        total += window.doubled_median().unwrap();
                    }

                    total
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("re-sort", window_size),
            &window_size,
            |b, &window_size| {
                b.iter(|| {
                    let mut total = 0;

                    for i in 0..data.len() {
                        let start = (i + 1).saturating_sub(window_size);
                        total += sorted_doubled_median(&data[start..=i]);
                    }

                    total
                })
            },
        );
    }

    group.bench_function("activity notifications", |b| {
        b.iter(|| activity_notifications(&data, 30).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
