use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use featscope::Dataset;
use featscope::sensitivity::{SensitivityAnalysis, SensitivityMethod, SensitivityReport};
use ndarray::Array2;

const SAMPLE_COUNT: usize = 100_000;
const FEATURE_COUNT: usize = 1_000;

fn setup_dataset() -> Dataset {
    let features = Array2::from_shape_fn((SAMPLE_COUNT, 8), |(row, col)| (row * col) as f64);
    Dataset::new(features, None).expect("dataset")
}

fn report(method: SensitivityMethod, offset: usize) -> SensitivityReport {
    SensitivityReport::new(
        method,
        (0..FEATURE_COUNT).map(|k| (format!("f_{k}"), ((k + offset) % 17) as f64)),
    )
}

fn bench_split(c: &mut Criterion) {
    let dataset = setup_dataset();
    c.bench_with_input(
        BenchmarkId::new("split", SAMPLE_COUNT),
        &dataset,
        |b, dataset| {
            b.iter(|| dataset.split(black_box(0.2)).expect("split"));
        },
    );
}

fn bench_vulnerability(c: &mut Criterion) {
    let shuffled = report(SensitivityMethod::Shuffled, 0);
    let missing = report(SensitivityMethod::Missing, 5);
    let analysis = SensitivityAnalysis::default();
    c.bench_with_input(
        BenchmarkId::new("vulnerability", FEATURE_COUNT),
        &(shuffled, missing),
        |b, (shuffled, missing)| {
            b.iter(|| {
                analysis
                    .vulnerability(black_box(shuffled), black_box(missing))
                    .expect("vulnerability")
            });
        },
    );
}

criterion_group!(benches, bench_split, bench_vulnerability);
criterion_main!(benches);
