// In benches/reorder_bench.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rowperm::{permute_vector, unpermute_vector, update_permutation, Permutation};

// --- Benchmark Suite ---

const BENCH_ROWS: u32 = 1 << 20; // ~1M genes/cells

fn bench_mappers(c: &mut Criterion) {
    // --- Setup Data ---
    let mut rng = StdRng::seed_from_u64(2024);
    let perm = Permutation::shuffled(BENCH_ROWS, &mut rng);
    let newer = Permutation::shuffled(BENCH_ROWS, &mut rng);
    let values: Vec<f64> = (0..BENCH_ROWS).map(|_| rng.random::<f64>()).collect();

    // --- Create a Benchmark Group ---
    let mut group = c.benchmark_group("Row Permutation");
    group.throughput(criterion::Throughput::Elements(BENCH_ROWS as u64));

    group.bench_function("permute_vector f64", |b| {
        b.iter(|| black_box(permute_vector(black_box(&perm), black_box(&values))))
    });
    group.bench_function("unpermute_vector f64", |b| {
        b.iter(|| black_box(unpermute_vector(black_box(&perm), black_box(&values))))
    });
    group.bench_function("update_permutation (reorder)", |b| {
        b.iter(|| black_box(update_permutation(black_box(&newer), black_box(&perm))))
    });
    group.bench_function("update_permutation (unchanged)", |b| {
        b.iter(|| black_box(update_permutation(black_box(&perm), black_box(&perm))))
    });
    group.bench_function("validate", |b| {
        b.iter(|| black_box(rowperm::permutation::validate(black_box(perm.as_slice()))))
    });

    group.finish();
}

criterion_group!(benches, bench_mappers);
criterion_main!(benches);
