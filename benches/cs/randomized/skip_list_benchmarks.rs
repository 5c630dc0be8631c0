use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skipbag::{MultiSet, SkipList, SkipListBuilder};

fn random_values(n: usize, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(0..n as u64)).collect()
}

fn filled(values: &[u64]) -> SkipList<u64> {
    let mut list = SkipListBuilder::new().seed(1).build().unwrap();
    list.extend(values.iter().copied());
    list
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("skip_list_insert");
    for &size in &[100, 1_000, 5_000] {
        let values = random_values(size, 42);
        group.bench_with_input(BenchmarkId::new("insert", size), &values, |b, values| {
            b.iter(|| {
                let mut list = SkipListBuilder::new().seed(1).build().unwrap();
                for &v in values {
                    list.insert(black_box(v));
                }
                list
            });
        });
        group.bench_with_input(BenchmarkId::new("extend", size), &values, |b, values| {
            b.iter(|| filled(black_box(values)));
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("skip_list_lookup");
    for &size in &[1_000, 10_000, 100_000] {
        let values = random_values(size, 7);
        let list = filled(&values);
        group.bench_with_input(BenchmarkId::new("contains", size), &list, |b, list| {
            b.iter(|| {
                for v in (0..size as u64).step_by(size / 100) {
                    black_box(list.contains(&v));
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("get_at", size), &list, |b, list| {
            b.iter(|| {
                for i in (0..size).step_by(size / 100) {
                    black_box(list.get_at(i));
                }
            });
        });
    }
    group.finish();
}

fn bench_set_algebra(c: &mut Criterion) {
    let a: MultiSet<u64> = random_values(2_000, 3).into_iter().collect();
    let b: MultiSet<u64> = random_values(2_000, 4).into_iter().collect();
    c.bench_function("multiset_union", |bench| bench.iter(|| black_box(&a | &b)));
    c.bench_function("multiset_intersection", |bench| {
        bench.iter(|| black_box(&a & &b))
    });
    c.bench_function("multiset_difference", |bench| bench.iter(|| black_box(&a - &b)));
}

criterion_group!(benches, bench_insert, bench_lookup, bench_set_algebra);
criterion_main!(benches);
