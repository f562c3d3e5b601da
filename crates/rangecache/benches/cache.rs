use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rangecache::{range_sum, RangeCache, Value};

const ARRAY_LEN: usize = 100_000;

fn test_array() -> Vec<Value> {
    let mut rng = fastrand::Rng::with_seed(42);
    (0..ARRAY_LEN).map(|_| rng.i64(1..=100)).collect()
}

fn bench_cached_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_query");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("hot_range_hit", |b| {
        let array = test_array();
        let mut cache = RangeCache::new(1000).unwrap();

        // Warm the cache
        let ranges: Vec<(usize, usize)> = (0..100).map(|i| (i * 10, ARRAY_LEN - 1 - i)).collect();
        for &(l, r) in &ranges {
            cache.query(&array, l, r).unwrap();
        }

        let mut counter = 0;
        b.iter(|| {
            let (l, r) = ranges[counter % ranges.len()];
            black_box(cache.query(&array, l, r).unwrap());
            counter += 1;
        });
    });

    group.bench_function("uncached_range_sum", |b| {
        let array = test_array();
        b.iter(|| black_box(range_sum(&array, 0, ARRAY_LEN - 1).unwrap()));
    });

    group.finish();
}

fn bench_query_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_miss");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("miss_with_eviction", |b| {
        let array = test_array();
        let mut cache = RangeCache::new(10).unwrap(); // Small cache

        let mut counter = 0;
        b.iter(|| {
            // Short distinct ranges so every query misses and evicts
            let left = counter % (ARRAY_LEN - 64);
            black_box(cache.query(&array, left, left + 63).unwrap());
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("97_query_3_update", |b| {
        let mut array = test_array();
        let mut cache = RangeCache::new(1000).unwrap();
        let mut rng = fastrand::Rng::with_seed(7);
        let hot: Vec<(usize, usize)> = (0..30)
            .map(|_| {
                (
                    rng.usize(0..=ARRAY_LEN / 2),
                    rng.usize(ARRAY_LEN / 2..ARRAY_LEN),
                )
            })
            .collect();

        b.iter(|| {
            if rng.u8(0..100) < 3 {
                let index = rng.usize(0..ARRAY_LEN);
                cache.update(&mut array, index, rng.i64(1..=100)).unwrap();
            } else {
                let (l, r) = hot[rng.usize(0..hot.len())];
                black_box(cache.query(&array, l, r).unwrap());
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_cached_query, bench_query_miss, bench_mixed);
criterion_main!(benches);
