use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use keyed_collections::{TableConfig, UnorderedMap, UnorderedSet};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_put(c: &mut Criterion) {
    c.bench_function("unordered_map_put_10k", |b| {
        b.iter_batched(
            UnorderedMap::<String, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    m.put(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    // Same workload with the table sized up front: no rehashes.
    c.bench_function("unordered_map_put_10k_presized", |b| {
        let cfg = TableConfig::new().initial_capacity(16_384);
        b.iter_batched(
            || UnorderedMap::<String, u64>::with_config(cfg).unwrap(),
            |mut m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    m.put(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("unordered_map_get_hit", |b| {
        let keys: Vec<String> = lcg(7).take(20_000).map(key).collect();
        let m: UnorderedMap<String, u64> =
            keys.iter().cloned().enumerate().map(|(i, k)| (k, i as u64)).collect();
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k.as_str()));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("unordered_map_get_miss", |b| {
        let m: UnorderedMap<String, u64> =
            lcg(11).take(10_000).enumerate().map(|(i, x)| (key(x), i as u64)).collect();
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            let k = key(miss.next().unwrap());
            black_box(m.get(&k));
        })
    });
}

fn bench_intersection(c: &mut Criterion) {
    c.bench_function("unordered_set_intersection_5k_5k", |b| {
        let a: UnorderedSet<u64> = lcg(13).take(5_000).map(|x| x % 8_000).collect();
        let s: UnorderedSet<u64> = lcg(17).take(5_000).map(|x| x % 8_000).collect();
        b.iter(|| black_box(a.intersection(&s)))
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_put, bench_get_hit, bench_get_miss, bench_intersection
}
criterion_main!(benches);
