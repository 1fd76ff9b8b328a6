//! Lanai Benchmarks
//!
//! Compares the Lanai Trie against `BTreeMap` and `HashMap` on the
//! workload it is built for: a few thousand short ASCII keys loaded once
//! and then looked up many times.
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench --features benchmarking
//! ```

use criterion::{
    black_box, criterion_group, criterion_main, measurement::WallTime, BenchmarkId, Criterion,
    SamplingMode, Throughput,
};
use lanai_lib::data_structures::lanai_trie::LanaiTrie;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

const KEY_COUNTS: [usize; 3] = [1_000, 5_000, 20_000];
const LOOKUPS: usize = 10_000;
const SEED: u64 = 0x1a4a1;

/// Product-code style keys: a root symbol followed by a contract month.
fn generate_keys(count: usize, rng: &mut StdRng) -> Vec<String> {
    const ROOT: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    const MONTHS: &[u8] = b"FGHJKMNQUVXZ";

    let mut keys: Vec<String> = (0..count * 2)
        .map(|_| {
            let root_len = rng.gen_range(1..=4);
            let mut key: String = (0..root_len)
                .map(|_| ROOT[rng.gen_range(0..ROOT.len())] as char)
                .collect();
            key.push(MONTHS[rng.gen_range(0..MONTHS.len())] as char);
            key.push_str(&rng.gen_range(0..100).to_string());
            key
        })
        .collect();
    keys.sort_unstable();
    keys.dedup();
    keys.shuffle(rng);
    keys.truncate(count);
    keys
}

/// Half hits, half misses, in random order.
fn generate_queries(keys: &[String], rng: &mut StdRng) -> Vec<String> {
    (0..LOOKUPS)
        .map(|i| {
            let key = &keys[rng.gen_range(0..keys.len())];
            if i % 2 == 0 {
                key.clone()
            } else {
                format!("{key}~")
            }
        })
        .collect()
}

/// Benchmark building each map from scratch
fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));
    group.sample_size(50);

    let mut rng = StdRng::seed_from_u64(SEED);
    for count in KEY_COUNTS {
        let keys = generate_keys(count, &mut rng);
        group.throughput(Throughput::Elements(keys.len() as u64));

        group.bench_with_input(BenchmarkId::new("lanai_trie", count), &keys, |b, keys| {
            b.iter(|| {
                let mut trie = LanaiTrie::new();
                for (i, key) in keys.iter().enumerate() {
                    let _ = trie.insert(black_box(key), i);
                }
                trie
            });
        });

        group.bench_with_input(BenchmarkId::new("btree_map", count), &keys, |b, keys| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for (i, key) in keys.iter().enumerate() {
                    map.entry(black_box(key.clone())).or_insert(i);
                }
                map
            });
        });

        group.bench_with_input(BenchmarkId::new("hash_map", count), &keys, |b, keys| {
            b.iter(|| {
                let mut map = HashMap::new();
                for (i, key) in keys.iter().enumerate() {
                    map.entry(black_box(key.clone())).or_insert(i);
                }
                map
            });
        });
    }

    group.finish();
}

/// Benchmark random lookups, half of which miss
fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));
    group.sample_size(100);
    group.throughput(Throughput::Elements(LOOKUPS as u64));

    let mut rng = StdRng::seed_from_u64(SEED);
    for count in KEY_COUNTS {
        let keys = generate_keys(count, &mut rng);
        let queries = generate_queries(&keys, &mut rng);

        let trie: LanaiTrie<usize> = keys.iter().enumerate().map(|(i, k)| (k, i)).collect();
        let btree: BTreeMap<String, usize> =
            keys.iter().enumerate().map(|(i, k)| (k.clone(), i)).collect();
        let hash: HashMap<String, usize> =
            keys.iter().enumerate().map(|(i, k)| (k.clone(), i)).collect();

        group.bench_with_input(BenchmarkId::new("lanai_trie", count), &queries, |b, queries| {
            b.iter(|| {
                queries
                    .iter()
                    .filter(|q| trie.get(black_box(q.as_str())).is_some())
                    .count()
            });
        });

        group.bench_with_input(BenchmarkId::new("btree_map", count), &queries, |b, queries| {
            b.iter(|| {
                queries
                    .iter()
                    .filter(|q| btree.get(black_box(q.as_str())).is_some())
                    .count()
            });
        });

        group.bench_with_input(BenchmarkId::new("hash_map", count), &queries, |b, queries| {
            b.iter(|| {
                queries
                    .iter()
                    .filter(|q| hash.get(black_box(q.as_str())).is_some())
                    .count()
            });
        });
    }

    group.finish();
}

/// Benchmark ordered iteration and erase
fn bench_iterate_and_erase(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate_and_erase");
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));

    let mut rng = StdRng::seed_from_u64(SEED);
    let keys = generate_keys(5_000, &mut rng);
    let trie: LanaiTrie<usize> = keys.iter().enumerate().map(|(i, k)| (k, i)).collect();
    group.throughput(Throughput::Elements(keys.len() as u64));

    group.bench_function("iterate", |b| {
        b.iter(|| trie.iter().map(|(k, v)| k.len() + v).sum::<usize>());
    });

    group.bench_function("erase_all", |b| {
        b.iter_batched(
            || trie.clone(),
            |mut trie| {
                for key in &keys {
                    black_box(trie.erase(key));
                }
                trie
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// Group all benchmarks together
criterion_group! {
    name = benches;
    config = Criterion::default()
        .with_measurement(WallTime)
        .significance_level(0.01)
        .noise_threshold(0.02)
        .confidence_level(0.99);
    targets = bench_load, bench_lookup, bench_iterate_and_erase
}

criterion_main!(benches);
