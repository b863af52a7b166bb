use ahash::AHashMap;
use bytemap_rs::ByteMap;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;
use std::collections::HashMap;

fn test_keys(size: usize) -> Vec<[u8; 8]> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..size).map(|_| rng.gen::<u64>().to_ne_bytes()).collect()
}

fn bench_insert_get_remove_bytemap(c: &mut Criterion) {
    c.bench_function("bytemap_insert_get_remove", |b| {
        b.iter(|| {
            let mut m = ByteMap::with_capacity(8192);
            for i in 0..50_000u64 {
                m.insert(&i.to_ne_bytes(), i).unwrap();
            }
            for i in 0..50_000u64 {
                let _ = m.get(&i.to_ne_bytes());
            }
            for i in 0..50_000u64 {
                let _ = m.remove(&i.to_ne_bytes());
            }
            black_box(m.len())
        })
    });
}

fn bench_insert_get_remove_hashmap(c: &mut Criterion) {
    c.bench_function("hashmap_insert_get_remove", |b| {
        b.iter(|| {
            let mut m = HashMap::<Vec<u8>, u64>::with_capacity(8192);
            for i in 0..50_000u64 {
                m.insert(i.to_ne_bytes().to_vec(), i);
            }
            for i in 0..50_000u64 {
                let _ = m.get(i.to_ne_bytes().as_slice());
            }
            for i in 0..50_000u64 {
                let _ = m.remove(i.to_ne_bytes().as_slice());
            }
            black_box(m.len())
        })
    });
}

fn bench_insert_get_remove_ahashmap(c: &mut Criterion) {
    c.bench_function("ahashmap_insert_get_remove", |b| {
        b.iter(|| {
            let mut m = AHashMap::<Vec<u8>, u64>::with_capacity(8192);
            for i in 0..50_000u64 {
                m.insert(i.to_ne_bytes().to_vec(), i);
            }
            for i in 0..50_000u64 {
                let _ = m.get(i.to_ne_bytes().as_slice());
            }
            for i in 0..50_000u64 {
                let _ = m.remove(i.to_ne_bytes().as_slice());
            }
            black_box(m.len())
        })
    });
}

fn bench_read_prefilled(c: &mut Criterion) {
    let keys = test_keys(10_000);

    let mut bytemap = ByteMap::new();
    for (i, key) in keys.iter().enumerate() {
        bytemap.insert(key, i as u64).unwrap();
    }

    let mut hashmap = HashMap::<Vec<u8>, u64>::new();
    for (i, key) in keys.iter().enumerate() {
        hashmap.insert(key.to_vec(), i as u64);
    }

    c.bench_function("bytemap_read", |b| {
        b.iter(|| {
            for key in &keys {
                black_box(bytemap.get(key));
            }
        })
    });

    c.bench_function("hashmap_read", |b| {
        b.iter(|| {
            for key in &keys {
                black_box(hashmap.get(key.as_slice()));
            }
        })
    });
}

fn bench_growth_from_default(c: &mut Criterion) {
    // Starts at 16 buckets so the doubling rehash path dominates.
    c.bench_function("bytemap_growth", |b| {
        b.iter(|| {
            let mut m = ByteMap::with_capacity(16);
            for i in 0..100_000u64 {
                m.insert(&i.to_ne_bytes(), i).unwrap();
            }
            black_box(m.capacity())
        })
    });
}

fn bench_string_keys(c: &mut Criterion) {
    let keys: Vec<String> = (0..10_000).map(|i| format!("key_{i}")).collect();

    c.bench_function("bytemap_string_keys", |b| {
        b.iter(|| {
            let mut m = ByteMap::with_capacity(16);
            for key in &keys {
                m.insert(key.as_bytes(), "value").unwrap();
            }
            black_box(m.len())
        })
    });

    c.bench_function("hashmap_string_keys", |b| {
        b.iter(|| {
            let mut m = HashMap::<&str, &str>::new();
            for key in &keys {
                m.insert(key, "value");
            }
            black_box(m.len())
        })
    });
}

fn bench_mixed_ops(c: &mut Criterion) {
    let keys = test_keys(50_000);

    c.bench_function("bytemap_mixed", |b| {
        b.iter(|| {
            let mut m = ByteMap::new();
            for (i, key) in keys.iter().enumerate() {
                match i % 3 {
                    0 => {
                        m.insert(key, i as u64).unwrap();
                    }
                    1 => {
                        black_box(m.get(key));
                    }
                    _ => {
                        black_box(m.remove(key));
                    }
                }
            }
            black_box(m.len())
        })
    });
}

criterion_group!(
    benches,
    bench_insert_get_remove_bytemap,
    bench_insert_get_remove_hashmap,
    bench_insert_get_remove_ahashmap,
    bench_read_prefilled,
    bench_growth_from_default,
    bench_string_keys,
    bench_mixed_ops
);
criterion_main!(benches);
