//! Throughput Benchmark for mvdict
//!
//! This benchmark measures the storage engine and the command handler under
//! a few representative workloads.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use mvdict::commands::CommandHandler;
use mvdict::storage::{InMemoryStorage, Storage};
use std::sync::Arc;
use std::time::Duration;

fn populated(keys: usize, members_per_key: usize) -> InMemoryStorage<String, String> {
    let storage = InMemoryStorage::new();
    for k in 0..keys {
        for m in 0..members_per_key {
            storage
                .add(format!("key:{}", k), format!("member:{}", m))
                .unwrap();
        }
    }
    storage
}

/// Benchmark ADD operations
fn bench_add(c: &mut Criterion) {
    let storage = InMemoryStorage::new();

    let mut group = c.benchmark_group("add");
    group.throughput(Throughput::Elements(1));

    group.bench_function("add_new_keys", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let _ = storage.add(format!("key:{}", i), "member".to_string());
            i += 1;
        });
    });

    group.bench_function("add_to_one_key", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let _ = storage.add("wide".to_string(), format!("member:{}", i));
            i += 1;
        });
    });

    group.bench_function("add_duplicate", |b| {
        storage.add("dup".to_string(), "member".to_string()).ok();
        b.iter(|| {
            black_box(storage.add("dup".to_string(), "member".to_string()).is_err());
        });
    });

    group.finish();
}

/// Benchmark query operations
fn bench_queries(c: &mut Criterion) {
    let storage = populated(1_000, 10);

    let mut group = c.benchmark_group("queries");

    group.bench_function("members", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("key:{}", i % 1_000);
            black_box(storage.members(&key).unwrap());
            i += 1;
        });
    });

    group.bench_function("member_exists", |b| {
        let key = "key:500".to_string();
        let member = "member:5".to_string();
        b.iter(|| {
            black_box(storage.member_exists(&key, &member).unwrap());
        });
    });

    group.bench_function("items_10k", |b| {
        b.iter(|| {
            black_box(storage.items());
        });
    });

    group.bench_function("all_members_10k", |b| {
        b.iter(|| {
            black_box(storage.all_members());
        });
    });

    group.finish();
}

/// Benchmark add/remove churn, which exercises key deletion on last removal
fn bench_churn(c: &mut Criterion) {
    let storage = InMemoryStorage::new();

    let mut group = c.benchmark_group("churn");
    group.throughput(Throughput::Elements(2));

    group.bench_function("add_then_remove_last", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("key:{}", i % 100);
            let member = format!("member:{}", i);
            storage.add(key.clone(), member.clone()).unwrap();
            storage.remove(&key, &member).unwrap();
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark full line handling (parse, dispatch, render)
fn bench_handler(c: &mut Criterion) {
    let handler = CommandHandler::new(Arc::new(populated(100, 10)));

    let mut group = c.benchmark_group("handler");
    group.throughput(Throughput::Elements(1));

    group.bench_function("members_line", |b| {
        b.iter(|| {
            black_box(handler.execute("MEMBERS key:42").unwrap());
        });
    });

    group.bench_function("items_line", |b| {
        b.iter(|| {
            black_box(handler.execute("ITEMS").unwrap());
        });
    });

    group.bench_function("unknown_line", |b| {
        b.iter(|| {
            black_box(handler.execute("SET a b").is_err());
        });
    });

    group.finish();
}

/// Benchmark concurrent access through the single dictionary lock
fn bench_concurrent(c: &mut Criterion) {
    use std::thread;

    let mut group = c.benchmark_group("concurrent");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("4_threads_add_members", |b| {
        b.iter(|| {
            let storage = Arc::new(InMemoryStorage::new());
            let handles: Vec<_> = (0..4)
                .map(|t| {
                    let storage = Arc::clone(&storage);
                    thread::spawn(move || {
                        for i in 0..10_000 {
                            let key = format!("key:{}", i % 100);
                            storage.add(key.clone(), format!("{}:{}", t, i)).unwrap();
                            black_box(storage.key_exists(&key));
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }

            black_box(storage.len());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_add,
    bench_queries,
    bench_churn,
    bench_handler,
    bench_concurrent,
);

criterion_main!(benches);
