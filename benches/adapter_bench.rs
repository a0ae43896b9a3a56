//! Benchmarks for devstore adapter operations
//!
//! Runs against the in-memory backend so the numbers reflect adapter
//! overhead (queueing, completion channels), not disk speed.

use criterion::{criterion_group, criterion_main, Criterion};
use devstore::{DeviceStorage, MemBackend, NamePattern, Overwrite, StorageArea};

fn adapter_benchmarks(c: &mut Criterion) {
    c.bench_function("save_overwrite", |b| {
        let store = DeviceStorage::new(MemBackend::new(), StorageArea::Sdcard);
        b.iter(|| {
            store
                .save("payload", "bench.txt", Overwrite::Always)
                .wait()
                .unwrap()
        });
    });

    c.bench_function("open", |b| {
        let store = DeviceStorage::new(MemBackend::new(), StorageArea::Sdcard);
        store
            .save("payload", "bench.txt", Overwrite::Always)
            .wait()
            .unwrap();
        b.iter(|| store.open_file("bench.txt").wait().unwrap());
    });

    c.bench_function("list_100", |b| {
        let store = DeviceStorage::new(MemBackend::new(), StorageArea::Sdcard);
        for i in 0..100 {
            store
                .save("x", format!("file_{i:03}.txt"), Overwrite::Never)
                .wait()
                .unwrap();
        }
        b.iter(|| store.list("", NamePattern::Any).wait().unwrap());
    });
}

criterion_group!(benches, adapter_benchmarks);
criterion_main!(benches);
