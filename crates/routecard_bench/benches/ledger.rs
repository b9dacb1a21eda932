//! Ledger benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use routecard_bench::{bench_date, populate, record_for};
use routecard_core::{ClusterMonth, InMemoryStore, Ledger, SqliteStore};
use tempfile::TempDir;

fn sqlite_ledger() -> Ledger<SqliteStore> {
    Ledger::new(SqliteStore::open_in_memory().unwrap())
}

/// Benchmark allocation against a month that already holds `n` cards.
fn bench_allocate_next(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocate_next");

    for count in [0u16, 100, 900].iter() {
        group.bench_with_input(BenchmarkId::new("memory", count), count, |b, &count| {
            let mut ledger = Ledger::new(InMemoryStore::new());
            populate(&mut ledger, count);

            b.iter(|| {
                let number = ledger.allocate_next(black_box(bench_date())).unwrap();
                black_box(number);
            });
        });

        group.bench_with_input(BenchmarkId::new("sqlite", count), count, |b, &count| {
            let mut ledger = sqlite_ledger();
            populate(&mut ledger, count);

            b.iter(|| {
                let number = ledger.allocate_next(black_box(bench_date())).unwrap();
                black_box(number);
            });
        });
    }

    group.finish();
}

/// Benchmark allocate-then-save, the path every recorded form takes.
fn bench_allocate_and_save(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocate_and_save");

    group.bench_function("memory", |b| {
        b.iter_batched(
            || Ledger::new(InMemoryStore::new()),
            |mut ledger| {
                let number = ledger.allocate_next(bench_date()).unwrap();
                black_box(ledger.save(&record_for(number)).unwrap());
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("sqlite", |b| {
        b.iter_batched(
            sqlite_ledger,
            |mut ledger| {
                let number = ledger.allocate_next(bench_date()).unwrap();
                black_box(ledger.save(&record_for(number)).unwrap());
            },
            BatchSize::SmallInput,
        );
    });

    // File saves hit the disk on every commit
    group.sample_size(20);
    group.bench_function("sqlite_file", |b| {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bench.db");
        let mut ledger = Ledger::new(SqliteStore::open(&path).unwrap());

        b.iter(|| {
            let number = match ledger.allocate_next(bench_date()) {
                Ok(number) => number,
                Err(_) => {
                    // Month exhausted: start over on a fresh file.
                    std::fs::remove_file(&path).unwrap();
                    ledger = Ledger::new(SqliteStore::open(&path).unwrap());
                    ledger.allocate_next(bench_date()).unwrap()
                }
            };
            black_box(ledger.save(&record_for(number)).unwrap());
        });
    });

    group.finish();
}

/// Benchmark listing a populated month.
fn bench_list_month(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_month");
    let month = ClusterMonth::from_date(bench_date());

    for count in [10u16, 500].iter() {
        group.bench_with_input(BenchmarkId::new("sqlite", count), count, |b, &count| {
            let mut ledger = sqlite_ledger();
            populate(&mut ledger, count);

            b.iter(|| {
                let cards = ledger.list_month(black_box(month)).unwrap();
                black_box(cards);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_allocate_next,
    bench_allocate_and_save,
    bench_list_month,
);

criterion_main!(benches);
