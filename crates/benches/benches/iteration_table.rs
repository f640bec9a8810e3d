use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use optreport_core::problem::ShapeHints;
use optreport_core::stats::ExecutionStats;
use optreport_benches::{random_row, COLUMN_NAMES, COLUMN_TYPES};
use optreport_table::{log_header, log_row, Columns, TableOptions};
use rand::{rngs::SmallRng, SeedableRng};

fn table_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration_table");
    let mut rng = SmallRng::seed_from_u64(42);

    group.bench_function("log_header", |b| {
        let options = TableOptions::default();
        b.iter(|| log_header(&COLUMN_NAMES, &COLUMN_TYPES, &options).unwrap());
    });

    group.bench_function("log_row", |b| {
        let mut iter = 0;
        b.iter_batched(
            || {
                iter += 1;
                random_row(iter, &mut rng)
            },
            |row| log_row(&row, 2).unwrap(),
            BatchSize::SmallInput,
        );
    });

    let columns = COLUMN_NAMES
        .iter()
        .zip(COLUMN_TYPES)
        .fold(Columns::standard(), |columns, (name, ty)| columns.column(*name, ty));
    group.bench_function("checked_row", |b| {
        let row = random_row(7, &mut SmallRng::seed_from_u64(7));
        b.iter(|| columns.row(&row).unwrap());
    });
    group.finish();
}

fn stats_benchmark(c: &mut Criterion) {
    c.bench_function("stats_publish_and_reset", |b| {
        let mut stats = ExecutionStats::<f64>::new("unknown", ShapeHints::new(100, 10, 100)).unwrap();
        let x = vec![1.0; 100];
        b.iter(|| {
            stats.set_solution(x.clone());
            stats.set_objective(1.0);
            stats.set_residuals(0.0, 1e-8);
            stats.set_iter(10);
            stats.reset();
        });
    });
}

criterion_group!(benches, table_benchmark, stats_benchmark);
criterion_main!(benches);
