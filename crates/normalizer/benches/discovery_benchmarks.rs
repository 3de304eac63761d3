//! Dependency discovery and decomposition benchmarks.
//!
//! Discovery is quadratic in columns and linear in rows, so both axes are
//! measured separately.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use normalizer::dependency::{FdDiscovery, minimal_cover};
use normalizer::profile::ColumnProfiler;
use normalizer::synthesis::synthesize;
use normalizer::{DataTable, Dependency, NormalizationConfig, Normalizer, TargetForm};
use std::io::Write;
use tempfile::NamedTempFile;

/// Generate an order-lines table with customer and product attributes
/// repeated on every line.
fn generate_orders(rows: usize) -> DataTable {
    let headers = [
        "line_id",
        "order_id",
        "customer_id",
        "customer_name",
        "customer_city",
        "product_id",
        "product_name",
        "unit_price",
        "quantity",
    ];
    let cities = ["Lisbon", "Oslo", "Quito", "Perth", "Accra"];

    let data = (0..rows)
        .map(|row| {
            let order = row / 3;
            let customer = order % 97;
            let product = (row * 7) % 41;
            vec![
                row.to_string(),
                order.to_string(),
                customer.to_string(),
                format!("Customer {}", customer),
                cities[customer % cities.len()].to_string(),
                product.to_string(),
                format!("Product {}", product),
                format!("{}.{:02}", 5 + product, product % 100),
                (1 + row % 9).to_string(),
            ]
        })
        .collect();

    DataTable::new(headers.iter().map(|s| s.to_string()).collect(), data, b',')
}

/// Generate a table with `columns` columns, each a coarser bucket of the id.
fn generate_wide(rows: usize, columns: usize) -> DataTable {
    let headers = (0..columns).map(|c| format!("col_{}", c)).collect();
    let data = (0..rows)
        .map(|row| (0..columns).map(|c| (row / (c + 1)).to_string()).collect())
        .collect();
    DataTable::new(headers, data, b',')
}

fn to_csv(table: &DataTable) -> String {
    let mut out = table.headers.join(",");
    out.push('\n');
    for row in &table.rows {
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// Benchmark discovery as rows grow.
fn bench_discovery_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("discovery_rows");

    for rows in [100, 1_000, 10_000].iter() {
        let table = generate_orders(*rows);
        let profiles = ColumnProfiler::new().profile_table(&table);

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("orders", rows), &table, |b, table| {
            b.iter(|| black_box(FdDiscovery::new().discover(table, &profiles)))
        });
    }

    group.finish();
}

/// Benchmark discovery as columns grow.
fn bench_discovery_columns(c: &mut Criterion) {
    let mut group = c.benchmark_group("discovery_columns");

    for columns in [4, 8, 16].iter() {
        let table = generate_wide(1_000, *columns);
        let profiles = ColumnProfiler::new().profile_table(&table);

        group.bench_with_input(BenchmarkId::new("wide", columns), &table, |b, table| {
            b.iter(|| black_box(FdDiscovery::new().discover(table, &profiles)))
        });
    }

    group.finish();
}

/// Benchmark cover and synthesis on a long dependency chain.
fn bench_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesis");

    let columns: Vec<String> = (0..24).map(|i| format!("a{}", i)).collect();
    // a0 → a1 → … → a23 plus every shortcut a0 → ai.
    let mut fds = Vec::new();
    for i in 1..columns.len() {
        fds.push(Dependency::new([columns[i - 1].as_str()], columns[i].as_str()).unwrap());
        fds.push(Dependency::new([columns[0].as_str()], columns[i].as_str()).unwrap());
    }

    group.bench_function("minimal_cover_chain", |b| b.iter(|| black_box(minimal_cover(&fds))));
    group.bench_function("3nf_chain", |b| {
        b.iter(|| black_box(synthesize(TargetForm::ThirdNormalForm, &columns, &fds, &[])))
    });
    group.bench_function("bcnf_chain", |b| {
        b.iter(|| black_box(synthesize(TargetForm::BoyceCodd, &columns, &fds, &[])))
    });

    group.finish();
}

/// Benchmark the file pipeline: analyze then normalize.
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);

    let data = to_csv(&generate_orders(5_000));
    let mut temp = NamedTempFile::with_suffix(".csv").unwrap();
    temp.write_all(data.as_bytes()).unwrap();
    let path = temp.path().to_path_buf();

    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("analyze_5k_rows", |b| {
        b.iter(|| black_box(Normalizer::new().analyze(&path).unwrap()))
    });

    let normalizer = Normalizer::new();
    let config = NormalizationConfig::from(&normalizer.analyze(&path).unwrap());
    group.bench_function("normalize_5k_rows", |b| {
        b.iter_with_setup(
            || tempfile::tempdir().unwrap(),
            |out| {
                black_box(
                    normalizer
                        .normalize(&path, &config, TargetForm::ThirdNormalForm, out.path())
                        .unwrap(),
                )
            },
        )
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_discovery_rows,
    bench_discovery_columns,
    bench_synthesis,
    bench_pipeline,
);
criterion_main!(benches);
