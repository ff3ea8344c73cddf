//! Resolver and dry-run micro-benchmarks
//!
//! Measures layer resolution for growing column style maps and a full
//! dry-run draw for growing bodies.

use autotable::sample::{self, SampleData};
use autotable::{Document, DryRunEngine, GlobalDefaults, TableOptions, resolve};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use serde_json::{Map, Value, json};

/// A layer with `count` column styles and a few scalar options.
fn layer_with_columns(count: usize, fill: u8) -> TableOptions {
    let column_styles: Map<String, Value> = (0..count)
        .map(|i| (format!("col{}", i), json!({"fontSize": 8 + i % 4, "fillColor": fill})))
        .collect();
    TableOptions::from_json(&json!({
        "theme": "grid",
        "startY": 20,
        "styles": {"overflow": "linebreak", "cellPadding": 1.5},
        "headStyles": {"fillColor": [fill, 89, 182]},
        "columnStyles": column_styles
    }))
    .expect("bench layer should parse")
}

fn benchmark_resolve_layers(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_layers");

    for column_count in [1, 10, 100] {
        let global = layer_with_columns(column_count, 10);
        let document = layer_with_columns(column_count, 120);
        let call = layer_with_columns(column_count / 2, 240);

        group.bench_with_input(
            BenchmarkId::new("column_styles", column_count),
            &column_count,
            |b, _| {
                b.iter(|| {
                    resolve(Some(&global), Some(&document), Some(&call))
                        .expect("Failed to resolve layers")
                });
            },
        );
    }

    group.finish();
}

fn benchmark_dry_run_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("dry_run_tables");
    let global = GlobalDefaults::new();

    for row_count in [10, 100, 1000] {
        let body = SampleData::new(42).body_rows(row_count);

        group.bench_with_input(BenchmarkId::new("rows", row_count), &row_count, |b, _| {
            b.iter(|| {
                let mut doc = Document::new();
                let mut engine = DryRunEngine::new();
                let call = TableOptions::new()
                    .head(sample::head_rows())
                    .body(body.clone());
                doc.auto_table(&global, call, &mut engine)
                    .expect("Failed to draw table")
                    .page_count
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_resolve_layers, benchmark_dry_run_tables);
criterion_main!(benches);
