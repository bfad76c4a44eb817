//! Benchmarks for sidebar building.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use serde_json::{Value, json};
use sidenav_tree::{BuildOptions, Descriptor, Sidebars, ValidationMode};

/// Create a sidebar with nested categories of the given depth and breadth.
fn create_sidebar(depth: usize, breadth: usize) -> Value {
    fn create_level(prefix: &str, current_depth: usize, max_depth: usize, breadth: usize) -> Vec<Value> {
        (0..breadth)
            .map(|i| {
                let id = format!("{prefix}-{i}");
                if current_depth == max_depth {
                    return json!(id);
                }
                json!({
                    "type": "category",
                    "label": format!("Section {id}"),
                    "link": {"type": "generated-index", "slug": format!("/category/{id}")},
                    "items": create_level(&id, current_depth + 1, max_depth, breadth),
                })
            })
            .collect()
    }

    Value::Array(create_level("doc", 0, depth, breadth))
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for (depth, breadth) in [(2, 5), (3, 4), (4, 4)] {
        let descriptor: Descriptor = [("docs", create_sidebar(depth, breadth))].into_iter().collect();

        group.bench_with_input(
            BenchmarkId::new("fail_fast", format!("d{depth}_b{breadth}")),
            &descriptor,
            |b, descriptor| b.iter(|| Sidebars::build(descriptor, &BuildOptions::default())),
        );

        let collect_all = BuildOptions {
            mode: ValidationMode::CollectAll,
            ..BuildOptions::default()
        };
        group.bench_with_input(
            BenchmarkId::new("collect_all", format!("d{depth}_b{breadth}")),
            &descriptor,
            |b, descriptor| b.iter(|| Sidebars::build(descriptor, &collect_all)),
        );
    }

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let descriptor: Descriptor = [("docs", create_sidebar(3, 5))].into_iter().collect();
    let sidebars = Sidebars::build(&descriptor, &BuildOptions::default()).unwrap();

    let mut group = c.benchmark_group("queries");

    group.bench_function("doc_ids", |b| b.iter(|| sidebars.doc_ids()));
    group.bench_function("stats", |b| b.iter(|| sidebars.stats()));
    group.bench_function("serialize_json", |b| {
        b.iter(|| serde_json::to_string(&sidebars).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_queries);
criterion_main!(benches);
