//! Criterion benchmarks for upstream-core.
//!
//! ## Benchmark groups
//!
//! 1. **traversal** — Bounded walks over synthetic cyclic graphs.
//! 2. **rendering** — Tree-sheet layout at various visit counts.
//! 3. **parsing** — Override-sheet parsing at various row counts.
//!
//! ## Running
//!
//! ```sh
//! cargo bench --manifest-path crates/upstream-core/Cargo.toml
//! # Run only the traversal group:
//! cargo bench --manifest-path crates/upstream-core/Cargo.toml -- traversal
//! ```

use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use upstream_core::models::{
    CellValue, ContributionGraph, EntityRef, Provider, SheetGrid, UpstreamNode,
};
use upstream_core::params::parse::parse_overrides;
use upstream_core::report::sheet::render_tree;
use upstream_core::tree::traverse::{traverse, TraversalPolicy};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn node(key: &str, result: f64) -> UpstreamNode {
    UpstreamNode {
        provider: Some(Provider {
            id: key.to_string(),
            process: Some(EntityRef {
                id: format!("process-{key}"),
                name: format!("Process {key}"),
            }),
        }),
        result,
        direct_contribution: 0.0,
    }
}

struct MapGraph {
    children: HashMap<String, Vec<UpstreamNode>>,
}

impl ContributionGraph for MapGraph {
    fn children(&self, node: &UpstreamNode) -> Vec<UpstreamNode> {
        node.provider_key()
            .and_then(|key| self.children.get(key))
            .cloned()
            .unwrap_or_default()
    }
}

/// A graph where every node has `fanout` children, each child keyed by its
/// parent, with a recurring provider thrown in to exercise the recurrence
/// bound.
fn synthetic_graph(fanout: usize) -> (MapGraph, UpstreamNode) {
    let root = node("root", 1000.0);
    let mut children = HashMap::new();
    let mut frontier = vec!["root".to_string()];
    for _ in 0..4 {
        let mut next = Vec::new();
        for parent in &frontier {
            let kids: Vec<UpstreamNode> = (0..fanout)
                .map(|i| {
                    if i == 0 {
                        node(parent, 10.0)
                    } else {
                        node(&format!("{parent}-{i}"), 10.0)
                    }
                })
                .collect();
            for kid in &kids {
                if let Some(key) = kid.provider_key() {
                    next.push(key.to_string());
                }
            }
            children.insert(parent.clone(), kids);
        }
        frontier = next;
    }
    (MapGraph { children }, root)
}

fn override_sheet(rows: usize) -> SheetGrid {
    let mut data = vec![vec![
        Some(CellValue::from("Parameter")),
        Some(CellValue::from("Modified value")),
        Some(CellValue::from("Context")),
    ]];
    for i in 0..rows {
        data.push(vec![
            Some(CellValue::from(format!("param_{i}"))),
            Some(CellValue::from(i as f64)),
            Some(CellValue::from(if i % 3 == 0 { "global" } else { "ProcessA" })),
        ]);
    }
    SheetGrid::from_rows(data)
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");
    for fanout in [2usize, 4, 8] {
        let (graph, root) = synthetic_graph(fanout);
        let policy = TraversalPolicy::default();
        group.bench_with_input(BenchmarkId::from_parameter(fanout), &fanout, |b, _| {
            b.iter(|| traverse(black_box(&graph), black_box(&root), &policy));
        });
    }
    group.finish();
}

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    let (graph, root) = synthetic_graph(4);
    let walk = traverse(&graph, &root, &TraversalPolicy::default());
    group.bench_function("render_tree", |b| {
        b.iter(|| render_tree(black_box(&walk), "Climate change", "kg CO2 eq").unwrap());
    });
    group.finish();
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    for rows in [100usize, 1000] {
        let sheet = override_sheet(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, _| {
            b.iter(|| parse_overrides(black_box(&sheet)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_traversal, bench_rendering, bench_parsing);
criterion_main!(benches);
