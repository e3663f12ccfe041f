//! Criterion benchmarks for parallel BFS
//!
//! Tracks:
//! - Scaling with worker count on a fixed graph
//! - Sensitivity to chunk size (delta)
//! - Early exit cost versus full traversal

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use trueno_bfs::{traverse, Bfs, BfsConfig, CsrGraph, FollowAll, NodeId, OneHop, Step};

/// Generate scale-free graph (Barabási-Albert model approximation)
fn generate_scale_free_graph(num_nodes: usize, edges_per_node: usize) -> CsrGraph {
    let mut edges = Vec::new();
    let mut rng_state = 12345_u64; // Simple LCG for reproducibility

    for node in 0..num_nodes {
        for _ in 0..edges_per_node {
            rng_state = rng_state.wrapping_mul(1103515245).wrapping_add(12345);
            let target = (rng_state % num_nodes as u64) as u32;

            if target != node as u32 {
                edges.push((NodeId(node as u32), NodeId(target)));
            }
        }
    }

    CsrGraph::with_node_count(num_nodes, &edges).unwrap()
}

/// Benchmark: full traversal at increasing worker counts
fn bench_concurrency(c: &mut Criterion) {
    let mut group = c.benchmark_group("bfs_concurrency");
    let graph = generate_scale_free_graph(100_000, 4);

    for concurrency in [1, 2, 4, 8].iter() {
        group.bench_with_input(
            BenchmarkId::new("scale_free_100k", concurrency),
            concurrency,
            |b, &concurrency| {
                b.iter(|| {
                    let nodes =
                        traverse(black_box(&graph), NodeId(0), &FollowAll, &OneHop, concurrency, 64)
                            .unwrap();
                    black_box(nodes);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark: chunk size at fixed concurrency
fn bench_delta(c: &mut Criterion) {
    let mut group = c.benchmark_group("bfs_delta");
    let graph = generate_scale_free_graph(100_000, 4);

    for delta in [1, 16, 64, 512, 4096].iter() {
        group.bench_with_input(BenchmarkId::new("scale_free_100k", delta), delta, |b, &delta| {
            b.iter(|| {
                let nodes =
                    traverse(black_box(&graph), NodeId(0), &FollowAll, &OneHop, 4, delta).unwrap();
                black_box(nodes);
            });
        });
    }

    group.finish();
}

/// Benchmark: stop at a target versus exploring everything
fn bench_early_exit(c: &mut Criterion) {
    let mut group = c.benchmark_group("bfs_early_exit");
    let graph = generate_scale_free_graph(50_000, 4);
    let config = BfsConfig::default().with_concurrency(4);

    group.bench_function("full", |b| {
        b.iter(|| {
            let result = Bfs::new(black_box(&graph), NodeId(0), &FollowAll, &OneHop, config)
                .compute()
                .unwrap();
            black_box(result);
        });
    });

    let stop = |_: NodeId, node: NodeId, _: f64| {
        if node == NodeId(25_000) {
            Step::Break
        } else {
            Step::Follow
        }
    };
    group.bench_function("target", |b| {
        b.iter(|| {
            let result = Bfs::new(black_box(&graph), NodeId(0), &stop, &OneHop, config)
                .compute()
                .unwrap();
            black_box(result);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_concurrency, bench_delta, bench_early_exit);
criterion_main!(benches);
