//! trueno-bfs: deterministic parallel breadth-first traversal
//!
//! # Overview
//!
//! trueno-bfs explores graphs with billions of nodes breadth-first on a fixed
//! pool of worker threads, with custom early-exit conditions and per-edge cost
//! aggregation. The output order is reproducible: it does not depend on how
//! many workers ran or how the frontier was chunked.
//!
//! # Quick Start
//!
//! ```
//! use trueno_bfs::{Bfs, BfsConfig, CsrGraph, NodeId, OneHop, Step};
//!
//! // 0 → 1 → 3, 0 → 2 → 3
//! let edges = vec![
//!     (NodeId(0), NodeId(1)),
//!     (NodeId(0), NodeId(2)),
//!     (NodeId(1), NodeId(3)),
//!     (NodeId(2), NodeId(3)),
//! ];
//! let graph = CsrGraph::from_edge_list(&edges)?;
//!
//! // Stop once node 3 is reached
//! let exit = |_: NodeId, node: NodeId, _: f64| {
//!     if node == NodeId(3) { Step::Break } else { Step::Follow }
//! };
//! let config = BfsConfig::default().with_concurrency(4);
//!
//! let result = Bfs::new(&graph, NodeId(0), &exit, &OneHop, config).compute()?;
//! assert_eq!(result.nodes().last(), Some(&NodeId(3)));
//! assert_eq!(result.predecessors()[3], Some(NodeId(1))); // lowest frontier index wins
//! assert_eq!(result.costs()[3], 2.0);
//! # Ok::<(), trueno_bfs::Error>(())
//! ```
//!
//! # Architecture
//!
//! - **Storage**: forward CSR adjacency behind the [`AdjacencyView`] trait
//! - **Concurrency**: atomic visited bitset and discovery arbiter, rayon worker pool
//! - **Traversal**: chunked parallel expansion, sequential merge in chunk order
//! - **Conditions**: exit predicates and aggregators as closures or trait objects

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod algorithms;
pub mod concurrent;
pub mod storage;

// Re-export core types
pub use algorithms::traversal::{
    bfs, traverse, Aggregator, AlwaysRunning, Bfs, BfsConfig, BfsParameters, CancellationToken,
    ConfigError, ExitAndAggregation, ExitPredicate, FollowAll, MaxDepth, NoAggregation,
    NoProgress, OneHop, ProgressCounter, ProgressTracker, Step, TargetNodes, TerminationFlag,
    TraversalResult, DEFAULT_DELTA,
};
pub use storage::{AdjacencyView, CsrGraph, NodeId};

// Error type
pub use anyhow::{Error, Result};
