//! Graph algorithms
//!
//! Frontier-based traversal in the style of Ligra (Shun & Blelloch, `PPoPP` 2013),
//! with a sequential commit step that makes the parallel result deterministic.

pub mod traversal;

pub use traversal::{bfs, traverse, Bfs, TraversalResult};
