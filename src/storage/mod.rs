//! Graph storage layer
//!
//! Provides CSR (Compressed Sparse Row) adjacency and the read-only view
//! traversals run against.

pub mod csr;

pub use csr::{CsrGraph, NodeId};

use anyhow::Result;

/// Read-only adjacency access used by traversals
///
/// Iteration goes through `&self` and keeps no cursor state in the graph,
/// so every worker thread iterates independently of the others.
pub trait AdjacencyView: Sync {
    /// Number of nodes; ids are `0..node_count()`
    fn node_count(&self) -> usize;

    /// Visit outgoing edge targets of `node` in storage order
    ///
    /// The visitor returns `false` to stop early.
    ///
    /// # Errors
    ///
    /// Returns error if `node` is unknown to the graph or the underlying
    /// storage fails.
    fn for_each_outgoing<F>(&self, node: NodeId, visitor: F) -> Result<()>
    where
        F: FnMut(NodeId) -> bool;
}
