//! CSR (Compressed Sparse Row) adjacency storage
//!
//! Forward-only CSR: traversal only ever walks outgoing edges.
//!
//! # CSR Format
//!
//! ```text
//! Graph: 0 → 1, 0 → 2, 1 → 2
//!
//! CSR:
//!   row_offsets: [0, 2, 3, 3]  // Node 0: edges [0..2), Node 1: [2..3), Node 2: [3..3)
//!   col_indices: [1, 2, 2]      // Edge 0 → node 1, edge 1 → node 2, edge 2 → node 2
//! ```

use super::AdjacencyView;
use anyhow::{anyhow, Result};

/// Node identifier (zero-indexed, dense)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Position of this node in per-node arrays
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// CSR (Compressed Sparse Row) graph
///
/// Neighbor order is insertion order, which is also the order in which
/// traversals discover neighbors.
///
/// # Example
///
/// ```
/// use trueno_bfs::{CsrGraph, NodeId};
///
/// let mut graph = CsrGraph::new();
/// graph.add_edge(NodeId(0), NodeId(1)).unwrap();
/// graph.add_edge(NodeId(0), NodeId(2)).unwrap();
///
/// let neighbors = graph.outgoing_neighbors(NodeId(0)).unwrap();
/// assert_eq!(neighbors, &[1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// node i's edges are `col_indices[row_offsets[i]..row_offsets[i + 1]]`
    /// Length: `num_nodes` + 1
    row_offsets: Vec<u64>,

    /// Edge targets
    /// Length: `num_edges`
    col_indices: Vec<u32>,

    num_nodes: usize,
}

impl CsrGraph {
    /// Create new empty graph
    #[must_use]
    pub fn new() -> Self {
        Self {
            row_offsets: vec![0],
            col_indices: Vec::new(),
            num_nodes: 0,
        }
    }

    /// Create graph from edge list
    ///
    /// Node count is one past the largest id mentioned by any edge.
    ///
    /// # Errors
    ///
    /// Currently infallible; kept fallible to match [`CsrGraph::with_node_count`].
    pub fn from_edge_list(edges: &[(NodeId, NodeId)]) -> Result<Self> {
        let num_nodes = edges
            .iter()
            .flat_map(|(src, dst)| [src.index(), dst.index()])
            .max()
            .map_or(0, |max| max + 1);

        Self::with_node_count(num_nodes, edges)
    }

    /// Create graph with an explicit node count (allows isolated trailing nodes)
    ///
    /// # Errors
    ///
    /// Returns error if an edge references a node `>= num_nodes`
    pub fn with_node_count(num_nodes: usize, edges: &[(NodeId, NodeId)]) -> Result<Self> {
        // Counting sort by source keeps per-node insertion order
        let mut degrees = vec![0_u64; num_nodes];
        for (src, dst) in edges {
            if src.index() >= num_nodes || dst.index() >= num_nodes {
                return Err(anyhow!(
                    "Edge {} → {} out of bounds for {} nodes",
                    src.0,
                    dst.0,
                    num_nodes
                ));
            }
            degrees[src.index()] += 1;
        }

        let mut row_offsets = Vec::with_capacity(num_nodes + 1);
        let mut offset = 0_u64;
        row_offsets.push(offset);
        for degree in &degrees {
            offset += degree;
            row_offsets.push(offset);
        }

        let mut cursor: Vec<u64> = row_offsets[..num_nodes].to_vec();
        let mut col_indices = vec![0_u32; edges.len()];
        for (src, dst) in edges {
            let slot = &mut cursor[src.index()];
            #[allow(clippy::cast_possible_truncation)] // bounded by edges.len()
            let pos = *slot as usize;
            col_indices[pos] = dst.0;
            *slot += 1;
        }

        Ok(Self {
            row_offsets,
            col_indices,
            num_nodes,
        })
    }

    /// Add edge to graph (dynamic insertion)
    ///
    /// Note: For large graphs, use `from_edge_list` for better performance.
    ///
    /// # Errors
    ///
    /// Currently infallible; returns `Result` for parity with the bulk builders.
    pub fn add_edge(&mut self, src: NodeId, dst: NodeId) -> Result<()> {
        let max_node = src.index().max(dst.index());
        if max_node >= self.num_nodes {
            self.expand_to(max_node + 1);
        }

        let src_idx = src.index();
        #[allow(clippy::cast_possible_truncation)]
        let end = self.row_offsets[src_idx + 1] as usize;
        self.col_indices.insert(end, dst.0);

        for offset in &mut self.row_offsets[src_idx + 1..] {
            *offset += 1;
        }

        Ok(())
    }

    /// Get outgoing neighbors of a node
    ///
    /// # Errors
    ///
    /// Returns error if node ID is out of bounds
    pub fn outgoing_neighbors(&self, node: NodeId) -> Result<&[u32]> {
        if node.index() >= self.num_nodes {
            return Err(anyhow!("Node ID {} out of bounds", node.0));
        }

        let idx = node.index();
        #[allow(clippy::cast_possible_truncation)]
        let (start, end) = (
            self.row_offsets[idx] as usize,
            self.row_offsets[idx + 1] as usize,
        );

        Ok(&self.col_indices[start..end])
    }

    /// Get number of nodes
    #[must_use]
    pub const fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Get number of edges
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.col_indices.len()
    }

    fn expand_to(&mut self, new_size: usize) {
        if new_size <= self.num_nodes {
            return;
        }

        let last_offset = *self.row_offsets.last().unwrap_or(&0);
        self.row_offsets.resize(new_size + 1, last_offset);
        self.num_nodes = new_size;
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl AdjacencyView for CsrGraph {
    fn node_count(&self) -> usize {
        self.num_nodes
    }

    fn for_each_outgoing<F>(&self, node: NodeId, mut visitor: F) -> Result<()>
    where
        F: FnMut(NodeId) -> bool,
    {
        for &target in self.outgoing_neighbors(node)? {
            if !visitor(NodeId(target)) {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_graph() {
        let graph = CsrGraph::new();
        assert_eq!(graph.num_nodes(), 0);
        assert_eq!(graph.num_edges(), 0);
        assert_eq!(CsrGraph::from_edge_list(&[]).unwrap().num_nodes(), 0);
    }

    #[test]
    fn test_from_edge_list_simple() {
        let edges = vec![
            (NodeId(0), NodeId(1)),
            (NodeId(0), NodeId(2)),
            (NodeId(1), NodeId(2)),
        ];

        let graph = CsrGraph::from_edge_list(&edges).unwrap();

        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.num_edges(), 3);
        assert_eq!(graph.row_offsets, vec![0, 2, 3, 3]);
        assert_eq!(graph.col_indices, vec![1, 2, 2]);
    }

    #[test]
    fn test_neighbor_order_is_insertion_order() {
        // Sources interleaved: per-node order must survive the counting sort
        let edges = vec![
            (NodeId(1), NodeId(3)),
            (NodeId(0), NodeId(2)),
            (NodeId(1), NodeId(0)),
            (NodeId(0), NodeId(1)),
        ];
        let graph = CsrGraph::from_edge_list(&edges).unwrap();

        assert_eq!(graph.outgoing_neighbors(NodeId(0)).unwrap(), &[2, 1]);
        assert_eq!(graph.outgoing_neighbors(NodeId(1)).unwrap(), &[3, 0]);
    }

    #[test]
    fn test_with_node_count_isolated_nodes() {
        let graph = CsrGraph::with_node_count(5, &[(NodeId(0), NodeId(1))]).unwrap();
        assert_eq!(graph.num_nodes(), 5);

        let empty: &[u32] = &[];
        assert_eq!(graph.outgoing_neighbors(NodeId(4)).unwrap(), empty);
    }

    #[test]
    fn test_with_node_count_rejects_out_of_bounds() {
        let result = CsrGraph::with_node_count(2, &[(NodeId(0), NodeId(2))]);
        assert!(result.is_err());
    }

    #[test]
    fn test_outgoing_neighbors_out_of_bounds() {
        let graph = CsrGraph::from_edge_list(&[(NodeId(0), NodeId(1))]).unwrap();
        assert!(graph.outgoing_neighbors(NodeId(2)).is_err());
    }

    #[test]
    fn test_add_edge_dynamic() {
        let mut graph = CsrGraph::new();

        graph.add_edge(NodeId(0), NodeId(1)).unwrap();
        graph.add_edge(NodeId(2), NodeId(0)).unwrap();
        graph.add_edge(NodeId(0), NodeId(2)).unwrap();

        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.num_edges(), 3);
        assert_eq!(graph.outgoing_neighbors(NodeId(0)).unwrap(), &[1, 2]);
        assert_eq!(graph.outgoing_neighbors(NodeId(2)).unwrap(), &[0]);
    }

    #[test]
    fn test_for_each_outgoing_stops_when_visitor_declines() {
        let edges = vec![
            (NodeId(0), NodeId(1)),
            (NodeId(0), NodeId(2)),
            (NodeId(0), NodeId(3)),
        ];
        let graph = CsrGraph::from_edge_list(&edges).unwrap();

        let mut seen = Vec::new();
        graph
            .for_each_outgoing(NodeId(0), |target| {
                seen.push(target);
                seen.len() < 2
            })
            .unwrap();

        assert_eq!(seen, vec![NodeId(1), NodeId(2)]);
        assert_eq!(graph.node_count(), 4);
    }
}
