//! Append-only frontier in discovery order
//!
//! Struct-of-arrays layout: node ids, predecessor frontier indices and
//! accumulated costs live in parallel vectors indexed by frontier position.

use crate::concurrent::AtomicBitSet;
use crate::storage::NodeId;

/// Predecessor index of the start entry
pub(crate) const NO_PREDECESSOR: usize = usize::MAX;

#[derive(Debug)]
pub(crate) struct Frontier {
    nodes: Vec<NodeId>,
    predecessors: Vec<usize>,
    costs: Vec<f64>,
}

impl Frontier {
    /// Frontier holding only `source` at cost 0, with room for `capacity` entries
    pub(crate) fn with_source(source: NodeId, capacity: usize) -> Self {
        let mut frontier = Self {
            nodes: Vec::with_capacity(capacity),
            predecessors: Vec::with_capacity(capacity),
            costs: Vec::with_capacity(capacity),
        };
        frontier.push(source, NO_PREDECESSOR, 0.0);
        frontier
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn push(&mut self, node: NodeId, predecessor: usize, cost: f64) {
        self.nodes.push(node);
        self.predecessors.push(predecessor);
        self.costs.push(cost);
    }

    pub(crate) fn node(&self, index: usize) -> NodeId {
        self.nodes[index]
    }

    pub(crate) fn cost(&self, index: usize) -> f64 {
        self.costs[index]
    }

    /// Node the entry at `index` was discovered from; `None` for the start entry
    pub(crate) fn predecessor(&self, index: usize) -> Option<NodeId> {
        match self.predecessors[index] {
            NO_PREDECESSOR => None,
            pred => Some(self.nodes[pred]),
        }
    }

    /// Entries `[0, len)` that are not suppressed, in frontier order
    pub(crate) fn retained<'a>(
        &'a self,
        len: usize,
        suppressed: &'a AtomicBitSet,
    ) -> impl Iterator<Item = usize> + 'a {
        let suppressed_len = suppressed.len();
        (0..len.min(self.len()))
            .filter(move |&index| index >= suppressed_len || !suppressed.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_entry() {
        let frontier = Frontier::with_source(NodeId(4), 8);
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.node(0), NodeId(4));
        assert_eq!(frontier.cost(0), 0.0);
        assert_eq!(frontier.predecessor(0), None);
    }

    #[test]
    fn test_predecessor_resolves_through_index() {
        let mut frontier = Frontier::with_source(NodeId(0), 4);
        frontier.push(NodeId(7), 0, 1.0);
        frontier.push(NodeId(3), 1, 2.0);

        assert_eq!(frontier.predecessor(1), Some(NodeId(0)));
        assert_eq!(frontier.predecessor(2), Some(NodeId(7)));
        assert_eq!(frontier.cost(2), 2.0);
    }

    #[test]
    fn test_retained_skips_suppressed_and_truncates() {
        let mut frontier = Frontier::with_source(NodeId(0), 4);
        frontier.push(NodeId(1), 0, 1.0);
        frontier.push(NodeId(2), 0, 1.0);
        frontier.push(NodeId(3), 1, 2.0);

        let suppressed = AtomicBitSet::new(4);
        suppressed.set(1);

        let all: Vec<_> = frontier.retained(4, &suppressed).collect();
        assert_eq!(all, vec![0, 2, 3]);

        let truncated: Vec<_> = frontier.retained(3, &suppressed).collect();
        assert_eq!(truncated, vec![0, 2]);
    }
}
