//! Race arbitration by atomic minimum
//!
//! Two workers may discover the same node in the same round. Each proposes
//! the frontier index it discovered the node from; the smallest index wins,
//! no matter which proposal landed first.

use std::sync::atomic::{AtomicUsize, Ordering};

const UNSET: usize = usize::MAX;

/// Per-node "earliest discovering frontier index"
///
/// Never reset between rounds: frontier indices grow from round to round and
/// a node whose cell was written is visited by the end of that round, so old
/// values never compete with new proposals.
#[derive(Debug)]
pub struct DiscoveryArbiter {
    cells: Vec<AtomicUsize>,
}

impl DiscoveryArbiter {
    /// Create an arbiter with one unset cell per node
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self {
            cells: (0..node_count).map(|_| AtomicUsize::new(UNSET)).collect(),
        }
    }

    /// Propose `frontier_index` as the discoverer of `node`
    ///
    /// Returns `true` if the proposal holds the minimum after the update.
    pub fn propose(&self, node: usize, frontier_index: usize) -> bool {
        let previous = self.cells[node].fetch_min(frontier_index, Ordering::AcqRel);
        previous >= frontier_index
    }

    /// Current winning index for `node`, if any proposal was made
    #[cfg(test)]
    pub(crate) fn winner(&self, node: usize) -> Option<usize> {
        match self.cells[node].load(Ordering::Acquire) {
            UNSET => None,
            index => Some(index),
        }
    }
}

/// Smallest frontier index at which the exit predicate asked to stop
#[derive(Debug)]
pub struct TargetMarker(AtomicUsize);

impl TargetMarker {
    /// Create an unset marker
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicUsize::new(UNSET))
    }

    /// Record `frontier_index`; the earliest index across all workers is kept
    pub fn record(&self, frontier_index: usize) {
        self.0.fetch_min(frontier_index, Ordering::AcqRel);
    }

    /// Recorded index, if any
    #[must_use]
    pub fn get(&self) -> Option<usize> {
        match self.0.load(Ordering::Acquire) {
            UNSET => None,
            index => Some(index),
        }
    }

    /// True once any index was recorded
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.get().is_some()
    }
}

impl Default for TargetMarker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_propose_keeps_minimum() {
        let arbiter = DiscoveryArbiter::new(2);
        assert_eq!(arbiter.winner(0), None);

        assert!(arbiter.propose(0, 7));
        assert!(arbiter.propose(0, 3));
        assert!(!arbiter.propose(0, 5));
        assert_eq!(arbiter.winner(0), Some(3));
        assert_eq!(arbiter.winner(1), None);
    }

    #[test]
    fn test_repeat_proposal_from_same_index_holds() {
        // Multi-edges: the same frontier entry proposes the same node twice
        let arbiter = DiscoveryArbiter::new(1);
        assert!(arbiter.propose(0, 4));
        assert!(arbiter.propose(0, 4));
    }

    #[test]
    fn test_concurrent_proposals_converge_to_minimum() {
        let arbiter = DiscoveryArbiter::new(1);
        std::thread::scope(|scope| {
            for t in 0..8 {
                let arbiter = &arbiter;
                scope.spawn(move || {
                    for i in (t..1000).step_by(8) {
                        arbiter.propose(0, 1000 - i);
                    }
                });
            }
        });
        assert_eq!(arbiter.winner(0), Some(1));
    }

    #[test]
    fn test_target_marker_earliest_wins() {
        let marker = TargetMarker::new();
        assert!(!marker.is_set());

        marker.record(12);
        marker.record(4);
        marker.record(9);
        assert_eq!(marker.get(), Some(4));
        assert!(marker.is_set());
    }
}
