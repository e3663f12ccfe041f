//! Exit predicates and cost aggregators
//!
//! A traversal asks the exit predicate what to do with every frontier entry
//! it processes, and asks the aggregator for the cost of every node it
//! discovers. Plain closures work for both:
//!
//! ```
//! use trueno_bfs::{NodeId, Step, ExitPredicate, Aggregator};
//!
//! let stop_at_3 = |_: NodeId, node: NodeId, _: f64| {
//!     if node == NodeId(3) { Step::Break } else { Step::Follow }
//! };
//! assert_eq!(stop_at_3.test(NodeId(0), NodeId(3), 0.0).unwrap(), Step::Break);
//!
//! let hops = |_: NodeId, _: NodeId, cost: f64| cost + 1.0;
//! assert_eq!(hops.apply(NodeId(0), NodeId(1), 2.0).unwrap(), 3.0);
//! ```

use crate::storage::NodeId;
use anyhow::Result;
use std::collections::HashSet;

/// What a traversal does with a frontier entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Keep the entry and explore its neighbors
    Follow,
    /// Drop the entry from the result and do not explore its neighbors
    Continue,
    /// Keep the entry and end the traversal right after it
    Break,
}

/// Decides per frontier entry whether to follow, skip, or stop
pub trait ExitPredicate: Sync {
    /// `source` is the node `current` was discovered from (the start node
    /// itself for the start entry); `cost` is the accumulated cost.
    ///
    /// # Errors
    ///
    /// Any error aborts the traversal and is returned to the caller.
    fn test(&self, source: NodeId, current: NodeId, cost: f64) -> Result<Step>;
}

impl<F> ExitPredicate for F
where
    F: Fn(NodeId, NodeId, f64) -> Step + Sync,
{
    fn test(&self, source: NodeId, current: NodeId, cost: f64) -> Result<Step> {
        Ok(self(source, current, cost))
    }
}

/// Computes the cost of reaching `target` over the edge from `source`
pub trait Aggregator: Sync {
    /// # Errors
    ///
    /// Any error aborts the traversal and is returned to the caller.
    fn apply(&self, source: NodeId, target: NodeId, cost: f64) -> Result<f64>;
}

impl<F> Aggregator for F
where
    F: Fn(NodeId, NodeId, f64) -> f64 + Sync,
{
    fn apply(&self, source: NodeId, target: NodeId, cost: f64) -> Result<f64> {
        Ok(self(source, target, cost))
    }
}

/// Follows every node
#[derive(Debug, Clone, Copy, Default)]
pub struct FollowAll;

impl ExitPredicate for FollowAll {
    fn test(&self, _: NodeId, _: NodeId, _: f64) -> Result<Step> {
        Ok(Step::Follow)
    }
}

/// Breaks on the first target node reached, follows everything else
#[derive(Debug, Clone, Default)]
pub struct TargetNodes {
    targets: HashSet<NodeId>,
}

impl TargetNodes {
    /// Stop at any of `targets`
    pub fn new(targets: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            targets: targets.into_iter().collect(),
        }
    }
}

impl ExitPredicate for TargetNodes {
    fn test(&self, _: NodeId, current: NodeId, _: f64) -> Result<Step> {
        Ok(if self.targets.contains(&current) {
            Step::Break
        } else {
            Step::Follow
        })
    }
}

/// Suppresses entries whose cost exceeds `max_depth`, delegates otherwise
///
/// Pair with [`OneHop`] so that cost counts hops.
#[derive(Debug, Clone)]
pub struct MaxDepth<P> {
    max_depth: f64,
    inner: P,
}

impl<P> MaxDepth<P> {
    /// Wrap `inner` with a depth limit
    pub fn new(max_depth: u32, inner: P) -> Self {
        Self {
            max_depth: f64::from(max_depth),
            inner,
        }
    }
}

impl<P: ExitPredicate> ExitPredicate for MaxDepth<P> {
    fn test(&self, source: NodeId, current: NodeId, cost: f64) -> Result<Step> {
        if cost > self.max_depth {
            return Ok(Step::Continue);
        }
        self.inner.test(source, current, cost)
    }
}

/// Every node costs 0
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAggregation;

impl Aggregator for NoAggregation {
    fn apply(&self, _: NodeId, _: NodeId, _: f64) -> Result<f64> {
        Ok(0.0)
    }
}

/// Each edge adds 1, so cost is the hop count
#[derive(Debug, Clone, Copy, Default)]
pub struct OneHop;

impl Aggregator for OneHop {
    fn apply(&self, _: NodeId, _: NodeId, cost: f64) -> Result<f64> {
        Ok(cost + 1.0)
    }
}

/// Predicate/aggregator pair built from BFS parameters
pub struct ExitAndAggregation {
    /// Exit predicate to run with
    pub exit: Box<dyn ExitPredicate + Send>,
    /// Aggregator to run with
    pub aggregator: Box<dyn Aggregator + Send>,
}

impl ExitAndAggregation {
    /// Compose target-node and depth limits
    ///
    /// - no targets → [`FollowAll`], otherwise [`TargetNodes`]
    /// - no depth → [`NoAggregation`], otherwise [`MaxDepth`] + [`OneHop`]
    #[must_use]
    pub fn from_parameters(target_nodes: &[NodeId], max_depth: Option<u32>) -> Self {
        let targets = || TargetNodes::new(target_nodes.iter().copied());

        match (target_nodes.is_empty(), max_depth) {
            (true, None) => Self {
                exit: Box::new(FollowAll),
                aggregator: Box::new(NoAggregation),
            },
            (false, None) => Self {
                exit: Box::new(targets()),
                aggregator: Box::new(NoAggregation),
            },
            (true, Some(depth)) => Self {
                exit: Box::new(MaxDepth::new(depth, FollowAll)),
                aggregator: Box::new(OneHop),
            },
            (false, Some(depth)) => Self {
                exit: Box::new(MaxDepth::new(depth, targets())),
                aggregator: Box::new(OneHop),
            },
        }
    }
}

impl std::fmt::Debug for ExitAndAggregation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExitAndAggregation").finish_non_exhaustive()
    }
}
