//! Round driver: parallel dispatch, sequential merge
//!
//! Each round runs every worker over the synced frontier on a fixed-size
//! pool, joins, then folds the workers' buffers into the frontier in
//! ascending chunk order. Discovery races are settled by the arbiter during
//! dispatch and by merge order afterwards, so the output does not depend on
//! thread timing, worker count, or chunk size.

use super::conditions::{Aggregator, ExitAndAggregation, ExitPredicate};
use super::config::{BfsConfig, BfsParameters, ConfigError};
use super::control::{AlwaysRunning, NoProgress, ProgressTracker, TerminationFlag};
use super::frontier::Frontier;
use super::worker::{BfsWorker, Round};
use crate::concurrent::{AtomicBitSet, DiscoveryArbiter, TargetMarker};
use crate::storage::{AdjacencyView, NodeId};
use anyhow::Result;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::atomic::AtomicUsize;
use tracing::{debug, debug_span, trace};

/// Ordered outcome of a traversal
///
/// Entries are in discovery order with suppressed entries removed and, if a
/// target was hit, everything after it cut off.
#[derive(Debug, Clone, PartialEq)]
pub struct TraversalResult {
    nodes: Vec<NodeId>,
    costs: Vec<f64>,
    predecessors: Vec<Option<NodeId>>,
    target_found: Option<NodeId>,
    rounds: usize,
    cancelled: bool,
}

impl TraversalResult {
    /// Visited nodes in traversal order
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Accumulated cost per node, parallel to [`TraversalResult::nodes`]
    #[must_use]
    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    /// Node each entry was discovered from (`None` for the start node)
    #[must_use]
    pub fn predecessors(&self) -> &[Option<NodeId>] {
        &self.predecessors
    }

    /// Node at which the exit predicate returned [`Step::Break`](super::Step::Break)
    #[must_use]
    pub const fn target_found(&self) -> Option<NodeId> {
        self.target_found
    }

    /// Dispatch/merge rounds executed
    #[must_use]
    pub const fn rounds(&self) -> usize {
        self.rounds
    }

    /// True if the termination flag stopped the traversal
    #[must_use]
    pub const fn cancelled(&self) -> bool {
        self.cancelled
    }

    /// Number of nodes in the result
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no node was retained (start node suppressed)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop everything but the node order
    #[must_use]
    pub fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }
}

/// Per-traversal shared arrays, sized to the node count
struct TraversalState {
    frontier: Frontier,
    visited: AtomicBitSet,
    suppressed: AtomicBitSet,
    arbiter: DiscoveryArbiter,
    target: TargetMarker,
}

impl TraversalState {
    fn new(source: NodeId, node_count: usize) -> Self {
        let visited = AtomicBitSet::new(node_count);
        visited.set(source.index());
        Self {
            frontier: Frontier::with_source(source, node_count),
            visited,
            suppressed: AtomicBitSet::new(node_count),
            arbiter: DiscoveryArbiter::new(node_count),
            target: TargetMarker::new(),
        }
    }

    /// Fold every worker's buffered chunks into the frontier, lowest chunk first
    fn merge(&mut self, workers: &mut [BfsWorker]) -> usize {
        let mut pending: BinaryHeap<Reverse<(usize, usize)>> = workers
            .iter()
            .enumerate()
            .filter_map(|(id, worker)| worker.next_chunk().map(|offset| Reverse((offset, id))))
            .collect();

        let mut appended = 0;
        while let Some(Reverse((_, id))) = pending.pop() {
            let worker = &mut workers[id];
            appended += worker.flush_next_chunk(&mut self.frontier, &self.visited);
            if let Some(offset) = worker.next_chunk() {
                pending.push(Reverse((offset, id)));
            }
        }
        appended
    }

    /// Consume the arrays into the caller-facing result
    fn into_result(self, rounds: usize, cancelled: bool) -> TraversalResult {
        let len = self
            .target
            .get()
            .map_or(self.frontier.len(), |index| index + 1);

        let retained: Vec<usize> = self.frontier.retained(len, &self.suppressed).collect();
        TraversalResult {
            nodes: retained.iter().map(|&i| self.frontier.node(i)).collect(),
            costs: retained.iter().map(|&i| self.frontier.cost(i)).collect(),
            predecessors: retained
                .iter()
                .map(|&i| self.frontier.predecessor(i))
                .collect(),
            target_found: self.target.get().map(|index| self.frontier.node(index)),
            rounds,
            cancelled,
        }
    }
}

/// Parallel breadth-first traversal
///
/// One instance runs one traversal: [`Bfs::compute`] consumes it.
///
/// # Example
///
/// ```
/// use trueno_bfs::{Bfs, BfsConfig, CsrGraph, FollowAll, NodeId, OneHop};
///
/// let edges = vec![
///     (NodeId(0), NodeId(1)),
///     (NodeId(1), NodeId(2)),
///     (NodeId(2), NodeId(3)),
/// ];
/// let graph = CsrGraph::from_edge_list(&edges).unwrap();
/// let config = BfsConfig::default().with_concurrency(2).with_delta(1);
///
/// let result = Bfs::new(&graph, NodeId(0), &FollowAll, &OneHop, config)
///     .compute()
///     .unwrap();
/// assert_eq!(result.nodes(), &[NodeId(0), NodeId(1), NodeId(2), NodeId(3)]);
/// assert_eq!(result.costs(), &[0.0, 1.0, 2.0, 3.0]);
/// ```
pub struct Bfs<'a, G, P: ?Sized, A: ?Sized, T: ?Sized = AlwaysRunning, R: ?Sized = NoProgress> {
    graph: &'a G,
    source: NodeId,
    exit: &'a P,
    aggregator: &'a A,
    termination: &'a T,
    progress: &'a R,
    config: BfsConfig,
}

impl<'a, G, P, A> Bfs<'a, G, P, A>
where
    G: AdjacencyView,
    P: ExitPredicate + ?Sized,
    A: Aggregator + ?Sized,
{
    /// Traversal from `source` that never stops early and reports no progress
    #[must_use]
    pub fn new(graph: &'a G, source: NodeId, exit: &'a P, aggregator: &'a A, config: BfsConfig) -> Self {
        Self {
            graph,
            source,
            exit,
            aggregator,
            termination: &AlwaysRunning,
            progress: &NoProgress,
            config,
        }
    }
}

impl<'a, G, P, A, T, R> Bfs<'a, G, P, A, T, R>
where
    G: AdjacencyView,
    P: ExitPredicate + ?Sized,
    A: Aggregator + ?Sized,
    T: TerminationFlag + ?Sized,
    R: ProgressTracker + ?Sized,
{
    /// Builder: poll `termination` for cooperative cancellation
    #[must_use]
    pub fn termination<T2>(self, termination: &'a T2) -> Bfs<'a, G, P, A, T2, R>
    where
        T2: TerminationFlag + ?Sized,
    {
        Bfs {
            graph: self.graph,
            source: self.source,
            exit: self.exit,
            aggregator: self.aggregator,
            termination,
            progress: self.progress,
            config: self.config,
        }
    }

    /// Builder: report processed entries to `progress`
    #[must_use]
    pub fn progress<R2>(self, progress: &'a R2) -> Bfs<'a, G, P, A, T, R2>
    where
        R2: ProgressTracker + ?Sized,
    {
        Bfs {
            graph: self.graph,
            source: self.source,
            exit: self.exit,
            aggregator: self.aggregator,
            termination: self.termination,
            progress,
            config: self.config,
        }
    }

    /// Run the traversal to completion, target, or cancellation
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] before any work if the configuration or the
    /// start node is invalid, or the first error raised by the exit
    /// predicate, the aggregator, or edge iteration.
    pub fn compute(self) -> Result<TraversalResult> {
        let node_count = self.graph.node_count();
        self.config.validate_for(self.source, node_count)?;
        let BfsConfig { concurrency, delta } = self.config;
        // One chunk can never span more than the whole frontier
        let delta = delta.min(node_count);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(concurrency)
            .thread_name(|i| format!("bfs-worker-{i}"))
            .build()
            .map_err(ConfigError::from)?;

        let span = debug_span!("bfs", source = self.source.0, node_count, concurrency, delta);
        let _guard = span.enter();

        let mut state = TraversalState::new(self.source, node_count);
        let mut workers: Vec<BfsWorker> = (0..concurrency).map(|_| BfsWorker::new()).collect();
        let mut processed = 0;
        let mut rounds = 0;
        let mut cancelled = false;

        loop {
            if !self.termination.running() {
                cancelled = true;
                break;
            }
            let synced = state.frontier.len();
            let cursor = AtomicUsize::new(processed);
            let round = Round {
                graph: self.graph,
                exit: self.exit,
                aggregator: self.aggregator,
                termination: self.termination,
                progress: self.progress,
                frontier: &state.frontier,
                visited: &state.visited,
                suppressed: &state.suppressed,
                arbiter: &state.arbiter,
                target: &state.target,
                cursor: &cursor,
                end: synced,
                delta,
            };

            pool.scope(|scope| {
                for worker in &mut workers {
                    let round = &round;
                    scope.spawn(move |_| worker.run(round));
                }
            });
            rounds += 1;

            if let Some(err) = workers.iter_mut().find_map(BfsWorker::take_failure) {
                return Err(err);
            }
            cancelled = workers.iter().any(BfsWorker::interrupted);
            if state.target.is_set() {
                break;
            }

            let appended = state.merge(&mut workers);
            processed = synced;
            trace!(round = rounds, synced, appended, "round merged");

            // Partial chunks of an interrupted round are merged, then we stop
            if appended == 0 || cancelled {
                break;
            }
        }

        let visited = state.visited.count_ones();
        let result = state.into_result(rounds, cancelled);
        debug!(
            rounds,
            visited,
            found = ?result.target_found(),
            cancelled,
            "traversal finished"
        );
        Ok(result)
    }
}

/// Traverse from `start` and return the visited nodes in order
///
/// # Errors
///
/// See [`Bfs::compute`].
///
/// # Example
///
/// ```
/// use trueno_bfs::{traverse, CsrGraph, NodeId, Step};
///
/// let graph = CsrGraph::from_edge_list(&[(NodeId(0), NodeId(1)), (NodeId(1), NodeId(2))]).unwrap();
/// let follow = |_: NodeId, _: NodeId, _: f64| Step::Follow;
/// let hops = |_: NodeId, _: NodeId, cost: f64| cost + 1.0;
///
/// let nodes = traverse(&graph, NodeId(0), &follow, &hops, 4, 64).unwrap();
/// assert_eq!(nodes, vec![NodeId(0), NodeId(1), NodeId(2)]);
/// ```
pub fn traverse<G, P, A>(
    graph: &G,
    start: NodeId,
    exit: &P,
    aggregator: &A,
    concurrency: usize,
    delta: usize,
) -> Result<Vec<NodeId>>
where
    G: AdjacencyView,
    P: ExitPredicate + ?Sized,
    A: Aggregator + ?Sized,
{
    let config = BfsConfig { concurrency, delta };
    Bfs::new(graph, start, exit, aggregator, config)
        .compute()
        .map(TraversalResult::into_nodes)
}

/// Breadth-first search with optional target nodes and depth limit
///
/// # Errors
///
/// See [`Bfs::compute`].
///
/// # Example
///
/// ```
/// use trueno_bfs::{bfs, BfsParameters, CsrGraph, NodeId};
///
/// let edges = vec![(NodeId(0), NodeId(1)), (NodeId(1), NodeId(2)), (NodeId(2), NodeId(3))];
/// let graph = CsrGraph::from_edge_list(&edges).unwrap();
///
/// let result = bfs(&graph, &BfsParameters::new(NodeId(0)).max_depth(2)).unwrap();
/// assert_eq!(result.nodes(), &[NodeId(0), NodeId(1), NodeId(2)]);
/// ```
pub fn bfs<G: AdjacencyView>(graph: &G, params: &BfsParameters) -> Result<TraversalResult> {
    let pair = ExitAndAggregation::from_parameters(&params.target_nodes, params.max_depth);
    Bfs::new(graph, params.source, &*pair.exit, &*pair.aggregator, params.config).compute()
}
