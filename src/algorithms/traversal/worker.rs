//! Traversal worker: chunk claiming, discovery proposals, buffered flush
//!
//! Workers never write the frontier. During a round they read the synced
//! prefix and record discoveries in a private buffer; the driver later
//! replays those buffers into the frontier one chunk at a time.

use super::conditions::{Aggregator, ExitPredicate, Step};
use super::control::{ProgressTracker, TerminationFlag};
use super::frontier::Frontier;
use crate::concurrent::{AtomicBitSet, DiscoveryArbiter, TargetMarker};
use crate::storage::{AdjacencyView, NodeId};
use anyhow::Result;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Everything a worker reads or proposes to during one round
pub(crate) struct Round<'a, G, P: ?Sized, A: ?Sized, T: ?Sized, R: ?Sized> {
    pub(crate) graph: &'a G,
    pub(crate) exit: &'a P,
    pub(crate) aggregator: &'a A,
    pub(crate) termination: &'a T,
    pub(crate) progress: &'a R,
    pub(crate) frontier: &'a Frontier,
    pub(crate) visited: &'a AtomicBitSet,
    pub(crate) suppressed: &'a AtomicBitSet,
    pub(crate) arbiter: &'a DiscoveryArbiter,
    pub(crate) target: &'a TargetMarker,
    /// Next unclaimed frontier index
    pub(crate) cursor: &'a AtomicUsize,
    /// Synced frontier length; chunks never reach past it
    pub(crate) end: usize,
    pub(crate) delta: usize,
}

#[derive(Debug, Clone, Copy)]
struct Discovery {
    node: NodeId,
    discovered_at: usize,
    cost: f64,
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Discovered(Discovery),
    ChunkEnd,
}

#[derive(Debug, Default)]
pub(crate) struct BfsWorker {
    buffer: Vec<Slot>,
    /// Start offsets of claimed chunks not yet flushed, ascending
    chunks: VecDeque<usize>,
    read_cursor: usize,
    failure: Option<anyhow::Error>,
    /// Saw the termination flag down during the last round
    interrupted: bool,
}

impl BfsWorker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Claim and process chunks until the round's range is exhausted
    pub(crate) fn run<G, P, A, T, R>(&mut self, round: &Round<'_, G, P, A, T, R>)
    where
        G: AdjacencyView,
        P: ExitPredicate + ?Sized,
        A: Aggregator + ?Sized,
        T: TerminationFlag + ?Sized,
        R: ProgressTracker + ?Sized,
    {
        self.buffer.clear();
        self.chunks.clear();
        self.read_cursor = 0;
        self.interrupted = false;
        self.failure = self.claim_chunks(round).err();
    }

    pub(crate) fn take_failure(&mut self) -> Option<anyhow::Error> {
        self.failure.take()
    }

    /// True if the last round stopped early on the termination flag
    pub(crate) fn interrupted(&self) -> bool {
        self.interrupted
    }

    /// Start offset of the oldest unflushed chunk
    pub(crate) fn next_chunk(&self) -> Option<usize> {
        self.chunks.front().copied()
    }

    /// Replay the oldest unflushed chunk into `frontier`
    ///
    /// Must only run while no round is in flight. Returns the number of
    /// entries appended.
    pub(crate) fn flush_next_chunk(
        &mut self,
        frontier: &mut Frontier,
        visited: &AtomicBitSet,
    ) -> usize {
        if self.chunks.pop_front().is_none() {
            return 0;
        }

        let mut appended = 0;
        while self.read_cursor < self.buffer.len() {
            let slot = self.buffer[self.read_cursor];
            self.read_cursor += 1;
            match slot {
                Slot::ChunkEnd => break,
                Slot::Discovered(found) => {
                    // First flushed chunk wins; later proposals are stale
                    if visited.set(found.node.index()) {
                        frontier.push(found.node, found.discovered_at, found.cost);
                        appended += 1;
                    }
                }
            }
        }
        appended
    }

    fn claim_chunks<G, P, A, T, R>(&mut self, round: &Round<'_, G, P, A, T, R>) -> Result<()>
    where
        G: AdjacencyView,
        P: ExitPredicate + ?Sized,
        A: Aggregator + ?Sized,
        T: TerminationFlag + ?Sized,
        R: ProgressTracker + ?Sized,
    {
        // Unclaimed chunks all start past any recorded target index
        while !round.target.is_set() {
            if !round.termination.running() {
                self.interrupted = true;
                break;
            }
            let offset = round.cursor.fetch_add(round.delta, Ordering::AcqRel);
            if offset >= round.end {
                break;
            }
            let chunk_end = offset.saturating_add(round.delta).min(round.end);

            self.chunks.push_back(offset);
            let outcome = self.process_chunk(round, offset, chunk_end);
            self.buffer.push(Slot::ChunkEnd);
            outcome?;

            round.progress.log_progress(chunk_end - offset);
        }
        Ok(())
    }

    fn process_chunk<G, P, A, T, R>(
        &mut self,
        round: &Round<'_, G, P, A, T, R>,
        start: usize,
        end: usize,
    ) -> Result<()>
    where
        G: AdjacencyView,
        P: ExitPredicate + ?Sized,
        A: Aggregator + ?Sized,
        T: TerminationFlag + ?Sized,
        R: ProgressTracker + ?Sized,
    {
        let buffer = &mut self.buffer;

        for index in start..end {
            let node = round.frontier.node(index);
            let cost = round.frontier.cost(index);
            let source = round.frontier.predecessor(index).unwrap_or(node);

            match round.exit.test(source, node, cost)? {
                Step::Follow => {}
                Step::Continue => {
                    round.suppressed.set(index);
                    continue;
                }
                Step::Break => {
                    round.target.record(index);
                    return Ok(());
                }
            }

            let mut failure = None;
            let mut stopped = false;
            round.graph.for_each_outgoing(node, |target| {
                if !round.termination.running() {
                    stopped = true;
                    return false;
                }
                if round.visited.get(target.index()) {
                    return true;
                }
                if round.arbiter.propose(target.index(), index) {
                    match round.aggregator.apply(node, target, cost) {
                        Ok(next_cost) => buffer.push(Slot::Discovered(Discovery {
                            node: target,
                            discovered_at: index,
                            cost: next_cost,
                        })),
                        Err(err) => {
                            failure = Some(err);
                            return false;
                        }
                    }
                }
                true
            })?;

            if let Some(err) = failure {
                return Err(err);
            }
            if stopped || !round.termination.running() {
                self.interrupted = true;
                break;
            }
        }
        Ok(())
    }
}
