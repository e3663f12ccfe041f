//! Traversal configuration and its validation errors

use crate::storage::NodeId;
use thiserror::Error;

/// Default chunk size (frontier entries claimed per worker step)
pub const DEFAULT_DELTA: usize = 64;

/// Configuration rejected before any round starts
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Chunk size must be positive
    #[error("delta must be greater than 0, got {0}")]
    InvalidDelta(usize),

    /// At least one worker is required
    #[error("concurrency must be greater than 0, got {0}")]
    InvalidConcurrency(usize),

    /// Start node is not part of the graph
    #[error("start node {node} out of bounds for graph with {node_count} nodes")]
    StartNodeOutOfBounds {
        /// Requested start node id
        node: u32,
        /// Nodes in the graph
        node_count: usize,
    },

    /// The worker pool could not be created
    #[error("failed to build worker pool")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Scheduling knobs of a traversal
///
/// Neither value changes the result, only how work is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BfsConfig {
    /// Number of worker threads
    pub concurrency: usize,

    /// Frontier entries per claimed chunk
    pub delta: usize,
}

impl Default for BfsConfig {
    fn default() -> Self {
        Self {
            concurrency: num_cpus::get(),
            delta: DEFAULT_DELTA,
        }
    }
}

impl BfsConfig {
    /// Builder: set worker count
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Builder: set chunk size
    #[must_use]
    pub fn with_delta(mut self, delta: usize) -> Self {
        self.delta = delta;
        self
    }

    /// Check the knobs on their own
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDelta`] or
    /// [`ConfigError::InvalidConcurrency`] for zero values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delta == 0 {
            return Err(ConfigError::InvalidDelta(self.delta));
        }
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency(self.concurrency));
        }
        Ok(())
    }

    /// Check the knobs together with the start node
    ///
    /// # Errors
    ///
    /// Everything [`BfsConfig::validate`] rejects, plus
    /// [`ConfigError::StartNodeOutOfBounds`].
    pub fn validate_for(&self, start: NodeId, node_count: usize) -> Result<(), ConfigError> {
        self.validate()?;
        if start.index() >= node_count {
            return Err(ConfigError::StartNodeOutOfBounds {
                node: start.0,
                node_count,
            });
        }
        Ok(())
    }
}

/// Parameters of a plain BFS: where to start, when to stop, how many workers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BfsParameters {
    /// Start node
    pub source: NodeId,

    /// Stop as soon as one of these is reached (empty = explore everything)
    pub target_nodes: Vec<NodeId>,

    /// Maximum hop count from `source` (None = unlimited)
    pub max_depth: Option<u32>,

    /// Scheduling knobs
    pub config: BfsConfig,
}

impl BfsParameters {
    /// Unbounded traversal from `source` with default scheduling
    #[must_use]
    pub fn new(source: NodeId) -> Self {
        Self {
            source,
            target_nodes: Vec::new(),
            max_depth: None,
            config: BfsConfig::default(),
        }
    }

    /// Builder: set target nodes
    #[must_use]
    pub fn targets(mut self, targets: Vec<NodeId>) -> Self {
        self.target_nodes = targets;
        self
    }

    /// Builder: set max depth
    #[must_use]
    pub fn max_depth(mut self, depth: u32) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Builder: set scheduling knobs
    #[must_use]
    pub fn config(mut self, config: BfsConfig) -> Self {
        self.config = config;
        self
    }
}
