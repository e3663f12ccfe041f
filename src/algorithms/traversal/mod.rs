//! Deterministic parallel breadth-first traversal
//!
//! Workers expand chunks of the frontier concurrently and only *propose*
//! discoveries; the driver commits them sequentially in chunk order. The
//! resulting order equals a sequential queue-based BFS whenever every node is
//! followed, for any worker count and chunk size.

mod bfs;
pub mod conditions;
pub mod config;
pub mod control;
mod frontier;
mod worker;

pub use bfs::{bfs, traverse, Bfs, TraversalResult};
pub use conditions::{
    Aggregator, ExitAndAggregation, ExitPredicate, FollowAll, MaxDepth, NoAggregation, OneHop,
    Step, TargetNodes,
};
pub use config::{BfsConfig, BfsParameters, ConfigError, DEFAULT_DELTA};
pub use control::{
    AlwaysRunning, CancellationToken, NoProgress, ProgressCounter, ProgressTracker,
    TerminationFlag,
};
