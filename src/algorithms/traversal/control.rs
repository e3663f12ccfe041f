//! Cooperative cancellation and progress reporting

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Polled by workers between edges; never blocks
pub trait TerminationFlag: Sync {
    /// `false` once the traversal should wind down
    fn running(&self) -> bool;
}

/// Never stops
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysRunning;

impl TerminationFlag for AlwaysRunning {
    fn running(&self) -> bool {
        true
    }
}

/// Cloneable cancellation handle
///
/// Clones share state: cancelling any clone stops every traversal polling
/// another clone.
///
/// # Example
///
/// ```
/// use trueno_bfs::{CancellationToken, TerminationFlag};
///
/// let token = CancellationToken::new();
/// let handle = token.clone();
/// assert!(token.running());
///
/// handle.cancel();
/// assert!(!token.running());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a running token
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every holder to stop
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// True once [`CancellationToken::cancel`] was called on any clone
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl TerminationFlag for CancellationToken {
    fn running(&self) -> bool {
        !self.is_cancelled()
    }
}

/// Receives processed-entry counts, once per worker per chunk
pub trait ProgressTracker: Sync {
    /// Fire and forget
    fn log_progress(&self, processed: usize);
}

/// Discards progress
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressTracker for NoProgress {
    fn log_progress(&self, _: usize) {}
}

/// Running total of processed frontier entries
#[derive(Debug, Default)]
pub struct ProgressCounter(AtomicUsize);

impl ProgressCounter {
    /// Create a zeroed counter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries reported so far
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}

impl ProgressTracker for ProgressCounter {
    fn log_progress(&self, processed: usize) {
        self.0.fetch_add(processed, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_shared_between_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(clone.running());

        token.cancel();
        assert!(clone.is_cancelled());
        assert!(!clone.running());
    }

    #[test]
    fn test_progress_counter_accumulates() {
        let counter = ProgressCounter::new();
        counter.log_progress(3);
        counter.log_progress(4);
        assert_eq!(counter.total(), 7);
    }
}
