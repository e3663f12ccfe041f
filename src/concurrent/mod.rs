//! Lock-free shared arrays used by traversal workers

pub mod arbiter;
pub mod bitset;

pub use arbiter::{DiscoveryArbiter, TargetMarker};
pub use bitset::AtomicBitSet;
