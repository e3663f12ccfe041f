//! Fixed-size atomic bitset
//!
//! One bit per index, packed into `AtomicU64` words. Sized once at creation.

use std::sync::atomic::{AtomicU64, Ordering};

const WORD_BITS: usize = 64;

/// Concurrently readable and settable bitset
///
/// Bits are only ever set, never cleared, which is all a traversal needs.
#[derive(Debug)]
pub struct AtomicBitSet {
    words: Vec<AtomicU64>,
    len: usize,
}

impl AtomicBitSet {
    /// Create a bitset with `len` cleared bits
    #[must_use]
    pub fn new(len: usize) -> Self {
        let words = (0..len.div_ceil(WORD_BITS))
            .map(|_| AtomicU64::new(0))
            .collect();
        Self { words, len }
    }

    /// Number of addressable bits
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True when the bitset addresses no bits at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read bit `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[must_use]
    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.len, "bit {index} out of bounds ({})", self.len);
        let word = self.words[index / WORD_BITS].load(Ordering::Acquire);
        word & Self::mask(index) != 0
    }

    /// Set bit `index`, returning `true` if this call flipped it
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn set(&self, index: usize) -> bool {
        assert!(index < self.len, "bit {index} out of bounds ({})", self.len);
        let mask = Self::mask(index);
        let previous = self.words[index / WORD_BITS].fetch_or(mask, Ordering::AcqRel);
        previous & mask == 0
    }

    /// Count of set bits
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.words
            .iter()
            .map(|word| word.load(Ordering::Acquire).count_ones() as usize)
            .sum()
    }

    const fn mask(index: usize) -> u64 {
        1 << (index % WORD_BITS)
    }
}
