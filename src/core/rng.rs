//! Deterministic random number generation for deck building and shuffles.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Per-match streams**: `for_match(i)` derives the stream for match `i`
//!   of a batch from the batch seed alone, so matches can run on any worker
//!   thread in any order and still reproduce exactly
//!
//! ```
//! use deckforge::core::GameRng;
//!
//! let batch = GameRng::new(42);
//! let mut m0 = batch.for_match(0);
//! let mut m0_again = GameRng::new(42).for_match(0);
//! assert_eq!(m0.gen_range_usize(0..100), m0_again.gen_range_usize(0..100));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const STREAM_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic RNG backed by ChaCha8.
///
/// Never shared between concurrently running matches: each match owns the
/// stream derived for its index.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive the independent stream for match `index` of a batch.
    ///
    /// Depends only on the seed, not on how much of this stream was consumed.
    #[must_use]
    pub fn for_match(&self, index: u64) -> Self {
        let mixed = self.seed ^ index.wrapping_add(1).wrapping_mul(STREAM_STEP);
        Self::new(mixed.rotate_left(17).wrapping_mul(STREAM_STEP))
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}
