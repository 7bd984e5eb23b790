//! Injectable randomness.
//!
//! Every random decision in the game (word selection, guess correctness,
//! candidate picks, confidence jitter, guess delays) goes through
//! [`RandomSource`], so a session seeded with [`GameRng::new`] replays the
//! exact same game.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A source of uniform random numbers.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        let index = (self.next_unit() * len as f64) as usize;
        index.min(len.saturating_sub(1))
    }

    /// Uniform value in `[low, high)`.
    fn next_in_range(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_unit() * (high - low)
    }
}

/// Deterministic RNG backed by ChaCha8.
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

    /// Create an RNG from a fresh random seed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn next_unit(&mut self) -> f64 {
        self.inner.r#gen::<f64>()
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}
