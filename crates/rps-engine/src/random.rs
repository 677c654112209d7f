//! Seeded pseudo-random number generator
//!
//! Picks the bot's moves. Wraps ChaCha8 so a session is reproducible from
//! its seed alone.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::moves::Move;

/// Seeded random number generator
///
/// Deterministic: same seed = same sequence of bot moves
#[derive(Clone, Debug)]
pub struct SeededRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Draw a fresh seed from the thread RNG.
    ///
    /// The seed stays readable through [`SeededRng::seed`] so the session
    /// can be replayed.
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.inner.gen_range(0..max)
    }

    /// Uniform choice among the three moves, independent of anything played before.
    pub fn next_move(&mut self) -> Move {
        Move::ALL[self.next_range(Move::ALL.len() as u32) as usize]
    }
}
