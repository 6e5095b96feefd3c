//! Seedable random source for level generation
//!
//! Same seed, same level. All randomness in the simulation flows through
//! here so tests can pin a seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Seeded uniform random stream
#[derive(Debug, Clone)]
pub struct LevelRng {
    seed: u64,
    inner: Pcg32,
}

impl LevelRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this stream was created from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform float in [min, max). Returns `min` for an empty range.
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.inner.random_range(min..max)
    }

    /// Uniform integer in [min, max). Returns `min` for an empty range.
    pub fn range_u32(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.inner.random_range(min..max)
    }
}
