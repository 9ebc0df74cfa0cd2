//! Random Replacement Policy.
//!
//! This policy evicts a uniformly chosen way of the set, ignoring validity and
//! recency. The generator is owned by the policy and seeded once, at
//! construction: from OS entropy by default, from a fixed seed for
//! reproducible runs, or supplied directly so tests can script the choices.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::ReplacementPolicy;
use crate::cache::set::CacheSet;

/// Random Policy state.
#[derive(Debug)]
pub struct RandomPolicy<R = ChaCha8Rng> {
    rng: R,
}

impl RandomPolicy<ChaCha8Rng> {
    /// Creates a policy seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Creates a policy with a fixed seed; the same seed replays the same victims.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPolicy<ChaCha8Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> RandomPolicy<R> {
    /// Creates a policy drawing from the given generator.
    pub const fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore + Send> ReplacementPolicy for RandomPolicy<R> {
    /// Access patterns do not affect random replacement, so this is a no-op.
    fn update(&mut self, _set: &mut CacheSet, _way: usize) {}

    fn get_victim(&mut self, set: &CacheSet) -> usize {
        self.rng.gen_range(0..set.ways())
    }
}
