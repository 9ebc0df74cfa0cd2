//! Cache Replacement Policies.
//!
//! Implements the algorithms for selecting victim lines in set-associative caches.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used, tracked with per-line recency counters.
//! - `Random`: Uniform random selection from an owned, seedable RNG.

/// Least Recently Used replacement policy.
pub mod lru;

/// Random replacement policy.
pub mod random;

pub use lru::LruPolicy;
pub use random::RandomPolicy;

use super::set::CacheSet;
use crate::config::ReplacementPolicy as PolicyType;

/// Trait for cache replacement policies.
///
/// Recency state lives in the lines of the set, so a policy is handed the set
/// it acts on rather than a set index.
pub trait ReplacementPolicy: Send {
    /// Updates the policy state when a way is accessed.
    ///
    /// Called on every access: with the matching way on a hit and with the
    /// freshly filled way on a miss.
    ///
    /// # Arguments
    ///
    /// * `set` - The set that was accessed.
    /// * `way` - The way index within the set that was accessed.
    fn update(&mut self, set: &mut CacheSet, way: usize);

    /// Selects a victim way to evict from a full set.
    ///
    /// # Arguments
    ///
    /// * `set` - The set that missed.
    ///
    /// # Returns
    ///
    /// The index of the way to evict, below `set.ways()`.
    /// The model installs the new block there without rechecking, so an
    /// out-of-range way panics.
    fn get_victim(&mut self, set: &CacheSet) -> usize;
}

/// Builds the boxed policy named by a configuration entry.
///
/// `seed` only affects [`RandomPolicy`]; without one it is seeded from OS entropy.
pub fn build(policy: PolicyType, seed: Option<u64>) -> Box<dyn ReplacementPolicy> {
    match policy {
        PolicyType::Lru => Box::new(LruPolicy::new()),
        PolicyType::Random => match seed {
            Some(seed) => Box::new(RandomPolicy::with_seed(seed)),
            None => Box::new(RandomPolicy::new()),
        },
    }
}
