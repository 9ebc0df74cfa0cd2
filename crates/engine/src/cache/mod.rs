//! Set-Associative Cache Model.
//!
//! This module implements a configurable set-associative cache model. A model
//! owns exactly the sets its geometry calls for, classifies each access as a
//! hit or a miss, and keeps hit and access counters. Direct-mapped and fully
//! associative caches are the one-way and one-set corner cases of the same
//! code path.

/// Cache geometry and address decoding.
pub mod geometry;
/// Cache replacement policy implementations (LRU, Random).
pub mod policies;
/// Cache lines and sets.
pub mod set;

use std::fmt;

use tracing::{debug, trace};

use self::geometry::CacheGeometry;
use self::policies::ReplacementPolicy;
use self::set::CacheSet;
use crate::common::addr::Addr;
use crate::common::error::ConfigError;
use crate::config::CacheConfig;
use crate::stats::CacheStats;

/// Result of a single cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The block was resident.
    Hit,
    /// The block was installed, possibly evicting another.
    Miss,
}

impl AccessOutcome {
    /// True for [`AccessOutcome::Hit`].
    #[inline]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }

    /// True for [`AccessOutcome::Miss`].
    #[inline]
    pub const fn is_miss(self) -> bool {
        matches!(self, Self::Miss)
    }
}

/// A single simulated cache: geometry, sets, replacement policy, and counters.
pub struct CacheModel {
    name: String,
    geometry: CacheGeometry,
    sets: Vec<CacheSet>,
    policy: Box<dyn ReplacementPolicy>,
    hits: u64,
    accesses: u64,
}

impl CacheModel {
    /// Creates a cache model with every line invalid.
    ///
    /// # Arguments
    ///
    /// * `name` - Label used in reports.
    /// * `geometry` - Validated cache shape.
    /// * `policy` - Replacement policy consulted when a set is full.
    pub fn new(
        name: impl Into<String>,
        geometry: CacheGeometry,
        policy: Box<dyn ReplacementPolicy>,
    ) -> Self {
        let name = name.into();
        debug!(
            cache = %name,
            size_bytes = geometry.size_bytes(),
            block_bytes = geometry.block_bytes(),
            ways = geometry.associativity(),
            sets = geometry.num_sets(),
            "building cache model"
        );
        Self {
            sets: (0..geometry.num_sets())
                .map(|_| CacheSet::new(geometry.associativity()))
                .collect(),
            name,
            geometry,
            policy,
            hits: 0,
            accesses: 0,
        }
    }

    /// Creates a cache model from a configuration entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCache`] if the geometry is rejected.
    pub fn from_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        let geometry = config.geometry()?;
        debug!(cache = %config.name, policy = %config.policy, seed = ?config.seed, "replacement policy");
        Ok(Self::new(
            config.name.clone(),
            geometry,
            policies::build(config.policy, config.seed),
        ))
    }

    /// Accesses the cache at `addr`.
    ///
    /// On a hit the replacement policy is told which way was used. On a miss
    /// the lowest invalid way is filled if there is one; otherwise the policy
    /// picks the victim. Both outcomes count as an access.
    pub fn access(&mut self, addr: u32) -> AccessOutcome {
        let decoded = self.geometry.decode(addr);
        let set = &mut self.sets[decoded.set_index];
        self.accesses += 1;

        if let Some(way) = set.find(decoded.tag) {
            self.policy.update(set, way);
            self.hits += 1;
            trace!(
                cache = %self.name,
                addr = %Addr::new(addr),
                set = decoded.set_index,
                tag = decoded.tag,
                way,
                "hit"
            );
            return AccessOutcome::Hit;
        }

        let victim = match set.first_invalid() {
            Some(way) => way,
            None => self.policy.get_victim(set),
        };
        debug_assert!(
            victim < set.ways(),
            "policy chose way {victim} of a {}-way set",
            set.ways()
        );
        set.fill(victim, decoded.tag);
        self.policy.update(set, victim);
        trace!(
            cache = %self.name,
            addr = %Addr::new(addr),
            set = decoded.set_index,
            tag = decoded.tag,
            victim,
            "miss"
        );
        AccessOutcome::Miss
    }

    /// Checks if the block holding `addr` is resident without touching any state.
    pub fn contains(&self, addr: u32) -> bool {
        let decoded = self.geometry.decode(addr);
        self.sets[decoded.set_index].find(decoded.tag).is_some()
    }

    /// Label used in reports.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shape of this cache.
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// All sets, indexed by set index.
    pub fn sets(&self) -> &[CacheSet] {
        &self.sets
    }

    /// Number of hits so far.
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of misses so far.
    pub const fn misses(&self) -> u64 {
        self.accesses - self.hits
    }

    /// Number of accesses so far.
    pub const fn accesses(&self) -> u64 {
        self.accesses
    }

    /// Fraction of accesses that hit, or 0 before the first access.
    pub fn hit_rate(&self) -> f64 {
        self.stats().hit_rate()
    }

    /// Snapshot of the counters for reporting.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            name: self.name.clone(),
            hits: self.hits,
            accesses: self.accesses,
        }
    }
}

impl fmt::Debug for CacheModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheModel")
            .field("name", &self.name)
            .field("geometry", &self.geometry)
            .field("hits", &self.hits)
            .field("accesses", &self.accesses)
            .finish_non_exhaustive()
    }
}
