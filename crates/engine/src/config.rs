//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize a run:
//! 1. **Defaults:** The classic 32-byte cache with 4-byte blocks.
//! 2. **Structures:** One `CacheConfig` per simulated organization, collected in `SimConfig`.
//! 3. **Enums:** Replacement policy selection.
//!
//! Configuration is loaded from JSON or built with `SimConfig::default()`.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::geometry::CacheGeometry;
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default cache size in bytes.
    pub const CACHE_SIZE: usize = 32;

    /// Default block (line) size in bytes.
    pub const BLOCK_SIZE: usize = 4;

    /// Default associativity (1 way = direct-mapped).
    pub const CACHE_WAYS: usize = 1;

    /// Number of lines in the default cache.
    pub const NUM_LINES: usize = CACHE_SIZE / BLOCK_SIZE;
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which line to evict when a
/// new block must be installed in a full set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the line that was accessed least recently.
    #[default]
    #[serde(alias = "Lru", alias = "lru")]
    Lru,
    /// Random replacement policy.
    ///
    /// Evicts a uniformly chosen way of the set.
    #[serde(alias = "Random", alias = "random")]
    Random,
}

impl FromStr for ReplacementPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lru" => Ok(Self::Lru),
            "random" | "rand" => Ok(Self::Random),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lru => write!(f, "LRU"),
            Self::Random => write!(f, "RANDOM"),
        }
    }
}

/// Configuration for one simulated cache.
///
/// Sizes are in bytes. `size_bytes`, `line_bytes` and `ways` must be powers
/// of two and `ways` must divide `size_bytes / line_bytes`; this is checked
/// when the geometry is built, not when the configuration is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Label used in the report.
    pub name: String,
    /// Total cache capacity in bytes.
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,
    /// Block size in bytes.
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,
    /// Associativity (lines per set).
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,
    /// Replacement policy used once a set is full.
    #[serde(default)]
    pub policy: ReplacementPolicy,
    /// Seed for the Random policy. Unset means seed from OS entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl CacheConfig {
    /// Creates an LRU cache configuration.
    pub fn new(name: impl Into<String>, size_bytes: usize, line_bytes: usize, ways: usize) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            line_bytes,
            ways,
            policy: ReplacementPolicy::Lru,
            seed: None,
        }
    }

    /// Returns this configuration with a different replacement policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ReplacementPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns this configuration with a fixed Random policy seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates and derives the geometry described by this entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCache`] naming this entry if the shape is rejected.
    pub fn geometry(&self) -> Result<CacheGeometry, ConfigError> {
        CacheGeometry::new(self.size_bytes, self.line_bytes, self.ways).map_err(|source| {
            ConfigError::InvalidCache {
                name: self.name.clone(),
                source,
            }
        })
    }

    fn default_size() -> usize {
        defaults::CACHE_SIZE
    }

    fn default_line() -> usize {
        defaults::BLOCK_SIZE
    }

    fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(
            "Direct-mapped",
            defaults::CACHE_SIZE,
            defaults::BLOCK_SIZE,
            defaults::CACHE_WAYS,
        )
    }
}

/// Root configuration: the list of caches simulated side by side.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::SimConfig;
///
/// let config = SimConfig::default();
/// assert_eq!(config.caches.len(), 4);
/// assert_eq!(config.caches[3].ways, 8);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use cachesim_core::config::{ReplacementPolicy, SimConfig};
///
/// let json = r#"{
///     "caches": [
///         { "name": "L1 4-way", "size_bytes": 1024, "line_bytes": 16, "ways": 4 },
///         { "name": "L1 random", "size_bytes": 1024, "line_bytes": 16, "ways": 4,
///           "policy": "RANDOM", "seed": 7 }
///     ]
/// }"#;
///
/// let config = SimConfig::from_json_str(json).unwrap();
/// assert_eq!(config.caches[0].policy, ReplacementPolicy::Lru);
/// assert_eq!(config.caches[1].policy, ReplacementPolicy::Random);
/// assert_eq!(config.caches[1].seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SimConfig {
    /// Caches to simulate, reported in this order.
    pub caches: Vec<CacheConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            caches: vec![
                CacheConfig::new("Direct-mapped", defaults::CACHE_SIZE, defaults::BLOCK_SIZE, 1),
                CacheConfig::new("2-way", defaults::CACHE_SIZE, defaults::BLOCK_SIZE, 2),
                CacheConfig::new("4-way", defaults::CACHE_SIZE, defaults::BLOCK_SIZE, 4),
                CacheConfig::new(
                    "Fully associative",
                    defaults::CACHE_SIZE,
                    defaults::BLOCK_SIZE,
                    defaults::NUM_LINES,
                ),
            ],
        }
    }
}

impl SimConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or a validation error.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks that at least one cache is listed and every geometry is valid.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoCaches`] or the first [`ConfigError::InvalidCache`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.caches.is_empty() {
            return Err(ConfigError::NoCaches);
        }
        for cache in &self.caches {
            let _ = cache.geometry()?;
        }
        Ok(())
    }

    /// Overrides the replacement policy of every cache.
    #[must_use]
    pub fn with_policy(mut self, policy: ReplacementPolicy) -> Self {
        for cache in &mut self.caches {
            cache.policy = policy;
        }
        self
    }

    /// Fixes the Random policy seed of every cache.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        for cache in &mut self.caches {
            cache.seed = Some(seed);
        }
        self
    }

    /// Serializes the configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
