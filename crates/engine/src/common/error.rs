//! Error definitions for the cache simulator.
//!
//! 1. **Geometry errors:** Rejected cache shapes, raised when a model is built.
//! 2. **Configuration errors:** Unreadable or inconsistent configuration files.
//! 3. **Trace errors:** The trace file could not be opened or read.
//! 4. **Report errors:** The finished report could not be serialized.
//!
//! Address decoding and cache accesses have no error paths; every failure
//! here happens before or around a simulation, never inside one.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid cache geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// A size or the associativity is zero or not a power of two.
    #[error("{field} must be a non-zero power of two, got {value}")]
    NotPowerOfTwo {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: usize,
    },

    /// The block does not fit in the cache.
    #[error("block size {block_bytes} exceeds cache size {size_bytes}")]
    BlockLargerThanCache {
        /// Cache size in bytes.
        size_bytes: usize,
        /// Block size in bytes.
        block_bytes: usize,
    },

    /// The associativity does not evenly divide the number of lines.
    #[error("associativity {ways} does not divide the {lines} lines of the cache")]
    WaysDoNotDivide {
        /// Requested associativity.
        ways: usize,
        /// Number of lines in the cache.
        lines: usize,
    },

    /// Offset and index bits together exceed a 32-bit address.
    #[error("{bits} offset and index bits do not fit in a 32-bit address")]
    AddressSpaceExceeded {
        /// Sum of block offset bits and set index bits.
        bits: u32,
    },
}

/// Configuration loading or validation failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config '{path}': {source}")]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration is not valid JSON for [`SimConfig`](crate::config::SimConfig).
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A replacement policy name was not recognized.
    #[error("unknown replacement policy '{0}' (expected LRU or RANDOM)")]
    UnknownPolicy(String),

    /// The configuration lists no caches.
    #[error("configuration does not describe any cache")]
    NoCaches,

    /// One cache entry has an invalid geometry.
    #[error("cache '{name}': {source}")]
    InvalidCache {
        /// Name of the offending cache.
        name: String,
        /// Geometry problem.
        #[source]
        source: GeometryError,
    },
}

/// Trace input failure.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file could not be opened.
    #[error("could not open trace '{path}': {source}")]
    Open {
        /// Path of the trace file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Reading from the trace failed part way through.
    #[error("error reading trace: {0}")]
    Read(#[from] io::Error),
}

/// Top-level failure of a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Trace could not be read.
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// The report could not be serialized.
    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}
