//! Trace-driven set-associative cache simulator library.
//!
//! This crate replays a stream of 32-bit byte addresses against one or more
//! cache organizations and reports hits per organization:
//! 1. **Cache:** Geometry and address decoding, sets of lines, LRU and Random replacement.
//! 2. **Simulation:** Trace reading and a runner that drives every model over the same stream.
//! 3. **Configuration:** Serde-backed cache descriptions with the classic defaults.
//! 4. **Statistics:** Per-model hit counts and the printable run report.

/// Common types (addresses, errors).
pub mod common;
/// Simulator configuration (defaults, replacement policy selection, per-cache settings).
pub mod config;
/// Cache model (geometry, sets, replacement policies).
pub mod cache;
/// Trace reader and simulation runner.
pub mod sim;
/// Hit/miss statistics and report formatting.
pub mod stats;

/// A single simulated cache; construct with `CacheModel::from_config`.
pub use crate::cache::{AccessOutcome, CacheModel};
/// Root configuration type; use `SimConfig::default()` or load from JSON.
pub use crate::config::SimConfig;
/// Drives every configured model over one address stream.
pub use crate::sim::SimulationRunner;
