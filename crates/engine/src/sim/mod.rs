//! Trace input and the simulation runner.
//!
//! 1. **Trace:** Lazily reads hexadecimal addresses from a file or any buffered reader.
//! 2. **Runner:** Feeds every address to every configured cache and collects the report.

/// Drives cache models over an address stream.
pub mod runner;
/// Hexadecimal address trace reader.
pub mod trace;

pub use runner::SimulationRunner;
pub use trace::TraceReader;
