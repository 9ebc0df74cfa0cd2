//! Common utilities and types used throughout the cache simulator.
//!
//! 1. **Address Types:** A strong type for the 32-bit byte addresses found in traces.
//! 2. **Error Handling:** Geometry, configuration, and trace error enums.

/// Address type definitions.
pub mod addr;

/// Error types.
pub mod error;

pub use addr::Addr;
pub use error::{ConfigError, GeometryError, SimError, TraceError};
