//! Simulation statistics collection and reporting.
//!
//! This module holds the numbers a run produces:
//! 1. **Per cache:** Hits, total accesses, and the derived miss count and hit rate.
//! 2. **Per run:** The list of per-cache results plus the length of the trace.
//!
//! The text layout is one block per cache:
//!
//! ```text
//! 4-way:
//!  Hits: 12
//!  Total accesses: 20
//!  Hit rate: 60.00%
//! ```

use std::fmt;

use serde::Serialize;

/// Hit/access counters of one cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Label of the cache.
    pub name: String,
    /// Number of hits.
    pub hits: u64,
    /// Number of accesses, hits and misses together.
    pub accesses: u64,
}

impl CacheStats {
    /// Number of misses.
    pub const fn misses(&self) -> u64 {
        self.accesses - self.hits
    }

    /// `hits / accesses`, or 0 when nothing was accessed.
    pub fn hit_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.accesses as f64
        }
    }

    /// Hit rate as a percentage.
    pub fn hit_rate_percent(&self) -> f64 {
        self.hit_rate() * 100.0
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.name)?;
        writeln!(f, " Hits: {}", self.hits)?;
        writeln!(f, " Total accesses: {}", self.accesses)?;
        write!(f, " Hit rate: {:.2}%", self.hit_rate_percent())
    }
}

/// Report of a whole simulation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimReport {
    /// Number of addresses replayed.
    pub total_accesses: u64,
    /// Per-cache results, in configuration order.
    pub caches: Vec<CacheStats>,
}

impl SimReport {
    /// Looks up the results of the cache called `name`.
    pub fn get(&self, name: &str) -> Option<&CacheStats> {
        self.caches.iter().find(|stats| stats.name == name)
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        println!("{self}");
    }

    /// Serializes the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stats) in self.caches.iter().enumerate() {
            if i > 0 {
                write!(f, "\n\n")?;
            }
            write!(f, "{stats}")?;
        }
        Ok(())
    }
}
