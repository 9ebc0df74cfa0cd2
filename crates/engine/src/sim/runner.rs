//! Simulation runner.
//!
//! Owns a list of independent cache models and replays one address stream
//! through all of them. Each model sees the addresses in trace order; the
//! order in which models see a given address does not matter because they
//! share no state.

use std::thread;

use tracing::debug;

use crate::cache::CacheModel;
use crate::common::error::ConfigError;
use crate::config::SimConfig;
use crate::stats::SimReport;

/// Drives one or more cache models over the same address stream.
#[derive(Debug, Default)]
pub struct SimulationRunner {
    models: Vec<CacheModel>,
    total_accesses: u64,
}

impl SimulationRunner {
    /// Creates a runner over already-built models.
    pub const fn new(models: Vec<CacheModel>) -> Self {
        Self {
            models,
            total_accesses: 0,
        }
    }

    /// Builds one model per configured cache.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if no cache is configured or any geometry is invalid.
    pub fn from_config(config: &SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let models = config
            .caches
            .iter()
            .map(CacheModel::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(models))
    }

    /// Adds another model. It only sees addresses replayed after this call.
    pub fn add_model(&mut self, model: CacheModel) {
        self.models.push(model);
    }

    /// The models, in the order they were added.
    pub fn models(&self) -> &[CacheModel] {
        &self.models
    }

    /// Number of addresses replayed so far.
    pub const fn total_accesses(&self) -> u64 {
        self.total_accesses
    }

    /// Feeds a single address to every model.
    pub fn step(&mut self, addr: u32) {
        self.total_accesses += 1;
        for model in &mut self.models {
            let _ = model.access(addr);
        }
    }

    /// Replays every address of `addresses`.
    pub fn run<I>(&mut self, addresses: I)
    where
        I: IntoIterator<Item = u32>,
    {
        for addr in addresses {
            self.step(addr);
        }
        debug!(accesses = self.total_accesses, "run complete");
    }

    /// Replays a fallible address stream, stopping at the first error.
    ///
    /// Addresses before the error stay applied.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `addresses`.
    pub fn try_run<I, E>(&mut self, addresses: I) -> Result<(), E>
    where
        I: IntoIterator<Item = Result<u32, E>>,
    {
        for addr in addresses {
            self.step(addr?);
        }
        debug!(accesses = self.total_accesses, "run complete");
        Ok(())
    }

    /// Replays a materialized trace with one thread per model.
    ///
    /// Each thread applies the whole trace to its model in order, so the
    /// final counters equal those of [`run`](Self::run) for deterministic policies.
    pub fn run_parallel(&mut self, addresses: &[u32]) {
        thread::scope(|scope| {
            for model in &mut self.models {
                let _ = scope.spawn(move || {
                    for &addr in addresses {
                        let _ = model.access(addr);
                    }
                });
            }
        });
        self.total_accesses += addresses.len() as u64;
        debug!(
            accesses = self.total_accesses,
            threads = self.models.len(),
            "parallel run complete"
        );
    }

    /// Per-model results in the order the models were added.
    pub fn report(&self) -> SimReport {
        SimReport {
            total_accesses: self.total_accesses,
            caches: self.models.iter().map(CacheModel::stats).collect(),
        }
    }
}
