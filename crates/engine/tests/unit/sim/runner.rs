//! Simulation Runner Tests.
//!
//! Multiple independent models over one stream, fallible streams, and the
//! parallel runner.

use std::io::Cursor;

use cachesim_core::common::{ConfigError, TraceError};
use cachesim_core::config::{CacheConfig, ReplacementPolicy, SimConfig};
use cachesim_core::sim::{SimulationRunner, TraceReader};
use pretty_assertions::assert_eq;

use crate::common::lru_cache;

/// Walks a working set of `blocks` 4-byte blocks `rounds` times.
fn looping_trace(blocks: u32, rounds: u32) -> Vec<u32> {
    (0..rounds).flat_map(|_| (0..blocks).map(|b| b * 4)).collect()
}

#[test]
fn default_config_builds_four_models() {
    let runner = SimulationRunner::from_config(&SimConfig::default()).unwrap();
    let names: Vec<&str> = runner.models().iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["Direct-mapped", "2-way", "4-way", "Fully associative"]);
}

#[test]
fn working_set_that_fits_hits_on_second_pass() {
    let mut runner = SimulationRunner::from_config(&SimConfig::default()).unwrap();
    runner.run(looping_trace(8, 2));

    let report = runner.report();
    assert_eq!(report.total_accesses, 16);
    for stats in &report.caches {
        assert_eq!(stats.hits, 8, "{}", stats.name);
        assert_eq!(stats.accesses, 16, "{}", stats.name);
    }
}

/// Nine blocks cycling through an eight-line cache: LRU in the fully
/// associative cache always evicts the block needed next, while the
/// direct-mapped cache only loses the two blocks that share set 0.
#[test]
fn organizations_differ_on_cyclic_overflow() {
    let mut runner = SimulationRunner::from_config(&SimConfig::default()).unwrap();
    runner.run(looping_trace(9, 10));
    let report = runner.report();

    assert_eq!(report.get("Fully associative").unwrap().hits, 0);
    // Blocks 1..=7 hit on every pass after the first.
    assert_eq!(report.get("Direct-mapped").unwrap().hits, 7 * 9);
}

#[test]
fn models_do_not_share_state() {
    let mut runner = SimulationRunner::new(vec![lru_cache(32, 4, 1), lru_cache(32, 4, 8)]);
    runner.run([0x00, 0x20, 0x00, 0x20]);
    let report = runner.report();
    assert_eq!(report.caches[0].hits, 0);
    assert_eq!(report.caches[1].hits, 2);
}

#[test]
fn model_added_later_sees_only_later_addresses() {
    let mut runner = SimulationRunner::new(vec![lru_cache(32, 4, 1)]);
    runner.step(0x0);
    runner.add_model(lru_cache(32, 4, 1));
    runner.step(0x0);

    assert_eq!(runner.total_accesses(), 2);
    assert_eq!(runner.models()[0].hits(), 1);
    assert_eq!(runner.models()[1].hits(), 0);
    assert_eq!(runner.models()[1].accesses(), 1);
}

#[test]
fn try_run_stops_at_first_error() {
    let mut runner = SimulationRunner::new(vec![lru_cache(32, 4, 2)]);
    let stream: Vec<Result<u32, &str>> = vec![Ok(0x0), Ok(0x0), Err("boom"), Ok(0x0)];
    assert_eq!(runner.try_run(stream), Err("boom"));
    assert_eq!(runner.total_accesses(), 2);
    assert_eq!(runner.models()[0].hits(), 1);
}

#[test]
fn try_run_over_trace_reader() {
    let mut runner = SimulationRunner::from_config(&SimConfig::default()).unwrap();
    let reader = TraceReader::new(Cursor::new("0 4 8 c\n0 4 8 c\n"));
    runner.try_run::<_, TraceError>(reader).unwrap();
    assert!(runner.report().caches.iter().all(|s| s.hits == 4));
}

#[test]
fn parallel_matches_sequential_for_lru() {
    let config = SimConfig {
        caches: vec![
            CacheConfig::new("dm", 256, 16, 1),
            CacheConfig::new("2w", 256, 16, 2),
            CacheConfig::new("fa", 256, 16, 16),
            CacheConfig::new("big", 4096, 64, 8),
        ],
    };
    let trace: Vec<u32> = (0..5000u32).map(|i| i.wrapping_mul(40_503) % 8192).collect();

    let mut sequential = SimulationRunner::from_config(&config).unwrap();
    sequential.run(trace.iter().copied());
    let mut parallel = SimulationRunner::from_config(&config).unwrap();
    parallel.run_parallel(&trace);

    assert_eq!(parallel.report(), sequential.report());
}

#[test]
fn parallel_matches_sequential_for_seeded_random() {
    let config = SimConfig::default()
        .with_policy(ReplacementPolicy::Random)
        .with_seed(31);
    let trace: Vec<u32> = (0..2000u32).map(|i| (i * 7 % 19) * 4).collect();

    let mut sequential = SimulationRunner::from_config(&config).unwrap();
    sequential.run(trace.iter().copied());
    let mut parallel = SimulationRunner::from_config(&config).unwrap();
    parallel.run_parallel(&trace);

    assert_eq!(parallel.report(), sequential.report());
}

#[test]
fn empty_config_is_rejected() {
    let err = SimulationRunner::from_config(&SimConfig { caches: vec![] }).unwrap_err();
    assert!(matches!(err, ConfigError::NoCaches));
}

#[test]
fn empty_trace_reports_zero_rates() {
    let mut runner = SimulationRunner::from_config(&SimConfig::default()).unwrap();
    runner.run(std::iter::empty());
    let report = runner.report();
    assert_eq!(report.total_accesses, 0);
    assert!(report.caches.iter().all(|s| s.hit_rate() == 0.0));
}
