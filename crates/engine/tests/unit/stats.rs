//! Statistics Tests.
//!
//! Derived counters, text layout, and JSON output.

use cachesim_core::common::SimError;
use cachesim_core::stats::{CacheStats, SimReport};
use pretty_assertions::assert_eq;

fn stats(name: &str, hits: u64, accesses: u64) -> CacheStats {
    CacheStats {
        name: name.to_string(),
        hits,
        accesses,
    }
}

#[test]
fn test_derived_counters() {
    let s = stats("4-way", 12, 20);
    assert_eq!(s.misses(), 8);
    assert!((s.hit_rate() - 0.6).abs() < 1e-12);
    assert!((s.hit_rate_percent() - 60.0).abs() < 1e-9);
}

#[test]
fn test_zero_accesses_is_zero_rate() {
    let s = stats("idle", 0, 0);
    assert_eq!(s.hit_rate(), 0.0);
    assert_eq!(s.misses(), 0);
    assert_eq!(s.to_string(), "idle:\n Hits: 0\n Total accesses: 0\n Hit rate: 0.00%");
}

#[test]
fn test_cache_block_layout() {
    assert_eq!(
        stats("Direct-mapped", 1, 3).to_string(),
        "Direct-mapped:\n Hits: 1\n Total accesses: 3\n Hit rate: 33.33%"
    );
}

#[test]
fn test_report_separates_caches_with_blank_line() {
    let report = SimReport {
        total_accesses: 4,
        caches: vec![stats("a", 4, 4), stats("b", 2, 4)],
    };
    assert_eq!(
        report.to_string(),
        "a:\n Hits: 4\n Total accesses: 4\n Hit rate: 100.00%\n\
         \n\
         b:\n Hits: 2\n Total accesses: 4\n Hit rate: 50.00%"
    );
}

#[test]
fn test_empty_report_is_empty_text() {
    assert_eq!(SimReport::default().to_string(), "");
}

#[test]
fn test_report_lookup() {
    let report = SimReport {
        total_accesses: 10,
        caches: vec![stats("L1", 9, 10), stats("L2", 1, 10)],
    };
    assert_eq!(report.get("L2").map(|s| s.hits), Some(1));
    assert!(report.get("L3").is_none());
}

#[test]
fn test_report_json() {
    let report = SimReport {
        total_accesses: 2,
        caches: vec![stats("fa", 1, 2)],
    };
    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(value["total_accesses"], 2);
    assert_eq!(value["caches"][0]["name"], "fa");
    assert_eq!(value["caches"][0]["hits"], 1);
    assert_eq!(value["caches"][0]["accesses"], 2);
}

#[test]
fn test_serialization_failure_is_a_report_error() {
    let json_err = serde_json::from_str::<u64>("not json").unwrap_err();
    let err = SimError::from(json_err);
    assert!(matches!(err, SimError::Report(_)));
    assert!(err.to_string().starts_with("failed to serialize report:"));
    assert!(!err.to_string().contains("config"));
}
