//! Integration tests for the tzbench core
//!
//! Exercises the runner end to end against workloads with known cost.

use std::time::Duration;
use tzbench_core::{BenchmarkResult, RunError, compute_stats, run, timestamp_batch};

/// A workload that sleeps a fixed 200µs per batch element should
/// produce a mean close to 200µs × batch size.
#[test]
fn test_sleep_workload_mean_tracks_batch_size() {
    const PER_ITEM: Duration = Duration::from_micros(200);

    let batch = timestamp_batch(10, None);
    let result: BenchmarkResult = run(
        |b: &[String]| -> Result<usize, std::convert::Infallible> {
            for _ in b {
                std::thread::sleep(PER_ITEM);
            }
            Ok(b.len())
        },
        batch.as_slice(),
        2,
        30,
    )
    .unwrap();

    assert_eq!(result.stats.count, 30);

    // 10 × 200µs = 2ms floor; generous ceiling for scheduler noise
    assert!(
        result.stats.mean >= 2.0,
        "mean {} below sleep floor",
        result.stats.mean
    );
    assert!(
        result.stats.mean < 60.0,
        "mean {} implausibly high",
        result.stats.mean
    );
    assert!(result.stats.min <= result.stats.median);
    assert!(result.stats.median <= result.stats.max);
}

/// The runner's stats must agree with reducing the same number of
/// samples directly: count flows through untouched.
#[test]
fn test_runner_feeds_reducer_every_measured_pass() {
    let batch = timestamp_batch(3, None);
    let result = run(
        |b: &[String]| -> Result<usize, std::convert::Infallible> { Ok(b.len()) },
        batch.as_slice(),
        0,
        7,
    )
    .unwrap();

    assert_eq!(result.stats.count, 7);
}

/// A workload failure mid-measurement aborts with no result, and the
/// error chain keeps the workload's own message.
#[test]
fn test_workload_error_chain_is_preserved() {
    let batch = timestamp_batch(1, None);
    let err = run(
        |_: &[String]| -> Result<(), String> { Err("tz database unavailable".to_string()) },
        batch.as_slice(),
        0,
        1,
    )
    .unwrap_err();

    match &err {
        RunError::Workload { source, .. } => {
            assert!(source.to_string().contains("tz database unavailable"));
        }
        other => panic!("expected workload error, got {other:?}"),
    }
}

/// Reducing a handful of real timing samples keeps every statistic
/// inside the observed range.
#[test]
fn test_real_samples_respect_range_invariants() {
    let batch = timestamp_batch(100, None);
    let mut samples = Vec::new();
    for _ in 0..20 {
        let timer = tzbench_core::Timer::start();
        let parsed: usize = batch
            .iter()
            .filter(|ts| ts.parse::<chrono::DateTime<chrono::Utc>>().is_ok())
            .count();
        samples.push(timer.elapsed_ms());
        assert_eq!(parsed, 100);
    }

    let stats = compute_stats(&samples).unwrap();
    assert_eq!(stats.count, 20);
    assert!(stats.min <= stats.p95 && stats.p95 <= stats.max);
    assert!(stats.min <= stats.p99 && stats.p99 <= stats.max);
    assert!(stats.min <= stats.mean && stats.mean <= stats.max);
}
