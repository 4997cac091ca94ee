//! Descriptive Statistics
//!
//! Reduces a sequence of timing samples into a summary record.
//! Percentiles use nearest-rank floor indices on the sorted data, and the
//! median is the element at floor(n/2) — the upper-middle value for even
//! counts. Downstream comparisons assume these exact definitions.

use serde::Serialize;
use thiserror::Error;

/// Summary of a non-empty sample sequence. All values carry the unit of
/// the input samples (milliseconds throughout this crate).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    /// Number of samples reduced
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// Sorted element at index floor(count / 2)
    pub median: f64,
    /// Population standard deviation (divisor = count)
    pub std_dev: f64,
    /// Sorted element at index floor(count * 0.95), clamped
    pub p95: f64,
    /// Sorted element at index floor(count * 0.99), clamped
    pub p99: f64,
}

/// Errors from statistics reduction
#[derive(Debug, Clone, Error)]
pub enum StatsError {
    /// The reducer requires at least one sample
    #[error("cannot compute statistics over an empty sample sequence")]
    EmptySamples,
}

/// Reduce a sample sequence into a [`DescriptiveStats`] record.
///
/// Sorts a private copy; the caller's slice is left untouched. Variance
/// is the population variance (squared deviations averaged over `count`,
/// not `count - 1`).
///
/// # Errors
/// Returns [`StatsError::EmptySamples`] for an empty input.
pub fn compute_stats(samples: &[f64]) -> Result<DescriptiveStats, StatsError> {
    if samples.is_empty() {
        return Err(StatsError::EmptySamples);
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let count = sorted.len();
    let sum: f64 = sorted.iter().sum();
    let mean = sum / count as f64;

    let variance = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count as f64;
    let std_dev = variance.sqrt();

    Ok(DescriptiveStats {
        count,
        mean,
        min: sorted[0],
        max: sorted[count - 1],
        median: sorted[count / 2],
        std_dev,
        p95: sorted[percentile_index(count, 0.95)],
        p99: sorted[percentile_index(count, 0.99)],
    })
}

/// Nearest-rank index for a percentile, clamped to the valid range.
///
/// For count = 1 every percentile resolves to index 0.
fn percentile_index(count: usize, fraction: f64) -> usize {
    ((count as f64 * fraction).floor() as usize).min(count - 1)
}
