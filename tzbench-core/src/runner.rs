//! Benchmark Runner
//!
//! Executes a workload over a batch for a fixed number of warmup and
//! measured passes, collecting one elapsed-time sample per measured
//! pass plus a memory delta across the whole run. Fully sequential:
//! no pass overlaps another, so the timing signal stays clean.

use crate::measure::Timer;
use crate::memory::{MemoryDelta, MemoryError, MemorySnapshot};
use crate::stats::{DescriptiveStats, StatsError, compute_stats};
use serde::Serialize;
use thiserror::Error;

/// Output of one runner invocation
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkResult {
    /// Reduced timing samples, one per measured pass, in milliseconds
    pub stats: DescriptiveStats,
    /// Memory change across the run (after − before)
    pub memory: MemoryDelta,
}

/// Which phase of a run an error occurred in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Unmeasured stabilization pass
    Warmup,
    /// Timed pass
    Measurement,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Warmup => write!(f, "warmup"),
            Phase::Measurement => write!(f, "measurement"),
        }
    }
}

/// Errors from a benchmark run. Any of these aborts the run with no
/// partial result — corrupted timing data is worse than none.
#[derive(Debug, Error)]
pub enum RunError {
    /// The workload failed; the run is abandoned where it stood
    #[error("workload failed during {phase} pass {iteration}")]
    Workload {
        /// Phase the failing pass belonged to
        phase: Phase,
        /// Zero-based index of the failing pass within its phase
        iteration: u32,
        /// The workload's own error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// A memory snapshot could not be taken
    #[error("memory snapshot failed")]
    Memory(#[from] MemoryError),
    /// Sample reduction failed (zero measured iterations)
    #[error("sample reduction failed")]
    Stats(#[from] StatsError),
}

/// Run `workload` over `batch`: `warmup_count` unmeasured passes, then
/// `iteration_count` timed passes, each contributing one millisecond
/// sample, reduced to [`DescriptiveStats`] alongside the memory delta.
///
/// The batch is only ever borrowed; workload results are discarded
/// through [`std::hint::black_box`] so the passes cannot be optimized
/// away. Samples are appended in execution order and handed to the
/// reducer in that order.
///
/// # Errors
/// Fails fast on the first workload error in either phase, on a failed
/// memory snapshot, or on `iteration_count == 0` (nothing to reduce).
pub fn run<B, T, E, F>(
    mut workload: F,
    batch: &B,
    warmup_count: u32,
    iteration_count: u32,
) -> Result<BenchmarkResult, RunError>
where
    B: ?Sized,
    F: FnMut(&B) -> Result<T, E>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let before = MemorySnapshot::capture()?;

    for i in 0..warmup_count {
        let out = workload(batch).map_err(|e| RunError::Workload {
            phase: Phase::Warmup,
            iteration: i,
            source: e.into(),
        })?;
        let _ = std::hint::black_box(out);
    }

    let mut samples = Vec::with_capacity(iteration_count as usize);
    for i in 0..iteration_count {
        let timer = Timer::start();
        let out = workload(batch).map_err(|e| RunError::Workload {
            phase: Phase::Measurement,
            iteration: i,
            source: e.into(),
        })?;
        let elapsed = timer.elapsed_ms();
        let _ = std::hint::black_box(out);
        samples.push(elapsed);
    }

    let after = MemorySnapshot::capture()?;

    let stats = compute_stats(&samples)?;

    Ok(BenchmarkResult {
        stats,
        memory: MemoryDelta::between(&before, &after),
    })
}
