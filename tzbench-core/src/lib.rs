#![warn(missing_docs)]
//! tzbench Core - Benchmarking Engine
//!
//! This crate provides the measurement machinery behind the `tzbench`
//! binary:
//! - Descriptive statistics reduction over timing samples
//! - A fixed-count warmup/measurement benchmark runner
//! - Process memory snapshots via a counting global allocator and
//!   `/proc/self/status`
//! - Timestamp batch generation for the conversion workload
//!
//! The core takes its workload, batch, and counts as explicit
//! parameters; it reads no configuration and holds no state across
//! invocations.

mod generate;
mod measure;
mod memory;
mod runner;
mod stats;

pub use generate::timestamp_batch;
pub use measure::{Timer, pin_to_cpu};
pub use memory::{MemoryDelta, MemoryError, MemorySnapshot, TrackingAllocator, heap_counters};
pub use runner::{BenchmarkResult, Phase, RunError, run};
pub use stats::{DescriptiveStats, StatsError, compute_stats};
