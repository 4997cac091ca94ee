//! Benchmark Configuration
//!
//! One explicit struct built at startup from CLI arguments and passed
//! by reference into the report layer. The core never sees it; it takes
//! warmup/iteration counts and the batch as plain parameters.

use chrono_tz::Tz;
use std::time::Duration;

/// Default warmup passes before measurement
pub const DEFAULT_WARMUP_COUNT: u32 = 10;

/// Default measured passes per benchmark invocation
pub const DEFAULT_ITERATION_COUNT: u32 = 50;

/// Default batch size in basic mode
pub const DEFAULT_BATCH_SIZE: usize = 1_000;

/// Settle delay between advanced-mode cells, letting transient system
/// load die down before the next invocation
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Configuration for a benchmark session
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Unmeasured passes per invocation
    pub warmup_count: u32,
    /// Measured passes per invocation
    pub iteration_count: u32,
    /// Batch size for basic mode
    pub batch_size: usize,
    /// Batch sizes swept in advanced mode
    pub batch_sizes: Vec<usize>,
    /// Timezones swept in advanced mode
    pub zones: Vec<Tz>,
    /// Sleep between advanced-mode invocations
    pub settle_delay: Duration,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            warmup_count: DEFAULT_WARMUP_COUNT,
            iteration_count: DEFAULT_ITERATION_COUNT,
            batch_size: DEFAULT_BATCH_SIZE,
            batch_sizes: vec![100, 1_000, 10_000],
            zones: vec![
                chrono_tz::UTC,
                chrono_tz::Asia::Kolkata,
                chrono_tz::Asia::Tokyo,
                chrono_tz::Europe::London,
                chrono_tz::America::New_York,
                chrono_tz::Australia::Sydney,
            ],
            settle_delay: SETTLE_DELAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let config = BenchConfig::default();

        assert!(config.iteration_count >= 1);
        assert!(!config.batch_sizes.is_empty());
        assert!(!config.zones.is_empty());
        assert!(config.batch_sizes.windows(2).all(|w| w[0] < w[1]));
    }
}
