//! Timestamp Batch Generation
//!
//! Produces the input batches fed to the conversion workload: RFC 3339
//! strings spaced one second apart, so every element is a distinct
//! instant and the workload cannot memoize on a repeated input.

use chrono::{DateTime, Duration, Utc};

/// Generate `size` RFC 3339 timestamp strings, one second apart,
/// starting from `base`.
///
/// Deterministic for a given `base`; with `None` the current time is
/// used, making cross-run batches intentionally non-reproducible.
pub fn timestamp_batch(size: usize, base: Option<DateTime<Utc>>) -> Vec<String> {
    let base = base.unwrap_or_else(Utc::now);

    (0..size)
        .map(|i| (base + Duration::seconds(i as i64)).to_rfc3339())
        .collect()
}
