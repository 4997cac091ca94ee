//! Process Memory Introspection
//!
//! Pairs a counting global allocator with resident-set readings from
//! `/proc/self/status` to snapshot process memory around a benchmark
//! run. A snapshot that cannot be taken is an error — zeros are never
//! fabricated, they would silently corrupt the memory columns.

use serde::Serialize;
use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

static HEAP_LIVE_BYTES: AtomicU64 = AtomicU64::new(0);
static HEAP_TOTAL_BYTES: AtomicU64 = AtomicU64::new(0);

/// Counting allocator wrapping the system allocator.
///
/// Register in the benchmark binary:
/// ```ignore
/// #[global_allocator]
/// static ALLOC: TrackingAllocator = TrackingAllocator;
/// ```
pub struct TrackingAllocator;

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            HEAP_LIVE_BYTES.fetch_add(layout.size() as u64, Ordering::Relaxed);
            HEAP_TOTAL_BYTES.fetch_add(layout.size() as u64, Ordering::Relaxed);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        HEAP_LIVE_BYTES.fetch_sub(layout.size() as u64, Ordering::Relaxed);
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            HEAP_LIVE_BYTES.fetch_sub(layout.size() as u64, Ordering::Relaxed);
            HEAP_LIVE_BYTES.fetch_add(new_size as u64, Ordering::Relaxed);
            if new_size > layout.size() {
                HEAP_TOTAL_BYTES.fetch_add((new_size - layout.size()) as u64, Ordering::Relaxed);
            }
        }
        new_ptr
    }
}

/// Current allocator counters: (live bytes, cumulative allocated bytes).
///
/// Both stay 0 unless [`TrackingAllocator`] is the global allocator.
pub fn heap_counters() -> (u64, u64) {
    (
        HEAP_LIVE_BYTES.load(Ordering::Relaxed),
        HEAP_TOTAL_BYTES.load(Ordering::Relaxed),
    )
}

/// Process memory at a point in time, in whole megabytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemorySnapshot {
    /// Resident set size
    pub rss_mb: i64,
    /// Heap bytes currently live
    pub heap_used_mb: i64,
    /// Cumulative heap bytes allocated
    pub heap_total_mb: i64,
}

/// Elementwise difference of two snapshots (after − before).
///
/// Fields can be negative when memory was released during the interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryDelta {
    /// Change in resident set size
    pub rss_mb: i64,
    /// Change in live heap bytes
    pub heap_used_mb: i64,
    /// Change in cumulative allocated bytes
    pub heap_total_mb: i64,
}

/// Errors from memory introspection
#[derive(Debug, Error)]
pub enum MemoryError {
    /// `/proc/self/status` is only available on Linux
    #[error("process memory introspection is not supported on this platform")]
    Unsupported,
    /// Reading `/proc/self/status` failed
    #[error("failed to read /proc/self/status")]
    Io(#[from] std::io::Error),
    /// `/proc/self/status` had no parseable VmRSS line
    #[error("malformed /proc/self/status: {0}")]
    Malformed(String),
}

impl MemorySnapshot {
    /// Capture the current process memory state.
    ///
    /// # Errors
    /// Fails when the resident-set reading is unavailable; heap figures
    /// come from the allocator counters and cannot fail.
    pub fn capture() -> Result<Self, MemoryError> {
        let rss_bytes = read_rss_bytes()?;
        let (live, total) = heap_counters();

        Ok(Self {
            rss_mb: bytes_to_mb(rss_bytes),
            heap_used_mb: bytes_to_mb(live),
            heap_total_mb: bytes_to_mb(total),
        })
    }
}

impl MemoryDelta {
    /// Elementwise `after − before`
    pub fn between(before: &MemorySnapshot, after: &MemorySnapshot) -> Self {
        Self {
            rss_mb: after.rss_mb - before.rss_mb,
            heap_used_mb: after.heap_used_mb - before.heap_used_mb,
            heap_total_mb: after.heap_total_mb - before.heap_total_mb,
        }
    }
}

/// Whole megabytes by integer rounding
fn bytes_to_mb(bytes: u64) -> i64 {
    ((bytes as f64) / (1024.0 * 1024.0)).round() as i64
}

#[cfg(target_os = "linux")]
fn read_rss_bytes() -> Result<u64, MemoryError> {
    let status = std::fs::read_to_string("/proc/self/status")?;
    parse_vm_rss(&status)
}

#[cfg(not(target_os = "linux"))]
fn read_rss_bytes() -> Result<u64, MemoryError> {
    Err(MemoryError::Unsupported)
}

/// Parse the `VmRSS:` line (kB) out of a /proc/self/status dump
fn parse_vm_rss(status: &str) -> Result<u64, MemoryError> {
    let line = status
        .lines()
        .find(|l| l.starts_with("VmRSS:"))
        .ok_or_else(|| MemoryError::Malformed("no VmRSS line".to_string()))?;

    let kb: u64 = line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| MemoryError::Malformed(format!("unparseable VmRSS line: {line}")))?
        .parse()
        .map_err(|_| MemoryError::Malformed(format!("unparseable VmRSS line: {line}")))?;

    Ok(kb * 1024)
}
