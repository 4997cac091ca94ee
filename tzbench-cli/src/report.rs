//! Report Orchestration and Rendering
//!
//! Drives the benchmarking core for the two report modes and renders
//! the results for the terminal or as JSON.
//!
//! - **Basic**: one timezone, one batch size, detailed stats and
//!   memory panels.
//! - **Advanced**: a batch-size × timezone sweep with a settle delay
//!   between invocations and a progress bar while it runs.

use crate::config::BenchConfig;
use crate::workload::{convert_batch, convert_to_zone};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::debug;
use tzbench_core::{BenchmarkResult, DescriptiveStats, MemoryDelta, run, timestamp_batch};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable terminal output
    Human,
    /// Machine-readable JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Report metadata
#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    /// Tool version
    pub version: String,
    /// Report generation time
    pub timestamp: DateTime<Utc>,
    /// Warmup passes per invocation
    pub warmup_count: u32,
    /// Measured passes per invocation
    pub iteration_count: u32,
    /// Host details, best effort
    pub system: SystemInfo,
}

/// Host information, degrading to "Unknown"/0 off Linux
#[derive(Debug, Clone, Serialize)]
pub struct SystemInfo {
    /// Operating system name
    pub os: String,
    /// CPU model
    pub cpu: String,
    /// Available cores
    pub cpu_cores: u32,
    /// Total system memory in GB
    pub memory_gb: f64,
}

/// Basic-mode report: a single benchmark invocation
#[derive(Debug, Clone, Serialize)]
pub struct BasicReport {
    /// Metadata block
    pub meta: ReportMeta,
    /// Target timezone
    pub timezone: String,
    /// Batch size used
    pub batch_size: usize,
    /// One converted timestamp, shown so the output is self-describing
    pub sample_conversion: String,
    /// Timing and memory results
    pub result: BenchmarkResult,
}

/// One cell of the advanced sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepCell {
    /// Target timezone
    pub timezone: String,
    /// Batch size for this cell
    pub batch_size: usize,
    /// Reduced timing samples
    pub stats: DescriptiveStats,
    /// Memory change across the cell's run
    pub memory: MemoryDelta,
}

/// Advanced-mode report: the full batch-size × timezone sweep
#[derive(Debug, Clone, Serialize)]
pub struct AdvancedReport {
    /// Metadata block
    pub meta: ReportMeta,
    /// One entry per (batch size, timezone) pair, in execution order
    pub cells: Vec<SweepCell>,
    /// Wall time for the whole sweep, settle delays included
    pub total_duration_ms: f64,
}

/// Build the metadata block for a report
pub fn build_report_meta(config: &BenchConfig) -> ReportMeta {
    ReportMeta {
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        warmup_count: config.warmup_count,
        iteration_count: config.iteration_count,
        system: SystemInfo {
            os: std::env::consts::OS.to_string(),
            cpu: cpu_model().unwrap_or_else(|| "Unknown".to_string()),
            cpu_cores: num_cpus(),
            memory_gb: total_memory_gb().unwrap_or(0.0),
        },
    }
}

/// Run the basic report: one invocation against one timezone.
pub fn run_basic(config: &BenchConfig, tz: Tz) -> anyhow::Result<BasicReport> {
    debug!(timezone = %tz, batch_size = config.batch_size, "running basic benchmark");

    let batch = timestamp_batch(config.batch_size, None);
    let sample_conversion = format!("{} → {}", batch[0], convert_to_zone(&batch[0], tz)?);

    let result = run(
        |b: &[String]| convert_batch(b, tz),
        batch.as_slice(),
        config.warmup_count,
        config.iteration_count,
    )?;

    Ok(BasicReport {
        meta: build_report_meta(config),
        timezone: tz.name().to_string(),
        batch_size: config.batch_size,
        sample_conversion,
        result,
    })
}

/// Run the advanced report: every configured batch size against every
/// configured timezone, sequentially, with a settle sleep between
/// invocations.
pub fn run_advanced(config: &BenchConfig) -> anyhow::Result<AdvancedReport> {
    let total = config.batch_sizes.len() * config.zones.len();
    let start = tzbench_core::Timer::start();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let mut cells = Vec::with_capacity(total);

    for &size in &config.batch_sizes {
        for &tz in &config.zones {
            pb.set_message(format!("{} × {}", size, tz.name()));
            debug!(timezone = %tz, batch_size = size, "running sweep cell");

            let batch = timestamp_batch(size, None);
            let result = run(
                |b: &[String]| convert_batch(b, tz),
                batch.as_slice(),
                config.warmup_count,
                config.iteration_count,
            )?;

            cells.push(SweepCell {
                timezone: tz.name().to_string(),
                batch_size: size,
                stats: result.stats,
                memory: result.memory,
            });
            pb.inc(1);

            if cells.len() < total {
                std::thread::sleep(config.settle_delay);
            }
        }
    }

    pb.finish_with_message("Complete");

    Ok(AdvancedReport {
        meta: build_report_meta(config),
        cells,
        total_duration_ms: start.elapsed_ms(),
    })
}

/// Render the basic report for the terminal
pub fn format_basic(report: &BasicReport) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("🕐 Timezone Conversion Benchmark\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    output.push_str(&format!("  timezone:   {}\n", report.timezone));
    output.push_str(&format!(
        "  batch:      {} timestamps\n",
        report.batch_size
    ));
    output.push_str(&format!(
        "  iterations: {} measured, {} warmup\n",
        report.meta.iteration_count, report.meta.warmup_count
    ));
    output.push_str(&format!("  sample:     {}\n", report.sample_conversion));

    let stats = &report.result.stats;
    output.push_str("\n📊 Timing (ms per pass)\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  mean: {:.3}  median: {:.3}  stddev: {:.3}\n",
        stats.mean, stats.median, stats.std_dev
    ));
    output.push_str(&format!(
        "  min: {:.3}  max: {:.3}  samples: {}\n",
        stats.min, stats.max, stats.count
    ));
    output.push_str(&format!("  p95: {:.3}  p99: {:.3}\n", stats.p95, stats.p99));

    let mem = &report.result.memory;
    output.push_str("\n💾 Memory (MB, after − before)\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  rss: {:+}  heap used: {:+}  heap total: {:+}\n",
        mem.rss_mb, mem.heap_used_mb, mem.heap_total_mb
    ));

    output.push_str(&format!(
        "\n  {} cores · {} · {}\n",
        report.meta.system.cpu_cores, report.meta.system.cpu, report.meta.system.os
    ));

    output
}

/// Render the advanced report for the terminal
pub fn format_advanced(report: &AdvancedReport) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("🕐 Timezone Conversion Benchmark — sweep\n");
    output.push_str(&"=".repeat(76));
    output.push_str("\n\n");

    output.push_str(&format!(
        "  iterations: {} measured, {} warmup per cell\n\n",
        report.meta.iteration_count, report.meta.warmup_count
    ));

    let name_width = report
        .cells
        .iter()
        .map(|c| c.timezone.len())
        .max()
        .unwrap_or(20);

    output.push_str(&format!(
        "  {:<width$}  {:>8}  {:>10}  {:>10}  {:>10}  {:>10}  {:>8}\n",
        "Timezone",
        "batch",
        "mean ms",
        "median ms",
        "p95 ms",
        "p99 ms",
        "rss ΔMB",
        width = name_width
    ));
    output.push_str(&format!("  {}\n", "-".repeat(name_width + 66)));

    for cell in &report.cells {
        output.push_str(&format!(
            "  {:<width$}  {:>8}  {:>10.3}  {:>10.3}  {:>10.3}  {:>10.3}  {:>8}\n",
            cell.timezone,
            cell.batch_size,
            cell.stats.mean,
            cell.stats.median,
            cell.stats.p95,
            cell.stats.p99,
            format!("{:+}", cell.memory.rss_mb),
            width = name_width
        ));
    }

    // Fastest and slowest by mean, normalized per timestamp so cells of
    // different batch sizes are comparable
    let per_ts = |c: &SweepCell| c.stats.mean / c.batch_size.max(1) as f64;
    let fastest = report.cells.iter().min_by(|a, b| {
        per_ts(a)
            .partial_cmp(&per_ts(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let slowest = report.cells.iter().max_by(|a, b| {
        per_ts(a)
            .partial_cmp(&per_ts(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    output.push_str("\nSummary\n");
    output.push_str(&"-".repeat(76));
    output.push('\n');
    if let (Some(fast), Some(slow)) = (fastest, slowest) {
        output.push_str(&format!(
            "  ⚡ fastest: {} @ {} ({:.4} ms/timestamp)\n",
            fast.timezone,
            fast.batch_size,
            per_ts(fast)
        ));
        output.push_str(&format!(
            "  🐢 slowest: {} @ {} ({:.4} ms/timestamp)\n",
            slow.timezone,
            slow.batch_size,
            per_ts(slow)
        ));
    }
    output.push_str(&format!(
        "  cells: {}  total wall time: {:.0} ms\n",
        report.cells.len(),
        report.total_duration_ms
    ));

    output
}

/// CPU model name from /proc/cpuinfo (Linux only)
fn cpu_model() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/proc/cpuinfo")
            .ok()
            .and_then(|content| {
                content
                    .lines()
                    .find(|l| l.starts_with("model name"))
                    .and_then(|l| l.split(':').nth(1))
                    .map(|s| s.trim().to_string())
            })
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

/// Number of available CPU cores
fn num_cpus() -> u32 {
    std::thread::available_parallelism()
        .map(|n| n.get() as u32)
        .unwrap_or(1)
}

/// Total system memory in GB (Linux only)
fn total_memory_gb() -> Option<f64> {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/proc/meminfo")
            .ok()
            .and_then(|content| {
                content
                    .lines()
                    .find(|l| l.starts_with("MemTotal"))
                    .and_then(|l| {
                        l.split_whitespace()
                            .nth(1)
                            .and_then(|s| s.parse::<u64>().ok())
                    })
                    .map(|kb| kb as f64 / 1024.0 / 1024.0)
            })
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BenchConfig;
    use std::time::Duration;

    fn quick_config() -> BenchConfig {
        BenchConfig {
            warmup_count: 1,
            iteration_count: 3,
            batch_size: 10,
            batch_sizes: vec![5, 10],
            zones: vec![chrono_tz::UTC, chrono_tz::Asia::Kolkata],
            settle_delay: Duration::from_millis(0),
        }
    }

    #[test]
    fn test_output_format_parses() {
        assert_eq!("human".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_basic_report_renders_panels() {
        let report = run_basic(&quick_config(), chrono_tz::Asia::Kolkata).unwrap();
        let text = format_basic(&report);

        assert!(text.contains("Asia/Kolkata"));
        assert!(text.contains("Timing (ms per pass)"));
        assert!(text.contains("Memory (MB, after − before)"));
        assert!(text.contains("samples: 3"));
    }

    #[test]
    fn test_basic_report_serializes() {
        let report = run_basic(&quick_config(), chrono_tz::UTC).unwrap();
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.contains("\"timezone\":\"UTC\""));
        assert!(json.contains("\"count\":3"));
    }

    #[test]
    fn test_advanced_sweep_covers_grid() {
        let config = quick_config();
        let report = run_advanced(&config).unwrap();

        assert_eq!(
            report.cells.len(),
            config.batch_sizes.len() * config.zones.len()
        );
        // execution order: batch sizes outer, zones inner
        assert_eq!(report.cells[0].batch_size, 5);
        assert_eq!(report.cells[0].timezone, "UTC");
        assert_eq!(report.cells[1].timezone, "Asia/Kolkata");

        let text = format_advanced(&report);
        assert!(text.contains("fastest:"));
        assert!(text.contains("slowest:"));
    }
}
