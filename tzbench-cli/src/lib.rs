#![warn(missing_docs)]
//! tzbench CLI
//!
//! Argument parsing, mode dispatch, and output plumbing around the
//! benchmarking core. The binary's `main` registers the tracking
//! allocator and calls [`run`].

pub mod config;
pub mod report;
pub mod workload;

use anyhow::{Context, ensure};
use clap::Parser;
use config::BenchConfig;
use report::OutputFormat;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// tzbench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "tzbench")]
#[command(author, version, about = "Measure UTC → IANA timezone conversion cost")]
pub struct Cli {
    /// Basic mode: one timezone, one batch size, detailed panels
    #[arg(short, long, conflicts_with = "advanced")]
    pub basic: bool,

    /// Advanced mode: sweep batch sizes × timezones (default)
    #[arg(short, long)]
    pub advanced: bool,

    /// Target timezone (basic mode only)
    #[arg(short, long, default_value = "Asia/Kolkata")]
    pub timezone: String,

    /// Measured passes per benchmark invocation
    #[arg(long, default_value_t = config::DEFAULT_ITERATION_COUNT)]
    pub iterations: u32,

    /// Unmeasured warmup passes per benchmark invocation
    #[arg(long, default_value_t = config::DEFAULT_WARMUP_COUNT)]
    pub warmup: u32,

    /// Batch size for basic mode
    #[arg(long, default_value_t = config::DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Output format: human, json
    #[arg(long, default_value = "human")]
    pub format: String,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Run the tzbench CLI. Entry point for the binary.
///
/// # Errors
/// Any failure below (unknown timezone, workload failure, memory
/// introspection failure, unwritable output file) bubbles up; the
/// binary maps it to exit code 1.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the tzbench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter("tzbench_cli=debug,tzbench_core=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter("tzbench_cli=info,tzbench_core=info")
            .init();
    }

    // An interrupt aborts immediately; nothing is persisted mid-run, so
    // there is no partial result to salvage and the exit is clean.
    ctrlc::set_handler(|| {
        eprintln!("\ninterrupted");
        std::process::exit(0);
    })
    .context("failed to install interrupt handler")?;

    ensure!(cli.iterations >= 1, "--iterations must be at least 1");
    ensure!(cli.batch_size >= 1, "--batch-size must be at least 1");

    let format: OutputFormat = cli
        .format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    // Keep interval readings on one core's clock where possible
    if let Err(e) = tzbench_core::pin_to_cpu(0) {
        debug!("could not pin to cpu 0: {e}");
    }

    let config = BenchConfig {
        warmup_count: cli.warmup,
        iteration_count: cli.iterations,
        batch_size: cli.batch_size,
        ..BenchConfig::default()
    };

    let output = if cli.basic {
        let tz = workload::parse_zone(&cli.timezone)?;
        info!(timezone = %tz, "starting basic benchmark");
        let report = report::run_basic(&config, tz)?;
        match format {
            OutputFormat::Human => report::format_basic(&report),
            OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        }
    } else {
        info!(
            batch_sizes = config.batch_sizes.len(),
            zones = config.zones.len(),
            "starting sweep benchmark"
        );
        let report = report::run_advanced(&config)?;
        match format {
            OutputFormat::Human => report::format_advanced(&report),
            OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        }
    };

    if let Some(ref path) = cli.output {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        file.write_all(output.as_bytes())?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{output}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["tzbench"]);

        assert!(!cli.basic);
        assert_eq!(cli.timezone, "Asia/Kolkata");
        assert_eq!(cli.iterations, config::DEFAULT_ITERATION_COUNT);
        assert_eq!(cli.warmup, config::DEFAULT_WARMUP_COUNT);
        assert_eq!(cli.format, "human");
    }

    #[test]
    fn test_cli_basic_flags() {
        let cli = Cli::parse_from(["tzbench", "-b", "-t", "Europe/London", "--iterations", "5"]);

        assert!(cli.basic);
        assert_eq!(cli.timezone, "Europe/London");
        assert_eq!(cli.iterations, 5);
    }

    #[test]
    fn test_cli_modes_conflict() {
        assert!(Cli::try_parse_from(["tzbench", "-b", "-a"]).is_err());
    }
}
