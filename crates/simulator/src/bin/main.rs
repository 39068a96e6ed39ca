//! Discovery latency simulator CLI
//!
//! Estimates how long a periodic scanner takes to receive a packet from a
//! periodic advertiser, by Monte Carlo simulation.
//!
//! # Example
//!
//! ```bash
//! # One parameter set with a fixed seed
//! advscan-sim --scan-interval-ms 100 --scan-window-ms 30 --adv-interval-ms 100 --seed 42
//!
//! # A sweep from a config file, exporting raw samples
//! advscan-sim --config sweep.toml --samples 20000 --output results.json
//! ```

use advscan_simulator::{Sweep, SweepConfig};
use advscan_units::Paramset;
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Discovery latency simulator
///
/// Runs independent discovery samples per parameter set and reports the mean
/// and standard deviation of the discovery latency. Reproducible when the
/// same seed is used.
#[derive(Parser, Debug)]
#[command(name = "advscan-sim")]
#[command(version, about, long_about = None)]
struct Args {
    /// Sweep configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scan interval in milliseconds
    #[arg(long, requires_all = ["scan_window_ms", "adv_interval_ms"])]
    scan_interval_ms: Option<f64>,

    /// Scan window in milliseconds
    #[arg(long, requires_all = ["scan_interval_ms", "adv_interval_ms"])]
    scan_window_ms: Option<f64>,

    /// Advertising interval in milliseconds
    #[arg(long, requires_all = ["scan_interval_ms", "scan_window_ms"])]
    adv_interval_ms: Option<f64>,

    /// Samples per parameter set (overrides config)
    #[arg(short = 'n', long)]
    samples: Option<usize>,

    /// Probability that a fully aligned packet is lost (overrides config)
    #[arg(long)]
    loss: Option<f64>,

    /// Random seed for reproducible results. When omitted, a random seed is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Give up on a sample after this many slots (overrides config).
    /// Defaults to 10000 scan-plus-advertising periods per parameter set.
    #[arg(long)]
    max_slots: Option<u64>,

    /// Worker threads (overrides config)
    #[arg(long)]
    threads: Option<usize>,

    /// Run all samples on one thread
    #[arg(long)]
    sequential: bool,

    /// Write the full report, raw samples included, as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn sweep_config(args: &Args) -> Result<SweepConfig> {
    let mut config = match &args.config {
        Some(path) => SweepConfig::from_file(path)
            .with_context(|| format!("loading sweep config {}", path.display()))?,
        None => SweepConfig::default(),
    };

    if let (Some(t), Some(ts), Some(ta)) =
        (args.scan_interval_ms, args.scan_window_ms, args.adv_interval_ms)
    {
        config
            .paramsets
            .push(Paramset::new(t / 1000.0, ts / 1000.0, ta / 1000.0));
    }
    if let Some(samples) = args.samples {
        config.samples = samples;
    }
    if let Some(loss) = args.loss {
        config.loss_probability = loss;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.max_slots.is_some() {
        config.max_slots = args.max_slots;
    }
    if args.threads.is_some() {
        config.threads = args.threads;
    }
    config.sequential |= args.sequential;

    if config.paramsets.is_empty() {
        bail!("no parameter sets: pass --config or all of --scan-interval-ms, --scan-window-ms, --adv-interval-ms");
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("warn,advscan_simulator=info,advscan_simulation=info")
        }))
        .init();

    let args = Args::parse();
    let sweep = Sweep::new(sweep_config(&args)?);

    info!(
        paramsets = sweep.config().paramsets.len(),
        samples = sweep.config().samples,
        loss_probability = sweep.config().loss_probability,
        seed = sweep.seed(),
        "Starting sweep"
    );

    let report = sweep.run().context("running sweep")?;
    report.print_summary();

    if let Some(path) = &args.output {
        let json = report.to_json().context("serializing report")?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "Report written");
    }

    Ok(())
}
