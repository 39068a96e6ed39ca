//! Sweep results.

use advscan_simulation::percentile;
use advscan_units::{slots_to_seconds, ParamsetResult};
use serde::Serialize;
use std::time::Duration;

/// Results of a sweep, one entry per parameter set.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub seed: u64,
    pub samples_per_paramset: usize,
    pub loss_probability: f64,
    pub results: Vec<ParamsetResult>,
    #[serde(skip)]
    pub wall_duration: Duration,
}

/// Percentile of a result's raw samples, in milliseconds.
fn percentile_ms(result: &ParamsetResult, q: f64) -> f64 {
    percentile(&result.samples, q)
        .map(|slots| slots_to_seconds(slots as f64) * 1000.0)
        .unwrap_or(f64::NAN)
}

impl SweepReport {
    /// Serialize the full report, raw samples included.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn print_summary(&self) {
        println!("\n═══════════════════════════════════════════");
        println!("        DISCOVERY LATENCY REPORT           ");
        println!("═══════════════════════════════════════════");
        println!();
        println!("Seed:              {}", self.seed);
        println!("Samples/paramset:  {}", self.samples_per_paramset);
        println!("Loss probability:  {:.3}", self.loss_probability);
        println!();

        for result in &self.results {
            let p = &result.paramset;
            println!(
                "T = {:.4}s  Ts = {:.4}s  Ta = {:.4}s",
                p.scan_interval, p.scan_window, p.adv_interval
            );
            println!("  Mean:    {:.3}ms", result.mean_seconds * 1000.0);
            println!("  Std dev: {:.3}ms", result.stddev_seconds * 1000.0);
            println!("  P50:     {:.3}ms", percentile_ms(result, 50.0));
            println!("  P90:     {:.3}ms", percentile_ms(result, 90.0));
            println!("  P99:     {:.3}ms", percentile_ms(result, 99.0));
            println!();
        }

        println!("Duration: {:.2}s", self.wall_duration.as_secs_f64());
        println!("═══════════════════════════════════════════\n");
    }
}
