//! Discovery-latency sweeps.
//!
//! Runs the Monte Carlo discovery model over one or more physical parameter
//! sets and reports the results.
//!
//! - **Configuration**: TOML sweep files listing parameter sets and run settings
//! - **Sweeps**: One Monte Carlo run per parameter set, sharing a seed
//! - **Reporting**: Terminal summary and JSON export of every raw sample
//!
//! # Example
//!
//! ```ignore
//! use advscan_simulator::{Sweep, SweepConfig};
//!
//! let config = SweepConfig::from_file("sweep.toml")?;
//! let report = Sweep::new(config).run()?;
//! report.print_summary();
//! ```

mod config;
mod report;
mod sweep;

pub use config::{ConfigError, SweepConfig};
pub use report::SweepReport;
pub use sweep::{Sweep, SweepError};
