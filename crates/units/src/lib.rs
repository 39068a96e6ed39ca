//! Physical-time adapter.
//!
//! Maps seconds onto the slot grid of the discovery model, derives the
//! packet, gap, and jitter lengths from fixed radio constants, runs the
//! Monte Carlo aggregation, and maps the result back into seconds.
//!
//! ```ignore
//! use advscan_simulation::MonteCarloConfig;
//! use advscan_units::{calc_mean_for_paramset, Paramset};
//!
//! let paramset = Paramset::new(0.1, 0.03, 0.1);
//! let result = calc_mean_for_paramset(&paramset, 10_000, 0.85, MonteCarloConfig::default())?;
//! println!("mean discovery latency: {:.3}s", result.mean_seconds);
//! ```

mod adapter;
mod convert;

pub use adapter::{calc_mean_for_paramset, derive_params, Paramset, ParamsetResult};
pub use convert::{
    seconds_to_slots, slots_to_seconds, ADV_EVENT_SPACING, BIT_RATE_BPS, JITTER_WINDOW,
    PDU_BYTES, SECONDS_PER_SLOT,
};

use advscan_core::ParamsError;
use advscan_simulation::MonteCarloError;
use thiserror::Error;

/// Errors from the physical-time adapter.
#[derive(Debug, Error)]
pub enum UnitsError {
    /// A duration was negative.
    #[error("{name} must not be negative, got {seconds}s")]
    NegativeDuration { name: &'static str, seconds: f64 },

    /// A duration was NaN or infinite.
    #[error("{name} must be finite, got {seconds}")]
    NonFinite { name: &'static str, seconds: f64 },

    /// The converted slot parameters were rejected.
    #[error("invalid slot parameters: {0}")]
    Params(#[from] ParamsError),

    /// The Monte Carlo run failed.
    #[error(transparent)]
    MonteCarlo(#[from] MonteCarloError),
}
