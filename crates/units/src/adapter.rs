//! Physical parameter sets and the seconds-level entry point.

use crate::convert::{
    burst_seconds, seconds_to_slots, slots_to_seconds, ADV_EVENT_SPACING, JITTER_WINDOW,
};
use crate::UnitsError;
use advscan_core::{DiscoveryParams, DiscoverySimulation};
use advscan_simulation::{MonteCarloConfig, MonteCarloRunner};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Scanner and advertiser timing in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paramset {
    pub scan_interval: f64,
    pub scan_window: f64,
    pub adv_interval: f64,
}

impl Paramset {
    pub fn new(scan_interval: f64, scan_window: f64, adv_interval: f64) -> Self {
        Self {
            scan_interval,
            scan_window,
            adv_interval,
        }
    }
}

/// Discovery latency for one parameter set, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamsetResult {
    pub paramset: Paramset,
    pub mean_seconds: f64,
    pub stddev_seconds: f64,
    /// Raw slot counts, one per sample.
    pub samples: Vec<u64>,
}

/// Slot-level parameters for a physical parameter set.
///
/// Burst, gap, and jitter lengths come from the fixed packet size, bit rate,
/// event spacing, and jitter window.
pub fn derive_params(
    paramset: &Paramset,
    loss_probability: f64,
) -> Result<DiscoveryParams, UnitsError> {
    let burst = burst_seconds();
    let params = DiscoveryParams {
        scan_interval: seconds_to_slots("scan interval", paramset.scan_interval)?,
        scan_window: seconds_to_slots("scan window", paramset.scan_window)?,
        adv_interval: seconds_to_slots("advertising interval", paramset.adv_interval)?,
        adv_burst_length: seconds_to_slots("burst length", burst)?,
        gap_length: seconds_to_slots("gap length", ADV_EVENT_SPACING - burst)?,
        jitter_max: seconds_to_slots("jitter window", JITTER_WINDOW)?,
        loss_probability,
    };
    params.validate()?;
    Ok(params)
}

/// Mean and standard deviation of the discovery latency for `paramset`, in seconds.
pub fn calc_mean_for_paramset(
    paramset: &Paramset,
    samples: usize,
    loss_probability: f64,
    config: MonteCarloConfig,
) -> Result<ParamsetResult, UnitsError> {
    let params = derive_params(paramset, loss_probability)?;
    debug!(?paramset, ?params, "Converted parameter set to slots");

    let runner = MonteCarloRunner::new(DiscoverySimulation::new(params)?, config);
    let summary = runner.run_many(samples)?;

    Ok(ParamsetResult {
        paramset: *paramset,
        mean_seconds: slots_to_seconds(summary.mean),
        stddev_seconds: slots_to_seconds(summary.stddev),
        samples: summary.samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_slot_lengths() {
        let params = derive_params(&Paramset::new(0.1, 0.03, 0.1), 0.85).unwrap();
        assert_eq!(params.scan_interval, 160_000);
        assert_eq!(params.scan_window, 48_000);
        assert_eq!(params.adv_interval, 160_000);
        assert_eq!(params.adv_burst_length, 256);
        assert_eq!(params.gap_length, 15_744);
        assert_eq!(params.jitter_max, 16_000);
        assert_eq!(params.loss_probability, 0.85);
    }

    #[test]
    fn test_rejects_sub_slot_interval() {
        let err = derive_params(&Paramset::new(0.1, 1e-9, 0.1), 0.85).unwrap_err();
        assert!(matches!(
            err,
            UnitsError::Params(advscan_core::ParamsError::ZeroScanWindow)
        ));
    }

    #[test]
    fn test_rejects_window_shorter_than_packet() {
        // 100 µs window against a 160 µs packet.
        let err = derive_params(&Paramset::new(0.1, 0.0001, 0.1), 0.85).unwrap_err();
        assert!(matches!(
            err,
            UnitsError::Params(advscan_core::ParamsError::BurstExceedsWindow {
                burst: 256,
                window: 160
            })
        ));
    }

    #[test]
    fn test_rejects_negative_interval() {
        let err = derive_params(&Paramset::new(-0.1, 0.03, 0.1), 0.85).unwrap_err();
        assert!(matches!(err, UnitsError::NegativeDuration { .. }));
    }
}
