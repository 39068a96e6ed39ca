//! Sweep over parameter sets.

use crate::config::SweepConfig;
use crate::report::SweepReport;
use advscan_simulation::MonteCarloConfig;
use advscan_units::{calc_mean_for_paramset, derive_params, Paramset, ParamsetResult, UnitsError};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

/// Errors from running a sweep.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("no parameter sets to evaluate")]
    NoParamsets,

    #[error("parameter set {index} failed: {source}")]
    Paramset {
        index: usize,
        paramset: Paramset,
        #[source]
        source: UnitsError,
    },
}

/// A configured sweep with its seed fixed.
#[derive(Debug, Clone)]
pub struct Sweep {
    config: SweepConfig,
    seed: u64,
}

impl Sweep {
    /// Fix the seed (random when the configuration has none).
    pub fn new(config: SweepConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self { config, seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Slot budget for one parameter set: the configured cap, or one scaled
    /// to the parameter set's periods.
    pub fn max_slots_for(&self, paramset: &Paramset) -> Result<u64, UnitsError> {
        match self.config.max_slots {
            Some(max_slots) => Ok(max_slots),
            None => {
                let params = derive_params(paramset, self.config.loss_probability)?;
                Ok(params.default_slot_budget())
            }
        }
    }

    fn evaluate(&self, paramset: &Paramset) -> Result<ParamsetResult, UnitsError> {
        let max_slots = self.max_slots_for(paramset)?;
        debug!(max_slots, "Per-sample slot budget");
        let config = MonteCarloConfig {
            seed: self.seed,
            parallel: !self.config.sequential,
            threads: self.config.threads,
            max_slots_per_sample: Some(max_slots),
        };
        calc_mean_for_paramset(
            paramset,
            self.config.samples,
            self.config.loss_probability,
            config,
        )
    }

    /// Evaluate every parameter set in order.
    pub fn run(&self) -> Result<SweepReport, SweepError> {
        if self.config.paramsets.is_empty() {
            return Err(SweepError::NoParamsets);
        }

        let started = Instant::now();
        let mut results = Vec::with_capacity(self.config.paramsets.len());
        for (index, paramset) in self.config.paramsets.iter().enumerate() {
            info!(
                index,
                scan_interval = paramset.scan_interval,
                scan_window = paramset.scan_window,
                adv_interval = paramset.adv_interval,
                "Evaluating parameter set"
            );
            let result = self.evaluate(paramset).map_err(|source| SweepError::Paramset {
                index,
                paramset: *paramset,
                source,
            })?;
            results.push(result);
        }

        Ok(SweepReport {
            seed: self.seed,
            samples_per_paramset: self.config.samples,
            loss_probability: self.config.loss_probability,
            results,
            wall_duration: started.elapsed(),
        })
    }
}
