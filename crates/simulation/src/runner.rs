//! Monte Carlo runner.

use crate::config::MonteCarloConfig;
use crate::summary::SampleSummary;
use advscan_core::{DiscoverySimulation, SampleError, SampleOutcome};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

/// Errors from a Monte Carlo run.
#[derive(Debug, Error)]
pub enum MonteCarloError {
    /// A sample standard deviation needs at least two samples.
    #[error("at least 2 samples are required, got {requested}")]
    TooFewSamples { requested: usize },

    /// A sample hit the per-sample slot budget without discovery.
    #[error("sample {sample_index} found no discovery within {elapsed_slots} slots")]
    SampleBudgetExhausted {
        sample_index: usize,
        elapsed_slots: u64,
    },

    #[error("failed to build rayon thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Repeats independent samples of a [`DiscoverySimulation`].
#[derive(Debug, Clone)]
pub struct MonteCarloRunner {
    simulation: DiscoverySimulation,
    config: MonteCarloConfig,
}

impl MonteCarloRunner {
    pub fn new(simulation: DiscoverySimulation, config: MonteCarloConfig) -> Self {
        Self { simulation, config }
    }

    pub fn simulation(&self) -> &DiscoverySimulation {
        &self.simulation
    }

    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// RNG for sample `index`: the run seed on stream `index`.
    pub fn sample_rng(&self, index: usize) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        rng.set_stream(index as u64);
        rng
    }

    /// Run sample `index` on its own RNG stream.
    pub fn run_one(&self, index: usize) -> Result<SampleOutcome, MonteCarloError> {
        let mut rng = self.sample_rng(index);
        let run = self.simulation.start_sample(&mut rng);
        match self.config.max_slots_per_sample {
            None => Ok(run.run_to_discovery()),
            Some(max_slots) => run.run_bounded(max_slots).map_err(|err| match err {
                SampleError::BudgetExhausted { elapsed_slots, .. } => {
                    MonteCarloError::SampleBudgetExhausted {
                        sample_index: index,
                        elapsed_slots,
                    }
                }
            }),
        }
    }

    /// Run `sample_count` samples and summarize them.
    pub fn run_many(&self, sample_count: usize) -> Result<SampleSummary, MonteCarloError> {
        if sample_count < 2 {
            return Err(MonteCarloError::TooFewSamples {
                requested: sample_count,
            });
        }

        info!(
            samples = sample_count,
            seed = self.config.seed,
            parallel = self.config.parallel,
            threads = ?self.config.threads,
            "Starting Monte Carlo run"
        );
        let started = Instant::now();

        let outcomes = if !self.config.parallel {
            (0..sample_count)
                .map(|i| self.run_one(i))
                .collect::<Result<Vec<_>, _>>()?
        } else if let Some(threads) = self.config.threads {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("montecarlo-{}", i))
                .build()?;
            pool.install(|| self.run_parallel(sample_count))?
        } else {
            self.run_parallel(sample_count)?
        };

        let summary = SampleSummary::from_outcomes(&outcomes);
        debug!(
            total_steps = summary.total_steps,
            lost_packets = summary.total_lost_packets,
            "Samples complete"
        );
        info!(
            mean_slots = summary.mean,
            stddev_slots = summary.stddev,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Monte Carlo run complete"
        );
        Ok(summary)
    }

    fn run_parallel(&self, sample_count: usize) -> Result<Vec<SampleOutcome>, MonteCarloError> {
        (0..sample_count)
            .into_par_iter()
            .map(|i| self.run_one(i))
            .collect()
    }
}
