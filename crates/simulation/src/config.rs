//! Monte Carlo run configuration.

/// Configuration for [`MonteCarloRunner`](crate::MonteCarloRunner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonteCarloConfig {
    /// Seed from which every per-sample RNG stream is derived.
    pub seed: u64,
    /// Run samples on a rayon pool.
    pub parallel: bool,
    /// Worker threads for a dedicated pool. `None` uses the global rayon pool.
    pub threads: Option<usize>,
    /// Give up on a sample after this many slots. `None` runs every sample
    /// to discovery.
    pub max_slots_per_sample: Option<u64>,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            parallel: true,
            threads: None,
            max_slots_per_sample: None,
        }
    }
}

impl MonteCarloConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn with_max_slots_per_sample(mut self, max_slots: u64) -> Self {
        self.max_slots_per_sample = Some(max_slots);
        self
    }
}
