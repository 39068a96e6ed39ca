//! Monte Carlo aggregation over independent discovery samples.
//!
//! Repeats [`DiscoverySimulation`](advscan_core::DiscoverySimulation)
//! samples and reduces the slot counts to a mean and a sample standard
//! deviation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  MonteCarloRunner                       │
//! │                                                         │
//! │   sample i ──► ChaCha8Rng(seed, stream = i)             │
//! │                     │                                   │
//! │                     ▼                                   │
//! │   DiscoverySimulation::start_sample ─► SampleOutcome    │
//! │                                                         │
//! │   (rayon par_iter over i, or a plain loop)              │
//! └────────────────────────┬────────────────────────────────┘
//!                          ▼
//!                   SampleSummary
//!            mean · stddev · raw samples
//! ```
//!
//! Every sample owns an RNG stream derived from the run seed and its index,
//! so a run is reproducible and yields the same samples whether it runs on
//! one thread or many.

mod config;
mod runner;
mod summary;

pub use config::MonteCarloConfig;
pub use runner::{MonteCarloError, MonteCarloRunner};
pub use summary::{percentile, SampleSummary};
