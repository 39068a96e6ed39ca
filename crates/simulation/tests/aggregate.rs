//! Aggregation behavior across execution modes and seeds.

use advscan_core::{DiscoveryParams, DiscoverySimulation};
use advscan_simulation::{MonteCarloConfig, MonteCarloRunner};
use tracing_test::traced_test;

fn simulation(loss: f64) -> DiscoverySimulation {
    DiscoverySimulation::new(
        DiscoveryParams::new(10, 5, 20, 2, 3, 4).with_loss_probability(loss),
    )
    .unwrap()
}

/// Parallel and sequential runs of the same seed produce identical samples.
#[test]
#[traced_test]
fn test_parallel_matches_sequential() {
    let config = MonteCarloConfig::default().with_seed(2024);

    let parallel = MonteCarloRunner::new(simulation(0.5), config.clone())
        .run_many(2_000)
        .unwrap();
    let sequential = MonteCarloRunner::new(simulation(0.5), config.clone().with_parallel(false))
        .run_many(2_000)
        .unwrap();
    let pooled = MonteCarloRunner::new(simulation(0.5), config.with_threads(3))
        .run_many(2_000)
        .unwrap();

    assert_eq!(parallel.samples, sequential.samples);
    assert_eq!(parallel.samples, pooled.samples);
    assert_eq!(parallel.mean, sequential.mean);
    assert_eq!(parallel.total_steps, sequential.total_steps);
}

#[test]
fn test_different_seeds_diverge() {
    let a = MonteCarloRunner::new(simulation(0.5), MonteCarloConfig::default().with_seed(1))
        .run_many(500)
        .unwrap();
    let b = MonteCarloRunner::new(simulation(0.5), MonteCarloConfig::default().with_seed(2))
        .run_many(500)
        .unwrap();
    assert_ne!(a.samples, b.samples);
}

#[test]
fn test_raw_samples_are_returned_in_order() {
    let runner = MonteCarloRunner::new(simulation(0.5), MonteCarloConfig::default().with_seed(9));
    let summary = runner.run_many(50).unwrap();
    assert_eq!(summary.len(), 50);
    for (i, slots) in summary.samples.iter().enumerate() {
        assert_eq!(*slots, runner.run_one(i).unwrap().slots);
    }
}

/// Reference means from 200k-sample runs: about 25.7 slots without loss
/// and about 67.5 slots at 50% loss. Bands are several standard errors wide.
#[test]
fn test_mean_converges() {
    let lossless = MonteCarloRunner::new(simulation(0.0), MonteCarloConfig::default().with_seed(7))
        .run_many(20_000)
        .unwrap();
    assert!(
        (lossless.mean - 25.7).abs() < 1.0,
        "lossless mean {}",
        lossless.mean
    );
    assert!((lossless.stddev - 17.4).abs() < 1.5);
    assert_eq!(lossless.total_lost_packets, 0);

    let lossy = MonteCarloRunner::new(simulation(0.5), MonteCarloConfig::default().with_seed(7))
        .run_many(20_000)
        .unwrap();
    assert!((lossy.mean - 67.5).abs() < 3.0, "lossy mean {}", lossy.mean);
    assert!(lossy.total_lost_packets > 0);
    assert!(lossy.mean > lossless.mean);
}
