//! Invariants that hold across every step of a sample.

use advscan_core::{
    next_step, Channel, DiscoveryParams, DiscoverySimulation, StepOutcome, CHANNELS,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const STEPS: usize = 20_000;

/// Total loss keeps a sample alive for as many steps as a test needs.
fn never_discovers() -> DiscoverySimulation {
    DiscoverySimulation::new(
        DiscoveryParams::new(37, 11, 53, 3, 5, 9).with_loss_probability(1.0),
    )
    .unwrap()
}

#[test]
fn test_step_floor_and_synchronous_clock() {
    let sim = never_discovers();
    for seed in 0..8 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut run = sim.start_sample(&mut rng);
        for _ in 0..STEPS {
            let before = run.state().clone();
            let step = next_step(&before);
            assert!(step >= 1, "step floor violated at {before:?}");

            run.step();
            let after = run.state();
            assert_eq!(after.elapsed_slots(), before.elapsed_slots() + step);
        }
    }
}

#[test]
fn test_channels_rotate_round_robin() {
    let sim = never_discovers();
    let mut rng = ChaCha8Rng::seed_from_u64(1234);
    let mut run = sim.start_sample(&mut rng);

    let mut scan_opened = Vec::new();
    let mut bursts = Vec::new();
    let mut prev = run.state().clone();
    for _ in 0..STEPS {
        run.step();
        let state = run.state();
        if state.scan_channel_idx() != prev.scan_channel_idx() {
            scan_opened.push(state.scan_channel().expect("window opened"));
        }
        if state.adv_channel_idx() != prev.adv_channel_idx() {
            bursts.push(state.adv_channel().expect("burst started"));
        }
        prev = state.clone();
    }

    for sequence in [&scan_opened, &bursts] {
        assert!(sequence.len() > 30);
        assert_eq!(sequence[0], Channel(37));
        for (i, channel) in sequence.iter().enumerate() {
            assert_eq!(*channel, CHANNELS[i % CHANNELS.len()]);
        }
    }
}

#[test]
fn test_match_never_overshoots_burst() {
    let sim = never_discovers();
    let burst = sim.params().adv_burst_length;
    for seed in 0..8 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut run = sim.start_sample(&mut rng);
        let mut full_matches = 0;
        for _ in 0..STEPS {
            if run.step() == StepOutcome::PacketLost {
                full_matches += 1;
            }
            assert!(run.state().matched_slots() <= burst);
        }
        assert_eq!(full_matches, run.lost_packets());
        assert!(full_matches > 0);
    }
}

#[test]
fn test_matched_slots_reset_on_mismatch() {
    let sim = never_discovers();
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let mut run = sim.start_sample(&mut rng);
    for _ in 0..STEPS {
        let matched_before = run.state().channels_match();
        run.step();
        if !matched_before {
            assert_eq!(run.state().matched_slots(), 0);
        }
    }
}

#[test]
fn test_zero_loss_ends_at_first_full_overlap() {
    let sim = DiscoverySimulation::new(
        DiscoveryParams::new(37, 11, 53, 3, 5, 9).with_loss_probability(0.0),
    )
    .unwrap();

    for seed in 0..32 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut run = sim.start_sample(&mut rng);
        loop {
            match run.step() {
                StepOutcome::Discovered => break,
                StepOutcome::PacketLost => panic!("zero loss never loses a packet"),
                StepOutcome::Continue => {}
            }
        }
        assert_eq!(run.state().matched_slots(), 3);
        assert_eq!(run.lost_packets(), 0);
    }
}

#[test]
fn test_total_loss_needs_budget() {
    let sim = never_discovers();
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    assert!(sim.run_sample_bounded(&mut rng, 50_000).is_err());
}
