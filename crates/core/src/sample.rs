//! Sample Driver.
//!
//! Resets state, seeds the initial advertising phase, and alternates the
//! Timer Set and the Transition Engine until a packet is captured.

use crate::engine::{apply_step, StepOutcome};
use crate::params::{countdown, DiscoveryParams, ParamsError};
use crate::random::RandomSource;
use crate::state::DiscoveryState;
use crate::timer::next_step;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors from a bounded sample.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    /// The slot budget ran out before discovery.
    #[error("no discovery within {elapsed_slots} slots ({lost_packets} packets lost)")]
    BudgetExhausted { elapsed_slots: u64, lost_packets: u64 },
}

/// Result of a completed sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleOutcome {
    /// Slots elapsed until discovery.
    pub slots: u64,
    /// Timer Set + Transition Engine iterations.
    pub steps: u64,
    /// Fully matched packets that failed the loss trial.
    pub lost_packets: u64,
}

/// One in-flight sample.
///
/// Owns the state of a single sample and borrows the random source for its
/// lifetime. Created through [`DiscoverySimulation::start_sample`].
pub struct SampleRun<'a, R: RandomSource + ?Sized> {
    params: &'a DiscoveryParams,
    rng: &'a mut R,
    state: DiscoveryState,
    steps: u64,
    lost_packets: u64,
    discovered: bool,
}

impl<'a, R: RandomSource + ?Sized> SampleRun<'a, R> {
    fn new(params: &'a DiscoveryParams, rng: &'a mut R) -> Self {
        let initial_phase = rng.draw_slots(params.adv_interval);
        Self {
            params,
            rng,
            state: DiscoveryState::reset(countdown(initial_phase)),
            steps: 0,
            lost_packets: 0,
            discovered: false,
        }
    }

    /// Advance to the next state change.
    ///
    /// Once the sample has discovered, further calls leave the state untouched
    /// and keep returning [`StepOutcome::Discovered`].
    pub fn step(&mut self) -> StepOutcome {
        if self.discovered {
            return StepOutcome::Discovered;
        }

        let step = next_step(&self.state);
        let outcome = apply_step(&mut self.state, self.params, step, &mut *self.rng);
        self.steps += 1;

        match outcome {
            StepOutcome::Discovered => self.discovered = true,
            StepOutcome::PacketLost => self.lost_packets += 1,
            StepOutcome::Continue => {}
        }
        outcome
    }

    pub fn state(&self) -> &DiscoveryState {
        &self.state
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn lost_packets(&self) -> u64 {
        self.lost_packets
    }

    pub fn is_discovered(&self) -> bool {
        self.discovered
    }

    /// Step until discovery. Never returns if discovery is impossible.
    pub fn run_to_discovery(mut self) -> SampleOutcome {
        while self.step() != StepOutcome::Discovered {}
        self.outcome()
    }

    /// Step until discovery or until `max_slots` slots have elapsed.
    pub fn run_bounded(mut self, max_slots: u64) -> Result<SampleOutcome, SampleError> {
        loop {
            if self.step() == StepOutcome::Discovered {
                return Ok(self.outcome());
            }
            if self.state.elapsed_slots >= max_slots {
                trace!(
                    elapsed_slots = self.state.elapsed_slots,
                    steps = self.steps,
                    "Slot budget exhausted"
                );
                return Err(SampleError::BudgetExhausted {
                    elapsed_slots: self.state.elapsed_slots,
                    lost_packets: self.lost_packets,
                });
            }
        }
    }

    fn outcome(&self) -> SampleOutcome {
        SampleOutcome {
            slots: self.state.elapsed_slots,
            steps: self.steps,
            lost_packets: self.lost_packets,
        }
    }
}

/// A validated discovery model that produces independent samples.
#[derive(Debug, Clone)]
pub struct DiscoverySimulation {
    params: DiscoveryParams,
}

impl DiscoverySimulation {
    /// Create a simulation, rejecting malformed parameters.
    pub fn new(params: DiscoveryParams) -> Result<Self, ParamsError> {
        params.validate()?;
        debug!(?params, "Discovery simulation configured");
        Ok(Self { params })
    }

    pub fn params(&self) -> &DiscoveryParams {
        &self.params
    }

    /// Reset state and begin a sample driven by `rng`.
    pub fn start_sample<'a, R: RandomSource + ?Sized>(
        &'a self,
        rng: &'a mut R,
    ) -> SampleRun<'a, R> {
        SampleRun::new(&self.params, rng)
    }

    /// Slots until discovery for one sample.
    ///
    /// Loops until a packet is captured; with `loss_probability == 1.0` it
    /// never returns. Use [`run_sample_bounded`](Self::run_sample_bounded)
    /// when termination must be guaranteed.
    pub fn run_sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> u64 {
        self.start_sample(rng).run_to_discovery().slots
    }

    /// One sample, giving up once `max_slots` slots have elapsed.
    pub fn run_sample_bounded<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        max_slots: u64,
    ) -> Result<SampleOutcome, SampleError> {
        self.start_sample(rng).run_bounded(max_slots)
    }
}
