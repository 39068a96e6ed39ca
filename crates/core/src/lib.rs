//! Core discovery-latency model.
//!
//! This crate provides the discrete-event state machine that estimates how many
//! slots pass before a periodic advertiser and a periodic scanner are tuned to
//! the same channel for a full packet, and the packet survives the loss trial.
//!
//! - [`DiscoveryParams`]: Validated, immutable simulation parameters
//! - [`DiscoveryState`]: The flat per-sample state (countdowns, channels, counters)
//! - [`next_step`]: Timer Set, the size of the next time jump
//! - [`apply_step`]: Transition Engine, applies one jump and resolves transitions
//! - [`SampleRun`] / [`DiscoverySimulation`]: Sample Driver
//! - [`RandomSource`]: The only source of randomness (jitter draws, loss trials)
//!
//! # Architecture
//!
//! ```text
//! SampleRun::new (reset + initial advertising phase)
//!        │
//!        ▼
//! ┌──────────────────────────────────────────────┐
//! │ loop                                         │
//! │   next_step(state)         → step (≥ 1 slot) │
//! │   apply_step(state, step)  → StepOutcome     │
//! └──────────────────────┬───────────────────────┘
//!                        │ Discovered
//!                        ▼
//!                  elapsed slots
//! ```
//!
//! The engine is:
//! - **Synchronous**: No async, no I/O
//! - **Deterministic**: Same parameters + same random draws = same slot count
//! - **Event-driven**: Time advances straight to the next state change, never
//!   past a channel change or a match boundary

mod channel;
mod engine;
mod params;
mod random;
mod sample;
mod state;
mod timer;

pub use channel::{Channel, CHANNELS};
pub use engine::{apply_step, StepOutcome};
pub use params::{
    DiscoveryParams, ParamsError, DEFAULT_BUDGET_PERIODS, DEFAULT_LOSS_PROBABILITY,
};
pub use random::RandomSource;
pub use sample::{DiscoverySimulation, SampleError, SampleOutcome, SampleRun};
pub use state::{AdvertiserPhase, DiscoveryState, ScannerPhase};
pub use timer::{live_timers, next_step, TimerKind};
