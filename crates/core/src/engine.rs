//! Transition Engine.
//!
//! Applies one time jump to every countdown and resolves the transitions it
//! triggers. The order is fixed; later transitions observe earlier ones
//! within the same step:
//!
//! 1. Advance the clock and the two interval countdowns
//! 2. Accrue (or reset) matched slots using the channels held during the step
//! 3. Run the loss trial when the match reaches a full burst
//! 4. Close the scan window
//! 5. Open the next scan window on a scan interval expiry
//! 6. End the burst and arm the gap
//! 7. Run the gap down and start the next burst of the event
//! 8. Start a new advertising event on an advertising interval expiry

use crate::channel::{next_index, Channel};
use crate::params::{countdown, DiscoveryParams};
use crate::random::RandomSource;
use crate::state::DiscoveryState;
use tracing::{debug, trace};

/// Result of applying one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing terminal happened.
    Continue,
    /// A full burst matched but the packet was lost.
    PacketLost,
    /// A full burst matched and the packet was captured. The sample is over.
    Discovered,
}

/// Apply a jump of `step` slots to `state` and resolve the resulting transitions.
///
/// `params` must have passed [`DiscoveryParams::validate`]. On
/// [`StepOutcome::Discovered`] the remaining transitions of the step are not
/// applied; the state is final.
pub fn apply_step<R: RandomSource + ?Sized>(
    state: &mut DiscoveryState,
    params: &DiscoveryParams,
    step: u64,
    rng: &mut R,
) -> StepOutcome {
    let delta = countdown(step);
    let mut outcome = StepOutcome::Continue;

    state.elapsed_slots += step;
    state.scan_interval_timer -= delta;
    state.adv_interval_timer -= delta;

    if state.channels_match() {
        state.matched_slots += step;
        // Equality holds because no step crosses a burst boundary.
        if state.matched_slots == params.adv_burst_length {
            if rng.draw_unit() < params.capture_probability() {
                debug!(
                    elapsed_slots = state.elapsed_slots,
                    channel = ?state.adv_channel,
                    "Packet captured"
                );
                return StepOutcome::Discovered;
            }
            trace!(elapsed_slots = state.elapsed_slots, "Packet lost");
            state.matched_slots = 0;
            outcome = StepOutcome::PacketLost;
        }
    } else {
        state.matched_slots = 0;
    }

    resolve_scanner(state, params, delta);
    resolve_advertiser(state, params, delta, rng);

    outcome
}

fn resolve_scanner(state: &mut DiscoveryState, params: &DiscoveryParams, delta: i64) {
    if state.scan_channel.is_some() {
        state.scan_window_timer -= delta;
        if state.scan_window_timer < 0 {
            state.scan_channel = None;
        }
    }

    if state.scan_interval_timer < 0 {
        let channel = Channel::at(state.scan_channel_idx);
        trace!(elapsed_slots = state.elapsed_slots, %channel, "Scan window opened");
        state.scan_interval_timer = countdown(params.scan_interval);
        state.scan_channel = Some(channel);
        state.scan_channel_idx = next_index(state.scan_channel_idx);
        state.scan_window_timer = countdown(params.scan_window);
    }
}

fn resolve_advertiser<R: RandomSource + ?Sized>(
    state: &mut DiscoveryState,
    params: &DiscoveryParams,
    delta: i64,
    rng: &mut R,
) {
    if state.adv_channel.is_some() {
        state.burst_timer -= delta;
        if state.burst_timer < 0 {
            state.gap_timer = countdown(params.gap_length);
            state.adv_channel = None;
        }
    }

    // A burst that ended in this very step already runs its gap down here.
    if state.gap_is_live() {
        state.gap_timer -= delta;
        if state.gap_timer < 0 {
            start_burst(state, params);
        }
    }

    if state.adv_interval_timer < 0 {
        let jitter = rng.draw_slots(params.jitter_max);
        state.adv_interval_timer = countdown(params.adv_interval.saturating_add(jitter));
        trace!(
            elapsed_slots = state.elapsed_slots,
            jitter,
            "Advertising event"
        );
        start_burst(state, params);
    }
}

fn start_burst(state: &mut DiscoveryState, params: &DiscoveryParams) {
    let channel = Channel::at(state.adv_channel_idx);
    trace!(elapsed_slots = state.elapsed_slots, %channel, "Burst started");
    state.adv_channel = Some(channel);
    state.adv_channel_idx = next_index(state.adv_channel_idx);
    state.burst_timer = countdown(params.adv_burst_length);
}
