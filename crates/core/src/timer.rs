//! Timer Set: next-event computation.
//!
//! Each countdown is a candidate for the next state change, gated by a
//! liveness predicate. The step is the smallest live countdown, floored at
//! one slot, so a jump never skips a channel change or a match boundary.

use crate::state::DiscoveryState;

/// Countdowns tracked by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Remaining slots of the burst being transmitted.
    Burst,
    /// Remaining slots before the next burst of the same advertising event.
    Gap,
    /// Remaining slots before the next advertising event.
    AdvInterval,
    /// Remaining slots before the next scan window opens.
    ScanInterval,
    /// Remaining slots of the open scan window.
    ScanWindow,
}

/// Live countdowns and their remaining slots.
pub fn live_timers(state: &DiscoveryState) -> impl Iterator<Item = (TimerKind, i64)> {
    let candidates = [
        (
            TimerKind::Burst,
            state.adv_channel.is_some().then_some(state.burst_timer),
        ),
        (
            TimerKind::Gap,
            state.gap_is_live().then_some(state.gap_timer),
        ),
        (
            TimerKind::AdvInterval,
            (state.adv_interval_timer >= 0).then_some(state.adv_interval_timer),
        ),
        (
            TimerKind::ScanInterval,
            (state.scan_interval_timer >= 0).then_some(state.scan_interval_timer),
        ),
        (
            TimerKind::ScanWindow,
            (state.scan_window_timer >= 0).then_some(state.scan_window_timer),
        ),
    ];
    candidates
        .into_iter()
        .filter_map(|(kind, remaining)| remaining.map(|r| (kind, r)))
}

/// Size of the next time jump in slots. Never less than one.
pub fn next_step(state: &DiscoveryState) -> u64 {
    live_timers(state)
        .map(|(_, remaining)| remaining)
        .min()
        .map_or(1, |min| u64::try_from(min).unwrap_or(0).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Channel;

    fn kinds(state: &DiscoveryState) -> Vec<TimerKind> {
        live_timers(state).map(|(kind, _)| kind).collect()
    }

    #[test]
    fn test_reset_state_steps_one_slot() {
        let state = DiscoveryState::reset(12);
        assert_eq!(next_step(&state), 1);
        assert_eq!(
            kinds(&state),
            vec![
                TimerKind::AdvInterval,
                TimerKind::ScanInterval,
                TimerKind::ScanWindow
            ]
        );
    }

    #[test]
    fn test_minimum_live_timer() {
        let mut state = DiscoveryState::reset(12);
        state.scan_interval_timer = 9;
        state.scan_window_timer = 4;
        assert_eq!(next_step(&state), 4);

        state.scan_window_timer = -1;
        assert_eq!(next_step(&state), 9);
    }

    #[test]
    fn test_burst_only_live_while_transmitting() {
        let mut state = DiscoveryState::reset(50);
        state.scan_interval_timer = 40;
        state.scan_window_timer = -1;
        state.burst_timer = 2;
        assert_eq!(next_step(&state), 40, "burst ignored while not transmitting");

        state.adv_channel = Some(Channel(37));
        state.adv_channel_idx = 1;
        assert_eq!(next_step(&state), 2);
    }

    #[test]
    fn test_gap_requires_event_in_progress() {
        let mut state = DiscoveryState::reset(50);
        state.scan_interval_timer = 40;
        state.scan_window_timer = -1;
        state.burst_timer = -1;
        state.gap_timer = 3;

        // Rotation index at rest: the event is over.
        assert_eq!(next_step(&state), 40);
        assert!(!kinds(&state).contains(&TimerKind::Gap));

        state.adv_channel_idx = 1;
        assert_eq!(next_step(&state), 3);
        assert!(kinds(&state).contains(&TimerKind::Gap));
    }

    #[test]
    fn test_zero_countdown_floors_to_one() {
        let mut state = DiscoveryState::reset(0);
        state.scan_interval_timer = 10;
        state.scan_window_timer = -1;
        assert_eq!(next_step(&state), 1);
    }

    #[test]
    fn test_no_live_timers_steps_one_slot() {
        let mut state = DiscoveryState::reset(-1);
        state.scan_interval_timer = -1;
        state.scan_window_timer = -1;
        assert_eq!(live_timers(&state).count(), 0);
        assert_eq!(next_step(&state), 1);
    }
}
