//! Mutable per-sample simulation state.

use crate::channel::Channel;

/// What the advertiser is doing at the current instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvertiserPhase {
    /// Waiting for the next advertising interval to expire.
    Idle,
    /// Transmitting a packet on a channel.
    Transmitting(Channel),
    /// Between two bursts of the same advertising event.
    Gap,
}

/// What the scanner is doing at the current instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerPhase {
    /// Between scan windows.
    Idle,
    /// Listening on a channel.
    Scanning(Channel),
}

/// Flat state of one sample.
///
/// Countdowns are signed: a negative value means expired or inactive, a
/// non-negative value means armed. All countdowns advance by the same step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryState {
    pub(crate) scan_interval_timer: i64,
    pub(crate) scan_window_timer: i64,
    pub(crate) adv_interval_timer: i64,
    pub(crate) burst_timer: i64,
    pub(crate) gap_timer: i64,

    pub(crate) scan_channel: Option<Channel>,
    pub(crate) adv_channel: Option<Channel>,

    /// Index of the channel the next scan window opens on.
    pub(crate) scan_channel_idx: usize,
    /// Index of the channel the next burst is sent on.
    pub(crate) adv_channel_idx: usize,

    pub(crate) matched_slots: u64,
    pub(crate) elapsed_slots: u64,
}

impl DiscoveryState {
    /// Fresh state at the start of a sample.
    ///
    /// Every countdown starts at zero except the advertising interval, which
    /// starts at `initial_adv_phase` so samples do not share a phase.
    pub fn reset(initial_adv_phase: i64) -> Self {
        Self {
            adv_interval_timer: initial_adv_phase,
            ..Self::default()
        }
    }

    pub fn scan_interval_timer(&self) -> i64 {
        self.scan_interval_timer
    }

    pub fn scan_window_timer(&self) -> i64 {
        self.scan_window_timer
    }

    pub fn adv_interval_timer(&self) -> i64 {
        self.adv_interval_timer
    }

    pub fn burst_timer(&self) -> i64 {
        self.burst_timer
    }

    pub fn gap_timer(&self) -> i64 {
        self.gap_timer
    }

    pub fn scan_channel(&self) -> Option<Channel> {
        self.scan_channel
    }

    pub fn adv_channel(&self) -> Option<Channel> {
        self.adv_channel
    }

    pub fn scan_channel_idx(&self) -> usize {
        self.scan_channel_idx
    }

    pub fn adv_channel_idx(&self) -> usize {
        self.adv_channel_idx
    }

    /// Consecutive slots both sides have shared a channel.
    pub fn matched_slots(&self) -> u64 {
        self.matched_slots
    }

    /// Slots advanced since the sample began.
    pub fn elapsed_slots(&self) -> u64 {
        self.elapsed_slots
    }

    /// Whether the current advertising event still has channels left to
    /// visit through the gap path.
    ///
    /// An advertising event starts on the channel at the current rotation
    /// index and then hops through the gap path until the rotation index
    /// wraps back to the first channel, which ends the event. The rotation
    /// index at rest is therefore always 0 between events.
    pub fn advertising_event_in_progress(&self) -> bool {
        self.adv_channel_idx != 0
    }

    /// Whether the gap countdown is the live advertiser timer.
    pub(crate) fn gap_is_live(&self) -> bool {
        self.gap_timer >= 0 && self.burst_timer < 0 && self.advertising_event_in_progress()
    }

    pub fn advertiser_phase(&self) -> AdvertiserPhase {
        match self.adv_channel {
            Some(channel) => AdvertiserPhase::Transmitting(channel),
            None if self.gap_is_live() => AdvertiserPhase::Gap,
            None => AdvertiserPhase::Idle,
        }
    }

    pub fn scanner_phase(&self) -> ScannerPhase {
        match self.scan_channel {
            Some(channel) => ScannerPhase::Scanning(channel),
            None => ScannerPhase::Idle,
        }
    }

    /// Whether scanner and advertiser share an active channel.
    pub fn channels_match(&self) -> bool {
        self.adv_channel.is_some() && self.adv_channel == self.scan_channel
    }
}
