//! Seconds ⇄ slots.

use crate::UnitsError;

/// Duration of one slot in seconds (0.625 µs).
pub const SECONDS_PER_SLOT: f64 = 0.625e-6;

/// Advertising packet size in bytes.
pub const PDU_BYTES: u32 = 20;

/// Radio bit rate in bits per second.
pub const BIT_RATE_BPS: u32 = 1_000_000;

/// Spacing between burst starts within one advertising event, in seconds.
pub const ADV_EVENT_SPACING: f64 = 0.01;

/// Width of the random advertising delay window, in seconds.
pub const JITTER_WINDOW: f64 = 0.01;

/// Convert seconds to a whole number of slots, rounding half to even.
pub fn seconds_to_slots(name: &'static str, seconds: f64) -> Result<u64, UnitsError> {
    if !seconds.is_finite() {
        return Err(UnitsError::NonFinite { name, seconds });
    }
    if seconds < 0.0 {
        return Err(UnitsError::NegativeDuration { name, seconds });
    }
    Ok(round_slots(seconds / SECONDS_PER_SLOT))
}

/// Convert a (possibly fractional) slot count to seconds.
pub fn slots_to_seconds(slots: f64) -> f64 {
    slots * SECONDS_PER_SLOT
}

/// Airtime of one advertising packet in seconds.
pub(crate) fn burst_seconds() -> f64 {
    f64::from(PDU_BYTES * 8) / f64::from(BIT_RATE_BPS)
}

fn round_slots(slots: f64) -> u64 {
    // Saturates for values beyond u64; the core rejects those as overflow.
    slots.round_ties_even() as u64
}
