//! Simulation parameters and their validation.

use thiserror::Error;

/// Default probability that a fully aligned packet is not received.
pub const DEFAULT_LOSS_PROBABILITY: f64 = 0.85;

/// Scan-plus-advertising periods a sample may run before it is abandoned,
/// see [`DiscoveryParams::default_slot_budget`].
pub const DEFAULT_BUDGET_PERIODS: u64 = 10_000;

/// Errors raised when a parameter set cannot describe a terminating simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    /// Scan interval of zero slots.
    #[error("scan interval must be at least one slot")]
    ZeroScanInterval,

    /// Scan window of zero slots.
    #[error("scan window must be at least one slot")]
    ZeroScanWindow,

    /// Advertising interval of zero slots.
    #[error("advertising interval must be at least one slot")]
    ZeroAdvInterval,

    /// Advertising burst of zero slots.
    #[error("advertising burst length must be at least one slot")]
    ZeroBurstLength,

    /// Scan window longer than the scan interval it sits in.
    #[error("scan window ({window} slots) exceeds scan interval ({interval} slots)")]
    WindowExceedsInterval { window: u64, interval: u64 },

    /// Burst longer than the slots one scan window holds its channel, so no
    /// burst can ever be fully matched.
    #[error("advertising burst ({burst} slots) cannot fit in a scan window ({window} slots)")]
    BurstExceedsWindow { burst: u64, window: u64 },

    /// Loss probability is NaN or outside `[0, 1]`.
    #[error("loss probability must be within [0, 1], got {0}")]
    InvalidLossProbability(f64),

    /// A countdown reload does not fit in a signed 64-bit slot counter.
    #[error("{name} does not fit in a slot countdown")]
    TimerOverflow { name: &'static str },
}

/// Immutable parameters of one discovery simulation, all in slots except
/// `loss_probability`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryParams {
    /// Scan interval (T): period between scan window starts.
    pub scan_interval: u64,
    /// Scan window (Ts): listening time within each scan interval.
    pub scan_window: u64,
    /// Advertising interval (Ta): nominal period between advertising events.
    pub adv_interval: u64,
    /// Slots needed to transmit one full packet.
    pub adv_burst_length: u64,
    /// Slots between the end of one burst and the start of the next.
    pub gap_length: u64,
    /// Upper bound (inclusive) of the uniform jitter added to each advertising interval.
    pub jitter_max: u64,
    /// Probability that a fully matched packet is not captured.
    pub loss_probability: f64,
}

impl DiscoveryParams {
    /// Create parameters with the default loss probability.
    pub fn new(
        scan_interval: u64,
        scan_window: u64,
        adv_interval: u64,
        adv_burst_length: u64,
        gap_length: u64,
        jitter_max: u64,
    ) -> Self {
        Self {
            scan_interval,
            scan_window,
            adv_interval,
            adv_burst_length,
            gap_length,
            jitter_max,
            loss_probability: DEFAULT_LOSS_PROBABILITY,
        }
    }

    /// Set the loss probability.
    pub fn with_loss_probability(mut self, loss_probability: f64) -> Self {
        self.loss_probability = loss_probability;
        self
    }

    /// Set the advertising jitter bound.
    pub fn with_jitter_max(mut self, jitter_max: u64) -> Self {
        self.jitter_max = jitter_max;
        self
    }

    /// Probability that a fully matched packet is captured.
    pub fn capture_probability(&self) -> f64 {
        1.0 - self.loss_probability
    }

    /// Per-sample slot budget used when the caller sets none:
    /// [`DEFAULT_BUDGET_PERIODS`] times the scan interval plus the longest
    /// advertising interval.
    pub fn default_slot_budget(&self) -> u64 {
        self.scan_interval
            .saturating_add(self.adv_interval)
            .saturating_add(self.jitter_max)
            .saturating_mul(DEFAULT_BUDGET_PERIODS)
    }

    /// Check that the parameters describe a well-formed simulation.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.scan_interval == 0 {
            return Err(ParamsError::ZeroScanInterval);
        }
        if self.scan_window == 0 {
            return Err(ParamsError::ZeroScanWindow);
        }
        if self.adv_interval == 0 {
            return Err(ParamsError::ZeroAdvInterval);
        }
        if self.adv_burst_length == 0 {
            return Err(ParamsError::ZeroBurstLength);
        }
        if self.scan_window > self.scan_interval {
            return Err(ParamsError::WindowExceedsInterval {
                window: self.scan_window,
                interval: self.scan_interval,
            });
        }
        // A window holds its channel for `scan_window + 1` slots.
        if self.adv_burst_length > self.scan_window.saturating_add(1) {
            return Err(ParamsError::BurstExceedsWindow {
                burst: self.adv_burst_length,
                window: self.scan_window,
            });
        }
        if !(0.0..=1.0).contains(&self.loss_probability) {
            // NaN fails `contains` as well.
            return Err(ParamsError::InvalidLossProbability(self.loss_probability));
        }

        check_countdown("scan interval", self.scan_interval)?;
        check_countdown("advertising burst length", self.adv_burst_length)?;
        check_countdown("gap length", self.gap_length)?;
        let max_adv_reload = self
            .adv_interval
            .checked_add(self.jitter_max)
            .ok_or(ParamsError::TimerOverflow {
                name: "advertising interval plus jitter",
            })?;
        check_countdown("advertising interval plus jitter", max_adv_reload)?;

        Ok(())
    }
}

fn check_countdown(name: &'static str, value: u64) -> Result<(), ParamsError> {
    i64::try_from(value)
        .map(|_| ())
        .map_err(|_| ParamsError::TimerOverflow { name })
}

/// Convert a validated slot count into a countdown value.
pub(crate) fn countdown(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
