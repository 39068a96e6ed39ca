//! Summary statistics over a set of samples.

use advscan_core::SampleOutcome;
use serde::Serialize;

/// Aggregated result of a Monte Carlo run, in slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSummary {
    /// Mean slots until discovery.
    pub mean: f64,
    /// Sample (n − 1) standard deviation of the slots until discovery.
    pub stddev: f64,
    /// Raw slot counts, in sample index order.
    pub samples: Vec<u64>,
    /// Engine iterations summed over all samples.
    pub total_steps: u64,
    /// Lost packets summed over all samples.
    pub total_lost_packets: u64,
}

impl SampleSummary {
    /// Summarize completed samples. Needs at least two outcomes for a
    /// defined standard deviation; with fewer it is reported as `NaN`, and
    /// with none the mean is `NaN` as well.
    pub fn from_outcomes(outcomes: &[SampleOutcome]) -> Self {
        let samples: Vec<u64> = outcomes.iter().map(|o| o.slots).collect();
        let (mean, variance) = mean_and_variance(&samples);
        Self {
            mean,
            stddev: variance.sqrt(),
            samples,
            total_steps: outcomes.iter().map(|o| o.steps).sum(),
            total_lost_packets: outcomes.iter().map(|o| o.lost_packets).sum(),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample variance.
    pub fn variance(&self) -> f64 {
        self.stddev * self.stddev
    }

    pub fn min(&self) -> Option<u64> {
        self.samples.iter().copied().min()
    }

    pub fn max(&self) -> Option<u64> {
        self.samples.iter().copied().max()
    }

    /// Nearest-rank percentile, `q` in `[0, 100]`.
    pub fn percentile(&self, q: f64) -> Option<u64> {
        percentile(&self.samples, q)
    }

    /// Average engine iterations per sample.
    pub fn steps_per_sample(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.total_steps as f64 / self.samples.len() as f64
        }
    }

    pub fn print_summary(&self) {
        println!("Samples:      {}", self.len());
        println!("Mean:         {:.2} slots", self.mean);
        println!("Std dev:      {:.2} slots", self.stddev);
        if let (Some(min), Some(max)) = (self.min(), self.max()) {
            println!("Range:        {} .. {} slots", min, max);
        }
        println!("Lost packets: {}", self.total_lost_packets);
        println!("Steps/sample: {:.1}", self.steps_per_sample());
    }
}

/// Nearest-rank percentile of unsorted slot counts, `q` in `[0, 100]`.
pub fn percentile(samples: &[u64], q: f64) -> Option<u64> {
    if samples.is_empty() {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();
    let rank = ((q.clamp(0.0, 100.0) / 100.0) * n as f64).ceil() as usize;
    Some(sorted[rank.clamp(1, n) - 1])
}

fn mean_and_variance(samples: &[u64]) -> (f64, f64) {
    let n = samples.len();
    if n == 0 {
        return (f64::NAN, f64::NAN);
    }
    let mean = samples.iter().map(|&s| s as f64).sum::<f64>() / n as f64;
    if n < 2 {
        return (mean, f64::NAN);
    }
    let squares: f64 = samples
        .iter()
        .map(|&s| {
            let d = s as f64 - mean;
            d * d
        })
        .sum();
    (mean, squares / (n - 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(slots: u64) -> SampleOutcome {
        SampleOutcome {
            slots,
            steps: 2,
            lost_packets: 1,
        }
    }

    fn summary(slots: &[u64]) -> SampleSummary {
        let outcomes: Vec<_> = slots.iter().copied().map(outcome).collect();
        SampleSummary::from_outcomes(&outcomes)
    }

    #[test]
    fn test_mean_and_sample_stddev() {
        let s = summary(&[2, 4, 4, 4, 5, 5, 7, 9]);
        assert!((s.mean - 5.0).abs() < 1e-12);
        // Sum of squared deviations is 32, over n - 1 = 7.
        assert!((s.variance() - 32.0 / 7.0).abs() < 1e-9);
        assert_eq!(s.total_steps, 16);
        assert_eq!(s.total_lost_packets, 8);
        assert!((s.steps_per_sample() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_sample_has_undefined_stddev() {
        let s = summary(&[10]);
        assert_eq!(s.mean, 10.0);
        assert!(s.stddev.is_nan());
    }

    #[test]
    fn test_percentiles() {
        let s = summary(&[15, 20, 35, 40, 50]);
        assert_eq!(s.percentile(0.0), Some(15));
        assert_eq!(s.percentile(30.0), Some(20));
        assert_eq!(s.percentile(40.0), Some(20));
        assert_eq!(s.percentile(50.0), Some(35));
        assert_eq!(s.percentile(100.0), Some(50));
        assert_eq!(s.min(), Some(15));
        assert_eq!(s.max(), Some(50));
    }

    #[test]
    fn test_empty_summary() {
        let s = summary(&[]);
        assert!(s.is_empty());
        assert!(s.mean.is_nan());
        assert!(s.stddev.is_nan());
        assert_eq!(s.percentile(50.0), None);
        assert_eq!(s.steps_per_sample(), 0.0);
    }
}
