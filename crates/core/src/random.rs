//! Randomness abstraction.
//!
//! The engine draws randomness in exactly two places: the advertising phase
//! (initial offset and per-interval jitter) and the packet loss trial. This
//! trait is the seam between them and the random source:
//! - Production: any [`rand::Rng`], typically a seeded `ChaCha8Rng`
//! - Tests: a scripted source replaying a fixed draw sequence

use rand::Rng;

/// Source of the random draws consumed by a sample.
pub trait RandomSource {
    /// Uniform integer in `[0, upper]`, inclusive.
    fn draw_slots(&mut self, upper: u64) -> u64;

    /// Uniform float in `[0, 1)`.
    fn draw_unit(&mut self) -> f64;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn draw_slots(&mut self, upper: u64) -> u64 {
        self.gen_range(0..=upper)
    }

    fn draw_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}
