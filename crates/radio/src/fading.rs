//! Small-scale fading samples for an IoT population.

use std::f64::consts::TAU;

use num_complex::Complex64;
use rand::Rng;
use rand_distr::{Distribution, Exp1};

/// Rayleigh fading generator: `|h|² ~ Exp(1)` so `E[|h|²] = 1`, phase
/// uniform on `[0, 2π)`.
///
/// "Unit-mean" is taken as unit mean power, `E[|h|²] = 1`; the mean
/// magnitude is then `E[|h|] = √π / 2`.
pub struct FadingGenerator<R> {
    rng: R,
}

impl<R: Rng> FadingGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn next_sample(&mut self) -> Complex64 {
        let power: f64 = Exp1.sample(&mut self.rng);
        let phase = self.rng.random_range(0.0..TAU);
        Complex64::from_polar(power.sqrt(), phase)
    }

    pub fn samples(&mut self, count: usize) -> Vec<Complex64> {
        (0..count).map(|_| self.next_sample()).collect()
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}
