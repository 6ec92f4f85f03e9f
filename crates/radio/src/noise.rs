//! Receiver noise samples for spectral-efficiency evaluation.

use rand::Rng;

/// Supplies one noise amplitude per spectral-efficiency evaluation.
pub trait NoiseSource {
    fn sample(&mut self) -> f64;
}

/// Unit-scale uniform noise on `[0, 1)`.
pub struct UniformNoise<R> {
    rng: R,
}

impl<R: Rng> UniformNoise<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> NoiseSource for UniformNoise<R> {
    fn sample(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Always returns the same amplitude.
#[derive(Debug, Clone, Copy)]
pub struct FixedNoise(pub f64);

impl NoiseSource for FixedNoise {
    fn sample(&mut self) -> f64 {
        self.0
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for &mut N {
    fn sample(&mut self) -> f64 {
        (**self).sample()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn uniform_noise_is_reproducible_and_in_range() {
        let mut a = UniformNoise::new(StdRng::seed_from_u64(7));
        let mut b = UniformNoise::new(StdRng::seed_from_u64(7));
        for _ in 0..1_000 {
            let x = a.sample();
            assert_eq!(x, b.sample());
            assert!((0.0..1.0).contains(&x));
        }
    }

    fn draw_twice(mut source: impl NoiseSource) -> (f64, f64) {
        (source.sample(), source.sample())
    }

    #[test]
    fn fixed_noise_through_reference() {
        let mut fixed = FixedNoise(0.25);
        assert_eq!(draw_twice(&mut fixed), (0.25, 0.25));
        assert_eq!(fixed.sample(), 0.25);
    }
}
