/// Source of uniform randomness for layout draws.
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform sample in `[lo, hi]`; returns `lo` when the range is empty or inverted.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi.is_nan() || hi <= lo {
            return lo;
        }
        (lo + self.next_unit() * (hi - lo)).clamp(lo, hi)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// [`RandomSource`] backed by `fastrand`.
#[derive(Clone, Debug)]
pub struct SeededRng {
    rng: fastrand::Rng,
}

impl SeededRng {
    /// Deterministic generator for a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Generator seeded from process entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// `from_seed` when a seed is given, otherwise `from_entropy`.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::from_seed)
    }
}

impl RandomSource for SeededRng {
    fn next_unit(&mut self) -> f64 {
        self.rng.f64()
    }
}

/// Fraction of the smaller container side used as the base font size.
pub const BASE_FONT_RATIO: f64 = 0.07;

/// Base font size `B` for a container.
pub fn base_font_size(width: f64, height: f64) -> f64 {
    width.min(height) * BASE_FONT_RATIO
}

/// Inclusive range font sizes are drawn from: `[B/4, 2B]`.
pub fn font_size_range(base: f64) -> (f64, f64) {
    (base / 4.0, base * 2.0)
}

/// Draw one font size per paragraph, uniformly from [`font_size_range`].
pub fn sample_font_sizes(base: f64, count: usize, rng: &mut dyn RandomSource) -> Vec<f64> {
    let (lo, hi) = font_size_range(base);
    (0..count).map(|_| rng.uniform(lo, hi)).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/sampler.rs"]
mod tests;
