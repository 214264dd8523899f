//! Coherent noise sources and fractal sampling
//!
//! The pipeline only depends on the [`NoiseSource`] contract. [`PerlinNoise`]
//! is the default implementation; any closure `Fn(f64, f64) -> f64` works too.

mod perlin;

pub use perlin::PerlinNoise;

use crate::config::ElevationConfig;
use crate::geometry::Point;

/// Deterministic 2D coherent noise
pub trait NoiseSource {
    /// Sample at `(x, y)`; implementations must return values in [-1, 1]
    fn noise_2d(&self, x: f64, y: f64) -> f64;
}

impl NoiseSource for PerlinNoise {
    #[inline]
    fn noise_2d(&self, x: f64, y: f64) -> f64 {
        self.sample(x, y)
    }
}

impl<F> NoiseSource for F
where
    F: Fn(f64, f64) -> f64,
{
    #[inline]
    fn noise_2d(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

/// Remap a [-1, 1] noise value to [0, 1]
#[inline]
pub fn to_unit(value: f64) -> f64 {
    ((value + 1.0) * 0.5).clamp(0.0, 1.0)
}

/// Octave settings for fractal noise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalConfig {
    /// Pixel distance covered by one noise unit at the first octave
    pub scale: f64,
    /// Number of layers (must be >= 1)
    pub octaves: usize,
    /// Amplitude multiplier per octave
    pub persistence: f64,
    /// Frequency multiplier per octave
    pub lacunarity: f64,
}

impl From<&ElevationConfig> for FractalConfig {
    fn from(config: &ElevationConfig) -> Self {
        Self {
            scale: config.noise_scale,
            octaves: config.octaves,
            persistence: config.persistence,
            lacunarity: config.lacunarity,
        }
    }
}

/// Sample fractal noise at a pixel position; result in [0, 1]
///
/// Each octave is remapped to [0, 1] before weighting, and the sum is divided
/// by the total amplitude, so the result stays in [0, 1] for any octave count.
/// A non-finite sample counts as the midpoint 0.5.
pub fn fractal_01<N>(noise: &N, position: Point, config: &FractalConfig) -> f64
where
    N: NoiseSource + ?Sized,
{
    let base = position / config.scale;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut total = 0.0;
    let mut max_amplitude = 0.0;

    for _ in 0..config.octaves {
        let p = base * frequency;
        let sample = noise.noise_2d(p.x, p.y);
        let height = if sample.is_finite() { to_unit(sample) } else { 0.5 };
        total += height * amplitude;
        max_amplitude += amplitude;

        amplitude *= config.persistence;
        frequency *= config.lacunarity;
    }

    let value = total / max_amplitude;
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fractal(octaves: usize) -> FractalConfig {
        FractalConfig {
            scale: 50.0,
            octaves,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }

    #[test]
    fn test_to_unit() {
        assert_eq!(to_unit(-1.0), 0.0);
        assert_eq!(to_unit(0.0), 0.5);
        assert_eq!(to_unit(1.0), 1.0);
        assert_eq!(to_unit(3.0), 1.0);
    }

    #[test]
    fn test_closure_source() {
        let flat = |_: f64, _: f64| 0.0;
        let value = fractal_01(&flat, Point::new(10.0, 20.0), &fractal(4));
        assert!((value - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_extreme_sources_hit_bounds() {
        let high = |_: f64, _: f64| 1.0;
        let low = |_: f64, _: f64| -1.0;
        assert_eq!(fractal_01(&high, Point::ZERO, &fractal(6)), 1.0);
        assert_eq!(fractal_01(&low, Point::ZERO, &fractal(6)), 0.0);
    }

    #[test]
    fn test_octave_weighting() {
        // Octave 0 sees x = 0.5, octave 1 sees x = 1.0: weights 1 and 0.5.
        let step = |x: f64, _: f64| if x < 0.75 { 1.0 } else { -1.0 };
        let value = fractal_01(&step, Point::new(25.0, 0.0), &fractal(2));
        assert!((value - 1.0 / 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_samples_stay_in_range() {
        let broken = |_: f64, _: f64| f64::NAN;
        assert_eq!(fractal_01(&broken, Point::new(3.0, 4.0), &fractal(3)), 0.5);

        // Frequencies overflow to infinity well before the last octave.
        let wild = FractalConfig {
            scale: 1.0,
            octaves: 400,
            persistence: 0.5,
            lacunarity: 8.0,
        };
        let noise = PerlinNoise::new(5);
        for p in [Point::ZERO, Point::new(17.0, 3.5), Point::new(250.0, 90.0)] {
            let v = fractal_01(&noise, p, &wild);
            assert!((0.0..=1.0).contains(&v), "got {}", v);
        }
    }

    #[test]
    fn test_perlin_fractal_range() {
        let noise = PerlinNoise::new(99);
        for i in 0..200 {
            let p = Point::new(i as f64 * 7.3, i as f64 * 3.1);
            let v = fractal_01(&noise, p, &fractal(5));
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
