//! Elevation field construction
//!
//! Samples fractal noise at every hex center and blends it with a radial
//! falloff so land concentrates toward the middle of the canvas.

use crate::config::ElevationConfig;
use crate::error::Result;
use crate::grid::HexGrid;
use crate::hex::Hex;
use crate::noise::{fractal_01, FractalConfig, NoiseSource, PerlinNoise};

/// Elevation sampler bound to one noise source and one validated config
///
/// # Example
///
/// ```
/// use hex_island::*;
///
/// let config = ElevationConfig { cols: 12, rows: 10, ..Default::default() };
/// let field = ElevationField::new(42, config).unwrap();
/// let hexes = field.build();
///
/// assert_eq!(hexes.len(), 120);
/// assert!(hexes.iter().all(|h| (0.0..=1.0).contains(&h.elevation)));
/// ```
#[derive(Debug, Clone)]
pub struct ElevationField<N = PerlinNoise> {
    noise: N,
    config: ElevationConfig,
    grid: HexGrid,
    fractal: FractalConfig,
}

impl ElevationField<PerlinNoise> {
    /// Create a field backed by seeded Perlin noise
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the config fails validation
    pub fn new(seed: u32, config: ElevationConfig) -> Result<Self> {
        Self::with_noise(PerlinNoise::new(seed), config)
    }
}

impl<N: NoiseSource> ElevationField<N> {
    /// Create a field backed by any noise source
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the config fails validation
    pub fn with_noise(noise: N, config: ElevationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            noise,
            grid: HexGrid::new(config.cols, config.rows, config.radius),
            fractal: FractalConfig::from(&config),
            config,
        })
    }

    /// Grid the field is sampled on
    #[inline]
    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    /// Elevation of hex `(q, r)`, in [0, 1]
    pub fn sample(&self, q: usize, r: usize) -> f64 {
        let center = self.grid.center(q, r);
        let noise_height = fractal_01(&self.noise, center, &self.fractal);

        let origin = self.grid.canvas_center();
        let max_dist = origin.length();
        let normalized = center.distance(origin) / max_dist;
        let falloff = radial_falloff(normalized, self.config.gradient_exponent);

        blend(
            noise_height,
            falloff,
            self.config.noise_weight,
            self.config.shape_weight,
        )
    }

    /// Sample every hex in row-major order
    ///
    /// All hexes start as water; classification happens in a later stage.
    pub fn build(&self) -> Vec<Hex> {
        let mut hexes = Vec::with_capacity(self.grid.len());
        for r in 0..self.grid.rows {
            for q in 0..self.grid.cols {
                hexes.push(Hex::new(q, r, self.grid.center(q, r), self.sample(q, r)));
            }
        }

        log::debug!(
            "elevation field: {}x{} hexes sampled ({} octaves)",
            self.grid.cols,
            self.grid.rows,
            self.fractal.octaves
        );
        hexes
    }
}

/// `(1 - d)^exponent` with the base clamped to [0, 1]
///
/// Points past the corner distance (`d > 1`) get zero falloff instead of a
/// negative base, which would be NaN for fractional exponents.
#[inline]
pub fn radial_falloff(normalized_dist: f64, exponent: f64) -> f64 {
    (1.0 - normalized_dist).clamp(0.0, 1.0).powf(exponent)
}

/// Weighted mean of noise height and falloff, clamped to [0, 1]
#[inline]
pub fn blend(noise_height: f64, falloff: f64, noise_weight: f64, shape_weight: f64) -> f64 {
    let value = (noise_height * noise_weight + falloff * shape_weight) / (noise_weight + shape_weight);
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> ElevationConfig {
        ElevationConfig {
            cols: 16,
            rows: 12,
            radius: 8.0,
            noise_scale: 40.0,
            ..ElevationConfig::default()
        }
    }

    #[test]
    fn test_elevation_in_unit_range() {
        for seed in [0, 1, 42, 9999] {
            let field = ElevationField::new(seed, small_config()).unwrap();
            for hex in field.build() {
                assert!(
                    (0.0..=1.0).contains(&hex.elevation),
                    "elevation {} out of range at ({}, {})",
                    hex.elevation,
                    hex.q,
                    hex.r
                );
            }
        }
    }

    #[test]
    fn test_determinism() {
        let a = ElevationField::new(7, small_config()).unwrap().build();
        let b = ElevationField::new(7, small_config()).unwrap().build();
        let bits_a: Vec<u64> = a.iter().map(|h| h.elevation.to_bits()).collect();
        let bits_b: Vec<u64> = b.iter().map(|h| h.elevation.to_bits()).collect();
        assert_eq!(bits_a, bits_b);
    }

    #[test]
    fn test_row_major_layout() {
        let field = ElevationField::new(1, small_config()).unwrap();
        let hexes = field.build();
        for (i, hex) in hexes.iter().enumerate() {
            assert_eq!(field.grid().index(hex.q, hex.r), i);
            assert_eq!(hex.center, field.grid().center(hex.q, hex.r));
        }
    }

    #[test]
    fn test_shape_only_field_peaks_in_middle() {
        let config = ElevationConfig {
            noise_weight: 0.0,
            shape_weight: 1.0,
            gradient_exponent: 1.0,
            ..small_config()
        };
        let flat = |_: f64, _: f64| 0.0;
        let field = ElevationField::with_noise(flat, config).unwrap();

        let middle = field.sample(8, 6);
        let corner = field.sample(0, 0);
        assert!(middle > 0.9, "middle should be near 1, got {}", middle);
        assert!(corner < 0.05, "corner should be near 0, got {}", corner);
    }

    #[test]
    fn test_noise_only_field_ignores_falloff() {
        let config = ElevationConfig {
            noise_weight: 1.0,
            shape_weight: 0.0,
            ..small_config()
        };
        let flat = |_: f64, _: f64| 0.0;
        let field = ElevationField::with_noise(flat, config).unwrap();
        for hex in field.build() {
            assert!((hex.elevation - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_falloff_clamps_negative_base() {
        assert_eq!(radial_falloff(0.0, 1.5), 1.0);
        assert_eq!(radial_falloff(1.0, 1.5), 0.0);
        let beyond = radial_falloff(1.3, 0.7);
        assert!(!beyond.is_nan());
        assert_eq!(beyond, 0.0);
    }

    #[test]
    fn test_blend_weights() {
        assert_eq!(blend(1.0, 0.0, 1.0, 1.0), 0.5);
        assert_eq!(blend(0.25, 0.75, 3.0, 1.0), 0.375);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ElevationConfig {
            octaves: 0,
            ..small_config()
        };
        assert!(ElevationField::new(1, config).is_err());
    }
}
