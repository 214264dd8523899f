//! Map Configuration and Builder
//!
//! This module provides the option sets for each pipeline stage and a builder
//! that validates them eagerly. Every division performed later in the pipeline
//! (octave amplitude sum, blend weight sum, falloff corner distance) is
//! guaranteed non-zero once a config has passed validation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};
use crate::grid::HexGrid;

/// Elevation field options: lattice size, fractal noise and radial falloff
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationConfig {
    /// Hex circumradius in pixels
    pub radius: f64,
    /// Number of columns (q axis)
    pub cols: usize,
    /// Number of rows (r axis)
    pub rows: usize,
    /// Number of fractal noise layers
    pub octaves: usize,
    /// Amplitude multiplier per octave
    pub persistence: f64,
    /// Frequency multiplier per octave
    pub lacunarity: f64,
    /// Pixel distance covered by one noise lattice unit at the base octave
    pub noise_scale: f64,
    /// Blend weight of the noise height
    pub noise_weight: f64,
    /// Blend weight of the radial falloff
    pub shape_weight: f64,
    /// Exponent applied to the radial falloff
    pub gradient_exponent: f64,
    /// Elevation at or below which a hex is water
    pub sea_level: f64,
}

impl Default for ElevationConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            cols: 64,
            rows: 48,
            octaves: 5,
            persistence: 0.5,
            lacunarity: 2.0,
            noise_scale: 120.0,
            noise_weight: 0.6,
            shape_weight: 0.4,
            gradient_exponent: 1.2,
            sea_level: 0.45,
        }
    }
}

impl ElevationConfig {
    /// Total number of hexes in the lattice
    #[inline]
    pub fn hex_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Check every invariant the elevation stage relies on
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        check_positive("radius", self.radius)?;
        if self.cols == 0 || self.rows == 0 {
            return Err(TerrainError::InvalidConfig(format!(
                "grid must have at least one column and one row (got {}x{})",
                self.cols, self.rows
            )));
        }
        if self.octaves == 0 {
            return Err(TerrainError::InvalidConfig(
                "octaves must be >= 1 (got 0)".to_string(),
            ));
        }
        check_positive("persistence", self.persistence)?;
        check_positive("lacunarity", self.lacunarity)?;
        check_positive("noise_scale", self.noise_scale)?;
        check_non_negative("noise_weight", self.noise_weight)?;
        check_non_negative("shape_weight", self.shape_weight)?;
        if self.noise_weight + self.shape_weight <= 0.0 {
            return Err(TerrainError::InvalidConfig(
                "noise_weight and shape_weight must not both be zero".to_string(),
            ));
        }
        check_non_negative("gradient_exponent", self.gradient_exponent)?;
        self.check_octave_range()?;
        if !self.sea_level.is_finite() {
            return Err(TerrainError::InvalidConfig(format!(
                "sea_level must be finite (got {})",
                self.sea_level
            )));
        }
        Ok(())
    }

    /// Reject octave stacks whose noise coordinates or amplitudes overflow
    ///
    /// The highest octave samples at `canvas / noise_scale * lacunarity^(octaves-1)`;
    /// the amplitude sum is bounded by `octaves * max(1, persistence^octaves)`.
    fn check_octave_range(&self) -> Result<()> {
        let octaves = self.octaves as f64;
        let extent = HexGrid::new(self.cols, self.rows, self.radius)
            .canvas_size()
            .max_element();
        let reach = extent / self.noise_scale * self.lacunarity.powf(octaves - 1.0);
        if !reach.is_finite() {
            return Err(TerrainError::InvalidConfig(format!(
                "noise coordinates overflow: canvas {} / noise_scale {} with {} octaves of lacunarity {}",
                extent, self.noise_scale, self.octaves, self.lacunarity
            )));
        }
        let amplitude_bound = octaves * self.persistence.powf(octaves).max(1.0);
        if !amplitude_bound.is_finite() {
            return Err(TerrainError::InvalidConfig(format!(
                "octave amplitudes overflow: {} octaves of persistence {}",
                self.octaves, self.persistence
            )));
        }
        Ok(())
    }
}

/// Coast refinement options
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoastConfig {
    /// Number of noise-modulated erosion passes
    pub erosion_passes: usize,
    /// Number of noise-modulated dilation passes
    pub dilation_passes: usize,
    /// Seed for the secondary noise field that modulates the thresholds
    pub coast_noise_seed: u32,
}

impl Default for CoastConfig {
    fn default() -> Self {
        Self {
            erosion_passes: 2,
            dilation_passes: 1,
            coast_noise_seed: 1,
        }
    }
}

/// River network options
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiverConfig {
    /// Minimum elevation of a primary source
    pub min_source_elev: f64,
    /// Accumulation at which a primary river reaches full width; upper bound of secondary sources
    pub main_river_accum: usize,
    /// Minimum accumulation of a primary source
    pub tributary_accum: usize,
    /// Lower bound of secondary sources; upper bound of tertiary sources
    pub secondary_stream_accum: usize,
    /// Lower bound of tertiary sources
    pub tertiary_stream_accum: usize,
    /// Width of a full primary river
    pub river_width: f64,
    /// Chaikin passes applied to each traced river
    pub smooth: usize,
}

impl Default for RiverConfig {
    fn default() -> Self {
        Self {
            min_source_elev: 0.7,
            main_river_accum: 60,
            tributary_accum: 1,
            secondary_stream_accum: 20,
            tertiary_stream_accum: 8,
            river_width: 4.0,
            smooth: 2,
        }
    }
}

impl RiverConfig {
    /// Check threshold ordering and width
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the stream tiers overlap or the width is below 1.
    pub fn validate(&self) -> Result<()> {
        if !self.min_source_elev.is_finite() {
            return Err(TerrainError::InvalidConfig(format!(
                "min_source_elev must be finite (got {})",
                self.min_source_elev
            )));
        }
        if self.tertiary_stream_accum > self.secondary_stream_accum
            || self.secondary_stream_accum > self.main_river_accum
        {
            return Err(TerrainError::InvalidConfig(format!(
                "stream thresholds must satisfy tertiary <= secondary <= main (got {} / {} / {})",
                self.tertiary_stream_accum, self.secondary_stream_accum, self.main_river_accum
            )));
        }
        if !(self.river_width >= 1.0) || !self.river_width.is_finite() {
            return Err(TerrainError::InvalidConfig(format!(
                "river_width must be >= 1 (got {})",
                self.river_width
            )));
        }
        Ok(())
    }
}

/// Complete configuration for one generated map
///
/// The same configuration always produces the identical map.
///
/// # Example
///
/// ```rust
/// use hex_island::*;
///
/// let config = MapConfigBuilder::new()
///     .seed(42)
///     .grid(32, 24)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.elevation.hex_count(), 32 * 24);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    /// Seed of the primary elevation noise
    pub seed: u32,
    /// Elevation field options
    pub elevation: ElevationConfig,
    /// Coast refinement options
    pub coast: CoastConfig,
    /// River network options
    pub rivers: RiverConfig,
}

impl MapConfig {
    /// Validate every section
    ///
    /// Useful for configs that did not come from the builder (e.g. deserialized).
    pub fn validate(&self) -> Result<()> {
        self.elevation.validate()?;
        self.rivers.validate()
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            elevation: ElevationConfig::default(),
            coast: CoastConfig::default(),
            rivers: RiverConfig::default(),
        }
    }
}

/// Builder for creating MapConfig with validation
///
/// # Example
///
/// ```rust
/// use hex_island::*;
///
/// let config = MapConfigBuilder::new()
///     .seed(7)
///     .octaves(4)
///     .unwrap()
///     .sea_level(0.5)
///     .erosion_passes(3)
///     .build()
///     .unwrap();
/// assert_eq!(config.coast.erosion_passes, 3);
/// ```
#[derive(Debug, Clone)]
pub struct MapConfigBuilder {
    seed: Option<u32>,
    coast_noise_seed: Option<u32>,
    elevation: ElevationConfig,
    coast: CoastConfig,
    rivers: RiverConfig,
}

impl MapConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (drawn with `rand::random` at build time)
    /// - grid: 64x48 hexes of radius 10
    /// - coast_noise_seed: seed + 1
    pub fn new() -> Self {
        Self {
            seed: None,
            coast_noise_seed: None,
            elevation: ElevationConfig::default(),
            coast: CoastConfig::default(),
            rivers: RiverConfig::default(),
        }
    }

    /// Set the elevation noise seed
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the grid dimensions
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either dimension is zero
    pub fn grid(mut self, cols: usize, rows: usize) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(TerrainError::InvalidConfig(format!(
                "grid must have at least one column and one row (got {}x{})",
                cols, rows
            )));
        }
        self.elevation.cols = cols;
        self.elevation.rows = rows;
        Ok(self)
    }

    /// Set the hex circumradius in pixels
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if radius <= 0.0
    pub fn radius(mut self, radius: f64) -> Result<Self> {
        check_positive("radius", radius)?;
        self.elevation.radius = radius;
        Ok(self)
    }

    /// Set the number of fractal noise octaves
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if octaves is zero
    pub fn octaves(mut self, octaves: usize) -> Result<Self> {
        if octaves == 0 {
            return Err(TerrainError::InvalidConfig(
                "octaves must be >= 1 (got 0)".to_string(),
            ));
        }
        self.elevation.octaves = octaves;
        Ok(self)
    }

    /// Set the amplitude decay and frequency growth per octave
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either value is not strictly positive
    pub fn fractal(mut self, persistence: f64, lacunarity: f64) -> Result<Self> {
        check_positive("persistence", persistence)?;
        check_positive("lacunarity", lacunarity)?;
        self.elevation.persistence = persistence;
        self.elevation.lacunarity = lacunarity;
        Ok(self)
    }

    /// Set the pixel size of one base-octave noise unit
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if scale <= 0.0
    pub fn noise_scale(mut self, scale: f64) -> Result<Self> {
        check_positive("noise_scale", scale)?;
        self.elevation.noise_scale = scale;
        Ok(self)
    }

    /// Set the noise/falloff blend weights
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a weight is negative or both are zero
    pub fn weights(mut self, noise_weight: f64, shape_weight: f64) -> Result<Self> {
        check_non_negative("noise_weight", noise_weight)?;
        check_non_negative("shape_weight", shape_weight)?;
        if noise_weight + shape_weight <= 0.0 {
            return Err(TerrainError::InvalidConfig(
                "noise_weight and shape_weight must not both be zero".to_string(),
            ));
        }
        self.elevation.noise_weight = noise_weight;
        self.elevation.shape_weight = shape_weight;
        Ok(self)
    }

    /// Set the radial falloff exponent
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if exponent is negative
    pub fn gradient_exponent(mut self, exponent: f64) -> Result<Self> {
        check_non_negative("gradient_exponent", exponent)?;
        self.elevation.gradient_exponent = exponent;
        Ok(self)
    }

    /// Set the sea level threshold
    ///
    /// Values outside [0, 1] are allowed and produce all-water or all-land maps.
    pub fn sea_level(mut self, sea_level: f64) -> Self {
        self.elevation.sea_level = sea_level;
        self
    }

    /// Set the number of coast erosion passes
    pub fn erosion_passes(mut self, passes: usize) -> Self {
        self.coast.erosion_passes = passes;
        self
    }

    /// Set the number of coast dilation passes
    pub fn dilation_passes(mut self, passes: usize) -> Self {
        self.coast.dilation_passes = passes;
        self
    }

    /// Set a separate seed for the coast modulation noise
    ///
    /// If not set, `seed + 1` is used.
    pub fn coast_noise_seed(mut self, seed: u32) -> Self {
        self.coast_noise_seed = Some(seed);
        self
    }

    /// Replace the whole river section
    pub fn rivers(mut self, rivers: RiverConfig) -> Self {
        self.rivers = rivers;
        self
    }

    /// Set the number of Chaikin passes applied to rivers
    pub fn river_smoothing(mut self, passes: usize) -> Self {
        self.rivers.smooth = passes;
        self
    }

    /// Build the configuration
    ///
    /// If no seed was provided, draws one with `rand::random`.
    pub fn build(self) -> Result<MapConfig> {
        let seed = self.seed.unwrap_or_else(rand::random);
        let coast = CoastConfig {
            coast_noise_seed: self
                .coast_noise_seed
                .unwrap_or_else(|| seed.wrapping_add(1)),
            ..self.coast
        };

        let config = MapConfig {
            seed,
            elevation: self.elevation,
            coast,
            rivers: self.rivers,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for MapConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(TerrainError::InvalidConfig(format!(
            "{} must be positive (got {})",
            name, value
        )))
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(TerrainError::InvalidConfig(format!(
            "{} must be >= 0 (got {})",
            name, value
        )))
    }
}
