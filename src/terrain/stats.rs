//! Summary statistics for debug overlays and logging

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::hex::Hex;

/// Informational counts over one hex snapshot
///
/// Not part of the physical model; collected so callers can display or log
/// what each stage did.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElevationStats {
    /// Total number of hexes
    pub total: usize,
    /// Hexes currently flagged as land
    pub land: usize,
    /// Hexes currently flagged as water
    pub water: usize,
    /// Lowest elevation (0 for an empty snapshot)
    pub min_elevation: f64,
    /// Highest elevation (0 for an empty snapshot)
    pub max_elevation: f64,
    /// Mean elevation (0 for an empty snapshot)
    pub mean_elevation: f64,
    /// Hexes with elevation strictly above sea level
    pub above_sea_level: usize,
    /// Hexes with elevation at or below sea level
    pub at_or_below_sea_level: usize,
    /// Land hexes removed by speck removal
    pub specks_removed: usize,
    /// Number of connected land regions
    pub regions: u32,
}

impl ElevationStats {
    /// Collect elevation and land/water counts from a snapshot
    ///
    /// `specks_removed` and `regions` are left at zero; the pipeline fills them.
    pub fn collect(hexes: &[Hex], sea_level: f64) -> Self {
        if hexes.is_empty() {
            return Self::default();
        }

        let mut stats = Self {
            total: hexes.len(),
            min_elevation: f64::INFINITY,
            max_elevation: f64::NEG_INFINITY,
            ..Self::default()
        };
        let mut sum = 0.0;

        for hex in hexes {
            if hex.is_land {
                stats.land += 1;
            } else {
                stats.water += 1;
            }
            if hex.elevation > sea_level {
                stats.above_sea_level += 1;
            } else {
                stats.at_or_below_sea_level += 1;
            }
            stats.min_elevation = stats.min_elevation.min(hex.elevation);
            stats.max_elevation = stats.max_elevation.max(hex.elevation);
            sum += hex.elevation;
        }

        stats.mean_elevation = sum / hexes.len() as f64;
        stats
    }

    /// Fraction of hexes that are land
    pub fn land_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.land as f64 / self.total as f64
        }
    }
}
