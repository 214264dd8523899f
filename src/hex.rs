//! Hex Cell Structure
//!
//! Represents one lattice cell with its position, elevation and land state.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::grid::HexGrid;

/// A single hex on the map
///
/// # Design Notes
///
/// Hexes are created once per `(q, r)` by the elevation stage. Later stages
/// never mutate a hex collection they were given; they clone it and return
/// the updated copy, so each stage's output stays available as a snapshot.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Hex {
    /// Column coordinate (0 to cols-1)
    pub q: usize,

    /// Row coordinate (0 to rows-1)
    pub r: usize,

    /// Pixel center under the pointy-top odd-row projection
    pub center: Point,

    /// Normalized elevation in [0, 1]
    pub elevation: f64,

    /// Land/water state
    ///
    /// Starts as `elevation > sea_level`, then edited by speck removal,
    /// erosion and dilation.
    pub is_land: bool,

    /// Connected land component id (1-based); `None` for water
    /// and for hexes that have not been through region labeling.
    pub region: Option<u32>,
}

impl Hex {
    /// Create a freshly sampled hex (water, no region)
    pub fn new(q: usize, r: usize, center: Point, elevation: f64) -> Self {
        Self {
            q,
            r,
            center,
            elevation,
            is_land: false,
            region: None,
        }
    }

    /// True if this hex is water
    #[inline]
    pub fn is_water(&self) -> bool {
        !self.is_land
    }
}

/// Land flags of a hex slice, indexed like the slice
pub fn land_mask(hexes: &[Hex]) -> Vec<bool> {
    hexes.iter().map(|h| h.is_land).collect()
}

/// Number of logical neighbors of `index` whose mask value equals `value`
#[inline]
pub fn count_neighbors(grid: &HexGrid, mask: &[bool], index: usize, value: bool) -> usize {
    grid.neighbors(index).filter(|&n| mask[n] == value).count()
}

/// True if any in-grid logical neighbor of `index` is water in `mask`
#[inline]
pub fn borders_water(grid: &HexGrid, mask: &[bool], index: usize) -> bool {
    grid.neighbors(index).any(|n| !mask[n])
}
