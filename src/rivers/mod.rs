//! River network
//!
//! Rivers are derived from the elevation field in four steps:
//!
//! 1. every land hex drains to its steepest strictly-lower land neighbor;
//! 2. flow is accumulated downstream in topological order;
//! 3. sources are picked in three mutually exclusive tiers;
//! 4. each source is followed downstream, filtered by length and smoothed.

mod flow;

pub use flow::{accumulate, flow_directions, upstream_order};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::RiverConfig;
use crate::error::Result;
use crate::geometry::{chaikin, Point};
use crate::grid::HexGrid;
use crate::hex::Hex;

/// Significance tier of a river
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RiverOrder {
    /// Main river starting at a high local maximum
    Primary = 1,
    /// Stream with moderate accumulation
    Secondary = 2,
    /// Small stream
    Tertiary = 3,
}

impl RiverOrder {
    /// All tiers, in selection order
    pub const ALL: [RiverOrder; 3] = [RiverOrder::Primary, RiverOrder::Secondary, RiverOrder::Tertiary];

    /// Numeric order (1, 2 or 3)
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Fewest centers a traced path may have and still be kept
    #[inline]
    pub fn min_path_len(self) -> usize {
        match self {
            RiverOrder::Primary => 5,
            RiverOrder::Secondary => 4,
            RiverOrder::Tertiary => 3,
        }
    }

    /// Stroke width for this tier
    ///
    /// Primary rivers get the full width once the accumulation reaching the
    /// end of their path hits `main_river_accum`, one less otherwise.
    /// Secondary streams get two less. Nothing drops below 1.
    pub fn width(self, config: &RiverConfig, accumulation: usize) -> f64 {
        match self {
            RiverOrder::Primary if accumulation >= config.main_river_accum => config.river_width,
            RiverOrder::Primary => (config.river_width - 1.0).max(1.0),
            RiverOrder::Secondary => (config.river_width - 2.0).max(1.0),
            RiverOrder::Tertiary => 1.0,
        }
    }
}

/// A smoothed river path
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RiverPolyline {
    /// Path vertices from source to mouth
    pub path: Vec<Point>,
    /// Stroke width
    pub width: f64,
    /// Significance tier
    pub order: RiverOrder,
}

/// Source hexes of each tier, row-major within a tier
///
/// A hex picked by a higher tier is never picked again by a lower one.
///
/// # Panics
///
/// Panics if `flow_accum` is shorter than `hexes`, or if `hexes` is shorter
/// than `grid.len()` and a land hex has a neighbor past its end.
pub fn select_sources(
    grid: &HexGrid,
    hexes: &[Hex],
    flow_accum: &[usize],
    config: &RiverConfig,
) -> Vec<(usize, RiverOrder)> {
    let mut claimed = vec![false; hexes.len()];
    let mut sources = Vec::new();

    for order in RiverOrder::ALL {
        for (index, hex) in hexes.iter().enumerate() {
            if !hex.is_land || claimed[index] {
                continue;
            }
            let accum = flow_accum[index];
            let picked = match order {
                RiverOrder::Primary => {
                    hex.elevation >= config.min_source_elev
                        && accum >= config.tributary_accum
                        && !grid
                            .neighbors(index)
                            .any(|n| hexes[n].elevation > hex.elevation)
                }
                RiverOrder::Secondary => {
                    (config.secondary_stream_accum..config.main_river_accum).contains(&accum)
                }
                RiverOrder::Tertiary => {
                    (config.tertiary_stream_accum..config.secondary_stream_accum).contains(&accum)
                }
            };
            if picked {
                claimed[index] = true;
                sources.push((index, order));
            }
        }
    }

    sources
}

/// Hex indices visited by following `flow_dirs` from `source`
///
/// Stops at a hex with no downstream target or when the next hex is not
/// land. Never takes more steps than there are hexes.
///
/// # Panics
///
/// Panics if `source` is out of range, or if `flow_dirs` is shorter than
/// `hexes` or points past its end.
pub fn follow_flow(hexes: &[Hex], flow_dirs: &[Option<usize>], source: usize) -> Vec<usize> {
    let mut path = vec![source];
    let mut current = source;
    for _ in 0..hexes.len() {
        match flow_dirs[current] {
            Some(next) if hexes[next].is_land => {
                path.push(next);
                current = next;
            }
            _ => break,
        }
    }
    path
}

/// Flow field plus the traced rivers
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RiverNetwork {
    /// Kept rivers: primaries first, then secondaries, then tertiaries
    pub polylines: Vec<RiverPolyline>,
    /// Downstream hex of every hex (`None` for water and local minima)
    pub flow_dirs: Vec<Option<usize>>,
    /// Upstream land hexes draining through every hex, itself included
    pub flow_accum: Vec<usize>,
}

impl RiverNetwork {
    /// Compute drainage over `hexes` and trace the rivers
    ///
    /// # Errors
    ///
    /// Returns `GridMismatch` if `hexes` was not built for `grid`, or
    /// `InvalidConfig` if `config` fails validation.
    ///
    /// # Example
    ///
    /// ```
    /// use hex_island::*;
    ///
    /// let grid = HexGrid::new(4, 4, 5.0);
    /// let hexes: Vec<Hex> = (0..16)
    ///     .map(|i| {
    ///         let (q, r) = grid.coords(i);
    ///         Hex::new(q, r, grid.center(q, r), 0.2)
    ///     })
    ///     .collect();
    ///
    /// // All water: no flow, no rivers.
    /// let network = RiverNetwork::trace(&grid, &hexes, &RiverConfig::default()).unwrap();
    /// assert!(network.polylines.is_empty());
    /// assert!(network.flow_accum.iter().all(|&a| a == 0));
    /// ```
    pub fn trace(grid: &HexGrid, hexes: &[Hex], config: &RiverConfig) -> Result<Self> {
        grid.check(hexes)?;
        config.validate()?;

        let flow_dirs = flow_directions(grid, hexes);
        let flow_accum = accumulate(hexes, &flow_dirs);
        let sources = select_sources(grid, hexes, &flow_accum, config);

        let mut polylines = Vec::new();
        for &(source, order) in &sources {
            let path = follow_flow(hexes, &flow_dirs, source);
            if path.len() < order.min_path_len() {
                continue;
            }
            // Accumulation never decreases downstream, so the mouth holds the peak.
            let mouth_accum = path.last().map_or(0, |&i| flow_accum[i]);
            let centers: Vec<Point> = path.iter().map(|&i| hexes[i].center).collect();
            polylines.push(RiverPolyline {
                path: chaikin(&centers, config.smooth, false),
                width: order.width(config, mouth_accum),
                order,
            });
        }

        let network = Self {
            polylines,
            flow_dirs,
            flow_accum,
        };
        log::debug!(
            "rivers: {} sources, {} primary / {} secondary / {} tertiary kept",
            sources.len(),
            network.count(RiverOrder::Primary),
            network.count(RiverOrder::Secondary),
            network.count(RiverOrder::Tertiary)
        );
        Ok(network)
    }

    /// Number of kept rivers of one tier
    pub fn count(&self, order: RiverOrder) -> usize {
        self.polylines.iter().filter(|p| p.order == order).count()
    }

    /// Rivers of one tier, in tracing order
    pub fn of_order(&self, order: RiverOrder) -> impl Iterator<Item = &RiverPolyline> + '_ {
        self.polylines.iter().filter(move |p| p.order == order)
    }

    /// Downstream hex of `index`, if any
    #[inline]
    pub fn downstream(&self, index: usize) -> Option<usize> {
        self.flow_dirs.get(index).copied().flatten()
    }
}
