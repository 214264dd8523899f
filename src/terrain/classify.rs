//! Land/water classification, speck removal and region labeling

use std::collections::VecDeque;

use crate::error::Result;
use crate::grid::HexGrid;
use crate::hex::{count_neighbors, land_mask, Hex};

/// Minimum number of land neighbors a land hex needs to survive speck removal
pub const MIN_LAND_NEIGHBORS: usize = 2;

/// Threshold elevations into land and water
///
/// A hex is land iff `elevation > sea_level`; a hex exactly at sea level is
/// water. Regions are cleared since they no longer describe the new mask.
pub fn classify(hexes: &[Hex], sea_level: f64) -> Vec<Hex> {
    hexes
        .iter()
        .map(|hex| Hex {
            is_land: hex.elevation > sea_level,
            region: None,
            ..hex.clone()
        })
        .collect()
}

/// Turn isolated land hexes back into water
///
/// Single pass: every neighbor count is taken against the input mask, so a
/// hex removed here does not lower its neighbors' counts in the same pass.
/// Border hexes have fewer neighbor slots and are pruned more readily.
///
/// Returns the new hexes and the number of hexes removed.
pub fn remove_specks(grid: &HexGrid, hexes: &[Hex]) -> Result<(Vec<Hex>, usize)> {
    grid.check(hexes)?;
    let mask = land_mask(hexes);

    let mut out = hexes.to_vec();
    let mut removed = 0;
    for (index, hex) in out.iter_mut().enumerate() {
        if mask[index] && count_neighbors(grid, &mask, index, true) < MIN_LAND_NEIGHBORS {
            hex.is_land = false;
            hex.region = None;
            removed += 1;
        }
    }

    log::debug!("speck removal: {} land hexes reclassified as water", removed);
    Ok((out, removed))
}

/// Label connected land components with 1-based region ids
///
/// Components are discovered scanning row-major, so the component holding
/// the first land hex in `(r, q)` order gets id 1. Water hexes end up with
/// `region = None`.
///
/// Returns the labeled hexes and the number of regions.
pub fn label_regions(grid: &HexGrid, hexes: &[Hex]) -> Result<(Vec<Hex>, u32)> {
    grid.check(hexes)?;

    let mut out: Vec<Hex> = hexes
        .iter()
        .map(|hex| Hex {
            region: None,
            ..hex.clone()
        })
        .collect();

    let mut next_id = 0u32;
    let mut queue = VecDeque::new();

    for start in 0..out.len() {
        if !out[start].is_land || out[start].region.is_some() {
            continue;
        }

        next_id += 1;
        out[start].region = Some(next_id);
        queue.push_back(start);

        // BFS over land hexes
        while let Some(current) = queue.pop_front() {
            for neighbor in grid.neighbors(current) {
                let hex = &mut out[neighbor];
                if hex.is_land && hex.region.is_none() {
                    hex.region = Some(next_id);
                    queue.push_back(neighbor);
                }
            }
        }
    }

    log::debug!("region labeling: {} land regions", next_id);
    Ok((out, next_id))
}

/// Snapshots produced by one classification run
#[derive(Debug, Clone)]
pub struct Classification {
    /// Raw threshold result
    pub classified: Vec<Hex>,
    /// After speck removal
    pub despecked: Vec<Hex>,
    /// After region labeling
    pub labeled: Vec<Hex>,
    /// Number of hexes turned to water by speck removal
    pub specks_removed: usize,
    /// Number of land regions
    pub region_count: u32,
}

/// Classify, despeckle and label in one call
pub fn classify_all(grid: &HexGrid, elevation: &[Hex], sea_level: f64) -> Result<Classification> {
    grid.check(elevation)?;
    let classified = classify(elevation, sea_level);
    let (despecked, specks_removed) = remove_specks(grid, &classified)?;
    let (labeled, region_count) = label_regions(grid, &despecked)?;

    Ok(Classification {
        classified,
        despecked,
        labeled,
        specks_removed,
        region_count,
    })
}
