//! Noise-modulated erosion/dilation of the land mask
//!
//! Plain cellular erosion gives blocky, regular coasts. Each hex instead gets
//! its own neighbor threshold in [2, 4], taken from a secondary noise field
//! seeded independently of the elevation noise.

use crate::config::CoastConfig;
use crate::error::Result;
use crate::grid::HexGrid;
use crate::hex::{count_neighbors, land_mask, Hex};
use crate::noise::{to_unit, NoiseSource, PerlinNoise};
use crate::terrain::label_regions;

use super::walk::walk_boundaries;
use super::{select_loops, CoastlineLoop, LoopPolicy};

/// Pixel-to-noise scale of the modulation field
const MODULATION_SCALE: f64 = 0.01;

/// One erosion pass against a frozen mask
///
/// A land hex becomes water when its water-neighbor count reaches
/// `2 + 2·modulation`. Returns the new mask and the number of changes.
///
/// # Panics
///
/// Panics if `modulation` is shorter than `mask`, or if `mask` is shorter
/// than `grid.len()` and a land hex has a neighbor past its end.
pub fn erosion_pass(grid: &HexGrid, mask: &[bool], modulation: &[f64]) -> (Vec<bool>, usize) {
    let mut next = mask.to_vec();
    let mut changed = 0;
    for index in 0..mask.len() {
        if !mask[index] {
            continue;
        }
        let water = count_neighbors(grid, mask, index, false) as f64;
        let threshold = 2.0 + modulation[index] * 2.0;
        if water >= threshold {
            next[index] = false;
            changed += 1;
        }
    }
    (next, changed)
}

/// One dilation pass against a frozen mask
///
/// A water hex becomes land when its land-neighbor count reaches
/// `4 - 2·modulation`. Returns the new mask and the number of changes.
///
/// # Panics
///
/// Panics if `modulation` is shorter than `mask`, or if `mask` is shorter
/// than `grid.len()` and a water hex has a neighbor past its end.
pub fn dilation_pass(grid: &HexGrid, mask: &[bool], modulation: &[f64]) -> (Vec<bool>, usize) {
    let mut next = mask.to_vec();
    let mut changed = 0;
    for index in 0..mask.len() {
        if mask[index] {
            continue;
        }
        let land = count_neighbors(grid, mask, index, true) as f64;
        let threshold = 4.0 - modulation[index] * 2.0;
        if land >= threshold {
            next[index] = true;
            changed += 1;
        }
    }
    (next, changed)
}

/// Output of [`CoastRefiner::refine`]
#[derive(Debug, Clone)]
pub struct RefinedCoast {
    /// Refined hexes, regions relabeled against the refined mask
    pub hexes: Vec<Hex>,
    /// Smoothed coast loops, filtered by the refiner's policy
    pub loops: Vec<CoastlineLoop>,
    /// Land hexes eroded across all passes
    pub eroded: usize,
    /// Water hexes filled across all passes
    pub dilated: usize,
}

/// Erodes/dilates the land mask and traces the coast through hex centers
///
/// # Example
///
/// ```
/// use hex_island::*;
///
/// let config = MapConfigBuilder::new().seed(3).grid(24, 20).unwrap().build().unwrap();
/// let field = ElevationField::new(config.seed, config.elevation).unwrap();
/// let hexes = classify(&field.build(), config.elevation.sea_level);
///
/// let refiner = CoastRefiner::new(*field.grid(), config.coast);
/// let coast = refiner.refine(&hexes).unwrap();
/// assert!(coast.loops.len() <= 1);
/// ```
#[derive(Debug, Clone)]
pub struct CoastRefiner<N = PerlinNoise> {
    grid: HexGrid,
    config: CoastConfig,
    noise: N,
    policy: LoopPolicy,
}

impl CoastRefiner<PerlinNoise> {
    /// Refiner modulated by Perlin noise seeded with `config.coast_noise_seed`
    pub fn new(grid: HexGrid, config: CoastConfig) -> Self {
        Self::with_noise(grid, config, PerlinNoise::new(config.coast_noise_seed))
    }
}

impl<N: NoiseSource> CoastRefiner<N> {
    /// Refiner modulated by any noise source
    pub fn with_noise(grid: HexGrid, config: CoastConfig, noise: N) -> Self {
        Self {
            grid,
            config,
            noise,
            policy: LoopPolicy::Largest,
        }
    }

    /// Override which loops `refine` returns
    pub fn with_policy(mut self, policy: LoopPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Per-hex modulation value in [0, 1]
    pub fn modulation(&self, hexes: &[Hex]) -> Vec<f64> {
        hexes
            .iter()
            .map(|hex| {
                let p = hex.center * MODULATION_SCALE;
                to_unit(self.noise.noise_2d(p.x, p.y))
            })
            .collect()
    }

    /// Run all erosion then all dilation passes; returns the final mask
    fn reshape(&self, hexes: &[Hex]) -> (Vec<bool>, usize, usize) {
        let modulation = self.modulation(hexes);
        let mut mask = land_mask(hexes);
        let mut eroded = 0;
        let mut dilated = 0;

        for _ in 0..self.config.erosion_passes {
            let (next, changed) = erosion_pass(&self.grid, &mask, &modulation);
            mask = next;
            eroded += changed;
        }
        for _ in 0..self.config.dilation_passes {
            let (next, changed) = dilation_pass(&self.grid, &mask, &modulation);
            mask = next;
            dilated += changed;
        }

        (mask, eroded, dilated)
    }

    /// Refine the land mask and trace its coastline
    ///
    /// # Errors
    ///
    /// Returns `GridMismatch` if `hexes` was not built for this refiner's grid
    pub fn refine(&self, hexes: &[Hex]) -> Result<RefinedCoast> {
        self.grid.check(hexes)?;

        let (mask, eroded, dilated) = self.reshape(hexes);
        let reshaped: Vec<Hex> = hexes
            .iter()
            .zip(&mask)
            .map(|(hex, &is_land)| Hex {
                is_land,
                ..hex.clone()
            })
            .collect();
        let (refined, _) = label_regions(&self.grid, &reshaped)?;

        let loops: Vec<CoastlineLoop> = walk_boundaries(&self.grid, &refined)
            .iter()
            .map(|ring| CoastlineLoop::smoothed(ring))
            .collect();
        let traced = loops.len();
        let loops = select_loops(loops, self.policy);

        log::debug!(
            "coast refine: {} eroded, {} dilated, {} loops traced, {} kept",
            eroded,
            dilated,
            traced,
            loops.len()
        );

        Ok(RefinedCoast {
            hexes: refined,
            loops,
            eroded,
            dilated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hexes_from(grid: &HexGrid, land: impl Fn(usize, usize) -> bool) -> Vec<Hex> {
        let mut hexes = Vec::new();
        for r in 0..grid.rows {
            for q in 0..grid.cols {
                let mut hex = Hex::new(q, r, grid.center(q, r), 0.5);
                hex.is_land = land(q, r);
                hexes.push(hex);
            }
        }
        hexes
    }

    fn config(erosion: usize, dilation: usize) -> CoastConfig {
        CoastConfig {
            erosion_passes: erosion,
            dilation_passes: dilation,
            coast_noise_seed: 11,
        }
    }

    #[test]
    fn test_erosion_thresholds() {
        let grid = HexGrid::new(5, 5, 1.0);
        // Lone land hex at (2,2): six water neighbors.
        let mut mask = vec![false; 25];
        mask[grid.index(2, 2)] = true;

        let (next, changed) = erosion_pass(&grid, &mask, &[1.0; 25]);
        assert_eq!(changed, 1, "six water neighbors beat the max threshold of 4");
        assert!(!next[grid.index(2, 2)]);
    }

    #[test]
    fn test_erosion_threshold_range() {
        let grid = HexGrid::new(5, 5, 1.0);
        // Interior hex with exactly 3 water neighbors.
        let mut mask = vec![true; 25];
        for (q, r) in [(3, 2), (2, 3), (1, 3)] {
            mask[grid.index(q, r)] = false;
        }
        let target = grid.index(2, 2);

        let low = vec![0.0; 25]; // threshold 2
        let (next, _) = erosion_pass(&grid, &mask, &low);
        assert!(!next[target]);

        let high = vec![1.0; 25]; // threshold 4
        let (next, _) = erosion_pass(&grid, &mask, &high);
        assert!(next[target]);
    }

    #[test]
    fn test_dilation_thresholds() {
        let grid = HexGrid::new(5, 5, 1.0);
        // Water hex at (2,2) with three land neighbors.
        let mut mask = vec![false; 25];
        for (q, r) in [(3, 2), (2, 3), (1, 3)] {
            mask[grid.index(q, r)] = true;
        }
        let target = grid.index(2, 2);

        let (next, _) = dilation_pass(&grid, &mask, &[1.0; 25]); // threshold 2
        assert!(next[target]);

        let (next, _) = dilation_pass(&grid, &mask, &[0.0; 25]); // threshold 4
        assert!(!next[target]);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_short_modulation_panics() {
        let grid = HexGrid::new(5, 5, 1.0);
        let mask = vec![true; grid.len()];
        erosion_pass(&grid, &mask, &[0.5; 3]);
    }

    #[test]
    fn test_pass_is_batched() {
        let grid = HexGrid::new(6, 1, 1.0);
        // Row of land: the ends see one water neighbor each, the border never counts.
        let mask = vec![false, true, true, true, true, false];
        let (next, changed) = erosion_pass(&grid, &mask, &[0.0; 6]);
        assert_eq!(changed, 0);
        assert_eq!(next, mask);
    }

    #[test]
    fn test_zero_passes_preserve_mask() {
        let grid = HexGrid::new(8, 8, 4.0);
        let hexes = hexes_from(&grid, |q, r| (2..6).contains(&q) && (2..6).contains(&r));
        let refiner = CoastRefiner::new(grid, config(0, 0));
        let out = refiner.refine(&hexes).unwrap();
        assert_eq!(out.eroded, 0);
        assert_eq!(out.dilated, 0);
        for (a, b) in hexes.iter().zip(&out.hexes) {
            assert_eq!(a.is_land, b.is_land);
        }
        assert_eq!(out.loops.len(), 1);
    }

    #[test]
    fn test_refine_returns_at_most_one_loop() {
        let grid = HexGrid::new(16, 16, 4.0);
        // Two separate blobs.
        let hexes = hexes_from(&grid, |q, r| {
            ((1..6).contains(&q) && (1..6).contains(&r)) || ((9..15).contains(&q) && (8..15).contains(&r))
        });
        let refiner = CoastRefiner::with_noise(grid, config(0, 0), |_: f64, _: f64| 0.0);
        let largest = refiner.refine(&hexes).unwrap();
        assert_eq!(largest.loops.len(), 1);

        let all = refiner.with_policy(LoopPolicy::All).refine(&hexes).unwrap();
        assert!(all.loops.len() >= 2);
        let max_area = all.loops.iter().map(|l| l.area()).fold(0.0, f64::max);
        assert_eq!(largest.loops[0].area(), max_area);
    }

    #[test]
    fn test_refined_regions_are_relabeled() {
        let grid = HexGrid::new(10, 10, 4.0);
        let hexes = hexes_from(&grid, |q, r| (2..8).contains(&q) && (2..8).contains(&r));
        // Maximal dilation pressure: threshold 2 everywhere.
        let refiner = CoastRefiner::with_noise(grid, config(0, 1), |_: f64, _: f64| 1.0);
        let out = refiner.refine(&hexes).unwrap();
        assert!(out.dilated > 0);
        for hex in &out.hexes {
            assert_eq!(hex.region.is_some(), hex.is_land);
        }
    }

    #[test]
    fn test_all_water_gives_no_loops() {
        let grid = HexGrid::new(6, 6, 4.0);
        let hexes = hexes_from(&grid, |_, _| false);
        let out = CoastRefiner::new(grid, config(2, 2)).refine(&hexes).unwrap();
        assert!(out.loops.is_empty());
        assert!(out.hexes.iter().all(|h| !h.is_land));
    }

    #[test]
    fn test_modulation_is_deterministic_and_bounded() {
        let grid = HexGrid::new(12, 12, 10.0);
        let hexes = hexes_from(&grid, |_, _| true);
        let a = CoastRefiner::new(grid, config(1, 1)).modulation(&hexes);
        let b = CoastRefiner::new(grid, config(1, 1)).modulation(&hexes);
        assert_eq!(a, b);
        assert!(a.iter().all(|v| (0.0..=1.0).contains(v)));
    }
}
