//! HexMap main structure

use crate::coast::{CoastRefiner, CoastlineLoop, CoastlineTracer};
use crate::config::MapConfig;
use crate::error::Result;
use crate::grid::HexGrid;
use crate::hex::Hex;
use crate::noise::{NoiseSource, PerlinNoise};
use crate::rivers::RiverNetwork;
use crate::terrain::{classify_all, ElevationField, ElevationStats};

#[cfg(feature = "spatial-index")]
use crate::geometry::Point;
#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A fully generated hex map and every intermediate snapshot
///
/// Each pipeline stage produced a fresh hex collection; all of them are kept
/// so callers can inspect or render any step.
///
/// # Examples
///
/// ```
/// use hex_island::*;
///
/// let config = MapConfigBuilder::new()
///     .seed(42)
///     .grid(32, 24)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let map = HexMap::generate(config).unwrap();
/// println!("{} land hexes", map.stats().land);
///
/// if let Some(hex) = map.hex(3, 4) {
///     println!("(3,4) elevation {:.2}", hex.elevation);
/// }
/// ```
#[derive(Clone)]
pub struct HexMap {
    /// Configuration used to generate this map
    config: MapConfig,

    grid: HexGrid,

    /// Sampled elevation, everything water
    elevation: Vec<Hex>,
    /// Thresholded against sea level
    classified: Vec<Hex>,
    /// Isolated land removed
    despecked: Vec<Hex>,
    /// Land regions labeled
    labeled: Vec<Hex>,
    /// Eroded, dilated and relabeled
    refined: Vec<Hex>,

    /// Largest refined coastline loop (empty if there is no land)
    coastline: Vec<CoastlineLoop>,
    /// Every hexagon-edge loop of the despecked mask
    all_coastlines: Vec<CoastlineLoop>,

    rivers: RiverNetwork,
    stats: ElevationStats,

    /// Hex-center lookup (optional, requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl HexMap {
    /// Generate a map with seeded Perlin noise
    ///
    /// The elevation noise is seeded with `config.seed`, the coast modulation
    /// noise with `config.coast.coast_noise_seed`.
    ///
    /// # Example
    ///
    /// ```
    /// use hex_island::*;
    ///
    /// let config = MapConfigBuilder::new().seed(12345).grid(20, 16).unwrap().build().unwrap();
    /// let map = HexMap::generate(config).unwrap();
    /// assert_eq!(map.hex_count(), 320);
    /// ```
    pub fn generate(config: MapConfig) -> Result<Self> {
        Self::generate_with_noise(
            config,
            PerlinNoise::new(config.seed),
            PerlinNoise::new(config.coast.coast_noise_seed),
        )
    }

    /// Generate a map with caller-supplied noise sources
    ///
    /// # Example
    ///
    /// ```
    /// use hex_island::*;
    ///
    /// let config = MapConfigBuilder::new().seed(1).grid(10, 10).unwrap().build().unwrap();
    /// // Flat noise: the island shape comes from the radial falloff alone.
    /// let map = HexMap::generate_with_noise(config, |_: f64, _: f64| 0.0, |_: f64, _: f64| 0.0).unwrap();
    /// assert!(map.stats().land > 0);
    /// ```
    pub fn generate_with_noise<E, C>(config: MapConfig, elevation_noise: E, coast_noise: C) -> Result<Self>
    where
        E: NoiseSource,
        C: NoiseSource,
    {
        config.validate()?;

        let field = ElevationField::with_noise(elevation_noise, config.elevation)?;
        let grid = *field.grid();
        let elevation = field.build();

        let classification = classify_all(&grid, &elevation, config.elevation.sea_level)?;

        let refined = CoastRefiner::with_noise(grid, config.coast, coast_noise).refine(&classification.labeled)?;
        let all_coastlines = CoastlineTracer::new(grid).trace(&classification.despecked)?;
        let rivers = RiverNetwork::trace(&grid, &refined.hexes, &config.rivers)?;

        let mut stats = ElevationStats::collect(&classification.labeled, config.elevation.sea_level);
        stats.specks_removed = classification.specks_removed;
        stats.regions = classification.region_count;

        log::info!(
            "hex map {}x{} (seed {}): {} land / {} water, {} regions, {} coast loops, {} rivers",
            grid.cols,
            grid.rows,
            config.seed,
            stats.land,
            stats.water,
            stats.regions,
            all_coastlines.len(),
            rivers.polylines.len()
        );

        // Build spatial index (requires spatial-index feature)
        #[cfg(feature = "spatial-index")]
        let spatial_index = {
            let centers: Vec<Point> = elevation.iter().map(|h| h.center).collect();
            SpatialIndex::new(&centers)
        };

        Ok(Self {
            config,
            grid,
            elevation,
            classified: classification.classified,
            despecked: classification.despecked,
            labeled: classification.labeled,
            refined: refined.hexes,
            coastline: refined.loops,
            all_coastlines,
            rivers,
            stats,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    /// Configuration used to generate this map
    #[inline]
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Lattice the map lives on
    #[inline]
    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    /// Number of hexes
    #[inline]
    pub fn hex_count(&self) -> usize {
        self.refined.len()
    }

    /// Final hex at `(q, r)`, or `None` outside the grid
    #[inline]
    pub fn hex(&self, q: usize, r: usize) -> Option<&Hex> {
        if q >= self.grid.cols || r >= self.grid.rows {
            return None;
        }
        self.refined.get(self.grid.index(q, r))
    }

    /// Final hexes (after coast refinement)
    #[inline]
    pub fn hexes(&self) -> &[Hex] {
        &self.refined
    }

    /// Sampled elevation snapshot (all water)
    #[inline]
    pub fn elevation(&self) -> &[Hex] {
        &self.elevation
    }

    /// Snapshot after thresholding
    #[inline]
    pub fn classified(&self) -> &[Hex] {
        &self.classified
    }

    /// Snapshot after speck removal
    #[inline]
    pub fn despecked(&self) -> &[Hex] {
        &self.despecked
    }

    /// Snapshot after region labeling
    #[inline]
    pub fn labeled(&self) -> &[Hex] {
        &self.labeled
    }

    /// Snapshot after coast refinement (same as [`HexMap::hexes`])
    #[inline]
    pub fn refined(&self) -> &[Hex] {
        &self.refined
    }

    /// Main smoothed coastline (zero or one loop)
    #[inline]
    pub fn coastline(&self) -> &[CoastlineLoop] {
        &self.coastline
    }

    /// Every hexagon-edge coastline loop, smoothed
    #[inline]
    pub fn all_coastlines(&self) -> &[CoastlineLoop] {
        &self.all_coastlines
    }

    /// Flow field and rivers
    #[inline]
    pub fn rivers(&self) -> &RiverNetwork {
        &self.rivers
    }

    /// Summary counts of the labeled snapshot
    #[inline]
    pub fn stats(&self) -> &ElevationStats {
        &self.stats
    }

    /// Final hexes of one land region
    pub fn region(&self, id: u32) -> impl Iterator<Item = &Hex> + '_ {
        self.refined.iter().filter(move |h| h.region == Some(id))
    }

    /// Find the hex whose center is nearest to a pixel position (requires spatial-index feature)
    ///
    /// # Example
    ///
    /// ```
    /// # use hex_island::*;
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// # let config = MapConfigBuilder::new().seed(5).grid(8, 8).unwrap().build().unwrap();
    /// # let map = HexMap::generate(config).unwrap();
    /// let center = map.grid().center(3, 2);
    /// assert_eq!(map.find_hex_at(center), Some(map.grid().index(3, 2)));
    /// # }
    /// ```
    #[cfg(feature = "spatial-index")]
    pub fn find_hex_at(&self, position: Point) -> Option<usize> {
        self.spatial_index.nearest(position)
    }

    /// Hex indices within `hops` logical steps of `center` (BFS)
    ///
    /// Includes `center` itself. Returns an empty vec for an invalid index.
    pub fn find_hexes_within(&self, center: usize, hops: usize) -> Vec<usize> {
        if center >= self.grid.len() {
            return vec![];
        }

        let mut visited = vec![false; self.grid.len()];
        let mut found = vec![center];
        let mut current = vec![center];
        visited[center] = true;

        for _ in 0..hops {
            let mut next = Vec::new();
            for &index in &current {
                for neighbor in self.grid.neighbors(index) {
                    if !visited[neighbor] {
                        visited[neighbor] = true;
                        next.push(neighbor);
                    }
                }
            }
            found.extend_from_slice(&next);
            current = next;
        }

        found
    }
}
