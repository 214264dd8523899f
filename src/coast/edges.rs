//! Hexagon-edge coastline tracer
//!
//! Emits every hexagon side that separates land from water (or from the
//! outside of the grid) and stitches the sides into closed rings. Every side
//! runs from corner k to corner k+1 of its land hex, so at any boundary
//! vertex exactly one side ends and one side starts.

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

use crate::error::Result;
use crate::geometry::Point;
use crate::grid::HexGrid;
use crate::hex::Hex;

use super::{select_loops, CoastlineLoop, LoopPolicy};

/// Distance under which two segment endpoints are the same vertex
pub const STITCH_EPSILON: f64 = 1e-6;

/// One land/water hexagon side, running corner k to k+1 of its land hex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Corner the side starts at
    pub start: Point,
    /// Corner the side ends at
    pub end: Point,
}

/// All land/water sides of a hex snapshot, in row-major then side order
///
/// # Panics
///
/// Panics if `hexes` is shorter than `grid.len()` and a land hex has a
/// side neighbor past its end. [`CoastlineTracer::trace`] checks the length first.
pub fn boundary_segments(grid: &HexGrid, hexes: &[Hex]) -> Vec<Segment> {
    let mut segments = Vec::new();
    for (index, hex) in hexes.iter().enumerate() {
        if !hex.is_land {
            continue;
        }
        for side in 0..6 {
            let open = match grid.side_neighbor(index, side) {
                Some(other) => !hexes[other].is_land,
                None => true,
            };
            if open {
                segments.push(Segment {
                    start: grid.corner(hex.center, side),
                    end: grid.corner(hex.center, side + 1),
                });
            }
        }
    }
    segments
}

/// Finds the unused segment whose start matches a point
struct StartLookup<'a> {
    segments: &'a [Segment],
    #[cfg(feature = "spatial-index")]
    index: SpatialIndex,
}

impl<'a> StartLookup<'a> {
    fn new(segments: &'a [Segment]) -> Self {
        #[cfg(feature = "spatial-index")]
        let index = {
            let starts: Vec<Point> = segments.iter().map(|s| s.start).collect();
            SpatialIndex::new(&starts)
        };

        Self {
            segments,
            #[cfg(feature = "spatial-index")]
            index,
        }
    }

    /// Lowest-index unused segment starting within `epsilon` of `point`
    #[cfg(feature = "spatial-index")]
    fn find(&self, point: Point, epsilon: f64, used: &[bool]) -> Option<usize> {
        self.index
            .within(point, epsilon)
            .into_iter()
            .find(|&i| !used[i])
    }

    #[cfg(not(feature = "spatial-index"))]
    fn find(&self, point: Point, epsilon: f64, used: &[bool]) -> Option<usize> {
        self.segments
            .iter()
            .enumerate()
            .find(|(i, s)| !used[*i] && s.start.distance(point) <= epsilon)
            .map(|(i, _)| i)
    }
}

/// Greedily chain segments end-to-start into closed rings
///
/// Chains start from the lowest unused segment. A chain that cannot be
/// continued before returning to its start is discarded, as are closed
/// chains with fewer than three vertices. Rings are returned unsmoothed.
pub fn stitch_segments(segments: &[Segment], epsilon: f64) -> Vec<Vec<Point>> {
    let lookup = StartLookup::new(segments);
    let mut used = vec![false; segments.len()];
    let mut rings = Vec::new();

    for first in 0..segments.len() {
        if used[first] {
            continue;
        }
        used[first] = true;

        let origin = segments[first].start;
        let mut ring = vec![origin];
        let mut end = segments[first].end;
        let mut closed = end.distance(origin) <= epsilon;

        while !closed {
            let Some(next) = lookup.find(end, epsilon, &used) else {
                break;
            };
            used[next] = true;
            ring.push(end);
            end = lookup.segments[next].end;
            closed = end.distance(origin) <= epsilon;
        }

        if closed && ring.len() > 2 {
            rings.push(ring);
        } else if !closed {
            log::debug!(
                "coastline tracer: dropped open chain of {} vertices",
                ring.len()
            );
        }
    }

    rings
}

/// Traces every land/water boundary ring along hexagon edges
///
/// Works on the mask as given (no erosion or dilation) and, unlike the
/// refiner, keeps all loops by default: islands, lakes and the outer coast.
///
/// # Example
///
/// ```
/// use hex_island::*;
///
/// let grid = HexGrid::new(6, 6, 5.0);
/// let mut hexes: Vec<Hex> = (0..36)
///     .map(|i| {
///         let (q, r) = grid.coords(i);
///         Hex::new(q, r, grid.center(q, r), 0.0)
///     })
///     .collect();
/// hexes[grid.index(2, 2)].is_land = true;
///
/// let loops = CoastlineTracer::new(grid).trace(&hexes).unwrap();
/// assert_eq!(loops.len(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CoastlineTracer {
    grid: HexGrid,
    policy: LoopPolicy,
}

impl CoastlineTracer {
    /// Tracer keeping every loop
    pub fn new(grid: HexGrid) -> Self {
        Self {
            grid,
            policy: LoopPolicy::All,
        }
    }

    /// Override which loops `trace` returns
    pub fn with_policy(mut self, policy: LoopPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Trace, stitch and smooth every coastline ring
    ///
    /// # Errors
    ///
    /// Returns `GridMismatch` if `hexes` was not built for this tracer's grid
    pub fn trace(&self, hexes: &[Hex]) -> Result<Vec<CoastlineLoop>> {
        self.grid.check(hexes)?;

        let segments = boundary_segments(&self.grid, hexes);
        let loops: Vec<CoastlineLoop> = stitch_segments(&segments, STITCH_EPSILON)
            .iter()
            .map(|ring| CoastlineLoop::smoothed(ring))
            .collect();

        log::debug!(
            "coastline tracer: {} boundary sides, {} loops",
            segments.len(),
            loops.len()
        );
        Ok(select_loops(loops, self.policy))
    }
}
