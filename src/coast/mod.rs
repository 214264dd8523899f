//! Coastline extraction
//!
//! Two vectorization paths share the loop type, smoothing and loop selection:
//!
//! - [`CoastRefiner`] erodes/dilates the land mask with noise-modulated
//!   thresholds, then walks boundary hex centers. Keeps the largest loop by
//!   default.
//! - [`CoastlineTracer`] stitches actual hexagon edges between land and
//!   water into closed rings. Keeps every loop by default.

mod edges;
mod refine;
mod walk;

pub use edges::{boundary_segments, stitch_segments, CoastlineTracer, Segment, STITCH_EPSILON};
pub use refine::{dilation_pass, erosion_pass, CoastRefiner, RefinedCoast};
pub use walk::walk_boundaries;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{chaikin, signed_area, Point};

/// Chaikin passes applied to every coastline loop
pub const SMOOTHING_PASSES: usize = 2;

/// An implicitly closed polygon ring (last point connects to first)
///
/// Orientation is whatever the producing tracer emitted; compare loops with
/// [`CoastlineLoop::area`], not the signed area.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoastlineLoop {
    /// Ring vertices in pixel space
    pub points: Vec<Point>,
}

impl CoastlineLoop {
    /// Wrap a vertex ring
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Smooth a raw ring with the closed Chaikin variant
    pub fn smoothed(raw: &[Point]) -> Self {
        Self::new(chaikin(raw, SMOOTHING_PASSES, true))
    }

    /// Number of vertices
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the ring has no vertices
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A ring needs at least three vertices to enclose anything
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.points.len() >= 3
    }

    /// Shoelace area, sign depends on winding
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }

    /// Absolute enclosed area
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }
}

/// Which loops a coast stage returns
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopPolicy {
    /// Only the loop with the largest absolute area (the outer coastline)
    #[default]
    Largest,
    /// Every loop, in discovery order
    All,
}

/// Apply a loop policy
///
/// `Largest` keeps the first loop among equals, so the result is stable for
/// a fixed discovery order. An empty input stays empty under either policy.
pub fn select_loops(loops: Vec<CoastlineLoop>, policy: LoopPolicy) -> Vec<CoastlineLoop> {
    match policy {
        LoopPolicy::All => loops,
        LoopPolicy::Largest => {
            let mut best: Option<(f64, CoastlineLoop)> = None;
            for ring in loops {
                let area = ring.area();
                let larger = best
                    .as_ref()
                    .map_or(true, |(best_area, _)| area > *best_area);
                if larger {
                    best = Some((area, ring));
                }
            }
            best.map(|(_, ring)| vec![ring]).unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f64) -> CoastlineLoop {
        CoastlineLoop::new(vec![
            Point::new(0.0, 0.0),
            Point::new(size, 0.0),
            Point::new(size, size),
            Point::new(0.0, size),
        ])
    }

    #[test]
    fn test_loop_area_ignores_orientation() {
        let ring = square(3.0);
        let mut reversed = ring.clone();
        reversed.points.reverse();
        assert_eq!(ring.area(), 9.0);
        assert_eq!(reversed.area(), 9.0);
        assert_eq!(ring.signed_area(), -reversed.signed_area());
    }

    #[test]
    fn test_select_largest() {
        let mut big = square(5.0);
        big.points.reverse();
        let loops = vec![square(1.0), big.clone(), square(2.0)];
        let selected = select_loops(loops, LoopPolicy::Largest);
        assert_eq!(selected, vec![big]);
    }

    #[test]
    fn test_select_largest_tie_keeps_first() {
        let first = square(2.0);
        let mut second = square(2.0);
        second.points.reverse();
        let selected = select_loops(vec![first.clone(), second], LoopPolicy::Largest);
        assert_eq!(selected, vec![first]);
    }

    #[test]
    fn test_select_all_and_empty() {
        let loops = vec![square(1.0), square(2.0)];
        assert_eq!(select_loops(loops.clone(), LoopPolicy::All), loops);
        assert!(select_loops(Vec::new(), LoopPolicy::Largest).is_empty());
        assert!(select_loops(Vec::new(), LoopPolicy::All).is_empty());
    }

    #[test]
    fn test_smoothed_ring() {
        let ring = CoastlineLoop::smoothed(&square(4.0).points);
        assert_eq!(ring.len(), 16);
        assert!(ring.is_valid());
    }
}
