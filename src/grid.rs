//! Hex lattice geometry
//!
//! Hexes are stored row-major (`index = r * cols + q`). Two adjacency notions
//! live here:
//!
//! - the six **logical** axial directions used by every mask operation
//!   (speck removal, region labeling, erosion/dilation, boundary walks, flow);
//! - the six **geometric** side neighbors of the odd-row pixel projection,
//!   used only where actual hexagon edges are emitted (the edge tracer).

use glam::DVec2;

use crate::error::{Result, TerrainError};
use crate::geometry::Point;

/// Axial neighbor offsets `(dq, dr)` in canonical order
pub const AXIAL_DIRECTIONS: [(isize, isize); 6] = [(1, 0), (0, 1), (-1, 1), (-1, 0), (0, -1), (1, -1)];

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Dimensions of a rectangular pointy-top hex lattice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexGrid {
    /// Number of columns (q axis)
    pub cols: usize,
    /// Number of rows (r axis)
    pub rows: usize,
    /// Hex circumradius in pixels
    pub radius: f64,
}

impl HexGrid {
    /// Create a grid description
    pub fn new(cols: usize, rows: usize, radius: f64) -> Self {
        Self { cols, rows, radius }
    }

    /// Total number of hexes
    #[inline]
    pub fn len(&self) -> usize {
        self.cols * self.rows
    }

    /// True if the grid has no hexes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row-major index of `(q, r)`
    #[inline]
    pub fn index(&self, q: usize, r: usize) -> usize {
        r * self.cols + q
    }

    /// `(q, r)` of a row-major index
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.cols, index / self.cols)
    }

    /// Index of `(q + dq, r + dr)`, or `None` outside the grid (never wraps)
    #[inline]
    pub fn offset(&self, q: usize, r: usize, dq: isize, dr: isize) -> Option<usize> {
        let nq = q.checked_add_signed(dq)?;
        let nr = r.checked_add_signed(dr)?;
        (nq < self.cols && nr < self.rows).then(|| self.index(nq, nr))
    }

    /// In-grid logical neighbors of a hex, in `AXIAL_DIRECTIONS` order
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let (q, r) = self.coords(index);
        AXIAL_DIRECTIONS
            .iter()
            .filter_map(move |&(dq, dr)| self.offset(q, r, dq, dr))
    }

    /// Number of in-grid logical neighbor slots (6 inside, fewer on the border)
    pub fn neighbor_slots(&self, index: usize) -> usize {
        self.neighbors(index).count()
    }

    /// Pixel center of `(q, r)` under the pointy-top odd-row projection
    #[inline]
    pub fn center(&self, q: usize, r: usize) -> Point {
        let shift = 0.5 * (r % 2) as f64;
        DVec2::new(
            self.radius * SQRT_3 * (q as f64 + shift),
            self.radius * 1.5 * r as f64,
        )
    }

    /// Pixel size of the canvas that fully contains every hexagon
    pub fn canvas_size(&self) -> DVec2 {
        DVec2::new(
            self.radius * SQRT_3 * (self.cols as f64 + 0.5),
            self.radius * (1.5 * self.rows as f64 + 0.5),
        )
    }

    /// Center of the canvas, used as the origin of the radial falloff
    pub fn canvas_center(&self) -> Point {
        self.canvas_size() * 0.5
    }

    /// Corner `k` (0..6) of the hexagon around `center`
    ///
    /// Corners sit at `30° + 60°·k`, clockwise on screen (y grows downward),
    /// starting at the lower-right corner.
    #[inline]
    pub fn corner(&self, center: Point, k: usize) -> Point {
        let angle = (30.0 + 60.0 * k as f64).to_radians();
        center + DVec2::new(angle.cos(), angle.sin()) * self.radius
    }

    /// Hex across side `side` (between corners `side` and `side + 1`)
    ///
    /// This follows the odd-row projection, so it is the hex whose hexagon
    /// actually shares that edge on screen.
    pub fn side_neighbor(&self, index: usize, side: usize) -> Option<usize> {
        let (q, r) = self.coords(index);
        let odd = r % 2 == 1;
        let (dq, dr) = match (side % 6, odd) {
            (0, false) => (0, 1),
            (0, true) => (1, 1),
            (1, false) => (-1, 1),
            (1, true) => (0, 1),
            (2, _) => (-1, 0),
            (3, false) => (-1, -1),
            (3, true) => (0, -1),
            (4, false) => (0, -1),
            (4, true) => (1, -1),
            _ => (1, 0),
        };
        self.offset(q, r, dq, dr)
    }

    /// Ensure a hex slice was produced for this grid
    pub fn check<T>(&self, hexes: &[T]) -> Result<()> {
        if hexes.len() == self.len() {
            Ok(())
        } else {
            Err(TerrainError::GridMismatch {
                expected: self.len(),
                actual: hexes.len(),
            })
        }
    }
}
