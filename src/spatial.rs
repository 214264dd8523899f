//! Spatial indexing for coastline segment stitching
//!
//! This module is only available with the `spatial-index` feature.

use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

use crate::geometry::Point;

/// KD-tree over 2D points, answering "which points lie within epsilon of here"
///
/// The coastline tracer builds one over all segment start points so each
/// chain-extension lookup is O(log n) instead of a scan over every segment.
///
/// # Example
///
/// ```
/// use hex_island::geometry::Point;
/// use hex_island::SpatialIndex;
///
/// let index = SpatialIndex::new(&[
///     Point::new(0.0, 0.0),
///     Point::new(5.0, 5.0),
///     Point::new(5.0, 5.0 + 1e-9),
/// ]);
/// assert_eq!(index.within(Point::new(5.0, 5.0), 1e-6), vec![1, 2]);
/// assert!(index.within(Point::new(2.0, 2.0), 1e-6).is_empty());
/// ```
#[derive(Clone)]
pub struct SpatialIndex {
    /// `None` when built from an empty slice
    tree: Option<ImmutableKdTree<f64, usize, 2, 32>>,
}

impl SpatialIndex {
    /// Build an index; item ids are positions in `points`
    pub fn new(points: &[Point]) -> Self {
        if points.is_empty() {
            return Self { tree: None };
        }

        let coords: Vec<[f64; 2]> = points.iter().map(|p| [p.x, p.y]).collect();
        Self {
            tree: Some(ImmutableKdTree::new_from_slice(&coords)),
        }
    }

    /// Ids of all points within `epsilon` of `position`, ascending
    pub fn within(&self, position: Point, epsilon: f64) -> Vec<usize> {
        let Some(tree) = &self.tree else {
            return Vec::new();
        };

        let mut ids: Vec<usize> = tree
            .within::<SquaredEuclidean>(&[position.x, position.y], epsilon * epsilon)
            .into_iter()
            .map(|neighbour| neighbour.item)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Id of the nearest point, or `None` for an empty index
    pub fn nearest(&self, position: Point) -> Option<usize> {
        self.tree.as_ref().map(|tree| {
            tree.nearest_one::<SquaredEuclidean>(&[position.x, position.y])
                .item
        })
    }
}
