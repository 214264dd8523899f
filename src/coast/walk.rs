//! Boundary walk over coastal hex centers

use crate::geometry::Point;
use crate::grid::HexGrid;
use crate::hex::{borders_water, Hex};

/// Walk chains of coastal land hexes and return their raw center rings
///
/// A coastal hex is a land hex with at least one in-grid water neighbor
/// (the grid border does not count as water). Hexes are scanned row-major;
/// each unvisited coastal hex starts a walk that repeatedly steps to the
/// first unvisited coastal land neighbor in direction order.
///
/// Every step visits a new hex, so a walk can never exceed the hex count;
/// that count is used as the step cap. Chains with fewer than three centers
/// are dropped. Rings are returned unsmoothed.
///
/// # Panics
///
/// Panics if `hexes` is shorter than `grid.len()` and a land hex has an
/// in-grid neighbor past its end. [`CoastRefiner::refine`](super::CoastRefiner::refine)
/// checks the length first.
pub fn walk_boundaries(grid: &HexGrid, hexes: &[Hex]) -> Vec<Vec<Point>> {
    let mask: Vec<bool> = hexes.iter().map(|h| h.is_land).collect();
    let coastal: Vec<bool> = (0..hexes.len())
        .map(|i| mask[i] && borders_water(grid, &mask, i))
        .collect();

    let max_steps = grid.len();
    let mut visited = vec![false; hexes.len()];
    let mut rings = Vec::new();

    for start in 0..hexes.len() {
        if !coastal[start] || visited[start] {
            continue;
        }

        visited[start] = true;
        let mut ring = vec![hexes[start].center];
        let mut current = start;

        for _ in 0..max_steps {
            let next = grid
                .neighbors(current)
                .find(|&n| coastal[n] && !visited[n]);
            let Some(next) = next else {
                break;
            };
            visited[next] = true;
            ring.push(hexes[next].center);
            current = next;
        }

        if ring.len() > 2 {
            rings.push(ring);
        }
    }

    rings
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

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_short_snapshot_panics() {
        let grid = HexGrid::new(5, 5, 1.0);
        let mut hexes = hexes_from(&grid, |_, _| true);
        hexes.truncate(3);
        walk_boundaries(&grid, &hexes);
    }

    #[test]
    fn test_no_land_no_rings() {
        let grid = HexGrid::new(5, 5, 1.0);
        let hexes = hexes_from(&grid, |_, _| false);
        assert!(walk_boundaries(&grid, &hexes).is_empty());
    }

    #[test]
    fn test_all_land_has_no_coast() {
        let grid = HexGrid::new(5, 5, 1.0);
        let hexes = hexes_from(&grid, |_, _| true);
        assert!(walk_boundaries(&grid, &hexes).is_empty());
    }

    #[test]
    fn test_ring_around_single_water_hex() {
        let grid = HexGrid::new(5, 5, 1.0);
        let hole = (2, 2);
        let hexes = hexes_from(&grid, |q, r| (q, r) != hole);
        let rings = walk_boundaries(&grid, &hexes);

        // The six logical neighbors of the hole are the only coastal hexes.
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 6);
        // First vertex is the first coastal hex in row-major order: (2,1).
        assert_eq!(rings[0][0], grid.center(2, 1));
    }

    #[test]
    fn test_each_hex_visited_once() {
        let grid = HexGrid::new(10, 8, 2.0);
        let hexes = hexes_from(&grid, |q, r| (2..8).contains(&q) && (2..6).contains(&r));
        let rings = walk_boundaries(&grid, &hexes);
        let mut seen: Vec<Point> = rings.into_iter().flatten().collect();
        let total = seen.len();
        seen.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        seen.dedup();
        assert_eq!(seen.len(), total);
    }
}
