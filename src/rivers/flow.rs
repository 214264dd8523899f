//! Steepest-descent drainage and flow accumulation

use crate::grid::HexGrid;
use crate::hex::Hex;

/// Downstream land neighbor of every hex
///
/// A land hex drains to the lowest in-grid land neighbor that is strictly
/// lower than itself; ties keep the first neighbor in direction order. Water
/// hexes and local minima get `None`. Every edge strictly decreases
/// elevation, so the graph is acyclic.
///
/// # Panics
///
/// Panics if `hexes` is shorter than `grid.len()` and a land hex has a
/// neighbor past its end. [`RiverNetwork::trace`](super::RiverNetwork::trace)
/// checks the length first.
pub fn flow_directions(grid: &HexGrid, hexes: &[Hex]) -> Vec<Option<usize>> {
    hexes
        .iter()
        .enumerate()
        .map(|(index, hex)| {
            if !hex.is_land {
                return None;
            }
            let mut lowest = hex.elevation;
            let mut target = None;
            for n in grid.neighbors(index) {
                if hexes[n].is_land && hexes[n].elevation < lowest {
                    lowest = hexes[n].elevation;
                    target = Some(n);
                }
            }
            target
        })
        .collect()
}

/// Hex indices ordered so every hex comes after all hexes draining into it
///
/// Built from the depth-first finish order along `flow_dirs` (downstream
/// hexes finish first), reversed. Water hexes are left out.
///
/// # Panics
///
/// Panics if `flow_dirs` is shorter than `hexes` or points past its end.
pub fn upstream_order(hexes: &[Hex], flow_dirs: &[Option<usize>]) -> Vec<usize> {
    let mut visited = vec![false; hexes.len()];
    let mut finished = Vec::with_capacity(hexes.len());
    let mut chain = Vec::new();

    for start in 0..hexes.len() {
        if !hexes[start].is_land || visited[start] {
            continue;
        }

        let mut current = Some(start);
        while let Some(index) = current {
            if visited[index] {
                break;
            }
            visited[index] = true;
            chain.push(index);
            current = flow_dirs[index];
        }

        // The deepest hex of the chain finishes first.
        finished.extend(chain.drain(..).rev());
    }

    finished.reverse();
    finished
}

/// Number of land hexes draining through each hex (itself included)
///
/// Water hexes stay at 0. Each land hex passes its total to its downstream
/// target exactly once, after all of its own contributors.
///
/// # Panics
///
/// Panics if `flow_dirs` is shorter than `hexes` or points past its end.
pub fn accumulate(hexes: &[Hex], flow_dirs: &[Option<usize>]) -> Vec<usize> {
    let mut accum: Vec<usize> = hexes.iter().map(|h| usize::from(h.is_land)).collect();
    for index in upstream_order(hexes, flow_dirs) {
        if let Some(target) = flow_dirs[index] {
            accum[target] += accum[index];
        }
    }
    accum
}
