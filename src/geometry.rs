//! Polyline and polygon helpers shared by the coast and river stages

use glam::DVec2;

/// A point in pixel space
pub type Point = DVec2;

/// Chaikin corner-cutting subdivision
///
/// Each pass replaces every subdivided edge `(p0, p1)` by
/// `Q = 0.75·p0 + 0.25·p1` and `R = 0.25·p0 + 0.75·p1`.
///
/// - `closed = true`: the input is a polygon; the wrap-around edge is cut as
///   well, so `n` points become `2n`.
/// - `closed = false`: the input is an open polyline; both endpoints are kept
///   and every edge between them is cut, so `n` points become `2n`.
///
/// Zero passes, or fewer than two points, return the input unchanged.
///
/// # Example
///
/// ```
/// use hex_island::geometry::{chaikin, Point};
///
/// let line = vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0)];
/// let smooth = chaikin(&line, 1, false);
/// assert_eq!(smooth, vec![
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(3.0, 0.0),
///     Point::new(4.0, 0.0),
/// ]);
/// ```
pub fn chaikin(points: &[Point], passes: usize, closed: bool) -> Vec<Point> {
    let mut current = points.to_vec();
    if current.len() < 2 {
        return current;
    }

    for _ in 0..passes {
        let n = current.len();
        let mut next = Vec::with_capacity(n * 2);

        if closed {
            for i in 0..n {
                let p0 = current[i];
                let p1 = current[(i + 1) % n];
                next.push(p0 * 0.75 + p1 * 0.25);
                next.push(p0 * 0.25 + p1 * 0.75);
            }
        } else {
            next.push(current[0]);
            for pair in current.windows(2) {
                next.push(pair[0] * 0.75 + pair[1] * 0.25);
                next.push(pair[0] * 0.25 + pair[1] * 0.75);
            }
            next.push(current[n - 1]);
        }

        current = next;
    }

    current
}

/// Signed shoelace area of an implicitly closed polygon
///
/// The sign depends on winding and is not normalized; use `abs()` to compare
/// loops regardless of orientation.
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let n = points.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.perp_dot(b)
        })
        .sum();

    twice * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ]
    }

    #[test]
    fn test_zero_passes_is_identity() {
        let pts = square();
        assert_eq!(chaikin(&pts, 0, true), pts);
        assert_eq!(chaikin(&pts, 0, false), pts);
    }

    #[test]
    fn test_closed_pass_doubles_vertices() {
        let pts = square();
        let one = chaikin(&pts, 1, true);
        let two = chaikin(&pts, 2, true);
        assert_eq!(one.len(), 8);
        assert_eq!(two.len(), 16);

        // First edge (0,0)-(2,0) cut at 25% / 75%.
        assert_eq!(one[0], Point::new(0.5, 0.0));
        assert_eq!(one[1], Point::new(1.5, 0.0));
        // Wrap-around edge (0,2)-(0,0) is cut too.
        assert_eq!(one[6], Point::new(0.0, 1.5));
        assert_eq!(one[7], Point::new(0.0, 0.5));
    }

    #[test]
    fn test_open_pass_keeps_endpoints() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
        ];
        let out = chaikin(&pts, 3, false);
        assert_eq!(out.first(), pts.first());
        assert_eq!(out.last(), pts.last());

        let mut len = pts.len();
        for passes in 1..4 {
            let smoothed = chaikin(&pts, passes, false);
            assert!(smoothed.len() > len, "pass {} must add vertices", passes);
            len = smoothed.len();
        }
    }

    #[test]
    fn test_degenerate_input_unchanged() {
        let single = vec![Point::new(1.0, 1.0)];
        assert_eq!(chaikin(&single, 5, true), single);
        assert!(chaikin(&[], 3, false).is_empty());
    }

    #[test]
    fn test_signed_area_orientation() {
        let pts = square();
        assert_eq!(signed_area(&pts), 4.0);

        let reversed: Vec<Point> = pts.iter().rev().copied().collect();
        assert_eq!(signed_area(&reversed), -4.0);
    }

    #[test]
    fn test_signed_area_degenerate() {
        assert_eq!(signed_area(&[Point::ZERO, Point::X]), 0.0);
    }

    #[test]
    fn test_smoothing_shrinks_convex_polygon() {
        let pts = square();
        let smoothed = chaikin(&pts, 2, true);
        let before = signed_area(&pts).abs();
        let after = signed_area(&smoothed).abs();
        assert!(after < before && after > 0.5 * before);
    }
}
