//! Barycentric containment tests in the unfolding plane.

use crate::geometry::vector::{Point2, dot, sub};

/// Barycentric coordinates `(u, v)` of `p` with respect to triangle `t`.
///
/// `u` weights the edge `t[0] → t[2]` and `v` the edge `t[0] → t[1]`, so
/// `p = t[0] + u·(t[2] − t[0]) + v·(t[1] − t[0])`. Returns `None` for a
/// zero-area triangle.
pub fn barycentric(p: Point2, t: &[Point2; 3]) -> Option<(f64, f64)> {
    let v0 = sub(t[2], t[0]);
    let v1 = sub(t[1], t[0]);
    let v2 = sub(p, t[0]);

    let dot00 = dot(v0, v0);
    let dot01 = dot(v0, v1);
    let dot02 = dot(v0, v2);
    let dot11 = dot(v1, v1);
    let dot12 = dot(v1, v2);

    let denom = dot00 * dot11 - dot01 * dot01;
    if denom == 0.0 {
        return None;
    }
    let inv = 1.0 / denom;
    let u = (dot11 * dot02 - dot01 * dot12) * inv;
    let v = (dot00 * dot12 - dot01 * dot02) * inv;
    Some((u, v))
}

/// `true` if `p` lies inside or on the boundary of `t`.
///
/// Degenerate triangles never contain any point.
pub fn point_in_triangle(p: Point2, t: &[Point2; 3]) -> bool {
    match barycentric(p, t) {
        Some((u, v)) => u >= 0.0 && v >= 0.0 && u + v <= 1.0,
        None => false,
    }
}
