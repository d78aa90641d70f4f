//! Small fixed-size vector helpers.
//!
//! Points are plain `[f64; N]` arrays, matching how coordinates flow through
//! the rest of the crate; these free functions cover the handful of
//! operations adjacency, unfolding and picking need.

/// A point (or vector) in 3D.
pub type Point3 = [f64; 3];
/// A point (or vector) in the unfolding plane.
pub type Point2 = [f64; 2];
/// A triangle as three corners; winding order is significant.
pub type Triangle = [Point3; 3];

#[inline]
pub fn sub<const N: usize>(a: [f64; N], b: [f64; N]) -> [f64; N] {
    std::array::from_fn(|i| a[i] - b[i])
}

#[inline]
pub fn add<const N: usize>(a: [f64; N], b: [f64; N]) -> [f64; N] {
    std::array::from_fn(|i| a[i] + b[i])
}

#[inline]
pub fn scale<const N: usize>(a: [f64; N], s: f64) -> [f64; N] {
    a.map(|x| x * s)
}

#[inline]
pub fn dot<const N: usize>(a: [f64; N], b: [f64; N]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[inline]
pub fn norm<const N: usize>(a: [f64; N]) -> f64 {
    dot(a, a).sqrt()
}

#[inline]
pub fn cross(a: Point3, b: Point3) -> Point3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Returns `a` scaled to unit length, or `None` for a zero vector.
pub fn normalize<const N: usize>(a: [f64; N]) -> Option<[f64; N]> {
    let n = norm(a);
    (n > 0.0).then(|| scale(a, 1.0 / n))
}

/// Rotates `v` counter-clockwise by `degrees` (negative is clockwise).
pub fn rotate(v: Point2, degrees: f64) -> Point2 {
    let (s, c) = degrees.to_radians().sin_cos();
    [v[0] * c - v[1] * s, v[0] * s + v[1] * c]
}

/// Left-hand perpendicular: `v` rotated by +90°.
#[inline]
pub fn perp(v: Point2) -> Point2 {
    [-v[1], v[0]]
}

/// Mean of the three corners.
pub fn centroid<const N: usize>(t: &[[f64; N]; 3]) -> [f64; N] {
    std::array::from_fn(|i| (t[0][i] + t[1][i] + t[2][i]) / 3.0)
}

/// Twice the signed area of a 2D triangle; positive when counter-clockwise.
pub fn signed_area2(t: &[Point2; 3]) -> f64 {
    let e1 = sub(t[1], t[0]);
    let e2 = sub(t[2], t[0]);
    e1[0] * e2[1] - e1[1] * e2[0]
}
