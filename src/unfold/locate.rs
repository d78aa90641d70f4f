//! Point location in the unfolding plane.
//!
//! A linear scan with barycentric containment tests. Queries arrive at
//! user-interaction rate, so no spatial index is kept.

use crate::geometry::barycentric::point_in_triangle;
use crate::geometry::vector::Point2;
use crate::topology::ids::CellId;
use crate::unfold::projection::Projection;

/// The first cell, in id order, whose projected triangle contains `p`.
///
/// `None` is a normal outcome: `p` may fall outside the layout or into a
/// gap between non-tree neighbours.
pub fn locate(projection: &Projection, p: Point2) -> Option<CellId> {
    projection
        .iter()
        .find(|(_, t)| point_in_triangle(p, t))
        .map(|(c, _)| c)
}

/// Every cell whose projected triangle contains `p`.
///
/// More than one hit happens where the unfolding overlaps itself or on a
/// shared edge.
pub fn locate_all(projection: &Projection, p: Point2) -> Vec<CellId> {
    projection
        .iter()
        .filter(|(_, t)| point_in_triangle(p, t))
        .map(|(c, _)| c)
        .collect()
}
