//! Geometry utilities for surface-automata.
//!
//! Fixed-size vector helpers, canonical point keys used to weld triangle
//! soups, and barycentric containment tests used for picking in the
//! unfolding plane.

pub mod barycentric;
pub mod key;
pub mod vector;

pub use barycentric::{barycentric, point_in_triangle};
pub use key::{GeometryKey, Welding};
pub use vector::{Point2, Point3, Triangle};
