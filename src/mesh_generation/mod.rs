//! Procedural closed-surface generators.
//!
//! Both generators return triangle soups whose shared corners are
//! bit-identical, so they weld correctly under
//! [`Welding::Exact`](crate::geometry::key::Welding::Exact). Faces are wound
//! consistently (counter-clockwise seen from outside).

use crate::geometry::vector::{Point3, Triangle, add, normalize};
use crate::mesh_error::MeshError;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Unit icosahedron corner coordinates (golden-ratio construction).
fn icosahedron_vertices() -> [Point3; 12] {
    let d = (10.0 + 2.0 * 5f64.sqrt()).sqrt();
    let a = 2.0 / d;
    let b = (1.0 + 5f64.sqrt()) / d;
    [
        [-a, b, 0.0],
        [a, b, 0.0],
        [-a, -b, 0.0],
        [a, -b, 0.0],
        [0.0, -a, b],
        [0.0, a, b],
        [0.0, -a, -b],
        [0.0, a, -b],
        [b, 0.0, -a],
        [b, 0.0, a],
        [-b, 0.0, -a],
        [-b, 0.0, a],
    ]
}

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Unit icosphere: the icosahedron with every face split `subdivisions`
/// times into four, new corners pushed out to the sphere.
///
/// Produces `20 · 4^subdivisions` faces.
pub fn icosphere(subdivisions: u32) -> Vec<Triangle> {
    let v = icosahedron_vertices();
    let mut faces: Vec<Triangle> = ICOSAHEDRON_FACES
        .iter()
        .map(|f| f.map(|i| v[i]))
        .collect();
    for _ in 0..subdivisions {
        let mut next = Vec::with_capacity(faces.len() * 4);
        for [v1, v2, v3] in faces {
            // a + b == b + a bit-for-bit, so both faces on an edge agree
            let mid = |a: Point3, b: Point3| normalize(add(a, b)).unwrap_or(a);
            let v12 = mid(v1, v2);
            let v23 = mid(v2, v3);
            let v31 = mid(v3, v1);
            next.extend([
                [v1, v12, v31],
                [v2, v23, v12],
                [v3, v31, v23],
                [v12, v23, v31],
            ]);
        }
        faces = next;
    }
    log::debug!("icosphere({subdivisions}): {} faces", faces.len());
    faces
}

/// Parameters of the triangulated torus lattice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorusOptions {
    /// Lattice diamonds around the hole.
    pub nu: usize,
    /// Lattice rows around the tube; must be even.
    pub nv: usize,
    pub major_radius: f64,
    pub minor_radius: f64,
}

impl Default for TorusOptions {
    fn default() -> Self {
        Self {
            nu: 10,
            nv: 10,
            major_radius: 3.0,
            minor_radius: 1.0,
        }
    }
}

impl TorusOptions {
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.nu < 3 {
            return Err(invalid(format!("torus nu must be at least 3, got {}", self.nu)));
        }
        if self.nv < 4 || self.nv % 2 != 0 {
            return Err(invalid(format!(
                "torus nv must be even and at least 4, got {}",
                self.nv
            )));
        }
        let (big, small) = (self.major_radius, self.minor_radius);
        if !(small.is_finite() && big.is_finite() && small > 0.0 && big > small) {
            return Err(invalid(format!(
                "torus radii must satisfy major > minor > 0, got {big} and {small}"
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> MeshError {
    MeshError::InvalidConfig(message)
}

/// Torus from a flat triangular lattice wrapped in both directions.
///
/// Rows are staggered by half a diamond on odd rows; each diamond is split
/// into two triangles, giving `2 · nu · nv` faces.
pub fn torus(options: &TorusOptions) -> Result<Vec<Triangle>, MeshError> {
    options.validate()?;
    let TorusOptions {
        nu,
        nv,
        major_radius,
        minor_radius,
    } = *options;

    // lattice vertex (i, j) sits at x = i + shift(j), row j
    let positions: Vec<Point3> = (0..nv)
        .flat_map(|j| (0..nu).map(move |i| (i, j)))
        .map(|(i, j)| {
            let shift = 0.5 * (j % 2) as f64;
            let u = (i as f64 + shift) / nu as f64 * TAU;
            let v = j as f64 / nv as f64 * TAU;
            let ring = major_radius + minor_radius * v.cos();
            [ring * u.cos(), ring * u.sin(), minor_radius * v.sin()]
        })
        .collect();
    let at = |i: usize, j: usize| positions[(j % nv) * nu + (i % nu)];

    let mut faces = Vec::with_capacity(2 * nu * nv);
    for j in 0..nv {
        for i in 0..nu {
            let v0 = at(i, j);
            let v1 = at(i + 1, j);
            let v2 = at(i, j + 1);
            let v3 = at(i + 1, j + 1);
            if j % 2 == 0 {
                faces.push([v0, v1, v2]);
                faces.push([v1, v3, v2]);
            } else {
                faces.push([v0, v1, v3]);
                faces.push([v0, v3, v2]);
            }
        }
    }
    log::debug!("torus({nu}x{nv}): {} faces", faces.len());
    Ok(faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::vector::norm;

    #[test]
    fn icosphere_face_counts() {
        assert_eq!(icosphere(0).len(), 20);
        assert_eq!(icosphere(1).len(), 80);
        assert_eq!(icosphere(2).len(), 320);
    }

    #[test]
    fn icosphere_corners_are_on_unit_sphere() {
        for t in icosphere(2) {
            for p in t {
                assert!((norm(p) - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn torus_face_count_and_validation() {
        assert_eq!(torus(&TorusOptions::default()).unwrap().len(), 200);
        for bad in [
            TorusOptions { nu: 2, ..TorusOptions::default() },
            TorusOptions { nv: 5, ..TorusOptions::default() },
            TorusOptions { minor_radius: 4.0, ..TorusOptions::default() },
        ] {
            assert!(matches!(torus(&bad), Err(MeshError::InvalidConfig(_))));
        }
    }
}
