//! Mesh validation performed before an automaton is constructed.
//!
//! The automaton and unfolder assume a closed, edge-connected, 2-manifold
//! triangulation in which every cell has exactly three neighbours. They do
//! not re-check this; malformed meshes must be rejected here, with an error
//! naming the offending triangle or edge.

use crate::mesh_error::MeshError;
use crate::topology::cell::CellMesh;
use crate::topology::ids::{CellId, VertexId};
use crate::topology::mesh::TriangleMesh;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Behavior for boundary and non-manifold edge detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeHandling {
    /// Skip edge checks.
    Ignore,
    /// Log a warning for each offending edge.
    Warn,
    /// Return an error on the first offending edge.
    Error,
}

/// Optional validation toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// Reject triangles that repeat a vertex.
    pub check_degenerate: bool,
    /// Boundary (1 face) and non-manifold (>2 faces) edges.
    pub edges: EdgeHandling,
    /// Required neighbour count per cell; `None` skips the check.
    pub expected_neighbors: Option<usize>,
    /// Require `a ∈ N(b) ⇔ b ∈ N(a)`.
    pub check_symmetry: bool,
    /// Require every cell to be reachable from cell 0.
    pub check_connectivity: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            check_degenerate: true,
            edges: EdgeHandling::Error,
            expected_neighbors: Some(3),
            check_symmetry: true,
            check_connectivity: true,
        }
    }
}

impl ValidationOptions {
    /// Only the checks the automaton strictly needs: neighbour count and connectivity.
    pub fn minimal() -> Self {
        Self {
            check_degenerate: false,
            edges: EdgeHandling::Ignore,
            expected_neighbors: Some(3),
            check_symmetry: false,
            check_connectivity: true,
        }
    }
}

/// Validate `cells` against `options`, returning the first violation.
pub fn validate_mesh(cells: &CellMesh, options: &ValidationOptions) -> Result<(), MeshError> {
    if cells.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    if options.check_degenerate {
        for (face, f) in cells.mesh().faces().iter().enumerate() {
            if f[0] == f[1] || f[1] == f[2] || f[0] == f[2] {
                return Err(MeshError::DegenerateTriangle { face });
            }
        }
    }

    validate_edges(cells.mesh(), options.edges)?;

    if let Some(expected) = options.expected_neighbors {
        for cell in cells.cells() {
            let found = cell.neighbors().len();
            if found != expected {
                return Err(MeshError::InvalidAdjacency {
                    triangle: cell.id().index(),
                    neighbors: found,
                });
            }
        }
    }

    if options.check_symmetry {
        for cell in cells.cells() {
            for &n in cell.neighbors() {
                let back = cells
                    .cell(n)
                    .ok_or(MeshError::UnknownCell(n))?
                    .neighbors()
                    .contains(&cell.id());
                if !back {
                    return Err(MeshError::AsymmetricAdjacency {
                        cell: n,
                        neighbor: cell.id(),
                    });
                }
            }
        }
    }

    if options.check_connectivity {
        let reachable = reachable_from(cells, CellId::new(0)).len();
        if reachable != cells.len() {
            return Err(MeshError::DisconnectedMesh {
                reachable,
                total: cells.len(),
            });
        }
    }

    log::debug!("mesh of {} cells passed validation", cells.len());
    Ok(())
}

/// Number of faces using each undirected edge (key is `[min, max]`).
pub fn edge_use_counts(mesh: &TriangleMesh) -> HashMap<[VertexId; 2], usize> {
    let mut counts = HashMap::with_capacity(mesh.num_faces() * 3 / 2);
    for f in mesh.faces() {
        for (a, b) in [(f[0], f[1]), (f[1], f[2]), (f[2], f[0])] {
            *counts.entry(edge_key(a, b)).or_insert(0) += 1;
        }
    }
    counts
}

/// Cells reachable from `start` over edge adjacency, in BFS order.
pub fn reachable_from(cells: &CellMesh, start: CellId) -> Vec<CellId> {
    if cells.cell(start).is_none() {
        return Vec::new();
    }
    let mut seen = vec![false; cells.len()];
    let mut order = Vec::with_capacity(cells.len());
    let mut queue = VecDeque::from([start]);
    seen[start.index()] = true;
    while let Some(c) = queue.pop_front() {
        order.push(c);
        for &n in cells.neighbors(c) {
            if !std::mem::replace(&mut seen[n.index()], true) {
                queue.push_back(n);
            }
        }
    }
    order
}

fn validate_edges(mesh: &TriangleMesh, handling: EdgeHandling) -> Result<(), MeshError> {
    if handling == EdgeHandling::Ignore {
        return Ok(());
    }
    let counts = edge_use_counts(mesh);
    // walk faces in input order so the reported edge is deterministic
    for f in mesh.faces() {
        for (a, b) in [(f[0], f[1]), (f[1], f[2]), (f[2], f[0])] {
            if a == b {
                continue;
            }
            let edge = edge_key(a, b);
            let faces = counts.get(&edge).copied().unwrap_or(0);
            let err = match faces {
                2 => continue,
                1 => MeshError::BoundaryEdge { edge },
                _ => MeshError::NonManifoldEdge { edge, faces },
            };
            match handling {
                EdgeHandling::Error => return Err(err),
                EdgeHandling::Warn => log::warn!("{err}"),
                EdgeHandling::Ignore => {}
            }
        }
    }
    Ok(())
}

fn edge_key(a: VertexId, b: VertexId) -> [VertexId; 2] {
    if a < b { [a, b] } else { [b, a] }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::key::Welding;
    use crate::geometry::vector::Triangle;

    fn tetrahedron() -> Vec<Triangle> {
        let p = [
            [1.0, 1.0, 1.0],
            [1.0, -1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, -1.0, 1.0],
        ];
        vec![
            [p[0], p[1], p[2]],
            [p[0], p[3], p[1]],
            [p[0], p[2], p[3]],
            [p[1], p[3], p[2]],
        ]
    }

    fn cells(soup: &[Triangle]) -> CellMesh {
        CellMesh::from_triangles(soup, Welding::Exact).unwrap()
    }

    #[test]
    fn tetrahedron_is_valid() {
        assert!(validate_mesh(&cells(&tetrahedron()), &ValidationOptions::default()).is_ok());
    }

    #[test]
    fn open_mesh_reports_boundary_edge() {
        let soup = &tetrahedron()[..3];
        let err = validate_mesh(&cells(soup), &ValidationOptions::default()).unwrap_err();
        assert!(matches!(err, MeshError::BoundaryEdge { .. }));
    }

    #[test]
    fn open_mesh_reports_neighbor_count_when_edges_ignored() {
        let soup = &tetrahedron()[..3];
        let err = validate_mesh(&cells(soup), &ValidationOptions::minimal()).unwrap_err();
        assert_eq!(
            err,
            MeshError::InvalidAdjacency {
                triangle: 0,
                neighbors: 2
            }
        );
    }

    #[test]
    fn two_tetrahedra_are_disconnected() {
        let mut soup = tetrahedron();
        let shifted: Vec<Triangle> = tetrahedron()
            .into_iter()
            .map(|t| t.map(|p| [p[0] + 10.0, p[1], p[2]]))
            .collect();
        soup.extend(shifted);
        let err = validate_mesh(&cells(&soup), &ValidationOptions::default()).unwrap_err();
        assert_eq!(
            err,
            MeshError::DisconnectedMesh {
                reachable: 4,
                total: 8
            }
        );
    }

    #[test]
    fn degenerate_face_is_reported() {
        let mut soup = tetrahedron();
        soup.push([[0.0; 3], [0.0; 3], [5.0, 0.0, 0.0]]);
        let err = validate_mesh(&cells(&soup), &ValidationOptions::default()).unwrap_err();
        assert_eq!(err, MeshError::DegenerateTriangle { face: 4 });
    }

    #[test]
    fn non_manifold_edge_is_reported() {
        let mut soup = tetrahedron();
        let p = tetrahedron()[0];
        soup.push([p[0], p[1], [5.0, 5.0, 5.0]]);
        let err = validate_mesh(&cells(&soup), &ValidationOptions::default()).unwrap_err();
        assert!(matches!(err, MeshError::NonManifoldEdge { faces: 3, .. }));
    }

    #[test]
    fn warn_mode_falls_through_to_counts() {
        let soup = &tetrahedron()[..3];
        let opts = ValidationOptions {
            edges: EdgeHandling::Warn,
            ..ValidationOptions::default()
        };
        let err = validate_mesh(&cells(soup), &opts).unwrap_err();
        assert!(matches!(err, MeshError::InvalidAdjacency { .. }));
    }

    #[test]
    fn empty_mesh_is_rejected() {
        let err = validate_mesh(&cells(&[]), &ValidationOptions::default()).unwrap_err();
        assert_eq!(err, MeshError::EmptyMesh);
    }

    #[test]
    fn edge_counts_of_closed_mesh_are_two() {
        let cm = cells(&tetrahedron());
        let counts = edge_use_counts(cm.mesh());
        assert_eq!(counts.len(), 6);
        assert!(counts.values().all(|&n| n == 2));
    }
}
