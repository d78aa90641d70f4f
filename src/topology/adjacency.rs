//! Edge adjacency between triangular cells.
//!
//! Two cells are neighbours iff they share exactly two vertices (one edge).
//! The builder records, for every vertex, the cells incident to it; for each
//! cell it then gathers the incidence lists of its three vertices and keeps
//! the candidates that occur exactly twice. Sharing a single vertex gives
//! multiplicity 1, and the cell itself (or an exact duplicate of it) gives 3.
//!
//! Determinism:
//! - Neighbour lists are sorted ascending by [`CellId`] and deduplicated,
//!   so traversals built on top of them are reproducible.

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshError;
use crate::topology::ids::{CellId, VertexId};
use crate::topology::mesh::TriangleMesh;
use itertools::Itertools;

/// CSR-style cell-to-cell adjacency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    /// CSR offsets into `adjncy` for each cell.
    pub xadj: Vec<usize>,
    /// Concatenated, per-cell sorted neighbour lists.
    pub adjncy: Vec<CellId>,
}

impl Adjacency {
    /// Neighbours of `cell`. Panics if `cell` is out of range.
    #[inline]
    pub fn neighbors(&self, cell: CellId) -> &[CellId] {
        let i = cell.index();
        &self.adjncy[self.xadj[i]..self.xadj[i + 1]]
    }

    #[inline]
    pub fn degree(&self, cell: CellId) -> usize {
        self.neighbors(cell).len()
    }

    pub fn num_cells(&self) -> usize {
        self.xadj.len().saturating_sub(1)
    }

    /// `true` if `b` is listed as a neighbour of `a`.
    pub fn contains(&self, a: CellId, b: CellId) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellId, &[CellId])> + '_ {
        (0..self.num_cells()).map(move |i| {
            let c = CellId::new(i);
            (c, self.neighbors(c))
        })
    }

    /// Builds the CSR arrays from per-cell lists (each list is sorted here).
    pub fn from_lists(lists: Vec<Vec<CellId>>) -> Self {
        let mut xadj = Vec::with_capacity(lists.len() + 1);
        let mut adjncy = Vec::new();
        xadj.push(0);
        for mut nbrs in lists {
            nbrs.sort_unstable();
            nbrs.dedup();
            adjncy.extend(nbrs);
            xadj.push(adjncy.len());
        }
        Self { xadj, adjncy }
    }
}

impl DebugInvariants for Adjacency {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Adjacency");
    }

    fn validate_invariants(&self) -> Result<(), MeshError> {
        for (cell, nbrs) in self.iter() {
            for &n in nbrs {
                if n == cell || n.index() >= self.num_cells() {
                    return Err(MeshError::UnknownCell(n));
                }
                if !self.contains(n, cell) {
                    return Err(MeshError::AsymmetricAdjacency { cell, neighbor: n });
                }
            }
        }
        Ok(())
    }
}

/// For every vertex, the cells incident to it (each cell listed once).
pub fn vertex_incidence(faces: &[[VertexId; 3]], num_vertices: usize) -> Vec<Vec<CellId>> {
    let mut incident: Vec<Vec<CellId>> = vec![Vec::new(); num_vertices];
    for (i, face) in faces.iter().enumerate() {
        for v in face.iter().unique() {
            incident[v.index()].push(CellId::new(i));
        }
    }
    incident
}

/// Compute the edge adjacency of every face of `mesh`.
pub fn build_adjacency(mesh: &TriangleMesh) -> Adjacency {
    let faces = mesh.faces();
    let incident = vertex_incidence(faces, mesh.num_vertices());

    let mut lists = Vec::with_capacity(faces.len());
    let mut candidates: Vec<CellId> = Vec::new();
    for (i, face) in faces.iter().enumerate() {
        let me = CellId::new(i);
        candidates.clear();
        for v in face.iter().unique() {
            candidates.extend_from_slice(&incident[v.index()]);
        }
        candidates.sort_unstable();
        let nbrs: Vec<CellId> = candidates
            .iter()
            .copied()
            .dedup_with_count()
            .filter(|&(count, c)| count == 2 && c != me)
            .map(|(_, c)| c)
            .collect();
        lists.push(nbrs);
    }

    let adjacency = Adjacency::from_lists(lists);
    log::debug!(
        "adjacency: {} cells, {} directed neighbour links",
        adjacency.num_cells(),
        adjacency.adjncy.len()
    );
    adjacency.debug_assert_invariants();
    adjacency
}

/// The edge shared by two faces, in the order the vertices appear in `a`.
///
/// Returns `None` unless exactly two vertices are shared.
pub fn shared_edge(a: &[VertexId; 3], b: &[VertexId; 3]) -> Option<[VertexId; 2]> {
    let mut shared = a.iter().copied().filter(|v| b.contains(v));
    match (shared.next(), shared.next(), shared.next()) {
        (Some(x), Some(y), None) => Some([x, y]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::key::Welding;
    use crate::geometry::vector::Triangle;

    fn mesh(soup: &[Triangle]) -> TriangleMesh {
        TriangleMesh::from_triangles(soup, Welding::Exact).unwrap()
    }

    fn c(i: usize) -> CellId {
        CellId::new(i)
    }

    #[test]
    fn edge_neighbours_only() {
        // c0 and c1 share an edge, c1 and c2 share only the corner (1,1,0)
        let soup = [
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
            [[1.0, 1.0, 0.0], [2.0, 1.0, 0.0], [2.0, 2.0, 0.0]],
        ];
        let adj = build_adjacency(&mesh(&soup));
        assert_eq!(adj.xadj, vec![0, 1, 2, 2]);
        assert_eq!(adj.neighbors(c(0)), &[c(1)]);
        assert_eq!(adj.neighbors(c(1)), &[c(0)]);
        assert!(adj.neighbors(c(2)).is_empty());
        assert!(adj.validate_invariants().is_ok());
    }

    #[test]
    fn duplicate_face_is_not_a_neighbour() {
        let t = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let adj = build_adjacency(&mesh(&[t, t]));
        assert_eq!(adj.degree(c(0)), 0);
        assert_eq!(adj.degree(c(1)), 0);
    }

    #[test]
    fn non_manifold_fan_lists_all_partners() {
        let base = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
        let soup = [
            [base[0], base[1], [0.0, 1.0, 0.0]],
            [base[1], base[0], [0.0, -1.0, 0.0]],
            [base[0], base[1], [0.0, 0.0, 1.0]],
        ];
        let adj = build_adjacency(&mesh(&soup));
        for i in 0..3 {
            assert_eq!(adj.degree(c(i)), 2);
        }
    }

    #[test]
    fn shared_edge_keeps_first_face_order() {
        let v = |i| VertexId::new(i);
        let a = [v(0), v(1), v(2)];
        let b = [v(2), v(1), v(3)];
        assert_eq!(shared_edge(&a, &b), Some([v(1), v(2)]));
        assert_eq!(shared_edge(&b, &a), Some([v(2), v(1)]));
        assert_eq!(shared_edge(&a, &[v(0), v(5), v(6)]), None);
        assert_eq!(shared_edge(&a, &a), None);
    }

    #[test]
    fn asymmetric_lists_fail_invariants() {
        let adj = Adjacency::from_lists(vec![vec![c(1)], vec![]]);
        assert_eq!(
            adj.validate_invariants(),
            Err(MeshError::AsymmetricAdjacency {
                cell: c(0),
                neighbor: c(1)
            })
        );
    }
}
