//! Cells: triangles endowed with their edge neighbours.
//!
//! Cells are built in two stages. A [`StagedCell`] owns a write-once
//! neighbour slot that the adjacency pass fills exactly once; assigning a
//! second time fails with [`MeshError::NeighborsAlreadySet`]. Once every
//! slot is filled the staged cells are frozen into immutable [`Cell`]s,
//! so nothing can change the topology while the automaton runs.
//!
//! Equality and hashing of a [`Cell`] are structural: two cells are equal
//! when they have the same three vertices, in any order. Corner order is
//! still kept for winding-sensitive consumers such as the unfolder.

use crate::debug_invariants::DebugInvariants;
use crate::geometry::key::Welding;
use crate::geometry::vector::Triangle;
use crate::mesh_error::MeshError;
use crate::topology::adjacency::{Adjacency, build_adjacency, shared_edge};
use crate::topology::ids::{CellId, VertexId};
use crate::topology::mesh::TriangleMesh;
use hashbrown::HashMap;
use once_cell::unsync::OnceCell;
use std::hash::{Hash, Hasher};

/// An immutable triangular cell.
#[derive(Debug, Clone)]
pub struct Cell {
    id: CellId,
    vertices: [VertexId; 3],
    neighbors: Vec<CellId>,
}

impl Cell {
    #[inline]
    pub fn id(&self) -> CellId {
        self.id
    }

    /// Vertex ids in winding order.
    #[inline]
    pub fn vertices(&self) -> [VertexId; 3] {
        self.vertices
    }

    /// Edge neighbours, sorted by id.
    #[inline]
    pub fn neighbors(&self) -> &[CellId] {
        &self.neighbors
    }

    /// Order-insensitive identity: the sorted vertex ids.
    pub fn key(&self) -> [VertexId; 3] {
        sorted(self.vertices)
    }

    /// The edge shared with `other`, in this cell's vertex order.
    pub fn shared_edge(&self, other: &Cell) -> Option<[VertexId; 2]> {
        shared_edge(&self.vertices, &other.vertices)
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// A cell whose neighbour set has not been frozen yet.
#[derive(Debug)]
pub struct StagedCell {
    id: CellId,
    vertices: [VertexId; 3],
    neighbors: OnceCell<Vec<CellId>>,
}

impl StagedCell {
    pub fn new(id: CellId, vertices: [VertexId; 3]) -> Self {
        Self {
            id,
            vertices,
            neighbors: OnceCell::new(),
        }
    }

    /// Fill the neighbour slot. Fails if it was already filled.
    pub fn assign_neighbors(&self, neighbors: Vec<CellId>) -> Result<(), MeshError> {
        self.neighbors
            .set(neighbors)
            .map_err(|_| MeshError::NeighborsAlreadySet(self.id))
    }

    pub fn has_neighbors(&self) -> bool {
        self.neighbors.get().is_some()
    }

    /// Freeze into an immutable [`Cell`]; an unfilled slot becomes an empty set.
    pub fn finish(self) -> Cell {
        Cell {
            id: self.id,
            vertices: self.vertices,
            neighbors: self.neighbors.into_inner().unwrap_or_default(),
        }
    }
}

/// A welded mesh together with its cells.
#[derive(Debug, Clone, Default)]
pub struct CellMesh {
    mesh: TriangleMesh,
    cells: Vec<Cell>,
    by_key: HashMap<[VertexId; 3], CellId>,
}

impl CellMesh {
    /// Weld `triangles` and compute their adjacency.
    pub fn from_triangles(triangles: &[Triangle], welding: Welding) -> Result<Self, MeshError> {
        Self::new(TriangleMesh::from_triangles(triangles, welding)?)
    }

    /// Compute adjacency for an already welded mesh.
    pub fn new(mesh: TriangleMesh) -> Result<Self, MeshError> {
        let adjacency = build_adjacency(&mesh);
        Self::with_adjacency(mesh, &adjacency)
    }

    /// Freeze cells using a precomputed adjacency.
    ///
    /// The adjacency must cover every face, stay in range and be symmetric;
    /// otherwise `InvalidConfig`, `UnknownCell` or `AsymmetricAdjacency` is returned.
    pub fn with_adjacency(mesh: TriangleMesh, adjacency: &Adjacency) -> Result<Self, MeshError> {
        if adjacency.num_cells() != mesh.num_faces() {
            return Err(MeshError::InvalidConfig(format!(
                "adjacency covers {} cells but the mesh has {} faces",
                adjacency.num_cells(),
                mesh.num_faces()
            )));
        }
        // neighbour ids index straight into per-cell state later on
        adjacency.validate_invariants()?;
        let staged: Vec<StagedCell> = mesh
            .faces()
            .iter()
            .enumerate()
            .map(|(i, &f)| StagedCell::new(CellId::new(i), f))
            .collect();
        for (cell, nbrs) in adjacency.iter() {
            staged[cell.index()].assign_neighbors(nbrs.to_vec())?;
        }
        let cells: Vec<Cell> = staged.into_iter().map(StagedCell::finish).collect();

        let mut by_key = HashMap::with_capacity(cells.len());
        for cell in &cells {
            // duplicate faces keep the first id
            by_key.entry(cell.key()).or_insert(cell.id);
        }
        Ok(Self {
            mesh,
            cells,
            by_key,
        })
    }

    /// Cells in stable id order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    /// Corner coordinates of `id` in winding order.
    pub fn vertices(&self, id: CellId) -> Option<Triangle> {
        self.mesh.corners(id)
    }

    /// Neighbour ids of `id`; empty for an unknown id.
    pub fn neighbors(&self, id: CellId) -> &[CellId] {
        self.cell(id).map(Cell::neighbors).unwrap_or(&[])
    }

    /// Cell whose corners are `triangle`, in any order.
    pub fn find(&self, triangle: &Triangle) -> Option<CellId> {
        let mut ids = [VertexId::new(0); 3];
        for (slot, &p) in ids.iter_mut().zip(triangle.iter()) {
            *slot = self.mesh.find_vertex(p)?;
        }
        self.by_key.get(&sorted(ids)).copied()
    }

    /// The adjacency as CSR arrays.
    pub fn adjacency(&self) -> Adjacency {
        Adjacency::from_lists(self.cells.iter().map(|c| c.neighbors.clone()).collect())
    }
}

fn sorted(mut ids: [VertexId; 3]) -> [VertexId; 3] {
    ids.sort_unstable();
    ids
}
