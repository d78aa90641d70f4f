//! Triangle-soup ingestion.
//!
//! A triangle soup lists every face by its three corner coordinates.
//! [`TriangleMesh::from_triangles`] runs a single welding pass: each distinct
//! coordinate (under the chosen [`Welding`] policy) becomes a dense
//! [`VertexId`], and faces are stored as id triples in their original corner
//! order. All later topology work is done on ids only.

use crate::geometry::key::{GeometryKey, Welding};
use crate::geometry::vector::{Point3, Triangle};
use crate::mesh_error::MeshError;
use crate::topology::ids::{CellId, VertexId};
use hashbrown::HashMap;

/// Assigns a dense id to every distinct coordinate it sees.
#[derive(Debug, Clone, Default)]
pub struct VertexIndex {
    welding: Welding,
    ids: HashMap<GeometryKey<3>, VertexId>,
    positions: Vec<Point3>,
}

impl VertexIndex {
    pub fn new(welding: Welding) -> Self {
        Self {
            welding,
            ids: HashMap::new(),
            positions: Vec::new(),
        }
    }

    /// Returns the id of `p`, creating one on first sight.
    ///
    /// The first coordinate inserted for a key is the one stored. Returns
    /// `None` if `p` has a non-finite coordinate.
    pub fn insert(&mut self, p: Point3) -> Option<VertexId> {
        let key = GeometryKey::new(p, self.welding)?;
        let positions = &mut self.positions;
        Some(*self.ids.entry(key).or_insert_with(|| {
            positions.push(p);
            VertexId::new(positions.len() - 1)
        }))
    }

    /// Looks up `p` without inserting.
    pub fn get(&self, p: Point3) -> Option<VertexId> {
        GeometryKey::new(p, self.welding).and_then(|k| self.ids.get(&k).copied())
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn welding(&self) -> Welding {
        self.welding
    }

    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }
}

/// Welded, index-based triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    index: VertexIndex,
    faces: Vec<[VertexId; 3]>,
}

impl TriangleMesh {
    /// Weld a triangle soup. Face `i` becomes cell `i`.
    pub fn from_triangles(triangles: &[Triangle], welding: Welding) -> Result<Self, MeshError> {
        if !welding.is_valid() {
            return Err(MeshError::InvalidConfig(format!(
                "welding epsilon must be finite and positive, got {welding:?}"
            )));
        }
        let mut index = VertexIndex::new(welding);
        let mut faces = Vec::with_capacity(triangles.len());
        for (face, corners) in triangles.iter().enumerate() {
            let mut ids = [VertexId::new(0); 3];
            for (corner, &p) in corners.iter().enumerate() {
                ids[corner] = index.insert(p).ok_or_else(|| {
                    if p.iter().all(|x| x.is_finite()) {
                        MeshError::InvalidConfig(format!(
                            "face {face} corner {corner} at {p:?} is too far from the origin for {welding:?}"
                        ))
                    } else {
                        MeshError::NonFiniteCoordinate { face, corner }
                    }
                })?;
            }
            faces.push(ids);
        }
        log::debug!(
            "welded {} corners into {} vertices ({} faces, {:?})",
            3 * faces.len(),
            index.len(),
            faces.len(),
            welding
        );
        Ok(Self { index, faces })
    }

    /// Weld a polygon soup, rejecting any face that is not a triangle.
    pub fn from_polygons<P>(polygons: &[P], welding: Welding) -> Result<Self, MeshError>
    where
        P: AsRef<[Point3]>,
    {
        let triangles = polygons
            .iter()
            .enumerate()
            .map(|(face, poly)| {
                <[Point3; 3]>::try_from(poly.as_ref()).map_err(|_| MeshError::NotTriangular {
                    face,
                    vertices: poly.as_ref().len(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_triangles(&triangles, welding)
    }

    pub fn num_vertices(&self) -> usize {
        self.index.len()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn welding(&self) -> Welding {
        self.index.welding()
    }

    /// All faces as vertex-id triples, in input order.
    pub fn faces(&self) -> &[[VertexId; 3]] {
        &self.faces
    }

    pub fn positions(&self) -> &[Point3] {
        self.index.positions()
    }

    pub fn face(&self, cell: CellId) -> Option<[VertexId; 3]> {
        self.faces.get(cell.index()).copied()
    }

    pub fn position(&self, v: VertexId) -> Point3 {
        self.index.positions()[v.index()]
    }

    /// Corner coordinates of a face, in winding order.
    pub fn corners(&self, cell: CellId) -> Option<Triangle> {
        self.face(cell).map(|f| f.map(|v| self.position(v)))
    }

    /// The id a coordinate was welded to, if it occurs in the mesh.
    pub fn find_vertex(&self, p: Point3) -> Option<VertexId> {
        self.index.get(p)
    }

    /// Back to a triangle soup (welded coordinates).
    pub fn to_triangles(&self) -> Vec<Triangle> {
        self.faces
            .iter()
            .map(|f| f.map(|v| self.position(v)))
            .collect()
    }
}
