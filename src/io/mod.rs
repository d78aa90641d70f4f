//! Mesh I/O.
//!
//! Readers produce a [`PolygonSoup`]: every face as its list of corner
//! coordinates, exactly as stored in the file. Turning that into a welded
//! triangle mesh (and rejecting non-triangular faces) is left to
//! [`TriangleMesh::from_polygons`](crate::topology::mesh::TriangleMesh::from_polygons).

pub mod obj;

use crate::geometry::key::Welding;
use crate::geometry::vector::{Point3, Triangle};
use crate::mesh_error::MeshError;
use crate::topology::cell::CellMesh;
use crate::topology::mesh::TriangleMesh;
use std::io::{Read, Write};
use std::path::Path;

pub use obj::{ObjReader, ObjWriter};

/// Faces as corner-coordinate lists, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonSoup {
    pub faces: Vec<Vec<Point3>>,
}

impl PolygonSoup {
    /// Weld into a triangle mesh; fails with `NotTriangular` on the first polygon.
    pub fn into_mesh(self, welding: Welding) -> Result<TriangleMesh, MeshError> {
        TriangleMesh::from_polygons(&self.faces, welding)
    }
}

/// Trait for readers that produce polygon soups.
pub trait MeshReader {
    /// Parse faces from a reader.
    fn read<R: Read>(&self, reader: R) -> Result<PolygonSoup, MeshError>;
}

/// Trait for writers that serialize triangle soups.
pub trait MeshWriter {
    /// Write triangles to a writer.
    fn write<W: Write>(&self, writer: W, triangles: &[Triangle]) -> Result<(), MeshError>;
}

/// Read an OBJ file and build its cells (exact welding).
pub fn load_obj(path: impl AsRef<Path>) -> Result<CellMesh, MeshError> {
    let file = std::fs::File::open(path.as_ref())?;
    let soup = ObjReader.read(std::io::BufReader::new(file))?;
    log::debug!("read {} faces from {}", soup.faces.len(), path.as_ref().display());
    CellMesh::new(soup.into_mesh(Welding::Exact)?)
}

/// Write triangles as an OBJ file.
pub fn save_obj(path: impl AsRef<Path>, triangles: &[Triangle]) -> Result<(), MeshError> {
    let file = std::fs::File::create(path)?;
    ObjWriter.write(std::io::BufWriter::new(file), triangles)
}
