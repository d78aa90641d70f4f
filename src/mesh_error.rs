//! MeshError: Unified error type for surface-automata public APIs
//!
//! Mesh ingestion, validation, automaton configuration and OBJ I/O all report
//! failures through this one enum so callers can present a specific message
//! (which triangle, which edge, which invariant) without downcasting.

use crate::topology::ids::{CellId, VertexId};
use thiserror::Error;

/// Unified error type for surface-automata operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// A polygon with other than three corners was handed to the mesh builder.
    #[error("face {face} has {vertices} vertices (only triangles are supported)")]
    NotTriangular { face: usize, vertices: usize },
    /// A triangle references the same welded vertex more than once.
    #[error("triangle {face} is degenerate (repeated vertex)")]
    DegenerateTriangle { face: usize },
    /// A coordinate was NaN or infinite and cannot be used as a geometry key.
    #[error("face {face} corner {corner} has a non-finite coordinate")]
    NonFiniteCoordinate { face: usize, corner: usize },
    /// An edge is used by a single triangle, so the surface is not closed.
    #[error("edge {edge:?} lies on a boundary (used by one triangle)")]
    BoundaryEdge { edge: [VertexId; 2] },
    /// An edge is shared by more than two triangles.
    #[error("edge {edge:?} is non-manifold (used by {faces} triangles)")]
    NonManifoldEdge { edge: [VertexId; 2], faces: usize },
    /// A triangle does not have the expected number of edge neighbours.
    #[error("triangle {triangle} has {neighbors} neighbors (should be 3)")]
    InvalidAdjacency { triangle: usize, neighbors: usize },
    /// `neighbor` lists `cell` but not the other way around.
    #[error("adjacency is not symmetric: {neighbor} lists {cell} but {cell} does not list {neighbor}")]
    AsymmetricAdjacency { cell: CellId, neighbor: CellId },
    /// Not every triangle is reachable from the first one.
    #[error("mesh is disconnected: {reachable} of {total} triangles reachable")]
    DisconnectedMesh { reachable: usize, total: usize },
    /// The write-once neighbour slot of a cell was assigned twice.
    #[error("neighbors of cell {0} were already set")]
    NeighborsAlreadySet(CellId),
    /// A cell id outside the mesh was used.
    #[error("unknown cell {0}")]
    UnknownCell(CellId),
    /// The operation needs at least one triangle.
    #[error("mesh contains no triangles")]
    EmptyMesh,
    /// A rule table contained something other than 0/1, or had the wrong length.
    #[error("invalid rule: {0}")]
    InvalidRule(String),
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Malformed Wavefront OBJ input.
    #[error("OBJ parse error on line {line}: {message}")]
    ObjParse { line: usize, message: String },
    /// Underlying reader/writer failure.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for MeshError {
    fn from(err: std::io::Error) -> Self {
        MeshError::Io(err.to_string())
    }
}
