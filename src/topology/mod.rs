//! Mesh topology: welding, cells and edge adjacency.
//!
//! This module provides:
//! - Dense [`VertexId`]/[`CellId`] handles
//! - [`TriangleMesh`], the welded index form of a triangle soup
//! - The adjacency builder and its CSR [`Adjacency`]
//! - Immutable [`Cell`]s and the [`CellMesh`] that owns them
//! - Pre-construction mesh validation

pub mod adjacency;
pub mod cell;
pub mod ids;
pub mod mesh;
pub mod validation;

pub use adjacency::{Adjacency, build_adjacency, shared_edge};
pub use cell::{Cell, CellMesh, StagedCell};
pub use ids::{CellId, VertexId};
pub use mesh::{TriangleMesh, VertexIndex};
pub use validation::{EdgeHandling, ValidationOptions, validate_mesh};
