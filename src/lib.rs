#![cfg_attr(docsrs, feature(doc_cfg))]
//! # surface-automata
//!
//! surface-automata runs binary cellular automata on the faces of closed
//! triangle meshes. Each triangle is a cell; two cells are neighbours when
//! they share an edge, so on a closed manifold surface every cell has
//! exactly three neighbours.
//!
//! ## Features
//! - Welding of triangle soups into dense vertex ids (exact or snapped keys)
//! - Edge adjacency in CSR form, frozen into immutable cells
//! - Mesh validation (degenerate faces, boundary and non-manifold edges,
//!   connectivity) with configurable strictness
//! - A two-phase (tick/commit) automaton driven by a 4-entry rule table
//!   per state, seeded deterministically from configuration
//! - Planar unfolding along a BFS spanning tree, with seam-exact tree
//!   edges, and point location in the unfolded plane
//! - Icosphere and torus generators, Wavefront OBJ reading and writing
//!
//! ## Determinism
//!
//! Initial states are drawn from a `SmallRng` seeded by
//! [`AutomatonConfig::rng_seed`](automaton::AutomatonConfig), or from an
//! injected RNG, so runs are reproducible.
//!
//! ## Usage
//!
//! ```
//! use surface_automata::prelude::*;
//!
//! let sphere = icosphere(1);
//! let mut life = SurfaceAutomaton::from_triangles(&sphere, &AutomatonConfig::default())?;
//! life.advance_by(5);
//! assert_eq!(life.generation(), 5);
//!
//! let p = life.unfold()?.projection.get(CellId::new(0)).copied();
//! assert!(p.is_some());
//! # Ok::<(), MeshError>(())
//! ```

pub mod automaton;
pub mod debug_invariants;
pub mod geometry;
pub mod io;
pub mod mesh_error;
pub mod mesh_generation;
pub mod topology;
pub mod unfold;

pub use debug_invariants::DebugInvariants;

/// The most used types and functions in one import.
pub mod prelude {
    pub use crate::automaton::{AutomatonConfig, Rule, State, SurfaceAutomaton};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::{Point2, Point3, Triangle, Welding};
    pub use crate::io::{MeshReader, MeshWriter, ObjReader, ObjWriter, load_obj, save_obj};
    pub use crate::mesh_error::MeshError;
    pub use crate::mesh_generation::{TorusOptions, icosphere, torus};
    pub use crate::topology::{
        Adjacency, Cell, CellId, CellMesh, EdgeHandling, TriangleMesh, ValidationOptions,
        VertexId, build_adjacency, validate_mesh,
    };
    pub use crate::unfold::{Layout, Projection, SpanningTree, UnfoldOptions, Unfolding, unfold};
}
