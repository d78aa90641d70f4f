//! Planar unfolding of a cell mesh along a spanning tree.
//!
//! The root cell is seeded in the plane, then every tree child is laid out
//! against its parent: the two shared corners are copied from the parent's
//! projected triangle (never recomputed, so tree edges are seam-free) and
//! only the child's third corner is derived. The child's winding decides
//! which side of the shared edge that corner lands on.
//!
//! Cells joined only by non-tree adjacency are not guaranteed to meet;
//! gaps and overlaps there are inherent to flattening a closed surface.

use crate::geometry::vector::{Point2, Point3, add, dot, norm, perp, rotate, scale, sub};
use crate::mesh_error::MeshError;
use crate::topology::cell::CellMesh;
use crate::topology::ids::{CellId, VertexId};
use crate::unfold::spanning_tree::{SpanningTree, TreeEdge};
use serde::{Deserialize, Serialize};

/// How the third corner of each child triangle is placed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Layout {
    /// Assume equilateral triangles: rotate the shared edge by ±60°.
    /// The root is an equilateral triangle with the given edge length.
    Equilateral { edge_length: f64 },
    /// Reproduce each triangle's true shape, scaled by `scale`.
    Isometric { scale: f64 },
}

impl Default for Layout {
    fn default() -> Self {
        Layout::Equilateral { edge_length: 0.1 }
    }
}

/// Unfolding parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnfoldOptions {
    /// Cell laid out first; the tree is rooted here.
    pub root: CellId,
    pub layout: Layout,
}

impl Default for UnfoldOptions {
    fn default() -> Self {
        Self {
            root: CellId::new(0),
            layout: Layout::default(),
        }
    }
}

impl UnfoldOptions {
    pub fn validate(&self) -> Result<(), MeshError> {
        let (name, value) = match self.layout {
            Layout::Equilateral { edge_length } => ("edge_length", edge_length),
            Layout::Isometric { scale } => ("scale", scale),
        };
        if !(value.is_finite() && value > 0.0) {
            return Err(MeshError::InvalidConfig(format!(
                "unfold {name} must be finite and positive, got {value}"
            )));
        }
        Ok(())
    }
}

/// Projected 2D triangles, index-aligned with each cell's 3D corners.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    triangles: Vec<Option<[Point2; 3]>>,
    placed: usize,
}

impl Projection {
    fn with_cells(n: usize) -> Self {
        Self {
            triangles: vec![None; n],
            placed: 0,
        }
    }

    fn set(&mut self, cell: CellId, t: [Point2; 3]) {
        if self.triangles[cell.index()].replace(t).is_none() {
            self.placed += 1;
        }
    }

    pub fn get(&self, cell: CellId) -> Option<&[Point2; 3]> {
        self.triangles.get(cell.index()).and_then(Option::as_ref)
    }

    /// Placed cells in id order.
    pub fn iter(&self) -> impl Iterator<Item = (CellId, &[Point2; 3])> + '_ {
        self.triangles
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.as_ref().map(|t| (CellId::new(i), t)))
    }

    /// Number of placed cells.
    pub fn len(&self) -> usize {
        self.placed
    }

    pub fn is_empty(&self) -> bool {
        self.placed == 0
    }

    /// `true` when every cell of the mesh was placed.
    pub fn is_complete(&self) -> bool {
        self.placed == self.triangles.len()
    }

    /// Axis-aligned bounds `(min, max)` of all placed triangles.
    pub fn bounds(&self) -> Option<(Point2, Point2)> {
        let mut pts = self.iter().flat_map(|(_, t)| t.iter().copied());
        let first = pts.next()?;
        Some(pts.fold((first, first), |(lo, hi), p| {
            (
                [lo[0].min(p[0]), lo[1].min(p[1])],
                [hi[0].max(p[0]), hi[1].max(p[1])],
            )
        }))
    }

    /// See [`locate`](crate::unfold::locate::locate).
    pub fn locate(&self, p: Point2) -> Option<CellId> {
        crate::unfold::locate::locate(self, p)
    }
}

/// A spanning tree together with the layout derived from it.
#[derive(Debug, Clone)]
pub struct Unfolding {
    pub tree: SpanningTree,
    pub projection: Projection,
}

/// Unfold `cells` into the plane.
///
/// Cells unreachable from `options.root` stay unplaced.
pub fn unfold(cells: &CellMesh, options: &UnfoldOptions) -> Result<Unfolding, MeshError> {
    options.validate()?;
    let tree = SpanningTree::build(cells, options.root)?;
    let positions = cells.mesh().positions();
    let corners = |c: CellId| -> Result<[VertexId; 3], MeshError> {
        cells
            .cell(c)
            .map(|cell| cell.vertices())
            .ok_or(MeshError::UnknownCell(c))
    };

    let mut projection = Projection::with_cells(cells.len());
    let root_vs = corners(options.root)?;
    let seed = seed_triangle(root_vs.map(|v| positions[v.index()]), options.layout)
        .ok_or_else(|| degenerate(options.root))?;
    projection.set(options.root, seed);

    let mut stack = vec![options.root];
    while let Some(parent) = stack.pop() {
        let parent_vs = corners(parent)?;
        let parent_2d = *projection
            .get(parent)
            .ok_or(MeshError::UnknownCell(parent))?;
        for edge in tree.children(parent) {
            let child_vs = corners(edge.child)?;
            let placed = place_child(
                positions,
                (&parent_vs, &parent_2d),
                &child_vs,
                edge,
                options.layout,
            )
            .ok_or_else(|| degenerate(edge.child))?;
            projection.set(edge.child, placed);
            stack.push(edge.child);
        }
    }

    if projection.is_complete() {
        log::debug!("unfolded {} cells from root {}", projection.len(), options.root);
    } else {
        log::warn!(
            "unfolding from root {} placed {} of {} cells (mesh is disconnected)",
            options.root,
            projection.len(),
            cells.len()
        );
    }
    Ok(Unfolding { tree, projection })
}

fn degenerate(cell: CellId) -> MeshError {
    MeshError::DegenerateTriangle { face: cell.index() }
}

/// Root triangle in the plane, corners in the cell's own order (counter-clockwise).
fn seed_triangle(corners: [Point3; 3], layout: Layout) -> Option<[Point2; 3]> {
    match layout {
        Layout::Equilateral { edge_length } => Some([
            [0.0, 0.0],
            [edge_length, 0.0],
            [0.5 * edge_length, edge_length * 3f64.sqrt() / 2.0],
        ]),
        Layout::Isometric { scale } => {
            let first = norm(sub(corners[1], corners[0])) * scale;
            if first == 0.0 {
                return None;
            }
            let p0 = [0.0, 0.0];
            let p1 = [first, 0.0];
            let p2 = apex(corners[0], corners[1], corners[2], p0, p1, false)?;
            Some([p0, p1, p2])
        }
    }
}

/// Child triangle laid out against its already placed parent.
fn place_child(
    positions: &[Point3],
    (parent_vs, parent_2d): (&[VertexId; 3], &[Point2; 3]),
    child_vs: &[VertexId; 3],
    edge: &TreeEdge,
    layout: Layout,
) -> Option<[Point2; 3]> {
    let [s1, s2] = edge.shared;
    let p1 = parent_2d[parent_vs.iter().position(|&v| v == s1)?];
    let p2 = parent_2d[parent_vs.iter().position(|&v| v == s2)?];

    let third = child_vs.iter().position(|v| !edge.shared.contains(v))?;
    let first_shared = child_vs.iter().position(|&v| v == s1)?;
    let clockwise = (third + 3 - first_shared) % 3 == 1;

    let p3 = match layout {
        Layout::Equilateral { .. } => {
            add(p1, rotate(sub(p2, p1), if clockwise { -60.0 } else { 60.0 }))
        }
        Layout::Isometric { .. } => {
            let pos = |v: VertexId| positions[v.index()];
            apex(pos(s1), pos(s2), pos(child_vs[third]), p1, p2, clockwise)?
        }
    };

    Some(child_vs.map(|v| {
        if v == s1 {
            p1
        } else if v == s2 {
            p2
        } else {
            p3
        }
    }))
}

/// Place the apex `n` of a 3D triangle `(s1, s2, n)` against the planar edge `p1 → p2`.
///
/// The apex is decomposed into its component along `s1 → s2` and its
/// distance from that line, both rescaled by `|p2 − p1| / |s2 − s1|`, and
/// put on the right of `p1 → p2` when `clockwise`, otherwise on the left.
fn apex(s1: Point3, s2: Point3, n: Point3, p1: Point2, p2: Point2, clockwise: bool) -> Option<Point2> {
    let e = sub(s2, s1);
    let len_e = norm(e);
    let d = sub(p2, p1);
    let len_d = norm(d);
    if len_e == 0.0 || len_d == 0.0 {
        return None;
    }
    let w = sub(n, s1);
    let along = dot(w, e) / len_e;
    let across = norm(sub(w, scale(e, along / len_e)));
    let k = len_d / len_e;
    let u = scale(d, 1.0 / len_d);
    let side = if clockwise { -across } else { across };
    Some(add(p1, add(scale(u, along * k), scale(perp(u), side * k))))
}
