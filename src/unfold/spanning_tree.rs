//! Breadth-first spanning tree over cell adjacency.

use crate::mesh_error::MeshError;
use crate::topology::cell::CellMesh;
use crate::topology::ids::{CellId, VertexId};
use std::collections::VecDeque;

/// A parent → child link and the edge the two cells share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeEdge {
    pub child: CellId,
    /// Shared vertices in the parent's winding order.
    pub shared: [VertexId; 2],
}

/// BFS tree rooted at one cell, covering every cell reachable from it once.
#[derive(Debug, Clone)]
pub struct SpanningTree {
    root: CellId,
    children: Vec<Vec<TreeEdge>>,
    parent: Vec<Option<CellId>>,
    order: Vec<CellId>,
}

impl SpanningTree {
    /// Build the tree. Neighbours are visited in ascending id order, so the
    /// result is deterministic for a given mesh and root.
    pub fn build(cells: &CellMesh, root: CellId) -> Result<Self, MeshError> {
        let root_cell = cells.cell(root).ok_or(MeshError::UnknownCell(root))?;
        let n = cells.len();
        let mut children: Vec<Vec<TreeEdge>> = vec![Vec::new(); n];
        let mut parent = vec![None; n];
        let mut visited = vec![false; n];
        let mut order = Vec::with_capacity(n);

        let mut queue = VecDeque::from([root_cell]);
        visited[root.index()] = true;
        while let Some(current) = queue.pop_front() {
            order.push(current.id());
            for &nid in current.neighbors() {
                let neighbor = cells.cell(nid).ok_or(MeshError::UnknownCell(nid))?;
                if visited[nid.index()] {
                    continue;
                }
                let Some(shared) = current.shared_edge(neighbor) else {
                    log::warn!(
                        "cells {} and {} are linked but do not share an edge",
                        current.id(),
                        nid
                    );
                    continue;
                };
                visited[nid.index()] = true;
                parent[nid.index()] = Some(current.id());
                children[current.id().index()].push(TreeEdge { child: nid, shared });
                queue.push_back(neighbor);
            }
        }

        Ok(Self {
            root,
            children,
            parent,
            order,
        })
    }

    pub fn root(&self) -> CellId {
        self.root
    }

    /// Tree children of `cell` with their shared edges.
    pub fn children(&self, cell: CellId) -> &[TreeEdge] {
        self.children.get(cell.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tree parent; `None` for the root and for unreached cells.
    pub fn parent(&self, cell: CellId) -> Option<CellId> {
        self.parent.get(cell.index()).copied().flatten()
    }

    /// Reached cells in BFS order, root first.
    pub fn order(&self) -> &[CellId] {
        &self.order
    }

    /// Number of reached cells.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, cell: CellId) -> bool {
        cell == self.root || self.parent(cell).is_some()
    }

    /// All `(parent, edge)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (CellId, &TreeEdge)> + '_ {
        self.children
            .iter()
            .enumerate()
            .flat_map(|(p, es)| es.iter().map(move |e| (CellId::new(p), e)))
    }
}
