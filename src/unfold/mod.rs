//! Planar unfolding and picking.
//!
//! [`spanning_tree`] builds the BFS tree the layout follows, [`projection`]
//! lays every reachable cell out in a shared plane, and [`locate`] maps a
//! 2D point back to the cell under it.

pub mod locate;
pub mod projection;
pub mod spanning_tree;

pub use locate::{locate, locate_all};
pub use projection::{Layout, Projection, UnfoldOptions, Unfolding, unfold};
pub use spanning_tree::{SpanningTree, TreeEdge};
