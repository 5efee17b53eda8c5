//! Octree module — per-mesh triangle acceleration structure.
//!
//! An octree is built once over a mesh's triangles in mesh-local space and
//! answers closest-hit ray queries in that space. It stores only triangle
//! indices; geometry is read through [`TriangleSource`].

mod octree_config;
mod triangle_octree;

pub use octree_config::{OctreeConfig, OctreeTraversal};
pub use triangle_octree::{Octree, OctreeNode, TriangleSource, NO_CHILDREN, ROOT};
