/// Octree build and query settings.

/// Traversal order used by `Octree::intersect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OctreeTraversal {
    /// Depth-first with an explicit stack, no distance ordering.
    #[default]
    Stack,
    /// Nodes visited by increasing ray entry distance, stopping as soon as the
    /// next node cannot contain a closer hit.
    NearestFirst,
}

/// Settings for `Octree::build_with_config`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctreeConfig {
    /// Nodes holding this many triangles or fewer are not split
    pub max_triangles_per_node: u32,
    /// Padding added on every side of the root and of each child box
    pub bounds_epsilon: f32,
    /// Query order
    pub traversal: OctreeTraversal,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_triangles_per_node: 1,
            bounds_epsilon: 1e-4,
            traversal: OctreeTraversal::Stack,
        }
    }
}
