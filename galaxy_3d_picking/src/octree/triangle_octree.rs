/// Octree — static triangle octree for closest-hit ray queries.
///
/// Uses single-node placement: each triangle is owned by exactly one node,
/// the deepest one whose box fully contains all three of its vertices. A
/// triangle straddling a child boundary stays in the parent.
///
/// Layout is an implicit 8-ary tree in a flat array: the children of node `i`
/// are `i*8+1 ..= i*8+8`. The array is sized for a complete tree of
/// `max_depth` levels at build time and trimmed once the build is done.
///
/// Triangles are referenced through a permutation of triangle indices that
/// the build reorders in place so each node's triangles form one contiguous
/// range `[first_triangle, first_triangle + triangle_count)`.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use crate::error::Result;
use crate::{engine_bail, engine_debug, engine_info, engine_trace};
use crate::geometry::{
    Ray, RayIntersect, Triangle, TriangleIntersectInfo, AABB,
};
use super::octree_config::{OctreeConfig, OctreeTraversal};

/// Index of the root node in the flat node array.
pub const ROOT: u32 = 0;

/// `first_child` value of a leaf.
pub const NO_CHILDREN: u32 = u32::MAX;

const LOG_SOURCE: &str = "galaxy3d::Octree";

// ===== TRIANGLE SOURCE =====

/// Read access to the geometry an octree indexes.
///
/// The octree never owns geometry; every build and query borrows it through
/// this trait. Implemented by `resource::Mesh` and by plain triangle slices.
pub trait TriangleSource {
    /// Number of triangles
    fn triangle_count(&self) -> u32;

    /// Triangle `index` in the source's own space
    fn triangle(&self, index: u32) -> Triangle;

    /// Box enclosing every triangle
    fn bounding_box(&self) -> AABB {
        let mut aabb = AABB::empty();
        for i in 0..self.triangle_count() {
            let tri = self.triangle(i);
            aabb.grow(tri.v0);
            aabb.grow(tri.v1);
            aabb.grow(tri.v2);
        }
        aabb
    }
}

impl TriangleSource for [Triangle] {
    fn triangle_count(&self) -> u32 {
        self.len() as u32
    }

    fn triangle(&self, index: u32) -> Triangle {
        self[index as usize]
    }
}

impl TriangleSource for Vec<Triangle> {
    fn triangle_count(&self) -> u32 {
        self.as_slice().triangle_count()
    }

    fn triangle(&self, index: u32) -> Triangle {
        self[index as usize]
    }
}

// ===== NODE =====

/// A single node in the octree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctreeNode {
    /// Mesh-local box of this node (epsilon padded)
    pub bounding_box: AABB,
    /// Index of the first of 8 children, or [`NO_CHILDREN`]
    pub first_child: u32,
    /// Start of this node's own range in the triangle permutation
    pub first_triangle: u32,
    /// Number of triangles owned by this node (not counting descendants)
    pub triangle_count: u32,
}

impl OctreeNode {
    fn unused() -> Self {
        Self {
            bounding_box: AABB::empty(),
            first_child: NO_CHILDREN,
            first_triangle: 0,
            triangle_count: 0,
        }
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.first_child == NO_CHILDREN
    }

    /// Node indices of the 8 children (empty for a leaf).
    pub fn children(&self) -> std::ops::Range<u32> {
        if self.is_leaf() {
            0..0
        } else {
            self.first_child..self.first_child + 8
        }
    }
}

// ===== OCTREE =====

/// Static triangle octree.
#[derive(Debug, Clone)]
pub struct Octree {
    /// Flat array of nodes, implicit 8-ary layout
    nodes: Vec<OctreeNode>,
    /// Permutation of triangle indices, grouped by owning node
    triangle_indices: Vec<u32>,
    /// Depth limit used by the build (root = depth 0)
    max_depth: u32,
    /// Query order
    traversal: OctreeTraversal,
}

/// Pending node during the build.
struct BuildTask {
    node: u32,
    depth: u32,
}

impl Octree {
    /// Build with the default configuration.
    pub fn build<S: TriangleSource + ?Sized>(source: &S) -> Result<Self> {
        Self::build_with_config(source, &OctreeConfig::default())
    }

    /// Build an octree over every triangle of `source`.
    ///
    /// # Errors
    ///
    /// - `EmptyGeometry` if the source has no triangles
    /// - `InvalidGeometry` if the source bounds are not finite
    pub fn build_with_config<S: TriangleSource + ?Sized>(
        source: &S,
        config: &OctreeConfig,
    ) -> Result<Self> {
        let triangle_count = source.triangle_count();
        if triangle_count == 0 {
            engine_bail!(LOG_SOURCE, EmptyGeometry,
                "cannot build an octree over zero triangles");
        }

        let bounds = source.bounding_box();
        if !bounds.is_valid() || !bounds.min.is_finite() || !bounds.max.is_finite() {
            engine_bail!(LOG_SOURCE, InvalidGeometry,
                "triangle bounds are not finite: {:?}", bounds);
        }

        let max_depth = Self::depth_for(triangle_count);
        let mut nodes = vec![OctreeNode::unused(); Self::total_node_count(max_depth)];
        nodes[ROOT as usize] = OctreeNode {
            bounding_box: bounds.expanded(config.bounds_epsilon),
            first_child: NO_CHILDREN,
            first_triangle: 0,
            triangle_count,
        };

        let mut octree = Self {
            nodes,
            triangle_indices: (0..triangle_count).collect(),
            max_depth,
            traversal: config.traversal,
        };

        let deepest = octree.subdivide(source, config);
        octree.shrink_nodes(deepest);

        engine_info!(LOG_SOURCE,
            "Built octree: {} triangles, max depth {}, {} nodes ({} leaves)",
            triangle_count, max_depth, octree.nodes.len(), octree.leaf_count());

        Ok(octree)
    }

    /// `ceil(log8(triangle_count))`, computed exactly on integers.
    fn depth_for(triangle_count: u32) -> u32 {
        let mut depth = 0;
        let mut capacity = 1u64;
        while capacity < triangle_count as u64 {
            capacity *= 8;
            depth += 1;
        }
        depth
    }

    /// Total number of nodes of a complete tree: sum of 8^d for d = 0..=max_depth
    fn total_node_count(max_depth: u32) -> usize {
        let mut count = 0usize;
        let mut level_count = 1usize;
        for _ in 0..=max_depth {
            count += level_count;
            level_count *= 8;
        }
        count
    }

    /// Split nodes until they are small enough, deep enough, or unsplittable.
    ///
    /// Uses an explicit worklist; returns the deepest level holding a
    /// reachable node.
    fn subdivide<S: TriangleSource + ?Sized>(&mut self, source: &S, config: &OctreeConfig) -> u32 {
        let mut deepest = 0;
        let mut worklist = vec![BuildTask { node: ROOT, depth: 0 }];

        while let Some(BuildTask { node, depth }) = worklist.pop() {
            let parent = self.nodes[node as usize];
            if parent.triangle_count <= config.max_triangles_per_node || depth >= self.max_depth {
                continue;
            }

            let first_child = node * 8 + 1;
            let end = parent.first_triangle + parent.triangle_count;
            let mut cursor = parent.first_triangle;

            for octant in 0..8u8 {
                let child_index = first_child + octant as u32;
                let child_box = parent.bounding_box.octant(octant, config.bounds_epsilon);
                let child_first = cursor;

                for j in cursor..end {
                    let triangle = source.triangle(self.triangle_indices[j as usize]);
                    if child_box.contains_triangle(&triangle) {
                        debug_assert!(cursor <= j && j < end);
                        self.triangle_indices.swap(cursor as usize, j as usize);
                        cursor += 1;
                    }
                }

                self.nodes[child_index as usize] = OctreeNode {
                    bounding_box: child_box,
                    first_child: NO_CHILDREN,
                    first_triangle: child_first,
                    triangle_count: cursor - child_first,
                };
            }

            let moved = cursor - parent.first_triangle;
            if moved == 0 {
                // Every triangle straddles an octant boundary
                engine_trace!(LOG_SOURCE,
                    "node {} kept as leaf: none of its {} triangles fits a child",
                    node, parent.triangle_count);
                continue;
            }

            let parent_node = &mut self.nodes[node as usize];
            parent_node.first_child = first_child;
            parent_node.first_triangle = cursor;
            parent_node.triangle_count = end - cursor;
            deepest = deepest.max(depth + 1);

            for child_index in first_child..first_child + 8 {
                if self.nodes[child_index as usize].triangle_count > 0 {
                    worklist.push(BuildTask { node: child_index, depth: depth + 1 });
                }
            }
        }

        deepest
    }

    /// Drop the pre-allocated levels below `deepest`.
    fn shrink_nodes(&mut self, deepest: u32) {
        let keep = Self::total_node_count(deepest);
        if keep < self.nodes.len() {
            engine_debug!(LOG_SOURCE,
                "Shrinking octree from {} to {} nodes (deepest level {})",
                self.nodes.len(), keep, deepest);
            self.nodes.truncate(keep);
        }
        self.nodes.shrink_to_fit();
    }

    // ===== QUERIES =====

    /// Closest triangle hit by a mesh-local ray, using the configured traversal.
    pub fn intersect<S: TriangleSource + ?Sized>(
        &self,
        source: &S,
        ray: &Ray,
    ) -> Option<TriangleIntersectInfo> {
        match self.traversal {
            OctreeTraversal::Stack => self.intersect_stack(source, ray),
            OctreeTraversal::NearestFirst => self.intersect_ordered(source, ray),
        }
    }

    /// Depth-first query with an explicit stack.
    ///
    /// Children are pushed whenever a node has them, whatever its own
    /// triangles returned; only the box test prunes. Always finds the true
    /// closest hit.
    pub fn intersect_stack<S: TriangleSource + ?Sized>(
        &self,
        source: &S,
        ray: &Ray,
    ) -> Option<TriangleIntersectInfo> {
        let mut best = TriangleIntersectInfo::default();
        let mut found = false;
        let mut stack = vec![ROOT];

        while let Some(index) = stack.pop() {
            let node = &self.nodes[index as usize];
            if !node.bounding_box.intersects_ray(ray) {
                continue;
            }

            if self.test_owned_triangles(node, source, ray, &mut best) {
                found = true;
            }
            stack.extend(node.children());
        }

        found.then_some(best)
    }

    /// Nearest-first query.
    ///
    /// Nodes are popped by increasing entry distance. Every triangle of a
    /// node lies inside its box, so once the next entry distance is not
    /// below the best `t` nothing left can improve the hit.
    pub fn intersect_ordered<S: TriangleSource + ?Sized>(
        &self,
        source: &S,
        ray: &Ray,
    ) -> Option<TriangleIntersectInfo> {
        let mut best = TriangleIntersectInfo::default();
        let mut found = false;
        let mut queue = BinaryHeap::new();

        if let Some(entry) = self.nodes[ROOT as usize].bounding_box.ray_entry(ray) {
            queue.push(QueuedNode { entry, index: ROOT });
        }

        while let Some(QueuedNode { entry, index }) = queue.pop() {
            if entry >= best.info.t {
                break;
            }

            let node = &self.nodes[index as usize];
            if self.test_owned_triangles(node, source, ray, &mut best) {
                found = true;
            }
            for child in node.children() {
                if let Some(entry) = self.nodes[child as usize].bounding_box.ray_entry(ray) {
                    queue.push(QueuedNode { entry, index: child });
                }
            }
        }

        found.then_some(best)
    }

    fn test_owned_triangles<S: TriangleSource + ?Sized>(
        &self,
        node: &OctreeNode,
        source: &S,
        ray: &Ray,
        best: &mut TriangleIntersectInfo,
    ) -> bool {
        let mut improved = false;
        for &triangle_index in self.owned_triangles(node) {
            if source.triangle(triangle_index).intersect(ray, &mut best.info) {
                best.triangle_index = triangle_index;
                improved = true;
            }
        }
        improved
    }

    // ===== INTROSPECTION =====

    /// All nodes, implicit 8-ary layout.
    pub fn nodes(&self) -> &[OctreeNode] {
        &self.nodes
    }

    /// Triangle permutation, grouped by owning node.
    pub fn triangle_indices(&self) -> &[u32] {
        &self.triangle_indices
    }

    /// Triangle indices owned by `node` itself.
    pub fn owned_triangles(&self, node: &OctreeNode) -> &[u32] {
        let start = node.first_triangle as usize;
        &self.triangle_indices[start..start + node.triangle_count as usize]
    }

    /// Depth limit used by the build (root = depth 0).
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Number of nodes kept after shrinking.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of reachable leaves.
    pub fn leaf_count(&self) -> usize {
        let mut leaves = 0;
        let mut stack = vec![ROOT];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index as usize];
            if node.is_leaf() {
                leaves += 1;
            }
            stack.extend(node.children());
        }
        leaves
    }

    /// Traversal used by [`Octree::intersect`].
    pub fn traversal(&self) -> OctreeTraversal {
        self.traversal
    }
}

// ===== PRIORITY QUEUE ENTRY =====

/// Heap entry ordered so the smallest entry distance pops first.
struct QueuedNode {
    entry: f32,
    index: u32,
}

impl PartialEq for QueuedNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedNode {}

impl PartialOrd for QueuedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other.entry.total_cmp(&self.entry)
            .then_with(|| other.index.cmp(&self.index))
    }
}

#[cfg(test)]
#[path = "triangle_octree_tests.rs"]
mod tests;
