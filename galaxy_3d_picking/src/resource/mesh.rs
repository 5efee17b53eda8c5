//! Resource-level mesh types.
//!
//! A `Mesh` owns triangle geometry in mesh-local space, the list of
//! placements (instances) of that geometry, and one octree over it.
//!
//! # Hierarchy
//!
//! ```text
//! Mesh "crate"
//! ├── vertices / triangles (mesh-local, immutable)
//! ├── octree (built once by update_octree, shared by every instance)
//! └── instances
//!     ├── [0] → Mat4 + cached inverse
//!     └── [1] → Mat4 + cached inverse
//! ```
//!
//! Queries take a ray in the mesh's outer space (the space instance
//! matrices map into) and return hits in that same space.

use glam::Mat4;
use crate::error::Result;
use crate::{engine_bail, engine_debug, engine_err};
use crate::geometry::{
    MeshIntersectInfo, Ray, RayIntersect, Triangle, AABB,
};
use crate::octree::{Octree, OctreeConfig, TriangleSource};
use super::vertex::Vertex;

// ============================================================================
// MESH
// ============================================================================

/// Triangle mesh with instances and an octree.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Mesh name (for lookup and logs)
    name: String,
    /// Vertex data (mesh-local)
    vertices: Vec<Vertex>,
    /// Vertex indices, three per triangle
    triangles: Vec<[u32; 3]>,
    /// Mesh-to-outer transforms
    instances: Vec<Mat4>,
    /// Inverses of `instances`, same length and order
    inverse_instances: Vec<Mat4>,
    /// Local bounds of all vertices referenced by a triangle
    bounding_box: AABB,
    /// Built by `update_octree`, never rebuilt
    octree: Option<Octree>,
}

impl Mesh {
    /// Create a mesh from a descriptor.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGeometry` if a triangle references a vertex that does
    /// not exist.
    pub fn from_desc(desc: MeshDesc) -> Result<Self> {
        let vertex_count = desc.vertices.len();
        for (index, triangle) in desc.triangles.iter().enumerate() {
            if let Some(&bad) = triangle.iter().find(|&&v| v as usize >= vertex_count) {
                engine_bail!("galaxy3d::Mesh", InvalidGeometry,
                    "Mesh '{}': triangle {} references vertex {} (vertex count: {})",
                    desc.name, index, bad, vertex_count);
            }
        }

        let bounding_box = AABB::from_points(
            desc.triangles.iter()
                .flatten()
                .map(|&v| desc.vertices[v as usize].position()),
        );

        engine_debug!("galaxy3d::Mesh",
            "Created mesh '{}': {} vertices, {} triangles",
            desc.name, vertex_count, desc.triangles.len());

        let mut mesh = Self {
            name: desc.name,
            vertices: desc.vertices,
            triangles: desc.triangles,
            instances: Vec::with_capacity(desc.instances.len()),
            inverse_instances: Vec::with_capacity(desc.instances.len()),
            bounding_box,
            octree: None,
        };
        for instance in desc.instances {
            mesh.add_instance(instance);
        }
        Ok(mesh)
    }

    /// Create a mesh from raw asset buffers.
    ///
    /// `vertex_bytes` holds tightly packed [`Vertex`] values, `index_bytes`
    /// holds `u32` indices, three per triangle. No alignment is required.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGeometry` if either buffer is not a whole number of
    /// elements, or if an index is out of range.
    pub fn from_raw(name: &str, vertex_bytes: &[u8], index_bytes: &[u8]) -> Result<Self> {
        let vertex_size = std::mem::size_of::<Vertex>();
        if vertex_bytes.len() % vertex_size != 0 {
            engine_bail!("galaxy3d::Mesh", InvalidGeometry,
                "Mesh '{}': vertex buffer of {} bytes is not a multiple of {} bytes",
                name, vertex_bytes.len(), vertex_size);
        }
        let triangle_size = std::mem::size_of::<[u32; 3]>();
        if index_bytes.len() % triangle_size != 0 {
            engine_bail!("galaxy3d::Mesh", InvalidGeometry,
                "Mesh '{}': index buffer of {} bytes is not a multiple of {} bytes",
                name, index_bytes.len(), triangle_size);
        }

        let vertices: Vec<Vertex> = bytemuck::allocation::pod_collect_to_vec(vertex_bytes);
        let indices: Vec<u32> = bytemuck::allocation::pod_collect_to_vec(index_bytes);
        let triangles = indices
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();

        Self::from_desc(MeshDesc {
            name: name.to_string(),
            vertices,
            triangles,
            instances: Vec::new(),
        })
    }

    // ===== ACCESSORS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Local bounding box (empty for a mesh without triangles)
    pub fn local_bounding_box(&self) -> AABB {
        self.bounding_box
    }

    /// Bounds of every instance, in outer space
    pub fn instanced_bounding_box(&self) -> AABB {
        self.instances
            .iter()
            .fold(AABB::empty(), |acc, m| acc.union(&self.bounding_box.transformed(m)))
    }

    pub fn octree(&self) -> Option<&Octree> {
        self.octree.as_ref()
    }

    pub fn has_octree(&self) -> bool {
        self.octree.is_some()
    }

    // ===== INSTANCES =====

    /// Place the mesh once more. Returns the new instance index.
    pub fn add_instance(&mut self, transform: Mat4) -> u32 {
        self.instances.push(transform);
        self.inverse_instances.push(transform.inverse());
        (self.instances.len() - 1) as u32
    }

    /// Replace the transform of an existing instance.
    pub fn set_instance(&mut self, index: u32, transform: Mat4) -> Result<()> {
        if index as usize >= self.instances.len() {
            return Err(engine_err!("galaxy3d::Mesh", InvalidKey,
                "Mesh '{}': instance {} out of range (count: {})",
                self.name, index, self.instances.len()));
        }
        self.instances[index as usize] = transform;
        self.inverse_instances[index as usize] = transform.inverse();
        Ok(())
    }

    pub fn instance(&self, index: u32) -> Option<&Mat4> {
        self.instances.get(index as usize)
    }

    pub fn inverse_instance(&self, index: u32) -> Option<&Mat4> {
        self.inverse_instances.get(index as usize)
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    // ===== OCTREE =====

    /// Build the octree with the default configuration.
    pub fn update_octree(&mut self) -> Result<()> {
        self.update_octree_with_config(&OctreeConfig::default())
    }

    /// Build the octree if it does not exist yet. An existing octree is kept.
    ///
    /// # Errors
    ///
    /// Returns `EmptyGeometry` for a mesh without triangles.
    pub fn update_octree_with_config(&mut self, config: &OctreeConfig) -> Result<()> {
        if self.octree.is_some() {
            engine_debug!("galaxy3d::Mesh",
                "Mesh '{}': octree already built, keeping it", self.name);
            return Ok(());
        }
        let octree = Octree::build_with_config(self, config)?;
        self.octree = Some(octree);
        Ok(())
    }

    // ===== INTERSECTION =====

    /// Closest hit of an outer-space ray over every instance.
    ///
    /// `out` carries the best hit so far; it is only updated by a strictly
    /// closer hit. Returns whether `out` was updated.
    ///
    /// The winning triangle is re-tested in outer space, where the
    /// `PARALLEL_EPSILON` threshold applies to instance-scaled edges. A
    /// triangle whose outer edges shrink to a few thousandths of a unit is
    /// therefore reported as parallel and missed, even though the
    /// mesh-local query finds it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the octree has not been built.
    pub fn intersect(&self, ray: &Ray, out: &mut MeshIntersectInfo) -> Result<bool> {
        let Some(octree) = self.octree.as_ref() else {
            engine_bail!("galaxy3d::Mesh", InvalidState,
                "Mesh '{}': intersect called before update_octree", self.name);
        };

        let mut improved = false;
        for (index, (instance, inverse)) in
            self.instances.iter().zip(&self.inverse_instances).enumerate()
        {
            let local_ray = ray.transformed(inverse);
            let Some(local_hit) = octree.intersect(self, &local_ray) else {
                continue;
            };

            // Re-test in outer space so t, point and normal are outer values
            let outer = self.triangle(local_hit.triangle_index).transformed(instance);
            if outer.intersect(ray, &mut out.triangle.info) {
                out.triangle.triangle_index = local_hit.triangle_index;
                out.instance_index = index as u32;
                improved = true;
            }
        }
        Ok(improved)
    }
}

impl TriangleSource for Mesh {
    fn triangle_count(&self) -> u32 {
        self.triangles.len() as u32
    }

    fn triangle(&self, index: u32) -> Triangle {
        let [a, b, c] = self.triangles[index as usize];
        Triangle::new(
            self.vertices[a as usize].position(),
            self.vertices[b as usize].position(),
            self.vertices[c as usize].position(),
        )
    }

    fn bounding_box(&self) -> AABB {
        self.bounding_box
    }
}

// ============================================================================
// DESCRIPTORS
// ============================================================================

/// Descriptor for creating a Mesh
#[derive(Debug, Clone, Default)]
pub struct MeshDesc {
    /// Mesh name
    pub name: String,
    /// Vertex data (mesh-local)
    pub vertices: Vec<Vertex>,
    /// Vertex indices, three per triangle
    pub triangles: Vec<[u32; 3]>,
    /// Initial instances (can be empty, add later via add_instance)
    pub instances: Vec<Mat4>,
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
