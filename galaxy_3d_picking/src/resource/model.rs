/// Named group of meshes placed together.
///
/// A model is the unit registered in a scene. Its meshes are expressed in
/// model space: each mesh's instance matrices map mesh-local space into the
/// model's space.

use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::engine_bail;
use crate::geometry::{ModelIntersectInfo, Ray, AABB};
use crate::octree::OctreeConfig;
use super::mesh::Mesh;

#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    meshes: Vec<Mesh>,
    mesh_names: FxHashMap<String, usize>,
}

impl Model {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            meshes: Vec::new(),
            mesh_names: FxHashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a mesh. Returns its index.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` if a mesh with the same name is already present.
    pub fn add_mesh(&mut self, mesh: Mesh) -> Result<usize> {
        if self.mesh_names.contains_key(mesh.name()) {
            engine_bail!("galaxy3d::Model", InvalidKey,
                "Model '{}': mesh '{}' already exists", self.name, mesh.name());
        }
        let index = self.meshes.len();
        self.mesh_names.insert(mesh.name().to_string(), index);
        self.meshes.push(mesh);
        Ok(index)
    }

    pub fn mesh(&self, name: &str) -> Option<&Mesh> {
        self.mesh_names.get(name).map(|&i| &self.meshes[i])
    }

    pub fn mesh_mut(&mut self, name: &str) -> Option<&mut Mesh> {
        let index = *self.mesh_names.get(name)?;
        self.meshes.get_mut(index)
    }

    pub fn mesh_at(&self, index: usize) -> Option<&Mesh> {
        self.meshes.get(index)
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Build the octree of every mesh that does not have one yet.
    pub fn update_octrees(&mut self, config: &OctreeConfig) -> Result<()> {
        for mesh in &mut self.meshes {
            mesh.update_octree_with_config(config)?;
        }
        Ok(())
    }

    /// Exact bounds of every mesh instance, in model space.
    pub fn bounding_box(&self) -> AABB {
        self.meshes
            .iter()
            .fold(AABB::empty(), |acc, mesh| acc.union(&mesh.instanced_bounding_box()))
    }

    /// Closest hit of a model-space ray over every mesh.
    ///
    /// `out` is only updated by a strictly closer hit.
    pub fn intersect(&self, ray: &Ray, out: &mut ModelIntersectInfo) -> Result<bool> {
        let mut improved = false;
        for (index, mesh) in self.meshes.iter().enumerate() {
            if mesh.intersect(ray, &mut out.mesh)? {
                out.mesh_index = index as u32;
                improved = true;
            }
        }
        Ok(improved)
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
