/// Best-hit records threaded through nested intersection calls.
///
/// Each level wraps the one below and adds the index that identifies where
/// the hit came from. At every level `t` is measured along the ray the caller
/// passed in, so records from different instances, meshes or models can be
/// compared directly.

use glam::Vec3;
use crate::scene::SceneObjectKey;

/// Closest hit found so far. `t` starts at +infinity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectInfo {
    /// Ray parameter of the hit
    pub t: f32,
    /// `origin + direction * t`
    pub point: Vec3,
    /// Surface normal at the hit
    pub normal: Vec3,
}

impl IntersectInfo {
    /// A record that any finite hit improves.
    pub fn new() -> Self {
        Self {
            t: f32::INFINITY,
            point: Vec3::ZERO,
            normal: Vec3::ZERO,
        }
    }
}

impl Default for IntersectInfo {
    fn default() -> Self {
        Self::new()
    }
}

/// Hit on a triangle of one mesh.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TriangleIntersectInfo {
    pub info: IntersectInfo,
    /// Index into the mesh's triangle list
    pub triangle_index: u32,
}

/// Hit on one instance of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeshIntersectInfo {
    pub triangle: TriangleIntersectInfo,
    /// Index into the mesh's instance list
    pub instance_index: u32,
}

impl MeshIntersectInfo {
    pub fn t(&self) -> f32 {
        self.triangle.info.t
    }
}

/// Hit on one mesh of a model.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModelIntersectInfo {
    pub mesh: MeshIntersectInfo,
    /// Index into the model's mesh list
    pub mesh_index: u32,
}

impl ModelIntersectInfo {
    pub fn t(&self) -> f32 {
        self.mesh.t()
    }

    pub fn info(&self) -> &IntersectInfo {
        &self.mesh.triangle.info
    }
}

/// Hit on a scene object, in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneIntersectInfo {
    pub model: ModelIntersectInfo,
    /// Scene object that was hit (`None` until a hit is recorded)
    pub object: Option<SceneObjectKey>,
    /// User identity of the object, as registered with the scene
    pub uuid: u64,
}

impl SceneIntersectInfo {
    pub fn t(&self) -> f32 {
        self.model.t()
    }

    /// World-space hit point
    pub fn point(&self) -> Vec3 {
        self.model.info().point
    }

    /// World-space unit normal
    pub fn normal(&self) -> Vec3 {
        self.model.info().normal
    }
}
