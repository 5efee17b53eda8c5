/// Scene — the set of pickable objects.
///
/// Models are registered once and shared by any number of objects. Both
/// live in SlotMaps for O(1) insert/remove with stable keys. Object
/// transforms are not stored here; they are read from a
/// [`TransformProvider`] at query time.

use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use crate::error::Result;
use crate::{engine_bail, engine_debug, engine_err};
use crate::geometry::{IntersectInfo, ModelIntersectInfo, Ray, SceneIntersectInfo};
use crate::resource::Model;
use crate::transform::{TransformKey, TransformProvider};
use super::scene_object::{ModelKey, SceneObject, SceneObjectKey};

/// A pickable scene.
#[derive(Debug, Default)]
pub struct Scene {
    /// Registered models, shared by objects
    models: SlotMap<ModelKey, Model>,
    /// Objects, iterated linearly by intersect()
    objects: SlotMap<SceneObjectKey, SceneObject>,
    /// uuid → object, for reverse lookup
    uuids: FxHashMap<u64, SceneObjectKey>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== MODELS =====

    pub fn add_model(&mut self, model: Model) -> ModelKey {
        engine_debug!("galaxy3d::Scene",
            "Registered model '{}' ({} meshes)", model.name(), model.mesh_count());
        self.models.insert(model)
    }

    pub fn model(&self, key: ModelKey) -> Option<&Model> {
        self.models.get(key)
    }

    pub fn model_mut(&mut self, key: ModelKey) -> Option<&mut Model> {
        self.models.get_mut(key)
    }

    /// Unregister a model.
    ///
    /// # Errors
    ///
    /// - `InvalidKey` if the model is not registered
    /// - `InvalidState` if an object still uses it
    pub fn remove_model(&mut self, key: ModelKey) -> Result<Model> {
        if self.objects.values().any(|o| o.model == key) {
            engine_bail!("galaxy3d::Scene", InvalidState,
                "Model {:?} is still used by scene objects", key);
        }
        self.models.remove(key).ok_or_else(|| {
            engine_err!("galaxy3d::Scene", InvalidKey, "Model {:?} does not exist", key)
        })
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    // ===== OBJECTS =====

    /// Place a registered model in the scene.
    ///
    /// # Errors
    ///
    /// - `InvalidKey` if the model is not registered
    /// - `InvalidState` if `uuid` is already used by another object
    pub fn add_object(
        &mut self,
        model: ModelKey,
        transform: TransformKey,
        uuid: u64,
    ) -> Result<SceneObjectKey> {
        if !self.models.contains_key(model) {
            engine_bail!("galaxy3d::Scene", InvalidKey,
                "Cannot add object {}: model {:?} does not exist", uuid, model);
        }
        if self.uuids.contains_key(&uuid) {
            engine_bail!("galaxy3d::Scene", InvalidState,
                "Object uuid {} is already in use", uuid);
        }

        let key = self.objects.insert(SceneObject { model, transform, uuid });
        self.uuids.insert(uuid, key);
        Ok(key)
    }

    /// Remove an object. Returns `false` if the key was not present.
    pub fn remove_object(&mut self, key: SceneObjectKey) -> bool {
        match self.objects.remove(key) {
            Some(object) => {
                self.uuids.remove(&object.uuid);
                true
            }
            None => false,
        }
    }

    pub fn object(&self, key: SceneObjectKey) -> Option<&SceneObject> {
        self.objects.get(key)
    }

    pub fn find_object(&self, uuid: u64) -> Option<SceneObjectKey> {
        self.uuids.get(&uuid).copied()
    }

    pub fn objects(&self) -> impl Iterator<Item = (SceneObjectKey, &SceneObject)> + '_ {
        self.objects.iter()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.uuids.clear();
        self.models.clear();
    }

    // ===== INTERSECTION =====

    /// Closest hit of a world-space ray over every object.
    ///
    /// Each object is queried in model space with a fresh record. A hit is
    /// brought back to world space and its `t` re-derived along `ray`
    /// before it is compared with `out`, which is only updated by a
    /// strictly closer hit.
    ///
    /// # Errors
    ///
    /// - `InvalidKey` if an object's transform is unknown to `transforms`
    /// - `InvalidState` if a mesh has no octree
    pub fn intersect<P: TransformProvider + ?Sized>(
        &self,
        ray: &Ray,
        transforms: &P,
        out: &mut SceneIntersectInfo,
    ) -> Result<bool> {
        let mut improved = false;

        for (key, object) in &self.objects {
            let Some(model) = self.models.get(object.model) else {
                engine_bail!("galaxy3d::Scene", InvalidKey,
                    "Object {} references missing model {:?}", object.uuid, object.model);
            };
            let matrix = transforms.transform(object.transform)?;
            let inverse = transforms.inverse_transform(object.transform)?;

            let mut local = ModelIntersectInfo::default();
            if !model.intersect(&ray.transformed(&inverse), &mut local)? {
                continue;
            }

            let point = matrix.transform_point3(local.info().point);
            let t = (point - ray.origin).dot(ray.direction);
            if t < 0.0 || t >= out.t() {
                continue;
            }
            let normal = world_normal(&inverse, local.info().normal);

            local.mesh.triangle.info = IntersectInfo { t, point, normal };
            out.model = local;
            out.object = Some(key);
            out.uuid = object.uuid;
            improved = true;
        }

        Ok(improved)
    }
}

/// Normal from model to world space (inverse transpose), unit length.
fn world_normal(inverse: &Mat4, normal: Vec3) -> Vec3 {
    inverse.transpose().transform_vector3(normal).normalize_or_zero()
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
