/// Dragging picked objects with the cursor.
///
/// The object slides on a plane facing the camera, placed at the distance
/// along the camera's forward axis where the object was grabbed. Each
/// update translates the object by the motion of the cursor ray's hit on
/// that plane since the previous update.

use glam::Vec3;
use crate::error::Result;
use crate::{engine_bail, engine_debug, engine_trace};
use crate::geometry::{IntersectInfo, Plane, Ray, RayIntersect, SceneIntersectInfo};
use crate::scene::Scene;
use crate::transform::{TransformKey, TransformProvider};

// ===== DRAGGER =====

/// State of one drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dragger {
    /// World position matched to the cursor at the last update
    start_point: Vec3,
    /// Distance of the dragging plane along `camera_forward`
    distance: f32,
    /// Unit forward axis of the camera, also the plane normal
    camera_forward: Vec3,
    /// Transform moved by the drag
    target: TransformKey,
}

impl Dragger {
    /// Start dragging `target`, grabbed at `hit_point` by `ray`.
    pub fn begin(ray: &Ray, camera_forward: Vec3, hit_point: Vec3, target: TransformKey) -> Self {
        let camera_forward = camera_forward.normalize_or_zero();
        let distance = camera_forward.dot(hit_point - ray.origin);
        engine_debug!("galaxy3d::Dragger",
            "Drag begin on {:?} at {:?} (plane distance {})", target, hit_point, distance);
        Self {
            start_point: hit_point,
            distance,
            camera_forward,
            target,
        }
    }

    /// Dragging plane for a ray starting at `origin`.
    pub fn plane(&self, origin: Vec3) -> Plane {
        Plane::new(origin + self.camera_forward * self.distance, self.camera_forward)
    }

    /// Follow `ray` for one step. Returns the translation applied to the target.
    ///
    /// # Errors
    ///
    /// - `NoIntersection` if the ray does not reach the dragging plane; the
    ///   target is not moved
    /// - any error of `transforms.translate`
    pub fn update<P: TransformProvider + ?Sized>(
        &mut self,
        ray: &Ray,
        transforms: &mut P,
    ) -> Result<Vec3> {
        let mut info = IntersectInfo::new();
        if !self.plane(ray.origin).intersect(ray, &mut info) {
            engine_bail!("galaxy3d::Dragger", NoIntersection,
                "Drag ray {:?} does not reach the dragging plane", ray);
        }

        let delta = info.point - self.start_point;
        transforms.translate(self.target, delta)?;
        self.start_point = info.point;
        engine_trace!("galaxy3d::Dragger", "Drag step {:?}", delta);
        Ok(delta)
    }

    /// Keep the plane facing a camera that turned, through the current
    /// grab point.
    pub fn set_camera_forward(&mut self, origin: Vec3, camera_forward: Vec3) {
        self.camera_forward = camera_forward.normalize_or_zero();
        self.distance = self.camera_forward.dot(self.start_point - origin);
    }

    pub fn start_point(&self) -> Vec3 {
        self.start_point
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn camera_forward(&self) -> Vec3 {
        self.camera_forward
    }

    pub fn target(&self) -> TransformKey {
        self.target
    }
}

// ===== CONTROLLER =====

/// Press / drag / release state machine around [`Dragger`].
///
/// Idle while no drag is active.
#[derive(Debug, Default)]
pub struct DragController {
    state: Option<Dragger>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the scene under `ray` and start dragging what was hit.
    ///
    /// Returns `false` (and stays idle) when nothing is hit. A press while
    /// dragging replaces the current drag.
    pub fn press<P: TransformProvider + ?Sized>(
        &mut self,
        ray: &Ray,
        camera_forward: Vec3,
        scene: &Scene,
        transforms: &P,
    ) -> Result<bool> {
        let mut hit = SceneIntersectInfo::default();
        if !scene.intersect(ray, transforms, &mut hit)? {
            self.state = None;
            return Ok(false);
        }
        let Some(object) = hit.object.and_then(|key| scene.object(key)) else {
            self.state = None;
            return Ok(false);
        };

        self.state = Some(Dragger::begin(ray, camera_forward, hit.point(), object.transform));
        Ok(true)
    }

    /// Advance the active drag.
    ///
    /// # Errors
    ///
    /// - `InvalidState` while idle
    /// - any error of [`Dragger::update`]
    pub fn drag<P: TransformProvider + ?Sized>(
        &mut self,
        ray: &Ray,
        transforms: &mut P,
    ) -> Result<Vec3> {
        let Some(dragger) = self.state.as_mut() else {
            engine_bail!("galaxy3d::DragController", InvalidState,
                "drag called while no drag is active");
        };
        dragger.update(ray, transforms)
    }

    /// End the drag, if any. Returns the finished drag state.
    pub fn release(&mut self) -> Option<Dragger> {
        let finished = self.state.take();
        if let Some(dragger) = &finished {
            engine_debug!("galaxy3d::DragController",
                "Drag end on {:?} at {:?}", dragger.target, dragger.start_point);
        }
        finished
    }

    /// Update the camera forward axis of the active drag (no-op while idle).
    pub fn set_camera_forward(&mut self, origin: Vec3, camera_forward: Vec3) {
        if let Some(dragger) = self.state.as_mut() {
            dragger.set_camera_forward(origin, camera_forward);
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_some()
    }

    pub fn dragger(&self) -> Option<&Dragger> {
        self.state.as_ref()
    }
}

#[cfg(test)]
#[path = "dragger_tests.rs"]
mod tests;
