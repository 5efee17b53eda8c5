/// Camera — low-level passive data container.
///
/// The Camera stores what the caller sets: view matrix, projection matrix
/// and viewport. The only things it derives are the picking ray under a
/// cursor and the camera's own placement (position, forward axis).
///
/// The engine does NOT store or manage cameras. They are tools provided
/// by the engine, owned and driven by the caller.

use glam::{Mat4, Vec2, Vec3};
use crate::geometry::Ray;

/// Viewport rectangle in pixels and depth range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Full-window viewport with depth range [0, 1].
    pub fn from_size(width: f32, height: f32) -> Self {
        Self { x: 0.0, y: 0.0, width, height, min_depth: 0.0, max_depth: 1.0 }
    }
}

/// Low-level camera. A passive data container.
///
/// The projection is expected to map depth to [0, 1] with +Y up in clip
/// space, as `Mat4::perspective_rh` and `Mat4::orthographic_rh` do.
#[derive(Debug, Clone)]
pub struct Camera {
    view_matrix: Mat4,
    projection_matrix: Mat4,
    viewport: Viewport,
}

impl Camera {
    pub fn new(view: Mat4, projection: Mat4, viewport: Viewport) -> Self {
        Self {
            view_matrix: view,
            projection_matrix: projection,
            viewport,
        }
    }

    // ===== GETTERS =====

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix (perspective or orthographic).
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Camera position in world space.
    pub fn position(&self) -> Vec3 {
        self.view_matrix.inverse().w_axis.truncate()
    }

    /// Unit viewing direction in world space (the view's -Z axis).
    pub fn forward(&self) -> Vec3 {
        (-self.view_matrix.inverse().z_axis.truncate()).normalize_or_zero()
    }

    // ===== PICKING =====

    /// World-space ray under a cursor position.
    ///
    /// `cursor` is in pixels with the origin at the window's top-left
    /// corner. The ray starts on the near plane and points through the
    /// matching far-plane point.
    pub fn construct_ray(&self, cursor: Vec2) -> Ray {
        let ndc = Vec2::new(
            2.0 * (cursor.x - self.viewport.x) / self.viewport.width - 1.0,
            1.0 - 2.0 * (cursor.y - self.viewport.y) / self.viewport.height,
        );
        let inverse = self.view_projection_matrix().inverse();
        let near = inverse.project_point3(ndc.extend(0.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        Ray::new(near, far - near)
    }

    // ===== SETTERS — store, compute nothing =====

    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
    }

    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
