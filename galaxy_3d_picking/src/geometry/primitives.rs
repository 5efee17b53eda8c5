//! Primitive shapes tested against rays.

use glam::{Mat4, Vec3};

/// Sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Infinite plane through `origin`. Callers supply a unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub origin: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub fn new(origin: Vec3, normal: Vec3) -> Self {
        Self { origin, normal }
    }

    /// Signed distance from `point` to the plane, along the normal.
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        (point - self.origin).dot(self.normal)
    }
}

/// Triangle given by three positions, derived on demand from mesh data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Unit geometric normal, `normalize((v1 - v0) x (v2 - v0))`.
    pub fn normal(&self) -> Vec3 {
        (self.v1 - self.v0).cross(self.v2 - self.v0).normalize_or_zero()
    }

    /// Same triangle with every vertex transformed as a point.
    pub fn transformed(&self, matrix: &Mat4) -> Triangle {
        Triangle {
            v0: matrix.transform_point3(self.v0),
            v1: matrix.transform_point3(self.v1),
            v2: matrix.transform_point3(self.v2),
        }
    }
}
