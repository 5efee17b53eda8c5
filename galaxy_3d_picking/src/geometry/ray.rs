/// Rays: origin plus direction.
///
/// The direction is unit length by convention (every constructor in this
/// crate normalizes it) but this is not enforced by the type.

use glam::{Mat4, Vec3};

/// A half-line `origin + direction * t`, `t >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point
    pub origin: Vec3,
    /// Direction (expected unit length)
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parameter `t`.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Component-wise reciprocal of the direction (inf on zero components).
    pub fn inverse_direction(&self) -> Vec3 {
        self.direction.recip()
    }

    /// Ray expressed in another space.
    ///
    /// The origin is transformed as a point, the direction as a vector and
    /// renormalized, so `t` values along the transformed ray are distances in
    /// the target space.
    pub fn transformed(&self, matrix: &Mat4) -> Ray {
        Ray {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction).normalize_or_zero(),
        }
    }
}
