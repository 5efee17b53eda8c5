/// Axis-aligned bounding boxes.
///
/// Used for octree nodes and mesh bounds, always in the space of the
/// geometry they enclose (mesh-local for octrees).

use glam::{Mat4, Vec3};
use super::primitives::Triangle;

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// Create a box from its two corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Inverted box (min = +inf, max = -inf), the identity for [`AABB::grow`].
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    /// Smallest box enclosing all the points. Empty input yields [`AABB::empty`].
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        let mut aabb = Self::empty();
        for p in points {
            aabb.grow(p);
        }
        aabb
    }

    /// Enlarge the box to include `point`.
    pub fn grow(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Whether min <= max on every axis.
    pub fn is_valid(&self) -> bool {
        self.min.cmple(self.max).all()
    }

    /// Compute the center point of this AABB.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Full size along each axis.
    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }

    /// Box padded by `epsilon` on every side.
    pub fn expanded(&self, epsilon: f32) -> AABB {
        AABB {
            min: self.min - Vec3::splat(epsilon),
            max: self.max + Vec3::splat(epsilon),
        }
    }

    /// Smallest box enclosing both boxes.
    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Octant `octant` of this box, split at the center.
    ///
    /// Bit layout: bit0 = X, bit1 = Y, bit2 = Z (0 = low half, 1 = high half).
    /// The child is built as `center ± quarter extents` around the octant's
    /// own center, then padded by `epsilon`.
    pub fn octant(&self, octant: u8, epsilon: f32) -> AABB {
        let quarter = self.extents() * 0.25;
        let sign = Vec3::new(
            if octant & 1 == 0 { -1.0 } else { 1.0 },
            if octant & 2 == 0 { -1.0 } else { 1.0 },
            if octant & 4 == 0 { -1.0 } else { 1.0 },
        );
        let child_center = self.center() + quarter * sign;
        AABB {
            min: child_center - quarter,
            max: child_center + quarter,
        }
        .expanded(epsilon)
    }

    /// Test if a point lies inside the box (boundary included).
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Test if all three vertices of a triangle lie inside the box.
    pub fn contains_triangle(&self, triangle: &Triangle) -> bool {
        self.contains(&AABB::from_points([triangle.v0, triangle.v1, triangle.v2]))
    }

    /// Test if `other` lies entirely inside this box (shared faces included).
    pub fn contains(&self, other: &AABB) -> bool {
        self.min.cmple(other.min).all() && other.max.cmple(self.max).all()
    }

    /// Transform this AABB by a matrix, returning the exact enclosing box.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the AABB extents
    /// instead of transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }

    /// Re-express the box in another space from its two opposite corners only.
    ///
    /// The result is the component-wise min/max of `matrix * min` and
    /// `matrix * max`. Exact for translations, axis scales and axis flips;
    /// under rotation it can be tighter than the true bounds. Use
    /// [`AABB::transformed`] when the exact box is required.
    pub fn to_space(&self, matrix: &Mat4) -> AABB {
        let a = matrix.transform_point3(self.min);
        let b = matrix.transform_point3(self.max);
        AABB { min: a.min(b), max: a.max(b) }
    }
}

impl Default for AABB {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
#[path = "aabb_tests.rs"]
mod tests;
