/// Ray intersection tests.
///
/// Every test follows the same contract: it returns `true` only for a hit
/// strictly closer than `info.t`, and only then writes `info`. A miss,
/// a hit behind the origin or a farther hit leaves `info` untouched, which
/// lets callers thread one record through many tests and keep the nearest.
///
/// Near-parallel configurations (|denominator| < [`PARALLEL_EPSILON`]) are
/// reported as misses.

use super::aabb::AABB;
use super::intersect_info::IntersectInfo;
use super::primitives::{Plane, Sphere, Triangle};
use super::ray::Ray;

/// Threshold under which a ray is treated as parallel to a plane.
pub const PARALLEL_EPSILON: f32 = 1e-5;

/// Closest-hit ray test for a primitive.
pub trait RayIntersect {
    /// Test `ray` against `self`, updating `info` on a nearer hit.
    fn intersect(&self, ray: &Ray, info: &mut IntersectInfo) -> bool;
}

// ===== SPHERE =====

impl RayIntersect for Sphere {
    fn intersect(&self, ray: &Ray, info: &mut IntersectInfo) -> bool {
        let oc = self.center - ray.origin;
        let tc = oc.dot(ray.direction);
        let dist = (oc - ray.direction * tc).length();
        if dist > self.radius {
            return false;
        }

        let dt = (self.radius * self.radius - dist * dist).sqrt();
        let mut t = tc - dt;
        if t < 0.0 {
            // Origin inside the sphere: take the exit point
            t = tc + dt;
            if t < 0.0 {
                return false;
            }
        }
        if t >= info.t {
            return false;
        }

        info.t = t;
        info.point = ray.at(t);
        info.normal = (info.point - self.center).normalize_or_zero();
        true
    }
}

// ===== PLANE =====

impl RayIntersect for Plane {
    fn intersect(&self, ray: &Ray, info: &mut IntersectInfo) -> bool {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return false;
        }

        let t = (self.origin - ray.origin).dot(self.normal) / denom;
        if t < 0.0 || t >= info.t {
            return false;
        }

        info.t = t;
        info.point = ray.at(t);
        // Front face relative to the incoming ray
        info.normal = if denom > 0.0 { -self.normal } else { self.normal };
        true
    }
}

// ===== TRIANGLE =====

impl RayIntersect for Triangle {
    /// Möller–Trumbore. Both faces are hit; the reported normal is the
    /// geometric one and is not flipped toward the ray.
    fn intersect(&self, ray: &Ray, info: &mut IntersectInfo) -> bool {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        let s = ray.origin - self.v0;
        let p = ray.direction.cross(e2);
        let q = s.cross(e1);

        let denom = p.dot(e1);
        if denom.abs() < PARALLEL_EPSILON {
            return false;
        }

        let t = q.dot(e2) / denom;
        let u = p.dot(s) / denom;
        let v = q.dot(ray.direction) / denom;
        if t < 0.0 || u < 0.0 || v < 0.0 || u + v > 1.0 || t >= info.t {
            return false;
        }

        info.t = t;
        info.point = ray.at(t);
        info.normal = e1.cross(e2).normalize_or_zero();
        true
    }
}

// ===== AABB =====

impl AABB {
    /// Slab entry/exit parameters, or `None` when the ray misses the box.
    fn slab_range(&self, ray: &Ray) -> Option<(f32, f32)> {
        let inv = ray.inverse_direction();
        let mut max_entry = f32::NEG_INFINITY;
        let mut min_exit = f32::INFINITY;

        for axis in 0..3 {
            let mut near = (self.min[axis] - ray.origin[axis]) * inv[axis];
            let mut far = (self.max[axis] - ray.origin[axis]) * inv[axis];
            if inv[axis] < 0.0 {
                std::mem::swap(&mut near, &mut far);
            }
            // 0 * inf on an axis-parallel ray lying on a slab face
            if near.is_nan() || far.is_nan() {
                if ray.origin[axis] < self.min[axis] || ray.origin[axis] > self.max[axis] {
                    return None;
                }
                continue;
            }

            max_entry = max_entry.max(near);
            min_exit = min_exit.min(far);
            if max_entry > min_exit {
                return None;
            }
        }

        Some((max_entry, min_exit))
    }

    /// Boolean slab test used for pruning. The box counts as hit when the
    /// ray's supporting line crosses it in front of (or around) the origin.
    pub fn intersects_ray(&self, ray: &Ray) -> bool {
        matches!(self.slab_range(ray), Some((_, exit)) if exit >= 0.0)
    }

    /// Distance along the ray at which it enters the box, clamped to 0 when
    /// the origin is inside. `None` on a miss or when the box is behind.
    pub fn ray_entry(&self, ray: &Ray) -> Option<f32> {
        match self.slab_range(ray) {
            Some((entry, exit)) if exit >= 0.0 => Some(entry.max(0.0)),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "intersection_tests.rs"]
mod tests;
