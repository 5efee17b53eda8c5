//! Geometry module — primitive shapes and ray intersection tests.
//!
//! Everything here is pure: tests only read their inputs and update the
//! caller's best-so-far [`IntersectInfo`] when they find a strictly closer hit.

mod aabb;
mod ray;
mod primitives;
mod intersect_info;
mod intersection;

pub use aabb::AABB;
pub use ray::Ray;
pub use primitives::{Sphere, Plane, Triangle};
pub use intersect_info::{
    IntersectInfo, TriangleIntersectInfo, MeshIntersectInfo,
    ModelIntersectInfo, SceneIntersectInfo,
};
pub use intersection::{RayIntersect, PARALLEL_EPSILON};
