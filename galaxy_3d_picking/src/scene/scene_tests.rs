/// Tests for Scene
///
/// Objects share one cube model and are placed through a TransformStore.

use super::*;
use crate::error::Error;
use crate::resource::{Mesh, MeshDesc, Vertex};
use crate::transform::TransformStore;
use glam::{Mat4, Quat};

// ============================================================================
// Helper Functions
// ============================================================================

/// Unit cube model: one mesh, one identity instance, octree built
fn cube_model() -> Model {
    let vertices = [
        (-0.5, -0.5, -0.5), (0.5, -0.5, -0.5), (0.5, 0.5, -0.5), (-0.5, 0.5, -0.5),
        (-0.5, -0.5, 0.5), (0.5, -0.5, 0.5), (0.5, 0.5, 0.5), (-0.5, 0.5, 0.5),
    ]
    .iter()
    .map(|&(x, y, z)| Vertex::from_position(Vec3::new(x, y, z)))
    .collect();
    let faces: [[u32; 4]; 6] = [
        [0, 3, 2, 1], [4, 5, 6, 7], [0, 1, 5, 4],
        [3, 7, 6, 2], [0, 4, 7, 3], [1, 2, 6, 5],
    ];
    let triangles = faces
        .iter()
        .flat_map(|f| [[f[0], f[1], f[2]], [f[0], f[2], f[3]]])
        .collect();

    let mut mesh = Mesh::from_desc(MeshDesc {
        name: "cube".to_string(),
        vertices,
        triangles,
        instances: vec![Mat4::IDENTITY],
    }).unwrap();
    mesh.update_octree().unwrap();

    let mut model = Model::new("cube");
    model.add_mesh(mesh).unwrap();
    model
}

fn down_ray(x: f32, z: f32) -> Ray {
    Ray::new(Vec3::new(x, 10.0, z), -Vec3::Y)
}

struct Fixture {
    scene: Scene,
    transforms: TransformStore,
    model: ModelKey,
}

impl Fixture {
    fn new() -> Self {
        let mut scene = Scene::new();
        let model = scene.add_model(cube_model());
        Self { scene, transforms: TransformStore::new(), model }
    }

    fn place(&mut self, matrix: Mat4, uuid: u64) -> SceneObjectKey {
        let transform = self.transforms.insert(matrix);
        self.scene.add_object(self.model, transform, uuid).unwrap()
    }

    fn pick(&self, ray: &Ray) -> Option<SceneIntersectInfo> {
        let mut out = SceneIntersectInfo::default();
        self.scene
            .intersect(ray, &self.transforms, &mut out)
            .unwrap()
            .then_some(out)
    }
}

// ============================================================================
// Objects
// ============================================================================

#[test]
fn test_add_and_find_objects() {
    let mut fx = Fixture::new();
    let a = fx.place(Mat4::IDENTITY, 100);
    let b = fx.place(Mat4::from_translation(Vec3::X * 3.0), 200);

    assert_eq!(fx.scene.object_count(), 2);
    assert_eq!(fx.scene.find_object(100), Some(a));
    assert_eq!(fx.scene.find_object(200), Some(b));
    assert_eq!(fx.scene.object(a).unwrap().uuid, 100);
    assert_eq!(fx.scene.objects().count(), 2);

    assert!(fx.scene.remove_object(a));
    assert!(!fx.scene.remove_object(a));
    assert_eq!(fx.scene.find_object(100), None);
    assert!(fx.scene.object(b).is_some());
}

#[test]
fn test_duplicate_uuid_is_rejected() {
    let mut fx = Fixture::new();
    fx.place(Mat4::IDENTITY, 7);

    let transform = fx.transforms.insert(Mat4::IDENTITY);
    let err = fx.scene.add_object(fx.model, transform, 7).unwrap_err();
    assert!(matches!(err, Error::InvalidState(_)));
}

#[test]
fn test_object_requires_registered_model() {
    let mut fx = Fixture::new();
    let removed = fx.scene.remove_model(fx.model).unwrap();
    assert_eq!(removed.name(), "cube");

    let transform = fx.transforms.insert(Mat4::IDENTITY);
    let err = fx.scene.add_object(fx.model, transform, 1).unwrap_err();
    assert!(matches!(err, Error::InvalidKey(_)));
    assert!(matches!(fx.scene.remove_model(fx.model), Err(Error::InvalidKey(_))));
}

#[test]
fn test_model_in_use_cannot_be_removed() {
    let mut fx = Fixture::new();
    fx.place(Mat4::IDENTITY, 1);

    let err = fx.scene.remove_model(fx.model).unwrap_err();
    assert!(matches!(err, Error::InvalidState(_)));
    assert_eq!(fx.scene.model_count(), 1);
}

#[test]
fn test_clear() {
    let mut fx = Fixture::new();
    fx.place(Mat4::IDENTITY, 1);
    fx.scene.clear();

    assert_eq!(fx.scene.object_count(), 0);
    assert_eq!(fx.scene.model_count(), 0);
    assert!(fx.pick(&down_ray(0.2, -0.1)).is_none());
}

// ============================================================================
// Intersection
// ============================================================================

#[test]
fn test_pick_single_object() {
    let mut fx = Fixture::new();
    let key = fx.place(Mat4::IDENTITY, 42);

    let hit = fx.pick(&down_ray(0.2, -0.1)).unwrap();
    assert_eq!(hit.object, Some(key));
    assert_eq!(hit.uuid, 42);
    assert!((hit.t() - 9.5).abs() < 1e-5);
    assert!((hit.point() - Vec3::new(0.2, 0.5, -0.1)).length() < 1e-5);
    assert!((hit.normal() - Vec3::Y).length() < 1e-5);
}

#[test]
fn test_nearest_object_wins_whatever_the_order() {
    for lower_first in [true, false] {
        let mut fx = Fixture::new();
        let (low, high) = if lower_first {
            let low = fx.place(Mat4::IDENTITY, 1);
            (low, fx.place(Mat4::from_translation(Vec3::Y * 3.0), 2))
        } else {
            let high = fx.place(Mat4::from_translation(Vec3::Y * 3.0), 2);
            (fx.place(Mat4::IDENTITY, 1), high)
        };

        let hit = fx.pick(&down_ray(0.2, -0.1)).unwrap();
        assert_eq!(hit.object, Some(high));
        assert_ne!(hit.object, Some(low));
        assert!((hit.t() - 6.5).abs() < 1e-5);
    }
}

#[test]
fn test_scaled_object_distance_is_world_space() {
    let mut fx = Fixture::new();
    fx.place(Mat4::from_scale(Vec3::new(4.0, 4.0, 4.0)), 1);

    let hit = fx.pick(&down_ray(0.2, -0.1)).unwrap();
    // Top face at y = 2 in world space
    assert!((hit.t() - 8.0).abs() < 1e-4);
    assert!((hit.point() - Vec3::new(0.2, 2.0, -0.1)).length() < 1e-4);
}

#[test]
fn test_normal_uses_inverse_transpose() {
    let mut fx = Fixture::new();
    // Non-uniform scale then a rotation about Z: the world top face stays
    // horizontal, its normal must stay +Y
    let matrix = Mat4::from_scale_rotation_translation(
        Vec3::new(1.0, 3.0, 1.0),
        Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
        Vec3::ZERO,
    );
    fx.place(matrix, 1);

    let hit = fx.pick(&down_ray(0.1, 0.2)).unwrap();
    assert!((hit.point().y - 0.5).abs() < 1e-4);
    assert!((hit.normal() - Vec3::Y).length() < 1e-4);
}

#[test]
fn test_miss_leaves_record_untouched() {
    let mut fx = Fixture::new();
    fx.place(Mat4::IDENTITY, 1);

    let mut out = SceneIntersectInfo::default();
    let hit = fx.scene.intersect(&down_ray(3.0, 0.0), &fx.transforms, &mut out).unwrap();
    assert!(!hit);
    assert_eq!(out, SceneIntersectInfo::default());
}

#[test]
fn test_nearer_existing_record_is_kept() {
    let mut fx = Fixture::new();
    fx.place(Mat4::IDENTITY, 1);

    let mut out = SceneIntersectInfo::default();
    out.model.mesh.triangle.info.t = 2.0;
    out.uuid = 99;
    let before = out;

    assert!(!fx.scene.intersect(&down_ray(0.2, -0.1), &fx.transforms, &mut out).unwrap());
    assert_eq!(out, before);
}

#[test]
fn test_object_behind_ray_is_ignored() {
    let mut fx = Fixture::new();
    fx.place(Mat4::from_translation(Vec3::Y * 20.0), 1);

    assert!(fx.pick(&down_ray(0.2, -0.1)).is_none());
}

#[test]
fn test_unknown_transform_is_an_error() {
    let mut fx = Fixture::new();
    let key = fx.place(Mat4::IDENTITY, 1);
    let transform = fx.scene.object(key).unwrap().transform;
    fx.transforms.remove(transform);

    let mut out = SceneIntersectInfo::default();
    let err = fx.scene.intersect(&down_ray(0.2, -0.1), &fx.transforms, &mut out).unwrap_err();
    assert!(matches!(err, Error::InvalidKey(_)));
}
