use super::*;
use crate::error::Error;
use glam::Quat;

fn assert_mat4_near(a: Mat4, b: Mat4) {
    assert!(a.abs_diff_eq(b, 1e-5), "expected {:?}, got {:?}", b, a);
}

// ============================================================================
// Store
// ============================================================================

#[test]
fn test_insert_caches_inverse() {
    let mut store = TransformStore::new();
    let m = Mat4::from_scale_rotation_translation(
        Vec3::new(2.0, 1.0, 0.5),
        Quat::from_rotation_x(0.3),
        Vec3::new(1.0, 2.0, 3.0),
    );
    let key = store.insert(m);

    assert!(store.contains(key));
    assert_eq!(store.len(), 1);
    assert_eq!(store.transform(key).unwrap(), m);
    assert_mat4_near(store.transform(key).unwrap() * store.inverse_transform(key).unwrap(), Mat4::IDENTITY);
}

#[test]
fn test_set_refreshes_inverse() {
    let mut store = TransformStore::new();
    let key = store.insert(Mat4::IDENTITY);
    let m = Mat4::from_translation(Vec3::new(0.0, -4.0, 0.0));

    store.set(key, m).unwrap();
    assert_mat4_near(store.inverse_transform(key).unwrap(), m.inverse());
}

#[test]
fn test_translate_is_world_space() {
    let mut store = TransformStore::new();
    let key = store.insert(Mat4::from_scale(Vec3::splat(3.0)));

    store.translate(key, Vec3::new(1.0, 0.0, 0.0)).unwrap();

    // A world-space shift is not scaled by the object's own scale
    let origin = store.transform(key).unwrap().transform_point3(Vec3::ZERO);
    assert!((origin - Vec3::X).length() < 1e-6);
    let back = store.inverse_transform(key).unwrap().transform_point3(Vec3::new(4.0, 0.0, 0.0));
    assert!((back - Vec3::X).length() < 1e-6);
}

#[test]
fn test_remove_invalidates_key() {
    let mut store = TransformStore::new();
    let key = store.insert(Mat4::IDENTITY);
    let other = store.insert(Mat4::from_translation(Vec3::Y));

    assert_eq!(store.remove(key), Some(Mat4::IDENTITY));
    assert!(!store.contains(key));
    assert!(store.contains(other));
    assert_eq!(store.remove(key), None);

    assert!(matches!(store.transform(key), Err(Error::InvalidKey(_))));
    assert!(matches!(store.inverse_transform(key), Err(Error::InvalidKey(_))));
    assert!(matches!(store.translate(key, Vec3::X), Err(Error::InvalidKey(_))));
    assert!(matches!(store.set(key, Mat4::IDENTITY), Err(Error::InvalidKey(_))));
}

#[test]
fn test_dirty_tracking() {
    let mut store = TransformStore::new();
    let a = store.insert(Mat4::IDENTITY);
    let b = store.insert(Mat4::IDENTITY);

    let dirty = store.take_dirty();
    assert!(dirty.contains(&a) && dirty.contains(&b));
    assert!(store.take_dirty().is_empty());

    store.translate(b, Vec3::Z).unwrap();
    let dirty = store.take_dirty();
    assert_eq!(dirty.len(), 1);
    assert!(dirty.contains(&b));
}
