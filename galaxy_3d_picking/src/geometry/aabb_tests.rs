use glam::{Mat4, Quat, Vec3};
use super::*;

fn make_aabb(min: Vec3, max: Vec3) -> AABB {
    AABB { min, max }
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_from_points() {
    let aabb = AABB::from_points([
        Vec3::new(1.0, -2.0, 3.0),
        Vec3::new(-1.0, 4.0, 0.0),
        Vec3::new(0.0, 0.0, -5.0),
    ]);

    assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, -5.0));
    assert_eq!(aabb.max, Vec3::new(1.0, 4.0, 3.0));
    assert!(aabb.is_valid());
}

#[test]
fn test_empty_is_invalid_until_grown() {
    let mut aabb = AABB::empty();
    assert!(!aabb.is_valid());

    aabb.grow(Vec3::ONE);
    assert!(aabb.is_valid());
    assert_eq!(aabb.min, aabb.max);
}

#[test]
fn test_center_extents_expanded() {
    let aabb = make_aabb(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 6.0));

    assert_eq!(aabb.center(), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(aabb.extents(), Vec3::new(2.0, 4.0, 6.0));

    let padded = aabb.expanded(0.5);
    assert_eq!(padded.min, Vec3::splat(-0.5));
    assert_eq!(padded.max, Vec3::new(2.5, 4.5, 6.5));
}

// ============================================================================
// Octants
// ============================================================================

#[test]
fn test_octant_low_and_high_corners() {
    let parent = make_aabb(Vec3::splat(-2.0), Vec3::splat(2.0));

    let low = parent.octant(0, 0.0);
    assert_eq!(low.min, Vec3::splat(-2.0));
    assert_eq!(low.max, Vec3::ZERO);

    let high = parent.octant(7, 0.0);
    assert_eq!(high.min, Vec3::ZERO);
    assert_eq!(high.max, Vec3::splat(2.0));

    // bit0 = X high, others low
    let x_high = parent.octant(1, 0.0);
    assert_eq!(x_high.min, Vec3::new(0.0, -2.0, -2.0));
    assert_eq!(x_high.max, Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn test_octant_is_padded() {
    let parent = make_aabb(Vec3::splat(-2.0), Vec3::splat(2.0));
    let child = parent.octant(0, 0.1);

    assert!((child.max.x - 0.1).abs() < 1e-6);
    assert!((child.min.x + 2.1).abs() < 1e-6);
}

#[test]
fn test_octants_cover_parent() {
    let parent = make_aabb(Vec3::new(-1.0, 0.0, 3.0), Vec3::new(5.0, 2.0, 9.0));
    let mut union = AABB::empty();
    for octant in 0..8u8 {
        union = union.union(&parent.octant(octant, 0.0));
    }

    assert_eq!(union, parent);
}

// ============================================================================
// Containment
// ============================================================================

#[test]
fn test_aabb_contains() {
    let big = make_aabb(Vec3::splat(-10.0), Vec3::splat(10.0));
    let small = make_aabb(Vec3::splat(-1.0), Vec3::splat(1.0));
    let straddling = make_aabb(Vec3::new(5.0, 5.0, 5.0), Vec3::new(15.0, 15.0, 15.0));

    assert!(big.contains(&small));
    assert!(!small.contains(&big));
    assert!(!big.contains(&straddling));
    // Shared faces count as inside
    assert!(big.contains(&big));
}

#[test]
fn test_contains_triangle_requires_all_vertices() {
    let aabb = make_aabb(Vec3::ZERO, Vec3::ONE);
    let inside = Triangle::new(Vec3::splat(0.1), Vec3::splat(0.5), Vec3::new(0.9, 0.1, 0.2));
    let straddling = Triangle::new(Vec3::splat(0.1), Vec3::splat(0.5), Vec3::new(1.5, 0.1, 0.2));

    assert!(aabb.contains_triangle(&inside));
    assert!(!aabb.contains_triangle(&straddling));
    assert!(aabb.contains_point(Vec3::ONE));
}

// ============================================================================
// Transforms
// ============================================================================

#[test]
fn test_transformed_and_to_space_agree_without_rotation() {
    let aabb = make_aabb(Vec3::splat(-1.0), Vec3::splat(1.0));
    let matrix = Mat4::from_scale_rotation_translation(
        Vec3::new(2.0, -1.0, 3.0),
        Quat::IDENTITY,
        Vec3::new(10.0, 0.0, -4.0),
    );

    let exact = aabb.transformed(&matrix);
    let approx = aabb.to_space(&matrix);

    assert!((exact.min - approx.min).abs().max_element() < 1e-5);
    assert!((exact.max - approx.max).abs().max_element() < 1e-5);
    assert!((exact.min - Vec3::new(8.0, -1.0, -7.0)).abs().max_element() < 1e-5);
}

#[test]
fn test_to_space_is_tighter_under_rotation() {
    let aabb = make_aabb(Vec3::splat(-1.0), Vec3::splat(1.0));
    let matrix = Mat4::from_rotation_z(std::f32::consts::FRAC_PI_4);

    let exact = aabb.transformed(&matrix);
    let approx = aabb.to_space(&matrix);

    // Exact box of a 45° rotated unit cube spans ±sqrt(2) on X
    assert!((exact.max.x - std::f32::consts::SQRT_2).abs() < 1e-5);
    // Two-corner approximation collapses X: both corners rotate onto x = 0
    assert!(approx.max.x.abs() < 1e-5);
    assert!(approx.max.x < exact.max.x);
}
