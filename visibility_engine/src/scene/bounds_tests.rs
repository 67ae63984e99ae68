use glam::{Mat4, Quat, Vec3};
use super::*;

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_from_center_size() {
    let aabb = AABB::from_center_size(Vec3::new(10.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 6.0));
    assert_eq!(aabb.min, Vec3::new(9.0, -2.0, -3.0));
    assert_eq!(aabb.max, Vec3::new(11.0, 2.0, 3.0));
    assert_eq!(aabb.center(), Vec3::new(10.0, 0.0, 0.0));
    assert_eq!(aabb.size(), Vec3::new(2.0, 4.0, 6.0));
}

#[test]
fn test_unit_diameter() {
    let aabb = AABB::unit();
    assert!((aabb.diameter() - 3.0_f32.sqrt()).abs() < 1e-6);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_is_valid() {
    assert!(AABB::unit().is_valid());
    // Degenerate (flat) boxes are still valid
    assert!(AABB::new(Vec3::ZERO, Vec3::ZERO).is_valid());
}

#[test]
fn test_inverted_is_invalid() {
    let aabb = AABB::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 1.0));
    assert!(!aabb.is_valid());
}

#[test]
fn test_non_finite_is_invalid() {
    let aabb = AABB::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::ONE);
    assert!(!aabb.is_valid());

    let aabb = AABB::new(Vec3::ZERO, Vec3::new(f32::INFINITY, 1.0, 1.0));
    assert!(!aabb.is_valid());
}

// ============================================================================
// Transform
// ============================================================================

#[test]
fn test_transformed_translation() {
    let world = AABB::unit().transformed(&Mat4::from_translation(Vec3::splat(1000.0)));
    assert_eq!(world.center(), Vec3::splat(1000.0));
    assert_eq!(world.size(), Vec3::ONE);
}

#[test]
fn test_transformed_scale() {
    let world = AABB::unit().transformed(&Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0)));
    assert_eq!(world.min, Vec3::new(-1.0, -1.5, -2.0));
    assert_eq!(world.max, Vec3::new(1.0, 1.5, 2.0));
}

#[test]
fn test_transformed_rotation_grows_box() {
    let rotation = Mat4::from_quat(Quat::from_rotation_y(std::f32::consts::FRAC_PI_4));
    let world = AABB::unit().transformed(&rotation);
    let expected_half = (2.0_f32).sqrt() * 0.5;
    assert!((world.max.x - expected_half).abs() < 1e-5);
    assert!((world.max.y - 0.5).abs() < 1e-5);
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_contains_point() {
    let aabb = AABB::unit();
    assert!(aabb.contains_point(Vec3::ZERO));
    assert!(aabb.contains_point(Vec3::splat(0.5))); // boundary
    assert!(!aabb.contains_point(Vec3::new(0.6, 0.0, 0.0)));
}

#[test]
fn test_intersects() {
    let a = AABB::unit();
    let b = AABB::from_center_size(Vec3::new(1.0, 0.0, 0.0), Vec3::ONE); // touches
    let c = AABB::from_center_size(Vec3::new(5.0, 0.0, 0.0), Vec3::ONE);
    assert!(a.intersects(&b));
    assert!(!a.intersects(&c));
}
