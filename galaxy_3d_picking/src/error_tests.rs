//! Unit tests for error.rs
//!
//! Covers Display output, trait impls, and the logging error macros.

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_empty_geometry_display() {
    let err = Error::EmptyGeometry("mesh 'cube' has no triangles".to_string());
    let display = format!("{}", err);
    assert!(display.starts_with("Empty geometry"));
    assert!(display.contains("mesh 'cube'"));
}

#[test]
fn test_invalid_geometry_display() {
    let err = Error::InvalidGeometry("triangle 3 references vertex 40".to_string());
    assert_eq!(
        format!("{}", err),
        "Invalid geometry: triangle 3 references vertex 40"
    );
}

#[test]
fn test_invalid_key_display() {
    let err = Error::InvalidKey("transform not found".to_string());
    assert!(format!("{}", err).contains("Invalid key"));
}

#[test]
fn test_invalid_state_display() {
    let err = Error::InvalidState("octree not built".to_string());
    assert!(format!("{}", err).contains("Invalid state"));
    assert!(format!("{}", err).contains("octree not built"));
}

#[test]
fn test_no_intersection_display() {
    let err = Error::NoIntersection("ray parallel to dragging plane".to_string());
    assert!(format!("{}", err).starts_with("No intersection"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::InvalidState("idle".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug_names_variant() {
    let debug = format!("{:?}", Error::EmptyGeometry("x".to_string()));
    assert!(debug.contains("EmptyGeometry"));

    let debug = format!("{:?}", Error::NoIntersection("x".to_string()));
    assert!(debug.contains("NoIntersection"));
}

#[test]
fn test_error_clone_and_eq() {
    let err = Error::InvalidKey("model".to_string());
    assert_eq!(err.clone(), err);
    assert_ne!(err, Error::InvalidKey("object".to_string()));
}

// ============================================================================
// MACROS
// ============================================================================

#[test]
fn test_engine_err_builds_requested_variant() {
    let err = crate::engine_err!("galaxy3d::test", InvalidGeometry, "index {} out of range", 7);
    assert_eq!(err, Error::InvalidGeometry("index 7 out of range".to_string()));
}

#[test]
fn test_engine_bail_returns_early() {
    fn fails(flag: bool) -> Result<u32> {
        if flag {
            crate::engine_bail!("galaxy3d::test", InvalidState, "flag was {}", flag);
        }
        Ok(1)
    }

    assert_eq!(fails(false), Ok(1));
    assert_eq!(fails(true), Err(Error::InvalidState("flag was true".to_string())));
}

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<i32> {
        Err(Error::EmptyGeometry("none".to_string()))
    }

    fn outer() -> Result<i32> {
        inner()?;
        Ok(42)
    }

    assert!(matches!(outer(), Err(Error::EmptyGeometry(_))));
}
