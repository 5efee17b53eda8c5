//! Error types for the Galaxy3D picking core
//!
//! Geometric misses are never errors: intersection tests report them through
//! their boolean return. This module covers genuine precondition violations
//! (empty meshes, unknown keys, queries on unbuilt structures, drag misuse).

use std::fmt;

/// Result type for Galaxy3D picking operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D picking errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Spatial index requested over geometry with no triangles
    EmptyGeometry(String),

    /// Malformed geometry (out-of-range index, misaligned raw buffer, etc.)
    InvalidGeometry(String),

    /// Unknown transform, model or scene object key
    InvalidKey(String),

    /// Operation called in the wrong lifecycle state
    InvalidState(String),

    /// A ray that was required to hit something did not
    NoIntersection(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyGeometry(msg) => write!(f, "Empty geometry: {}", msg),
            Error::InvalidGeometry(msg) => write!(f, "Invalid geometry: {}", msg),
            Error::InvalidKey(msg) => write!(f, "Invalid key: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Error::NoIntersection(msg) => write!(f, "No intersection: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an [`Error`] of the given kind and log it at ERROR severity.
///
/// # Example
///
/// ```no_run
/// # use galaxy_3d_picking::engine_err;
/// let err = engine_err!("galaxy3d::Mesh", InvalidGeometry, "index {} out of range", 12);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $kind:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::galaxy3d::Error::$kind(message)
    }};
}

/// Log an error and return it from the enclosing function.
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $kind:ident, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $kind, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
