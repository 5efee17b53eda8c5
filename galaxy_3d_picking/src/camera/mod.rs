//! Camera module — low-level picking camera.
//!
//! The engine does NOT store or manage cameras. They are tools
//! provided by the engine, owned and driven by the caller.

mod camera;

pub use camera::{Camera, Viewport};
