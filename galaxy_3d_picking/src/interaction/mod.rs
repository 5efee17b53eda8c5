//! Interaction module
//!
//! Mouse-driven manipulation of picked objects.

mod dragger;

pub use dragger::{DragController, Dragger};
