//! Scene module
//!
//! Pickable objects placing shared models in the world, and the
//! scene-wide closest-hit query.

mod scene;
mod scene_object;

pub use scene::Scene;
pub use scene_object::{ModelKey, SceneObject, SceneObjectKey};
