/// Scene objects: placements of a model in the world.
///
/// An object binds a model to the transform that places it, plus a user
/// identity reported back by picking.

use slotmap::new_key_type;
use crate::transform::TransformKey;

// ===== SLOT MAP KEYS =====

new_key_type! {
    /// Stable key for a SceneObject within a Scene.
    ///
    /// Keys remain valid even after other objects are removed.
    /// A key becomes invalid only when its own object is removed.
    pub struct SceneObjectKey;
}

new_key_type! {
    /// Stable key for a Model registered in a Scene.
    pub struct ModelKey;
}

// ===== SCENE OBJECT =====

/// One pickable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneObject {
    /// Model drawn (and picked) for this object
    pub model: ModelKey,
    /// Model-to-world transform, resolved through a TransformProvider
    pub transform: TransformKey,
    /// User identity, copied into hit records
    pub uuid: u64,
}
