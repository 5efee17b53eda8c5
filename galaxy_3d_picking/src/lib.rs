/*!
# Galaxy 3D Picking

Spatial indexing and ray intersection for the Galaxy 3D engine.

This crate finds what a ray hits, from a single primitive up to a whole
scene, and uses it to pick and drag objects with the mouse. It is pure CPU
code and holds no GPU state.

## Architecture

- **geometry**: Rays, boxes, primitives and closest-hit intersection tests
- **octree**: Static triangle octree built once per mesh
- **resource**: Meshes (geometry + instances + octree) and models
- **scene**: Pickable objects placing models in the world
- **transform**: Object transforms with cached inverses
- **camera**: Passive camera producing picking rays
- **interaction**: Dragging picked objects on a camera-facing plane

Errors and logs go through the engine's own `Error` type and logger.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod geometry;
pub mod octree;
pub mod resource;
pub mod scene;
pub mod transform;
pub mod camera;
pub mod interaction;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Geometry sub-module
    pub mod geometry {
        pub use crate::geometry::*;
    }

    // Octree sub-module
    pub mod octree {
        pub use crate::octree::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // Transform sub-module
    pub mod transform {
        pub use crate::transform::*;
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Interaction sub-module
    pub mod interaction {
        pub use crate::interaction::*;
    }
}

// Re-export math library at crate root
pub use glam;
