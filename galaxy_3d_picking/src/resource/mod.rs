//! Resource module
//!
//! Geometry owned by the picking core: meshes with their instances and
//! octree, and models grouping meshes.

mod vertex;
pub mod mesh;
pub mod model;

pub use vertex::Vertex;
pub use mesh::{Mesh, MeshDesc};
pub use model::Model;
