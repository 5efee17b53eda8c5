/// Vertex layout shared with asset buffers.

use glam::Vec3;

/// Interleaved vertex as produced by the asset loader.
///
/// `#[repr(C)]` and `Pod`, so a raw vertex buffer can be read directly
/// (see [`Mesh::from_raw`](super::Mesh::from_raw)). Only `position` takes
/// part in intersection.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    /// Vertex with only a position; normal and uv are zero.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position: position.to_array(),
            ..Self::default()
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}
