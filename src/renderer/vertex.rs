//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Byte stride of one vertex in an upload buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();

    /// Raw bytes for a vertex buffer upload
    pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}

/// Colors for game elements
pub mod colors {
    const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub const SAND: [f32; 4] = rgb(239, 226, 200);
    pub const FOOD: [f32; 4] = rgb(255, 0, 0);
    pub const SPRITE: [f32; 4] = rgb(0, 0, 255);
    pub const PULSE: [f32; 4] = rgb(255, 255, 255);
    pub const SCORE_TEXT: [f32; 4] = rgb(0, 0, 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_bytes() {
        let verts = [Vertex::new(1.0, 2.0, colors::FOOD); 3];
        assert_eq!(Vertex::STRIDE, 24);
        assert_eq!(Vertex::as_bytes(&verts).len(), 3 * Vertex::STRIDE);
    }

    #[test]
    fn test_palette() {
        assert_eq!(colors::FOOD, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(colors::SPRITE, [0.0, 0.0, 1.0, 1.0]);
    }
}
