//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Set the alpha of a color
#[inline]
pub const fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// Colors for game elements
pub mod colors {
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const MAGENTA: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
    pub const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const CYAN: [f32; 4] = [0.0, 1.0, 1.0, 1.0];

    pub const GROUND: [f32; 4] = [0.08, 0.04, 0.16, 1.0];
    pub const GROUND_EDGE: [f32; 4] = [1.0, 0.16, 0.43, 1.0]; // Neon rim on the run surface
    pub const TRAP: [f32; 4] = [1.0, 0.16, 0.43, 1.0];
    pub const TRAP_TALL: [f32; 4] = [0.85, 0.1, 0.55, 1.0];
    pub const POWERUP: [f32; 4] = [1.0, 0.95, 0.3, 1.0];
    pub const GOAL: [f32; 4] = [0.3, 1.0, 0.7, 1.0];

    pub const PLAYER_HAIR: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
    pub const PLAYER_HAIR_CHARGED: [f32; 4] = [1.0, 1.0, 0.65, 1.0];
    pub const PLAYER_SKIN: [f32; 4] = [1.0, 0.8, 0.66, 1.0];
    pub const PLAYER_CLOTHES: [f32; 4] = [1.0, 0.16, 0.43, 1.0];
    pub const PLAYER_TIGHTS: [f32; 4] = [0.07, 0.07, 0.07, 1.0];
}

/// Resolve a simulation palette index to a drawable color
pub fn particle_color(index: u32) -> [f32; 4] {
    use crate::sim::particles::{COLOR_CYAN, COLOR_MAGENTA, COLOR_WHITE, COLOR_YELLOW};
    match index {
        COLOR_WHITE => colors::WHITE,
        COLOR_MAGENTA => colors::MAGENTA,
        COLOR_YELLOW => colors::YELLOW,
        COLOR_CYAN => colors::CYAN,
        _ => colors::WHITE,
    }
}
