//! Vertex types for 2D rendering
//!
//! Scene vertices carry positions in game pixels (origin top-left, y down).
//! `RenderState::render` maps them to clip space before upload.

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

/// Colors for game elements
pub mod colors {
    pub const PLAYER: [f32; 4] = [0.3, 0.85, 1.0, 1.0];
    pub const PLAYER_COCKPIT: [f32; 4] = [0.9, 0.95, 1.0, 1.0];
    pub const INVADER: [f32; 4] = [0.75, 0.35, 1.0, 1.0];
    pub const INVADER_EYES: [f32; 4] = [0.05, 0.0, 0.1, 1.0];
    pub const PLAYER_BULLET: [f32; 4] = [0.0, 1.0, 0.0, 1.0]; // #0f0
    pub const INVADER_BULLET: [f32; 4] = [1.0, 0.0, 0.0, 1.0]; // #f00
    pub const BARRICADE_FULL: [f32; 4] = [0.2, 0.8, 0.6, 1.0]; // #3c9
    pub const BARRICADE_DAMAGED: [f32; 4] = [1.0, 0.6, 0.0, 1.0]; // #f90
    pub const BARRICADE_CRITICAL: [f32; 4] = [1.0, 0.0, 0.0, 1.0]; // #f00
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}
