//! Vertex types for 3D rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Simple 3D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y, z],
            color,
        }
    }

    pub fn at(pos: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: pos.to_array(),
            color,
        }
    }

    pub fn pos(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY_TOP: [f32; 4] = [0.2, 0.4, 0.8, 1.0];
    pub const SKY_BOTTOM: [f32; 4] = [0.1, 0.2, 0.4, 1.0];
    pub const GROUND: [f32; 4] = [0.0, 0.5, 0.0, 1.0];
    pub const HILL: [f32; 4] = [0.0, 0.4, 0.0, 1.0];
    pub const TRUNK: [f32; 4] = [0.5, 0.3, 0.0, 1.0];
    pub const FOLIAGE: [f32; 4] = [0.0, 0.6, 0.0, 1.0];
    pub const CRAFT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const CRAFT_TRIM: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const ENEMY: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const FIGHTER_HULL: [f32; 4] = [0.3, 0.3, 0.3, 1.0];
    pub const FIGHTER_WINDOW: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const BULLET: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const LASER: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const POWER_UP: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const PARTICLE: [f32; 4] = [1.0, 0.5, 0.0, 1.0];
}
