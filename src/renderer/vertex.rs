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
    /// Opaque color from a 0xRRGGBB literal
    pub const fn rgb(hex: u32) -> [f32; 4] {
        [
            ((hex >> 16) & 0xFF) as f32 / 255.0,
            ((hex >> 8) & 0xFF) as f32 / 255.0,
            (hex & 0xFF) as f32 / 255.0,
            1.0,
        ]
    }

    pub const BACKGROUND: [f32; 4] = rgb(0x000000);
    pub const PADDLE: [f32; 4] = rgb(0xFFFFFF);
    pub const BALL: [f32; 4] = rgb(0xFFFFFF);
    pub const BRICK_OUTLINE: [f32; 4] = rgb(0x000000);
    pub const BRICK_OUTLINE_WIDTH: f32 = 2.0;

    /// One color per brick row, top to bottom
    pub const BRICK_ROWS: [[f32; 4]; 6] = [
        rgb(0xFF6B6B), // Red
        rgb(0xFF8C42), // Orange
        rgb(0xFFD93D), // Yellow
        rgb(0x6BCF7F), // Green
        rgb(0x4D96FF), // Blue
        rgb(0x9B59B6), // Purple
    ];

    /// Row color, wrapping if the grid ever has more rows than the palette
    pub fn brick_row(row: usize) -> [f32; 4] {
        BRICK_ROWS[row % BRICK_ROWS.len()]
    }
}
