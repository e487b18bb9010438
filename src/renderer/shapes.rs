//! Shape tessellation for 2D primitives
//!
//! Turns canvas calls into triangle lists the pipeline can upload as-is.

use glam::Vec2;
use std::f32::consts::PI;

use super::canvas::{Canvas, Color};
use super::vertex::Vertex;
use crate::sim::Rect;

/// Segments used for every circle
pub const CIRCLE_SEGMENTS: u32 = 24;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(r: Rect, color: Color) -> [Vertex; 6] {
    let (x0, y0, x1, y1) = (r.x, r.y, r.right(), r.bottom());
    [
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate vertices for a rectangle outline as four bands centered on the
/// edges (matches how 2D canvases stroke)
pub fn rect_outline(r: Rect, line_width: f32, color: Color) -> Vec<Vertex> {
    let half = line_width / 2.0;
    let outer_w = r.w + line_width;
    let bands = [
        // Top and bottom span the corners
        Rect::new(r.x - half, r.y - half, outer_w, line_width),
        Rect::new(r.x - half, r.bottom() - half, outer_w, line_width),
        // Left and right fill between them
        Rect::new(r.x - half, r.y + half, line_width, r.h - line_width),
        Rect::new(r.right() - half, r.y + half, line_width, r.h - line_width),
    ];

    let mut vertices = Vec::with_capacity(bands.len() * 6);
    for band in bands {
        vertices.extend_from_slice(&rect(band, color));
    }
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Triangle list for one frame, in logical surface coordinates
#[derive(Debug, Clone, Default)]
pub struct VertexBatch {
    pub clear_color: Color,
    pub vertices: Vec<Vertex>,
}

impl VertexBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

impl Canvas for VertexBatch {
    fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.vertices.clear();
    }

    fn fill_rect(&mut self, r: Rect, color: Color) {
        self.vertices.extend_from_slice(&rect(r, color));
    }

    fn stroke_rect(&mut self, r: Rect, line_width: f32, color: Color) {
        self.vertices.extend(rect_outline(r, line_width, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.vertices
            .extend(circle(center, radius, color, CIRCLE_SEGMENTS));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Color = [1.0; 4];

    #[test]
    fn test_rect_corners() {
        let verts = rect(Rect::new(10.0, 20.0, 30.0, 40.0), WHITE);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_outline_straddles_edges() {
        let verts = rect_outline(Rect::new(10.0, 10.0, 75.0, 20.0), 2.0, WHITE);
        assert_eq!(verts.len(), 24);
        let min_x = verts.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        let max_y = verts.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert_eq!(min_x, 9.0);
        assert_eq!(max_y, 31.0);
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let center = Vec2::new(100.0, 100.0);
        let verts = circle(center, 8.0, WHITE, CIRCLE_SEGMENTS);
        assert_eq!(verts.len(), (CIRCLE_SEGMENTS * 3) as usize);
        for v in verts {
            let d = Vec2::from(v.position).distance(center);
            assert!(d <= 8.0 + 1e-4);
        }
    }

    #[test]
    fn test_batch_clear_resets() {
        let mut batch = VertexBatch::new();
        batch.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), WHITE);
        assert_eq!(batch.triangle_count(), 2);
        batch.clear([0.0, 0.0, 0.0, 1.0]);
        assert_eq!(batch.triangle_count(), 0);
        assert_eq!(batch.clear_color, [0.0, 0.0, 0.0, 1.0]);
    }
}
