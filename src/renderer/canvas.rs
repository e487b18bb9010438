//! Drawing surface abstraction
//!
//! The scene only needs three primitives. Anything that can fill rectangles,
//! stroke rectangles and fill circles in logical surface coordinates can be
//! drawn to.

use glam::Vec2;

use crate::sim::Rect;

/// Straight RGBA, each channel in 0..=1
pub type Color = [f32; 4];

pub trait Canvas {
    /// Fill the whole surface with a solid color
    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Outline centered on the rectangle's edges
    fn stroke_rect(&mut self, rect: Rect, line_width: f32, color: Color);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
}
