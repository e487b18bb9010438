//! Rendering module
//!
//! The scene is painted through the [`Canvas`] trait into a triangle batch,
//! which the WebGPU pipeline uploads and draws.

pub mod canvas;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use canvas::{Canvas, Color};
pub use pipeline::{RenderError, RenderState};
pub use shapes::VertexBatch;
