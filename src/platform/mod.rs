//! Platform abstraction layer
//!
//! Handles browser specifics:
//! - Canvas lookup and surface creation
//! - Input event listeners (attached on start, detached on stop)
//! - Animation frame scheduling

use std::cell::{Cell, RefCell};

use thiserror::Error;

use crate::consts::{SURFACE_HEIGHT, SURFACE_WIDTH};
use crate::renderer::RenderError;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Startup failures. The game loop is never scheduled when one occurs.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("no global `window`")]
    NoWindow,
    #[error("no `document` on window")]
    NoDocument,
    #[error("canvas element #{0} not found")]
    MissingCanvas(String),
    #[error("element #{0} is not a canvas")]
    NotACanvas(String),
    #[error("drawing surface unavailable: {0}")]
    Render(#[from] RenderError),
    #[error("javascript error: {0}")]
    Js(String),
}

/// Map a pointer offset inside the displayed canvas to logical surface x.
/// `display_width` is the canvas's on-page width in CSS pixels.
pub fn pointer_to_surface_x(offset_x: f32, display_width: f32) -> f32 {
    if display_width > 0.0 {
        offset_x * SURFACE_WIDTH / display_width
    } else {
        offset_x
    }
}

/// Backing-store size for the logical surface at a device pixel ratio
pub fn backing_size(device_pixel_ratio: f64) -> (u32, u32) {
    let dpr = if device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    (
        (SURFACE_WIDTH as f64 * dpr).round() as u32,
        (SURFACE_HEIGHT as f64 * dpr).round() as u32,
    )
}

/// Holds the animation-frame callback and the id of the pending request.
/// The frame callback refers back to the slot weakly, so cancelling is the
/// only thing keeping it (and what it captured) alive or not.
pub struct FrameSlot<C> {
    callback: RefCell<Option<C>>,
    frame_id: Cell<Option<i32>>,
    running: Cell<bool>,
}

impl<C> Default for FrameSlot<C> {
    fn default() -> Self {
        Self {
            callback: RefCell::new(None),
            frame_id: Cell::new(None),
            running: Cell::new(true),
        }
    }
}

impl<C> FrameSlot<C> {
    pub fn install(&self, callback: C) {
        *self.callback.borrow_mut() = Some(callback);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn pending_frame(&self) -> Option<i32> {
        self.frame_id.get()
    }

    pub fn frame_requested(&self, id: i32) {
        self.frame_id.set(Some(id));
    }

    pub fn frame_fired(&self) {
        self.frame_id.set(None);
    }

    /// Stop scheduling without releasing the callback
    pub fn halt(&self) {
        self.running.set(false);
    }

    pub fn with_callback<R>(&self, f: impl FnOnce(&C) -> R) -> Option<R> {
        self.callback.borrow().as_ref().map(f)
    }

    /// Stop, drop the callback, and return the request id still to cancel.
    /// Must not be called from inside the callback itself.
    pub fn cancel(&self) -> Option<i32> {
        self.running.set(false);
        let callback = self.callback.borrow_mut().take();
        drop(callback);
        self.frame_id.take()
    }
}
