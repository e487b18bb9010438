//! Input tracking
//!
//! Captures keyboard and pointer state between ticks. The tracker only
//! records; the physics tick reads it at the start of the next frame.

use serde::{Deserialize, Serialize};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    /// Space: begins the session
    Start,
    /// Toggle the demo controller
    Autopilot,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(Key::Left),
            "ArrowRight" | "Right" => Some(Key::Right),
            " " => Some(Key::Start),
            "i" | "I" => Some(Key::Autopilot),
            _ => None,
        }
    }

    /// Keys whose browser default (page scroll) must be suppressed. Letter
    /// keys pass through so text fields on the host page keep working.
    pub fn blocks_page_default(self) -> bool {
        matches!(self, Key::Left | Key::Right | Key::Start)
    }
}

/// Current key and pointer state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputTracker {
    pub left_held: bool,
    pub right_held: bool,
    /// Last pointer x over the surface, in logical units. Once set it is
    /// never cleared for the rest of the session.
    pub pointer_x: Option<f32>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.left_held = true,
            Key::Right => self.right_held = true,
            Key::Start | Key::Autopilot => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.left_held = false,
            Key::Right => self.right_held = false,
            Key::Start | Key::Autopilot => {}
        }
    }

    pub fn pointer_moved(&mut self, x: f32) {
        self.pointer_x = Some(x);
    }

    /// Drop held keys (window lost focus, session reset)
    pub fn release_keys(&mut self) {
        self.left_held = false;
        self.right_held = false;
    }
}
