//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick per display frame, no wall-clock time
//! - Row-major brick iteration
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{Rect, WallContact};
pub use input::{InputTracker, Key};
pub use state::{Ball, Brick, BrickGrid, BrickStatus, GamePhase, GameState, Paddle};
pub use tick::{GameEvent, tick};
