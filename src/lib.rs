//! Brick Breaker - A classic paddle-and-ball arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entities, input tracking, physics tick)
//! - `renderer`: Drawing surface abstraction and WebGPU pipeline
//! - `driver`: Frame loop, lifecycle and observable snapshot
//! - `platform`: Browser bootstrap and error types
//! - `settings`: Runtime configuration from the page query string

pub mod driver;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{GameLoop, Snapshot};
pub use settings::{LogLevel, Settings};

/// Game configuration constants
pub mod consts {
    /// Logical drawing surface size
    pub const SURFACE_WIDTH: f32 = 800.0;
    pub const SURFACE_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    /// Distance from the paddle's top edge to the bottom of the surface
    pub const PADDLE_BOTTOM_GAP: f32 = 40.0;
    /// Pixels per tick while a direction key is held
    pub const PADDLE_SPEED: f32 = 8.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_START_DX: f32 = 4.0;
    pub const BALL_START_DY: f32 = -4.0;
    /// Horizontal speed at the paddle edges (center hit gives zero)
    pub const PADDLE_SPIN: f32 = 8.0;

    /// Brick grid layout
    pub const BRICK_ROWS: usize = 6;
    pub const BRICK_COLS: usize = 10;
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 5.0;
    pub const BRICK_OFFSET_TOP: f32 = 60.0;
    pub const BRICK_OFFSET_LEFT: f32 = 12.5;

    /// Scoring and lives
    pub const POINTS_PER_BRICK: u32 = 10;
    pub const STARTING_LIVES: u8 = 3;
}
