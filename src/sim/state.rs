//! Game state and core simulation types
//!
//! Everything the physics tick reads or mutates lives in [`GameState`], which
//! is owned by the loop driver and handed to the other steps by reference.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start key; physics is frozen
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Lives exhausted (terminal until reset)
    Lost,
    /// Every brick destroyed (terminal until reset)
    Won,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::NotStarted => "not-started",
            GamePhase::Running => "running",
            GamePhase::Lost => "lost",
            GamePhase::Won => "won",
        }
    }

    /// Lost and Won end the session until an explicit reset
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Lost | GamePhase::Won)
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels per tick for keyboard movement
    pub speed: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: SURFACE_WIDTH / 2.0 - PADDLE_WIDTH / 2.0,
            y: SURFACE_HEIGHT - PADDLE_BOTTOM_GAP,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
        }
    }
}

impl Paddle {
    /// Largest allowed left edge
    pub fn max_x(&self) -> f32 {
        SURFACE_WIDTH - self.width
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Keep the paddle fully on the surface
    pub fn clamp_to_surface(&mut self) {
        self.x = self.x.clamp(0.0, self.max_x());
    }

    /// Center the paddle on a pointer x coordinate
    pub fn center_on(&mut self, pointer_x: f32) {
        self.x = pointer_x - self.width / 2.0;
        self.clamp_to_surface();
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(SURFACE_WIDTH / 2.0, SURFACE_HEIGHT / 2.0),
            vel: Vec2::new(BALL_START_DX, BALL_START_DY),
            radius: BALL_RADIUS,
        }
    }
}

impl Ball {
    /// Put the ball back at the surface center with the serve velocity
    pub fn respawn(&mut self) {
        *self = Self {
            radius: self.radius,
            ..Self::default()
        };
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// Whether a brick is still in play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickStatus {
    #[default]
    Alive,
    Destroyed,
}

/// A single brick. Destroyed bricks stay in the grid so indices never shift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub x: f32,
    pub y: f32,
    /// Row index, also selects the brick color
    pub row: usize,
    pub col: usize,
    pub status: BrickStatus,
}

impl Brick {
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            x: col as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_OFFSET_LEFT,
            y: row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_OFFSET_TOP,
            row,
            col,
            status: BrickStatus::Alive,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.status == BrickStatus::Alive
    }

    pub fn width(&self) -> f32 {
        BRICK_WIDTH
    }

    pub fn height(&self) -> f32 {
        BRICK_HEIGHT
    }
}

/// Fixed rows x columns grid of bricks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickGrid {
    rows: [[Brick; BRICK_COLS]; BRICK_ROWS],
}

impl Default for BrickGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl BrickGrid {
    /// Fresh grid with every brick alive
    pub fn new() -> Self {
        Self {
            rows: std::array::from_fn(|row| std::array::from_fn(|col| Brick::new(row, col))),
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        self.rows.get(row)?.get(col)
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Brick> {
        self.rows.get_mut(row)?.get_mut(col)
    }

    /// Row-major iteration (row 0 first, left to right)
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.rows.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.rows.iter_mut().flatten()
    }

    pub fn len(&self) -> usize {
        BRICK_ROWS * BRICK_COLS
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn alive_count(&self) -> usize {
        self.iter().filter(|b| b.is_alive()).count()
    }

    pub fn all_destroyed(&self) -> bool {
        self.iter().all(|b| !b.is_alive())
    }
}

/// Complete session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    /// Score (never decreases within a session)
    pub score: u32,
    /// Remaining lives
    pub lives: u8,
    /// Player paddle
    pub paddle: Paddle,
    /// The ball
    pub ball: Ball,
    /// Brick grid
    pub bricks: BrickGrid,
    /// Physics ticks advanced this session
    pub time_ticks: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Create a new session waiting for the start key
    pub fn new() -> Self {
        Self {
            phase: GamePhase::NotStarted,
            score: 0,
            lives: STARTING_LIVES,
            paddle: Paddle::default(),
            ball: Ball::default(),
            bricks: BrickGrid::new(),
            time_ticks: 0,
        }
    }

    /// Rebuild every entity and clear all flags
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Begin play. Only the first call in a session has any effect.
    pub fn start(&mut self) -> bool {
        if self.phase == GamePhase::NotStarted {
            self.phase = GamePhase::Running;
            true
        } else {
            false
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn game_started(&self) -> bool {
        self.phase != GamePhase::NotStarted
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::Lost
    }

    pub fn game_won(&self) -> bool {
        self.phase == GamePhase::Won
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let state = GameState::new();
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.paddle.x, 350.0);
        assert_eq!(state.paddle.y, 560.0);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.vel, Vec2::new(4.0, -4.0));
        assert_eq!(state.bricks.alive_count(), 60);
    }

    #[test]
    fn test_brick_layout() {
        let grid = BrickGrid::new();
        let first = grid.get(0, 0).unwrap();
        assert_eq!((first.x, first.y), (12.5, 60.0));

        let last = grid.get(5, 9).unwrap();
        assert_eq!((last.x, last.y), (9.0 * 80.0 + 12.5, 5.0 * 25.0 + 60.0));
        // The last column overhangs the right edge by 7.5
        assert_eq!(last.x + last.width(), 807.5);

        assert!(grid.get(6, 0).is_none());
        assert!(grid.get(0, 10).is_none());
    }

    #[test]
    fn test_grid_iterates_row_major() {
        let grid = BrickGrid::new();
        let order: Vec<(usize, usize)> = grid.iter().map(|b| (b.row, b.col)).take(12).collect();
        assert_eq!(order[0], (0, 0));
        assert_eq!(order[9], (0, 9));
        assert_eq!(order[10], (1, 0));
        assert_eq!(order[11], (1, 1));
    }

    #[test]
    fn test_start_only_once() {
        let mut state = GameState::new();
        assert!(state.start());
        assert!(state.is_running());
        assert!(!state.start());

        state.phase = GamePhase::Lost;
        assert!(!state.start());
        assert_eq!(state.phase, GamePhase::Lost);
    }

    #[test]
    fn test_derived_flags() {
        let mut state = GameState::new();
        assert!(!state.game_started());

        state.phase = GamePhase::Won;
        assert!(state.game_started());
        assert!(state.game_won());
        assert!(!state.game_over());
        assert!(state.phase.is_terminal());
    }

    #[test]
    fn test_paddle_center_on_clamps() {
        let mut paddle = Paddle::default();
        paddle.center_on(10.0);
        assert_eq!(paddle.x, 0.0);
        paddle.center_on(790.0);
        assert_eq!(paddle.x, 700.0);
        paddle.center_on(400.0);
        assert_eq!(paddle.x, 350.0);
    }

    #[test]
    fn test_ball_respawn() {
        let mut ball = Ball {
            pos: Vec2::new(12.0, 700.0),
            vel: Vec2::new(-3.0, 4.0),
            radius: BALL_RADIUS,
        };
        ball.respawn();
        assert_eq!(ball, Ball::default());
    }
}
