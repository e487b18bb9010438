//! Collision detection for axis-aligned geometry
//!
//! All tests are discrete overlap checks against the ball's bounding square.
//! A fast ball can step over a thin brick in one tick; that is accepted.

use serde::{Deserialize, Serialize};

use super::state::{Ball, BrickGrid, Paddle};
use crate::consts::{PADDLE_SPIN, SURFACE_HEIGHT, SURFACE_WIDTH};

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap: rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right() > other.x
            && self.x < other.right()
            && self.bottom() > other.y
            && self.y < other.bottom()
    }
}

/// The ball's bounding square
pub fn ball_bounds(ball: &Ball) -> Rect {
    let d = ball.radius * 2.0;
    Rect::new(ball.left(), ball.top(), d, d)
}

/// Which surface walls the ball is past this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    /// Left or right wall
    pub side: bool,
    /// Top wall
    pub ceiling: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.side || self.ceiling
    }
}

/// Check the ball against the side walls and ceiling. The floor is a miss,
/// not a bounce, see [`fell_below_surface`].
pub fn wall_contact(ball: &Ball) -> WallContact {
    WallContact {
        side: ball.right() > SURFACE_WIDTH || ball.left() < 0.0,
        ceiling: ball.top() < 0.0,
    }
}

pub fn fell_below_surface(ball: &Ball) -> bool {
    ball.bottom() > SURFACE_HEIGHT
}

/// Ball bottom is past the paddle's top edge and its center is strictly
/// between the paddle's sides. Vertical direction is not considered.
pub fn paddle_contact(ball: &Ball, paddle: &Paddle) -> bool {
    ball.bottom() > paddle.y && ball.pos.x > paddle.x && ball.pos.x < paddle.right()
}

/// Horizontal velocity imparted by a paddle hit: 0 at the center, up to
/// +/- PADDLE_SPIN / 2 at the edges.
pub fn paddle_spin(ball: &Ball, paddle: &Paddle) -> f32 {
    let hit_pos = (ball.pos.x - paddle.x) / paddle.width;
    (hit_pos - 0.5) * PADDLE_SPIN
}

/// First alive brick, in row-major order, overlapping the ball
pub fn first_brick_hit(ball: &Ball, bricks: &BrickGrid) -> Option<(usize, usize)> {
    let bounds = ball_bounds(ball);
    bricks
        .iter()
        .filter(|brick| brick.is_alive())
        .find(|brick| bounds.overlaps(&Rect::new(brick.x, brick.y, brick.width(), brick.height())))
        .map(|brick| (brick.row, brick.col))
}
