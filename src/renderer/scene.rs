//! Scene painting
//!
//! Reads the game state and issues canvas calls. Never mutates the state.

use super::canvas::Canvas;
use super::vertex::colors;
use crate::sim::{GameState, Rect};

/// Paint one frame: background, live bricks, paddle, ball
pub fn draw(state: &GameState, canvas: &mut impl Canvas) {
    canvas.clear(colors::BACKGROUND);

    for brick in state.bricks.iter().filter(|b| b.is_alive()) {
        let r = Rect::new(brick.x, brick.y, brick.width(), brick.height());
        canvas.fill_rect(r, colors::brick_row(brick.row));
        canvas.stroke_rect(r, colors::BRICK_OUTLINE_WIDTH, colors::BRICK_OUTLINE);
    }

    let paddle = &state.paddle;
    canvas.fill_rect(
        Rect::new(paddle.x, paddle.y, paddle.width, paddle.height),
        colors::PADDLE,
    );

    canvas.fill_circle(state.ball.pos, state.ball.radius, colors::BALL);
}
