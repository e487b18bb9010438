//! Physics tick
//!
//! Advances the simulation by exactly one display frame. Velocities are in
//! pixels per tick, so there is no timestep parameter.

use super::collision::{fell_below_surface, first_brick_hit, paddle_contact, paddle_spin, wall_contact};
use super::input::InputTracker;
use super::state::{BrickStatus, GamePhase, GameState, Paddle};
use crate::consts::POINTS_PER_BRICK;

/// Something observable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball reflected off a side wall or the ceiling
    WallBounce,
    /// Ball redirected by the paddle
    PaddleHit,
    BrickDestroyed { row: usize, col: usize },
    /// Ball fell below the surface
    LifeLost { remaining: u8 },
    GameOver,
    GameWon,
}

/// Advance the game state by one tick, returning the events it produced.
///
/// Does nothing unless the session is running.
pub fn tick(state: &mut GameState, input: &InputTracker) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_running() {
        return events;
    }

    state.time_ticks += 1;

    move_paddle(&mut state.paddle, input);

    let ball = &mut state.ball;
    ball.pos += ball.vel;

    let walls = wall_contact(ball);
    if walls.side {
        ball.vel.x = -ball.vel.x;
    }
    if walls.ceiling {
        ball.vel.y = -ball.vel.y;
    }
    if walls.any() {
        events.push(GameEvent::WallBounce);
    }

    if paddle_contact(ball, &state.paddle) {
        ball.vel.x = paddle_spin(ball, &state.paddle);
        ball.vel.y = -ball.vel.y.abs();
        events.push(GameEvent::PaddleHit);
    }

    if fell_below_surface(ball) {
        state.lives = state.lives.saturating_sub(1);
        events.push(GameEvent::LifeLost {
            remaining: state.lives,
        });
        if state.lives == 0 {
            state.phase = GamePhase::Lost;
            events.push(GameEvent::GameOver);
            return events;
        }
        ball.respawn();
    }

    // Only the first overlapping brick is resolved; the rest wait a tick
    if let Some((row, col)) = first_brick_hit(&state.ball, &state.bricks) {
        state.ball.vel.y = -state.ball.vel.y;
        if let Some(brick) = state.bricks.get_mut(row, col) {
            brick.status = BrickStatus::Destroyed;
        }
        state.score += POINTS_PER_BRICK;
        events.push(GameEvent::BrickDestroyed { row, col });

        if state.bricks.all_destroyed() {
            state.phase = GamePhase::Won;
            events.push(GameEvent::GameWon);
        }
    }

    events
}

/// Keyboard moves first, then a recorded pointer position overrides it
fn move_paddle(paddle: &mut Paddle, input: &InputTracker) {
    if input.right_held {
        paddle.x = (paddle.x + paddle.speed).min(paddle.max_x());
    }
    if input.left_held {
        paddle.x = (paddle.x - paddle.speed).max(0.0);
    }
    if let Some(pointer_x) = input.pointer_x {
        paddle.center_on(pointer_x);
    }
    paddle.clamp_to_surface();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Ball;
    use glam::Vec2;
    use proptest::prelude::*;

    fn running() -> GameState {
        let mut state = GameState::new();
        state.start();
        state
    }

    fn place_ball(state: &mut GameState, x: f32, y: f32, dx: f32, dy: f32) {
        state.ball.pos = Vec2::new(x, y);
        state.ball.vel = Vec2::new(dx, dy);
    }

    #[test]
    fn test_not_started_is_noop() {
        let mut state = GameState::new();
        let before = state.clone();
        let input = InputTracker {
            left_held: true,
            right_held: false,
            pointer_x: Some(20.0),
        };
        for _ in 0..5 {
            assert!(tick(&mut state, &input).is_empty());
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_terminal_phases_are_noop() {
        for phase in [GamePhase::Lost, GamePhase::Won] {
            let mut state = running();
            state.phase = phase;
            let before = state.clone();
            tick(&mut state, &InputTracker::default());
            assert_eq!(state, before);
        }
    }

    #[test]
    fn test_linear_motion_ten_ticks() {
        let mut state = running();
        let input = InputTracker::default();
        for _ in 0..10 {
            assert!(tick(&mut state, &input).is_empty());
        }
        assert_eq!(state.ball.pos, Vec2::new(440.0, 260.0));
        assert_eq!(state.ball.vel, Vec2::new(4.0, -4.0));
        assert_eq!(state.time_ticks, 10);
    }

    #[test]
    fn test_side_wall_bounce() {
        let mut state = running();
        place_ball(&mut state, 795.0, 300.0, 4.0, -4.0);
        let events = tick(&mut state, &InputTracker::default());
        assert_eq!(events, vec![GameEvent::WallBounce]);
        assert_eq!(state.ball.vel, Vec2::new(-4.0, -4.0));

        place_ball(&mut state, 5.0, 300.0, -4.0, 4.0);
        tick(&mut state, &InputTracker::default());
        assert_eq!(state.ball.vel, Vec2::new(4.0, 4.0));
    }

    #[test]
    fn test_ceiling_bounce() {
        let mut state = running();
        place_ball(&mut state, 400.0, 10.0, 4.0, -4.0);
        tick(&mut state, &InputTracker::default());
        assert_eq!(state.ball.vel, Vec2::new(4.0, 4.0));
    }

    #[test]
    fn test_no_bounce_away_from_walls() {
        let mut state = running();
        place_ball(&mut state, 400.0, 300.0, -4.0, 4.0);
        tick(&mut state, &InputTracker::default());
        assert_eq!(state.ball.vel, Vec2::new(-4.0, 4.0));
    }

    #[test]
    fn test_paddle_spin_and_upward_bounce() {
        let mut state = running();
        place_ball(&mut state, 375.0, 550.0, 0.0, 4.0);
        let events = tick(&mut state, &InputTracker::default());
        assert_eq!(events, vec![GameEvent::PaddleHit]);
        assert_eq!(state.ball.vel, Vec2::new(-2.0, -4.0));
    }

    #[test]
    fn test_paddle_redirects_rising_ball() {
        let mut state = running();
        place_ball(&mut state, 397.0, 570.0, 3.0, -4.0);
        tick(&mut state, &InputTracker::default());
        assert_eq!(state.ball.vel, Vec2::new(0.0, -4.0));
    }

    #[test]
    fn test_miss_costs_a_life_and_respawns() {
        let mut state = running();
        // Bottom edge at 599, well clear of the paddle
        place_ball(&mut state, 100.0, 591.0, 4.0, 4.0);
        let events = tick(&mut state, &InputTracker::default());
        assert_eq!(events, vec![GameEvent::LifeLost { remaining: 2 }]);
        assert_eq!(state.lives, 2);
        assert_eq!(state.ball, Ball::default());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.bricks.alive_count(), 60);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut state = running();
        state.lives = 1;
        place_ball(&mut state, 100.0, 591.0, 4.0, 4.0);
        let events = tick(&mut state, &InputTracker::default());
        assert_eq!(
            events,
            vec![GameEvent::LifeLost { remaining: 0 }, GameEvent::GameOver]
        );
        assert_eq!(state.lives, 0);
        assert!(state.game_over());
        assert!(!state.game_won());

        // Frozen afterwards
        let before = state.clone();
        tick(&mut state, &InputTracker::default());
        assert_eq!(state, before);
    }

    #[test]
    fn test_keyboard_paddle_clamps() {
        let mut state = running();
        state.paddle.x = 696.0;
        let right = InputTracker {
            right_held: true,
            ..Default::default()
        };
        tick(&mut state, &right);
        assert_eq!(state.paddle.x, 700.0);

        state.paddle.x = 4.0;
        let left = InputTracker {
            left_held: true,
            ..Default::default()
        };
        tick(&mut state, &left);
        assert_eq!(state.paddle.x, 0.0);

        state.paddle.x = 300.0;
        tick(&mut state, &right);
        assert_eq!(state.paddle.x, 308.0);
    }

    #[test]
    fn test_pointer_overrides_keyboard() {
        let mut state = running();
        let input = InputTracker {
            left_held: false,
            right_held: true,
            pointer_x: Some(100.0),
        };
        tick(&mut state, &input);
        assert_eq!(state.paddle.x, 50.0);

        // Pointer at the very left edge still counts as recorded
        let input = InputTracker {
            pointer_x: Some(0.0),
            right_held: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.paddle.x, 0.0);
    }

    #[test]
    fn test_one_brick_per_tick() {
        let mut state = running();
        // After the move the ball straddles bricks (0,0) and (1,0)
        place_ball(&mut state, 50.0, 86.5, 0.0, -4.0);
        let events = tick(&mut state, &InputTracker::default());
        assert_eq!(events, vec![GameEvent::BrickDestroyed { row: 0, col: 0 }]);
        assert_eq!(state.score, 10);
        assert_eq!(state.ball.vel.y, 4.0);
        assert!(state.bricks.get(1, 0).unwrap().is_alive());
        assert_eq!(state.bricks.alive_count(), 59);
    }

    fn aim_at_brick(state: &mut GameState, row: usize, col: usize) {
        let brick = *state.bricks.get(row, col).unwrap();
        let center_x = brick.x + brick.width() / 2.0;
        let center_y = brick.y + brick.height() / 2.0;
        // One tick of travel lands the ball on the brick center
        place_ball(state, center_x, center_y + 4.0, 0.0, -4.0);
    }

    #[test]
    fn test_full_clear_wins_with_600() {
        let mut state = running();
        let input = InputTracker::default();
        let cells: Vec<(usize, usize)> = state.bricks.iter().map(|b| (b.row, b.col)).collect();

        for (i, &(row, col)) in cells.iter().enumerate() {
            assert!(state.is_running());
            let score_before = state.score;
            aim_at_brick(&mut state, row, col);
            let events = tick(&mut state, &input);

            assert_eq!(state.score, score_before + 10);
            assert_eq!(events[0], GameEvent::BrickDestroyed { row, col });
            if i + 1 < cells.len() {
                assert_eq!(events.len(), 1);
            }
        }

        assert_eq!(state.score, 600);
        assert!(state.bricks.all_destroyed());
        assert!(state.game_won());
        assert!(!state.game_over());
    }

    #[test]
    fn test_last_brick_wins_same_tick() {
        let mut state = running();
        for brick in state.bricks.iter_mut() {
            brick.status = BrickStatus::Destroyed;
        }
        state.bricks.get_mut(5, 9).unwrap().status = BrickStatus::Alive;
        state.score = 590;

        aim_at_brick(&mut state, 5, 9);
        let events = tick(&mut state, &InputTracker::default());
        assert_eq!(
            events,
            vec![GameEvent::BrickDestroyed { row: 5, col: 9 }, GameEvent::GameWon]
        );
        assert_eq!(state.score, 600);
        assert_eq!(state.phase, GamePhase::Won);
    }

    #[test]
    fn test_won_needs_every_brick() {
        let mut state = running();
        aim_at_brick(&mut state, 2, 3);
        tick(&mut state, &InputTracker::default());
        assert!(state.is_running());
        assert_eq!(state.bricks.alive_count(), 59);
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_on_surface(
            start_x in 0.0f32..=700.0,
            steps in prop::collection::vec(
                (any::<bool>(), any::<bool>(), prop::option::of(-300.0f32..1100.0)),
                1..60,
            ),
        ) {
            let mut state = running();
            state.paddle.x = start_x;
            for (left_held, right_held, pointer_x) in steps {
                let input = InputTracker { left_held, right_held, pointer_x };
                tick(&mut state, &input);
                prop_assert!(state.paddle.x >= 0.0);
                prop_assert!(state.paddle.x <= 800.0 - state.paddle.width);
            }
        }

        #[test]
        fn prop_lives_and_score_stay_consistent(
            x in 20.0f32..780.0,
            y in 220.0f32..540.0,
            dx in -6.0f32..6.0,
            dy in -6.0f32..6.0,
        ) {
            let mut state = running();
            place_ball(&mut state, x, y, dx, dy);
            let input = InputTracker::default();
            let mut last_score = 0;
            for _ in 0..2000 {
                tick(&mut state, &input);
                prop_assert!(state.lives <= 3);
                prop_assert!(state.score >= last_score);
                last_score = state.score;
                let destroyed = 60 - state.bricks.alive_count() as u32;
                prop_assert_eq!(state.score, destroyed * 10);
                prop_assert_eq!(state.lives == 0, state.game_over());
                prop_assert!(!(state.game_over() && state.game_won()));
                prop_assert_eq!(state.game_won(), state.bricks.all_destroyed());
            }
        }
    }
}
