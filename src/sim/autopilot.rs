//! Demo controller
//!
//! Plays the game by steering the pointer toward the ball. Used for the
//! attract/idle mode in the browser and the headless native run.

use super::input::InputTracker;
use super::state::{GamePhase, GameState};

/// How many ticks ahead to lead the ball
const LEAD_TICKS: f32 = 6.0;
/// Pixels of offset from paddle center, oscillating so rallies don't loop
const AIM_SWAY: f32 = 30.0;

/// Write steering input for the next tick. Returns true when the session is
/// waiting for the start key, so the caller can press it.
pub fn steer(state: &GameState, input: &mut InputTracker) -> bool {
    if state.phase == GamePhase::NotStarted {
        return true;
    }
    if !state.is_running() {
        return false;
    }

    let ball = &state.ball;
    // Only lead when the ball is coming down; otherwise shadow it
    let lead = if ball.vel.y > 0.0 { LEAD_TICKS } else { 0.0 };
    let time_factor = state.time_ticks as f32 * 0.02;
    let sway = time_factor.sin() * AIM_SWAY;

    input.release_keys();
    input.pointer_moved(ball.pos.x + ball.vel.x * lead + sway);
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick;

    #[test]
    fn test_requests_start() {
        let state = GameState::new();
        let mut input = InputTracker::new();
        assert!(steer(&state, &mut input));
        assert_eq!(input.pointer_x, None);
    }

    #[test]
    fn test_idle_in_terminal_phase() {
        let mut state = GameState::new();
        state.phase = GamePhase::Won;
        let mut input = InputTracker::new();
        assert!(!steer(&state, &mut input));
        assert_eq!(input.pointer_x, None);
    }

    #[test]
    fn test_tracks_ball() {
        let mut state = GameState::new();
        state.start();
        let mut input = InputTracker {
            left_held: true,
            ..Default::default()
        };
        steer(&state, &mut input);
        assert!(!input.left_held);
        // Rising ball at tick 0: no lead, no sway
        assert_eq!(input.pointer_x, Some(400.0));
    }

    #[test]
    fn test_scores_points_unattended() {
        let mut state = GameState::new();
        let mut input = InputTracker::new();
        for _ in 0..5000 {
            if steer(&state, &mut input) {
                state.start();
            }
            tick(&mut state, &input);
            if state.phase.is_terminal() {
                break;
            }
        }
        assert!(state.score > 0);
    }
}
