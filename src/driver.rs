//! Loop driver
//!
//! Owns the game state and input tracker, runs one paint + physics step per
//! display refresh and exposes the observable snapshot. Platform code only
//! schedules frames and forwards input here.

use serde::Serialize;

use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, InputTracker, Key, autopilot, tick};

/// State visible to the presentation layer after each frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub score: u32,
    pub lives: u8,
    pub game_started: bool,
    pub game_over: bool,
    pub game_won: bool,
    pub phase: &'static str,
    /// Only present when FPS display is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<u32>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Data attributes written onto the canvas after each frame. The JSON
    /// entry is left out if encoding fails.
    pub fn bridge_attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![
            ("data-score", self.score.to_string()),
            ("data-lives", self.lives.to_string()),
            ("data-phase", self.phase.to_string()),
        ];
        match self.to_json() {
            Ok(json) => attrs.push(("data-snapshot", json)),
            Err(e) => log::warn!("Snapshot encode failed: {}", e),
        }
        attrs
    }
}

/// Rolling frame-rate estimate over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    /// Record a frame timestamp in milliseconds
    pub fn record(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // The slot we will overwrite next holds the oldest sample
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time_ms - oldest_time;
            if elapsed > 0.0 {
                let frames = (self.frame_times.len() - 1) as f64;
                self.fps = (frames * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Game session plus the input that steers it
pub struct GameLoop {
    state: GameState,
    input: InputTracker,
    settings: Settings,
    autopilot: bool,
    fps: FpsCounter,
    last_phase: GamePhase,
}

impl GameLoop {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: GameState::new(),
            input: InputTracker::new(),
            autopilot: settings.autopilot,
            settings,
            fps: FpsCounter::default(),
            last_phase: GamePhase::NotStarted,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Start => {
                if self.state.start() {
                    log::info!("Game started");
                }
            }
            Key::Autopilot => {
                self.autopilot = !self.autopilot;
                log::info!("Autopilot: {}", self.autopilot);
            }
            Key::Left | Key::Right => self.input.key_down(key),
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    /// Pointer x in logical surface units
    pub fn pointer_moved(&mut self, x: f32) {
        if self.settings.pointer_control {
            self.input.pointer_moved(x);
        }
    }

    /// Window lost focus: keys released elsewhere never reach us
    pub fn focus_lost(&mut self) {
        self.input.release_keys();
    }

    /// One display refresh: paint the current state, then advance physics
    pub fn frame<R>(&mut self, time_ms: f64, render: R) -> Vec<GameEvent>
    where
        R: FnOnce(&GameState),
    {
        self.fps.record(time_ms);
        render(&self.state);
        self.step()
    }

    /// Advance physics by one tick
    pub fn step(&mut self) -> Vec<GameEvent> {
        // The demo controller steers through its own tracker so the player's
        // keys and pointer are untouched when it is switched off again
        let events = if self.autopilot {
            let mut steering = InputTracker::new();
            if autopilot::steer(&self.state, &mut steering) {
                self.key_down(Key::Start);
            }
            tick(&mut self.state, &steering)
        } else {
            tick(&mut self.state, &self.input)
        };
        for event in &events {
            log_event(event, &self.state);
        }

        if self.state.phase != self.last_phase {
            log::debug!(
                "Phase {} -> {}",
                self.last_phase.as_str(),
                self.state.phase.as_str()
            );
            self.last_phase = self.state.phase;
        }

        events
    }

    /// Rebuild the session. The loop keeps running.
    pub fn reset(&mut self) {
        self.state.reset();
        self.input = InputTracker::new();
        self.last_phase = self.state.phase;
        log::info!("Game reset");
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.state.score,
            lives: self.state.lives,
            game_started: self.state.game_started(),
            game_over: self.state.game_over(),
            game_won: self.state.game_won(),
            phase: self.state.phase.as_str(),
            fps: self.settings.show_fps.then(|| self.fps.fps()),
        }
    }
}

fn log_event(event: &GameEvent, state: &GameState) {
    match event {
        GameEvent::WallBounce | GameEvent::PaddleHit => log::trace!("{:?}", event),
        GameEvent::BrickDestroyed { row, col } => {
            log::debug!("Brick ({}, {}) destroyed, score {}", row, col, state.score)
        }
        GameEvent::LifeLost { remaining } => log::debug!("Ball lost, {} lives left", remaining),
        GameEvent::GameOver => log::info!("Game over with score {}", state.score),
        GameEvent::GameWon => log::info!("All bricks cleared, score {}", state.score),
    }
}
