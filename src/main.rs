//! Brick Breaker entry point
//!
//! In the browser this mounts the game on `#canvas`. Natively there is no
//! window; the demo controller plays one headless session and the outcome
//! is logged.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    brick_breaker::platform::web::launch().await;
}

/// Restart the running game from the page
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn reset_game() {
    brick_breaker::platform::web::reset();
}

/// Cancel the frame loop and detach all input listeners
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn stop_game() {
    brick_breaker::platform::web::stop();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Upper bound for the headless run, about ten minutes at 60 Hz
#[cfg(not(target_arch = "wasm32"))]
const MAX_HEADLESS_TICKS: u32 = 36_000;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use brick_breaker::{GameLoop, Settings};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Brick Breaker (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build for the playable version");

    let query = std::env::args().nth(1).unwrap_or_default();
    let settings = Settings {
        autopilot: true,
        ..Settings::from_query(&query)
    };

    let mut game = GameLoop::new(settings);
    let mut ticks = 0;
    while ticks < MAX_HEADLESS_TICKS && !game.state().phase.is_terminal() {
        game.step();
        ticks += 1;
    }

    if !game.state().phase.is_terminal() {
        log::warn!("Stopped after {} ticks without a result", ticks);
    }

    match game.snapshot().to_json() {
        Ok(json) => {
            log::info!("Finished after {} ticks", ticks);
            println!("{}", json);
        }
        Err(e) => {
            log::error!("Snapshot encode failed: {}", e);
            std::process::exit(1);
        }
    }
}
