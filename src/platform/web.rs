//! Browser bootstrap
//!
//! Finds the canvas, creates the WebGPU surface, wires input listeners and
//! drives the loop with `requestAnimationFrame`. A running session lives in a
//! thread-local so the page can reset or stop it through exported functions.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

use super::{FrameSlot, PlatformError, backing_size, pointer_to_surface_x};
use crate::consts::{SURFACE_HEIGHT, SURFACE_WIDTH};
use crate::driver::{GameLoop, Snapshot};
use crate::renderer::{RenderError, RenderState};
use crate::settings::Settings;
use crate::sim::{GameState, Key};

/// Element id of the play surface
const CANVAS_ID: &str = "canvas";
/// Optional restart button
const RESTART_BUTTON_ID: &str = "restart-btn";

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
}

/// Game instance holding all per-session state
struct Game {
    game_loop: GameLoop,
    render_state: RenderState,
    canvas: HtmlCanvasElement,
    document: Document,
    last_snapshot: Option<Snapshot>,
}

impl Game {
    fn frame(&mut self, time: f64) {
        let render_state = &mut self.render_state;
        self.game_loop.frame(time, |state| present(render_state, state));
        self.publish();
    }

    /// Bridge the observable state to the page
    fn publish(&mut self) {
        let snapshot = self.game_loop.snapshot();
        if self.last_snapshot.as_ref() == Some(&snapshot) {
            return;
        }

        for (name, value) in snapshot.bridge_attributes() {
            if let Err(e) = self.canvas.set_attribute(name, &value) {
                log::warn!("Cannot set {} on canvas: {:?}", name, e);
            }
        }

        self.set_text("score", &snapshot.score.to_string());
        self.set_text("lives", &snapshot.lives.to_string());
        if let Some(fps) = snapshot.fps {
            self.set_text("fps", &fps.to_string());
        }

        self.last_snapshot = Some(snapshot);
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn reset(&mut self) {
        self.game_loop.reset();
        self.last_snapshot = None;
    }
}

fn present(render_state: &mut RenderState, state: &GameState) {
    match render_state.render_state(state) {
        Ok(()) => {}
        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
            render_state.reconfigure();
        }
        Err(wgpu::SurfaceError::OutOfMemory) => {
            log::error!("Out of memory!");
        }
        Err(e) => log::warn!("Render error: {:?}", e),
    }
}

/// An attached DOM listener that can be removed again
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, PlatformError> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(js_error)?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }

    fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Re-arms `requestAnimationFrame` after every frame until cancelled
struct Scheduler {
    window: Window,
    slot: Rc<FrameSlot<FrameCallback>>,
}

impl Scheduler {
    fn start(window: Window, game: Rc<RefCell<Game>>) -> Self {
        let slot: Rc<FrameSlot<FrameCallback>> = Rc::new(FrameSlot::default());

        let frame_window = window.clone();
        let weak: Weak<FrameSlot<FrameCallback>> = Rc::downgrade(&slot);
        let callback = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            let Some(slot) = weak.upgrade() else {
                return;
            };
            slot.frame_fired();
            if !slot.is_running() {
                return;
            }
            game.borrow_mut().frame(time);
            slot.with_callback(|callback| request_frame(&frame_window, &slot, callback));
        });

        request_frame(&window, &slot, &callback);
        slot.install(callback);
        Self { window, slot }
    }

    /// Stop the loop and release the frame callback with the game it holds
    fn cancel(&self) {
        if let Some(id) = self.slot.cancel() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}

fn request_frame(window: &Window, slot: &FrameSlot<FrameCallback>, callback: &FrameCallback) {
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(id) => slot.frame_requested(id),
        Err(e) => {
            log::error!("requestAnimationFrame failed: {:?}", e);
            slot.halt();
        }
    }
}

/// A mounted game: renderer, listeners and frame loop
struct Session {
    game: Rc<RefCell<Game>>,
    listeners: Vec<Listener>,
    scheduler: Scheduler,
}

impl Session {
    async fn start(settings: Settings) -> Result<Self, PlatformError> {
        let window = web_sys::window().ok_or(PlatformError::NoWindow)?;
        let document = window.document().ok_or(PlatformError::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| PlatformError::MissingCanvas(CANVAS_ID.to_string()))?
            .dyn_into()
            .map_err(|_| PlatformError::NotACanvas(CANVAS_ID.to_string()))?;

        // Backing store at device resolution, displayed at logical size
        let (width, height) = backing_size(window.device_pixel_ratio());
        canvas.set_width(width);
        canvas.set_height(height);
        if canvas.get_attribute("style").is_none() {
            let style = format!("width:{}px;height:{}px", SURFACE_WIDTH, SURFACE_HEIGHT);
            canvas.set_attribute("style", &style).map_err(js_error)?;
        }

        let render_state = create_renderer(&canvas, width, height).await?;
        log::info!("Surface ready at {}x{}", width, height);

        let game = Rc::new(RefCell::new(Game {
            game_loop: GameLoop::new(settings.clone()),
            render_state,
            canvas: canvas.clone(),
            document: document.clone(),
            last_snapshot: None,
        }));

        let mut listeners = Vec::new();
        if let Err(e) = attach_listeners(&mut listeners, &window, &document, &canvas, &game, &settings) {
            for listener in &listeners {
                listener.detach();
            }
            return Err(e);
        }

        let scheduler = Scheduler::start(window, game.clone());

        Ok(Self {
            game,
            listeners,
            scheduler,
        })
    }

    fn reset(&self) {
        self.game.borrow_mut().reset();
    }

    /// Cancel the pending frame and detach every listener
    fn stop(self) {
        self.scheduler.cancel();
        for listener in &self.listeners {
            listener.detach();
        }
        log::info!("Game stopped ({} listeners removed)", self.listeners.len());
    }
}

async fn create_renderer(
    canvas: &HtmlCanvasElement,
    width: u32,
    height: u32,
) -> Result<RenderState, PlatformError> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU,
        ..Default::default()
    });

    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
        .map_err(RenderError::from)?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .map_err(RenderError::from)?;

    log::info!("Using adapter: {:?}", adapter.get_info().name);

    Ok(RenderState::new(surface, &adapter, width, height).await?)
}

fn attach_listeners(
    listeners: &mut Vec<Listener>,
    window: &Window,
    document: &Document,
    canvas: &HtmlCanvasElement,
    game: &Rc<RefCell<Game>>,
    settings: &Settings,
) -> Result<(), PlatformError> {
    // Keyboard
    {
        let game = game.clone();
        listeners.push(Listener::attach(window, "keydown", move |event: Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if let Some(key) = Key::from_dom(&event.key()) {
                if key.blocks_page_default() {
                    event.prevent_default();
                }
                game.borrow_mut().game_loop.key_down(key);
            }
        })?);
    }
    {
        let game = game.clone();
        listeners.push(Listener::attach(window, "keyup", move |event: Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if let Some(key) = Key::from_dom(&event.key()) {
                game.borrow_mut().game_loop.key_up(key);
            }
        })?);
    }

    // Mouse move over the surface
    if settings.pointer_control {
        let game = game.clone();
        let canvas_clone = canvas.clone();
        listeners.push(Listener::attach(canvas, "mousemove", move |event: Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = canvas_clone.get_bounding_client_rect();
            let offset = event.client_x() as f32 - rect.left() as f32;
            let x = pointer_to_surface_x(offset, rect.width() as f32);
            game.borrow_mut().game_loop.pointer_moved(x);
        })?);
    }

    // Held keys are never released if focus leaves mid-press
    {
        let game = game.clone();
        listeners.push(Listener::attach(window, "blur", move |_event: Event| {
            game.borrow_mut().game_loop.focus_lost();
        })?);
    }

    // Restart button, if the page has one
    if let Some(button) = document.get_element_by_id(RESTART_BUTTON_ID) {
        let game = game.clone();
        listeners.push(Listener::attach(&button, "click", move |_event: Event| {
            game.borrow_mut().reset();
        })?);
    }

    log::debug!("Attached {} listeners", listeners.len());
    Ok(())
}

fn js_error(value: JsValue) -> PlatformError {
    PlatformError::Js(format!("{:?}", value))
}

/// Start the game on the page's canvas. Replaces any running session.
pub async fn launch() {
    console_error_panic_hook::set_once();
    // Logger accepts everything; the configured level is applied below
    let _ = console_log::init_with_level(log::Level::Trace);

    let query = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    let settings = Settings::from_query(&query);
    log::set_max_level(settings.log_level.to_level().to_level_filter());

    log::info!("Brick Breaker starting...");
    log::debug!("Settings: {:?}", settings);

    match Session::start(settings).await {
        Ok(session) => {
            let previous = SESSION.with(|s| s.borrow_mut().replace(session));
            if let Some(previous) = previous {
                previous.stop();
            }
            log::info!("Brick Breaker running!");
        }
        Err(e) => log::error!("Cannot start game: {}", e),
    }
}

/// Reset score, lives and entities of the running session
pub fn reset() {
    SESSION.with(|s| {
        if let Some(session) = s.borrow().as_ref() {
            session.reset();
        }
    });
}

/// Tear down the running session
pub fn stop() {
    if let Some(session) = SESSION.with(|s| s.borrow_mut().take()) {
        session.stop();
    }
}
