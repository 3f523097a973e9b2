//! Mounting the game surface into a page
//!
//! The page provides an `<svg>` for the scene, a container that takes
//! clicks, and a start button. Pointer moves are tracked page-wide.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, MouseEvent};

use super::frame_loop::FrameLoop;
use super::listener::EventListener;
use crate::renderer::{Scene, SvgSurface};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Layout, tick};

/// Element ids the surface binds to
#[derive(Debug, Clone, Copy)]
pub struct MountPoints<'a> {
    pub svg_id: &'a str,
    pub container_id: &'a str,
    pub start_button_id: &'a str,
}

impl Default for MountPoints<'static> {
    fn default() -> Self {
        Self {
            svg_id: "surface",
            container_id: "container",
            start_button_id: "start-btn",
        }
    }
}

/// Game instance holding all state
struct Game {
    state: GameState,
    svg: SvgSurface,
    start_button: Option<Element>,
}

impl Game {
    /// Advance time and redraw
    fn frame(&mut self, now: f64) {
        tick(&mut self.state, now);
        self.report_events();

        let scene = Scene::build(&self.state, now);
        if let Err(e) = self.svg.draw(&scene) {
            log::warn!("Draw failed: {:?}", e);
        }
    }

    fn start(&mut self, now: f64) {
        if !self.state.start(now) {
            log::debug!("Start ignored, wave already running");
            return;
        }
        self.report_events();

        if let Some(btn) = &self.start_button {
            if let Err(e) = mark_started(btn) {
                log::warn!("Could not update start button: {:?}", e);
            }
        }
    }

    fn report_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::WaveStarted { aliens } => {
                    log::info!("Wave started with {} aliens", aliens)
                }
                // Logged by the wave timer itself
                GameEvent::AliensAdvanced { .. } => {}
                GameEvent::ProjectileSpawned { id, x } => {
                    log::debug!("Firework {} spawned at x={:.1}", id, x)
                }
                GameEvent::ProjectileLaunched { id } => log::trace!("Firework {} launched", id),
                GameEvent::ProjectileExpired { id } => log::trace!("Firework {} expired", id),
                GameEvent::ProjectileRefused { .. } => {}
            }
        }
        log::trace!("{} firework elements live", self.svg.firework_count());
    }
}

/// Disable the start button and tag it `started` for the stylesheet
fn mark_started(btn: &Element) -> Result<(), JsValue> {
    btn.set_attribute("disabled", "")?;
    let class = btn.get_attribute("class").unwrap_or_default();
    if class.split_whitespace().any(|c| c == "started") {
        return Ok(());
    }
    let class = if class.is_empty() {
        "started".to_string()
    } else {
        format!("{} started", class)
    };
    btn.set_attribute("class", &class)
}

/// A mounted surface. Dropping it stops the frame loop (and with it the
/// wave timer), removes every listener, and clears the scene.
pub struct SurfaceHandle {
    game: Rc<RefCell<Game>>,
    frame_loop: Option<FrameLoop>,
    listeners: Vec<EventListener>,
}

impl SurfaceHandle {
    pub fn aliens_progress(&self) -> u64 {
        self.game.borrow().state.aliens_progress
    }
}

impl Drop for SurfaceHandle {
    fn drop(&mut self) {
        self.frame_loop.take();
        self.listeners.clear();
        self.game.borrow_mut().svg.clear();
        log::info!("Surface unmounted");
    }
}

/// Current time on the same clock as animation frame timestamps
fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn element(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("no element #{}", id)))
}

/// Bind the game to the page and start the frame loop
pub fn mount(points: MountPoints<'_>, settings: &Settings) -> Result<SurfaceHandle, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Layout is fixed at mount time
    let width = window.inner_width()?.as_f64().unwrap_or(0.0) as f32;
    let height = window.inner_height()?.as_f64().unwrap_or(0.0) as f32;
    let layout = Layout::from_viewport(width, height);
    log::info!("Viewport {}x{}, launcher range 0..{}", width, height, layout.max_left);

    let svg_root = element(&document, points.svg_id)?;
    let container = element(&document, points.container_id)?;
    let start_button = document.get_element_by_id(points.start_button_id);
    if start_button.is_none() {
        log::warn!("No #{} on the page; the wave can't be started", points.start_button_id);
    }

    let game = Rc::new(RefCell::new(Game {
        state: GameState::new(layout, settings),
        svg: SvgSurface::new(document.clone(), svg_root)?,
        start_button: start_button.clone(),
    }));

    let (listeners, frame_loop) =
        match bind(&game, &document, &container, start_button.as_ref()) {
            Ok(bound) => bound,
            Err(e) => {
                // Don't leave a half-drawn scene behind
                game.borrow_mut().svg.clear();
                return Err(e);
            }
        };

    log::info!("Surface mounted");

    Ok(SurfaceHandle {
        game,
        frame_loop: Some(frame_loop),
        listeners,
    })
}

/// Install the input listeners and start the frame loop
fn bind(
    game: &Rc<RefCell<Game>>,
    document: &Document,
    container: &Element,
    start_button: Option<&Element>,
) -> Result<(Vec<EventListener>, FrameLoop), JsValue> {
    let mut listeners = Vec::new();

    // Pointer tracking covers the whole page
    {
        let game = game.clone();
        listeners.push(EventListener::new(document, "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                let now = performance_now();
                game.borrow_mut().state.pointer_move(event.page_x() as f32, now);
            }
        })?);
    }

    // Clicks on the play area fire
    {
        let game = game.clone();
        listeners.push(EventListener::new(container, "click", move |_event| {
            let now = performance_now();
            let mut g = game.borrow_mut();
            g.state.fire(now);
            g.report_events();
        })?);
    }

    if let Some(btn) = start_button {
        let game = game.clone();
        listeners.push(EventListener::new(btn, "click", move |event| {
            // Keep the button click from also firing on the play area
            event.stop_propagation();
            game.borrow_mut().start(performance_now());
        })?);
    }

    let frame_loop = {
        let game = game.clone();
        FrameLoop::start(move |time| game.borrow_mut().frame(time))?
    };

    Ok((listeners, frame_loop))
}
