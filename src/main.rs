//! Firework Invaders entry point
//!
//! On the web this mounts the surface and keeps it alive for the page
//! session. Natively it runs a scripted headless session and prints the
//! final scene as JSON.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use firework_invaders::Settings;
    use firework_invaders::platform::{MountPoints, SurfaceHandle, mount};

    thread_local! {
        static SURFACE: RefCell<Option<SurfaceHandle>> = const { RefCell::new(None) };
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let settings = Settings::load();
        console_log::init_with_level(settings.log_level())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        // Write back so the stored JSON lists every field
        settings.save();

        log::info!("Firework Invaders starting...");

        let handle = mount(MountPoints::default(), &settings)?;
        SURFACE.with(|cell| *cell.borrow_mut() = Some(handle));

        log::info!("Firework Invaders running!");
        Ok(())
    }

    pub fn unmount() {
        // Take first so the handle drops outside the borrow
        let handle = SURFACE.with(|cell| cell.borrow_mut().take());
        match handle {
            Some(handle) => {
                log::info!("Unmounting after {} wave ticks", handle.aliens_progress())
            }
            None => log::warn!("unmount called with nothing mounted"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

/// Tear the surface down: stops the frame loop and wave timer, removes
/// listeners, clears the scene
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn unmount() {
    wasm_game::unmount();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use firework_invaders::Settings;

    let settings = Settings::load();
    env_logger::Builder::new()
        .filter_level(settings.log_level().to_level_filter())
        .parse_default_env()
        .init();
    log::info!("Firework Invaders (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let seconds = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<u32>() {
            Ok(s) => s,
            Err(e) => {
                eprintln!("usage: firework-invaders [seconds]  ({}: {})", arg, e);
                std::process::exit(2);
            }
        },
        None => 5,
    };

    let scene = headless::run(&settings, seconds);
    match serde_json::to_string_pretty(&scene) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Could not serialize scene: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use firework_invaders::sim::{GameEvent, GameState, Layout, tick};
    use firework_invaders::{Scene, Settings};

    /// 60 fps
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Sweep the pointer across the surface, fire every half second, start
    /// the wave after the first second, and return the scene at the end
    pub fn run(settings: &Settings, seconds: u32) -> Scene {
        let mut state = GameState::new(Layout::default(), settings);
        let end = seconds as f64 * 1000.0;
        let sweep = state.layout.max_left + state.layout.launcher_offset_left;

        let mut now = 0.0;
        let mut next_shot = 0.0;
        while now <= end {
            let phase = ((now / 4000.0).fract() * 2.0 - 1.0).abs() as f32;
            state.pointer_move(phase * sweep, now);

            if now >= 1000.0 {
                state.start(now);
            }
            if now >= next_shot {
                state.fire(now);
                next_shot += 500.0;
            }

            tick(&mut state, now);
            for event in state.drain_events() {
                match event {
                    GameEvent::WaveStarted { aliens } => {
                        log::info!("Wave started with {} aliens", aliens)
                    }
                    GameEvent::AliensAdvanced { .. } => {}
                    other => log::trace!("{:?}", other),
                }
            }
            now += FRAME_MS;
        }

        log::info!(
            "Session over after {}s: progress {}, {} fireworks in flight",
            seconds,
            state.aliens_progress,
            state.projectiles.len()
        );
        Scene::build(&state, end)
    }
}
