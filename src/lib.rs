//! Firework Invaders - a launcher, some fireworks, and a marching alien wave
//!
//! Core modules:
//! - `sim`: Deterministic simulation (launcher, projectiles, wave timer)
//! - `renderer`: Pure scene projection plus the SVG writer
//! - `platform`: Browser bindings (events, frame loop, mount/unmount)
//! - `settings`: Persisted player preferences

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use renderer::Scene;
pub use settings::Settings;
pub use sim::{GameEvent, GamePhase, GameState, Layout, tick};

/// Game configuration constants
pub mod consts {
    /// Launcher rectangle size
    pub const LAUNCHER_WIDTH: f32 = 20.0;
    pub const LAUNCHER_HEIGHT: f32 = 40.0;
    /// Launcher glide transition (visual only)
    pub const LAUNCHER_GLIDE_MS: f64 = 2500.0;

    /// Firework line length
    pub const FIREWORK_HEIGHT: f32 = 20.0;
    /// Time a firework takes to reach the top of the surface
    pub const FIREWORK_DURATION_MS: f64 = 1000.0;
    /// Default cap on concurrently live fireworks
    pub const MAX_PROJECTILES: usize = 256;

    /// Wave timer period
    pub const ALIENS_TICK_MS: f64 = 1000.0;
    /// Gap between the surface edge and the alien row
    pub const ALIEN_PADDING: f32 = 20.0;
    /// Horizontal distance covered by the wave per tick
    pub const ALIEN_MOVE_X: f32 = 20.0;
    /// Horizontal spacing between aliens in the row
    pub const ALIEN_SPACING: f32 = 100.0;
    /// Side length of a size-1 alien
    pub const ALIEN_BASE_SIZE: f32 = 50.0;

    /// Fractions of the viewport used by the layout
    pub const SURFACE_MARGIN_FRACTION: f32 = 0.05;
    pub const SURFACE_WIDTH_FRACTION: f32 = 0.9;
    pub const LAUNCHER_Y_FRACTION: f32 = 0.8;
}
