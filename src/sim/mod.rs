//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in as a parameter, never from a clock
//! - Stable iteration order (projectiles by ID, aliens by roster index)
//! - No rendering or platform dependencies

pub mod alien;
pub mod easing;
pub mod layout;
pub mod projectile;
pub mod state;
pub mod tick;

pub use alien::{Alien, AlienKind, ROSTER_NAMES, roster};
pub use easing::CubicBezier;
pub use layout::Layout;
pub use projectile::{Projectile, Segment};
pub use state::{GameEvent, GamePhase, GameState, Launcher, MAX_PENDING_EVENTS, WaveTimer};
pub use tick::{MAX_WAVE_CATCHUP, tick};
