//! Platform abstraction layer
//!
//! Browser bindings for:
//! - Input events (pointer move, surface click, start button)
//! - The animation frame loop that drives `sim::tick`
//! - Mount/unmount with guaranteed teardown
//!
//! Native builds have no platform layer; the binary runs a headless session.

#[cfg(target_arch = "wasm32")]
pub mod frame_loop;
#[cfg(target_arch = "wasm32")]
pub mod listener;
#[cfg(target_arch = "wasm32")]
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub use surface::{MountPoints, SurfaceHandle, mount};
