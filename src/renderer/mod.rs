//! Rendering module
//!
//! `scene` projects game state into rectangles and lines; on the web, `svg`
//! writes that scene into an `<svg>` element.

pub mod scene;
#[cfg(target_arch = "wasm32")]
pub mod svg;

pub use scene::{Line, Rect, Scene};
#[cfg(target_arch = "wasm32")]
pub use svg::SvgSurface;
