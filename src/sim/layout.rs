//! Surface layout derived from the viewport
//!
//! Captured once when the surface mounts; later window resizes do not move
//! the bounds.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Launcher bounds and firework flight band, in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Distance from the page's left edge to the launcher's center at left = 0
    pub launcher_offset_left: f32,
    pub min_left: f32,
    pub max_left: f32,
    /// Top of the launcher; fireworks start here
    pub min_y: f32,
    /// Fireworks finish here
    pub max_y: f32,
}

impl Layout {
    /// Build the layout for a viewport of the given size (CSS pixels).
    /// Non-finite or negative sizes count as zero.
    pub fn from_viewport(width: f32, height: f32) -> Self {
        let width = viewport_extent(width);
        let height = viewport_extent(height);
        let min_left = 0.0;
        let max_left = width * SURFACE_WIDTH_FRACTION - LAUNCHER_WIDTH;
        Self {
            launcher_offset_left: width * SURFACE_MARGIN_FRACTION + LAUNCHER_WIDTH / 2.0,
            min_left,
            // A viewport narrower than the launcher pins it to the left edge
            max_left: max_left.max(min_left),
            min_y: height * LAUNCHER_Y_FRACTION - LAUNCHER_HEIGHT,
            max_y: 0.0,
        }
    }

    /// Launcher left offset for a pointer at `page_x`, clamped to the bounds
    #[inline]
    pub fn launcher_left_for(&self, page_x: f32) -> f32 {
        (page_x - self.launcher_offset_left).clamp(self.min_left, self.max_left)
    }
}

fn viewport_extent(v: f32) -> f32 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

impl Default for Layout {
    /// A 1280x720 viewport, used by headless sessions
    fn default() -> Self {
        Self::from_viewport(1280.0, 720.0)
    }
}
