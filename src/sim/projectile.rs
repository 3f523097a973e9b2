//! Fireworks fired from the launcher
//!
//! A firework is created resting on the launcher and starts flying on the
//! next tick after it was spawned. It flies for `FIREWORK_DURATION_MS` and
//! is then removed. Fireworks are decorative: nothing collides with them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::easing::CubicBezier;
use super::layout::Layout;
use crate::consts::*;

/// A vertical line segment, top and bottom endpoints in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

/// A live firework
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Horizontal position, fixed at spawn time
    pub x: f32,
    /// Time of the click that spawned it (ms)
    pub spawned_at: f64,
    /// Time the flight began; `None` until the first tick after spawning
    pub launched_at: Option<f64>,
}

impl Projectile {
    pub fn new(id: u32, x: f32, now: f64) -> Self {
        Self {
            id,
            x,
            spawned_at: now,
            launched_at: None,
        }
    }

    /// Begin the flight if it hasn't started. Returns true on the transition.
    pub fn launch(&mut self, now: f64) -> bool {
        if self.launched_at.is_some() {
            return false;
        }
        self.launched_at = Some(now);
        true
    }

    /// Time between the click and the start of the flight
    pub fn launch_delay(&self) -> Option<f64> {
        self.launched_at.map(|t| t - self.spawned_at)
    }

    /// Whether the flight has run its full duration by `now`
    pub fn is_expired(&self, now: f64) -> bool {
        self.launched_at
            .is_some_and(|t| now - t >= FIREWORK_DURATION_MS)
    }

    /// Linear flight progress in [0, 1]
    pub fn progress(&self, now: f64) -> f32 {
        match self.launched_at {
            Some(t) => ((now - t) / FIREWORK_DURATION_MS).clamp(0.0, 1.0) as f32,
            None => 0.0,
        }
    }

    /// The line to draw at `now`
    pub fn segment(&self, layout: &Layout, now: f64) -> Segment {
        let eased = CubicBezier::FIREWORK.ease(self.progress(now));

        // Both ends travel from the launcher to the top edge; the line flips
        // from hanging below its start point to poking above the finish.
        let from_start = layout.min_y;
        let from_end = layout.min_y + FIREWORK_HEIGHT;
        let to_start = layout.max_y;
        let to_end = layout.max_y - FIREWORK_HEIGHT;

        Segment {
            start: Vec2::new(self.x, lerp(from_start, to_start, eased)),
            end: Vec2::new(self.x, lerp(from_end, to_end, eased)),
        }
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
