//! The alien wave roster

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Alien variety. Only one exists so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlienKind {
    #[default]
    Cool,
}

/// A single alien. Never mutated after the wave starts; its position is
/// derived from its roster index and the shared wave progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alien {
    pub kind: AlienKind,
    /// Scale factor applied to the base square
    pub size: f32,
    /// Firing rate. Carried with the roster, not yet used by gameplay.
    pub zaps_per_sec: f32,
    /// Unique within the roster; used as the render key
    pub name: String,
}

/// Roster names, in row order
pub const ROSTER_NAMES: [&str; 5] = ["bob", "sue", "sioux", "gord", "jian"];

impl Alien {
    fn cool(name: &str) -> Self {
        Self {
            kind: AlienKind::Cool,
            size: 1.0,
            zaps_per_sec: 0.2,
            name: name.to_string(),
        }
    }

    /// Side length of this alien's square
    #[inline]
    pub fn side(&self) -> f32 {
        ALIEN_BASE_SIZE * self.size
    }

    /// Top-left corner of the alien at roster `index` after `progress` wave ticks
    pub fn position(index: usize, progress: u64) -> Vec2 {
        Vec2::new(
            ALIEN_SPACING * index as f32 + ALIEN_PADDING + ALIEN_MOVE_X * progress as f32,
            ALIEN_PADDING,
        )
    }
}

/// The fixed wave materialized by the start command
pub fn roster() -> Vec<Alien> {
    ROSTER_NAMES.iter().map(|name| Alien::cool(name)).collect()
}
