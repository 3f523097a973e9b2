//! Scene projection
//!
//! A pure function of game state (and the frame time, for animation).
//! Produces the primitives a rendering collaborator draws: one launcher
//! rectangle, one square per alien, one line per live firework.

use serde::Serialize;

use crate::consts::*;
use crate::sim::{Alien, GameState};

/// Colors for game elements, from the game's stylesheet
pub mod colors {
    pub const LAUNCHER: &str = "rebeccapurple";
    pub const ALIEN: &str = "limegreen";
    pub const FIREWORK: &str = "white";
}

/// CSS classes carried on each primitive
pub mod classes {
    pub const LAUNCHER: &str = "launcher";
    pub const ALIEN: &str = "alien";
    pub const FIREWORK: &str = "firework";
    pub const FIREWORK_LAUNCHED: &str = "firework firework-launched";
}

/// A filled rectangle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rect {
    /// Stable identity across frames
    pub key: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub class: &'static str,
    pub fill: &'static str,
}

/// A stroked line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub key: u32,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub class: &'static str,
    pub stroke: &'static str,
}

/// Everything on screen for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub launcher: Rect,
    /// In roster order
    pub aliens: Vec<Rect>,
    /// Ascending by id; drawn beneath the launcher
    pub fireworks: Vec<Line>,
}

impl Scene {
    /// Project `state` as it looks at `now`
    pub fn build(state: &GameState, now: f64) -> Self {
        let launcher = Rect {
            key: classes::LAUNCHER.to_string(),
            x: state.launcher_display_left(now),
            y: state.layout.min_y,
            width: LAUNCHER_WIDTH,
            height: LAUNCHER_HEIGHT,
            class: classes::LAUNCHER,
            fill: colors::LAUNCHER,
        };

        let aliens = state
            .aliens
            .iter()
            .enumerate()
            .map(|(index, alien)| alien_rect(index, alien, state.aliens_progress))
            .collect();

        let fireworks = state
            .projectiles
            .iter()
            .map(|p| {
                let seg = p.segment(&state.layout, now);
                Line {
                    key: p.id,
                    x1: seg.start.x,
                    y1: seg.start.y,
                    x2: seg.end.x,
                    y2: seg.end.y,
                    class: if p.launched_at.is_some() {
                        classes::FIREWORK_LAUNCHED
                    } else {
                        classes::FIREWORK
                    },
                    stroke: colors::FIREWORK,
                }
            })
            .collect();

        Self {
            launcher,
            aliens,
            fireworks,
        }
    }
}

fn alien_rect(index: usize, alien: &Alien, progress: u64) -> Rect {
    let pos = Alien::position(index, progress);
    let side = alien.side();
    Rect {
        key: alien.name.clone(),
        x: pos.x,
        y: pos.y,
        width: side,
        height: side,
        class: classes::ALIEN,
        fill: colors::ALIEN,
    }
}
