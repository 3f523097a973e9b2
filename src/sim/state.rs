//! Game state and input handlers
//!
//! Input handlers (`pointer_move`, `fire`, `start`) run to completion and
//! mutate state immediately. Time only advances through `tick`.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::alien::{Alien, roster};
use super::easing::CubicBezier;
use super::layout::Layout;
use super::projectile::Projectile;
use crate::consts::*;
use crate::settings::Settings;

/// Wave lifecycle. There is no way back to `NotStarted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Launcher is live, no aliens yet
    #[default]
    NotStarted,
    /// Aliens on screen and marching
    Running,
}

/// Things that happened during input handling or a tick, for logging and
/// for the platform layer to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WaveStarted { aliens: usize },
    AliensAdvanced { progress: u64 },
    ProjectileSpawned { id: u32, x: f32 },
    ProjectileLaunched { id: u32 },
    ProjectileExpired { id: u32 },
    /// A click arrived while `max_projectiles` fireworks were in flight
    ProjectileRefused { live: usize },
}

/// Where the launcher is, and where it is drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Launcher {
    /// Logical left offset, always within the layout bounds
    pub left: f32,
    /// Drawn position when the last move happened
    glide_from: f32,
    /// Time of the last move (ms)
    moved_at: f64,
}

impl Launcher {
    fn new(left: f32) -> Self {
        Self {
            left,
            glide_from: left,
            moved_at: 0.0,
        }
    }

    /// Drawn left offset at `now`. Without glide this is just `left`.
    pub fn display_left(&self, now: f64, glide: bool) -> f32 {
        if !glide {
            return self.left;
        }
        let t = ((now - self.moved_at) / LAUNCHER_GLIDE_MS).clamp(0.0, 1.0) as f32;
        let eased = CubicBezier::LAUNCHER.ease(t);
        self.glide_from + (self.left - self.glide_from) * eased
    }

    fn move_to(&mut self, left: f32, now: f64, glide: bool) {
        // A retargeted transition starts from wherever the launcher is drawn
        self.glide_from = self.display_left(now, glide);
        self.left = left;
        self.moved_at = now;
    }
}

/// Repeating wave timer. Fires at `armed_at + k * period` for k = 1, 2, ...
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveTimer {
    pub period_ms: f64,
    pub armed_at: f64,
    pub fired: u64,
}

impl WaveTimer {
    pub fn new(armed_at: f64) -> Self {
        Self {
            period_ms: ALIENS_TICK_MS,
            armed_at,
            fired: 0,
        }
    }

    /// When the next tick is due
    #[inline]
    pub fn next_due(&self) -> f64 {
        self.armed_at + self.period_ms * (self.fired + 1) as f64
    }

    /// Consume one due tick, if any
    pub fn poll(&mut self, now: f64) -> bool {
        if now >= self.next_due() {
            self.fired += 1;
            true
        } else {
            false
        }
    }
}

/// Upper bound on undrained events. Past it the oldest are dropped, so a
/// caller that never drains does not grow the buffer without limit.
pub const MAX_PENDING_EVENTS: usize = 1024;

/// Complete game state
///
/// Input handlers and `tick` record [`GameEvent`]s; callers should take
/// them with `drain_events` once per frame. Only the newest
/// `MAX_PENDING_EVENTS` are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub layout: Layout,
    pub launcher: Launcher,
    /// Empty until the wave starts, then the fixed roster
    pub aliens: Vec<Alien>,
    /// Wave ticks so far; shared by every alien's position
    pub aliens_progress: u64,
    /// Live fireworks, ascending by id
    pub projectiles: Vec<Projectile>,
    /// Armed by `start`, never disarmed
    pub wave_timer: Option<WaveTimer>,
    pub max_projectiles: usize,
    pub launcher_glide: bool,
    /// Events since the last `drain_events`
    #[serde(skip)]
    events: VecDeque<GameEvent>,
    next_id: u32,
}

impl GameState {
    pub fn new(layout: Layout, settings: &Settings) -> Self {
        Self {
            phase: GamePhase::NotStarted,
            layout,
            launcher: Launcher::new(layout.min_left),
            aliens: Vec::new(),
            aliens_progress: 0,
            projectiles: Vec::new(),
            wave_timer: None,
            max_projectiles: settings.max_projectiles,
            launcher_glide: settings.effective_launcher_glide(),
            events: VecDeque::new(),
            next_id: 1,
        }
    }

    /// Allocate a new projectile ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_started(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Track the pointer. Returns the new logical launcher left.
    pub fn pointer_move(&mut self, page_x: f32, now: f64) -> f32 {
        if page_x.is_nan() {
            return self.launcher.left;
        }
        let left = self.layout.launcher_left_for(page_x);
        self.launcher.move_to(left, now, self.launcher_glide);
        left
    }

    /// Launcher left as drawn at `now`
    pub fn launcher_display_left(&self, now: f64) -> f32 {
        self.launcher.display_left(now, self.launcher_glide)
    }

    /// Spawn a firework above the launcher's center. The flight starts on
    /// the next tick. Returns `None` when the live cap is reached.
    pub fn fire(&mut self, now: f64) -> Option<u32> {
        let live = self.projectiles.len();
        if live >= self.max_projectiles {
            log::warn!("Firework refused: {} already in flight", live);
            self.push_event(GameEvent::ProjectileRefused { live });
            return None;
        }

        let x = self.launcher_display_left(now) + LAUNCHER_WIDTH / 2.0;
        let id = self.next_entity_id();
        self.projectiles.push(Projectile::new(id, x, now));
        self.push_event(GameEvent::ProjectileSpawned { id, x });
        Some(id)
    }

    /// Start the wave. Only the first call does anything.
    pub fn start(&mut self, now: f64) -> bool {
        if self.phase != GamePhase::NotStarted {
            return false;
        }
        self.phase = GamePhase::Running;
        self.aliens = roster();
        self.wave_timer = Some(WaveTimer::new(now));
        self.push_event(GameEvent::WaveStarted {
            aliens: self.aliens.len(),
        });
        true
    }

    pub(super) fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Take the events recorded since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(Layout::from_viewport(1000.0, 800.0), &Settings::default())
    }

    #[test]
    fn test_new_state() {
        let state = state();
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.launcher.left, 0.0);
        assert!(state.aliens.is_empty());
        assert_eq!(state.aliens_progress, 0);
        assert!(state.wave_timer.is_none());
    }

    #[test]
    fn test_pointer_move_clamps() {
        let mut state = state();
        assert_eq!(state.pointer_move(50.0, 0.0), 0.0);
        assert!((state.pointer_move(300.0, 1.0) - 240.0).abs() < 1e-4);
        assert!((state.pointer_move(99_999.0, 2.0) - 880.0).abs() < 1e-4);
    }

    #[test]
    fn test_pointer_move_ignores_nan() {
        let mut state = state();
        state.pointer_move(300.0, 0.0);
        assert!((state.pointer_move(f32::NAN, 1.0) - 240.0).abs() < 1e-4);
    }

    #[test]
    fn test_pointer_move_on_unreadable_viewport() {
        let layout = Layout::from_viewport(f32::NAN, 800.0);
        let mut state = GameState::new(layout, &Settings::default());
        assert_eq!(state.pointer_move(100.0, 0.0), 0.0);
        assert_eq!(state.launcher.left, 0.0);
    }

    #[test]
    fn test_fire_reads_launcher_at_click_time() {
        let mut state = state();
        state.pointer_move(300.0, 0.0);
        let id = state.fire(1.0).unwrap();
        state.pointer_move(600.0, 2.0);
        let p = state.projectiles.iter().find(|p| p.id == id).unwrap();
        assert!((p.x - 250.0).abs() < 1e-4);
        assert!(p.launched_at.is_none());
    }

    #[test]
    fn test_fire_ids_increase() {
        let mut state = state();
        let a = state.fire(0.0).unwrap();
        let b = state.fire(0.0).unwrap();
        assert!(b > a);
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_fire_respects_cap() {
        let settings = Settings {
            max_projectiles: 2,
            ..Default::default()
        };
        let mut state = GameState::new(Layout::default(), &settings);
        assert!(state.fire(0.0).is_some());
        assert!(state.fire(0.0).is_some());
        assert!(state.fire(0.0).is_none());
        assert_eq!(state.projectiles.len(), 2);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::ProjectileRefused { live: 2 })
        );
    }

    #[test]
    fn test_start_once() {
        let mut state = state();
        assert!(state.start(0.0));
        assert!(state.is_started());
        assert_eq!(state.aliens.len(), 5);
        assert!(!state.start(10.0));
        assert_eq!(state.aliens.len(), 5);
        assert_eq!(state.wave_timer.map(|t| t.armed_at), Some(0.0));
    }

    #[test]
    fn test_wave_timer_poll() {
        let mut timer = WaveTimer::new(100.0);
        assert!(!timer.poll(1099.0));
        assert!(timer.poll(1100.0));
        assert!(!timer.poll(1100.0));
        assert_eq!(timer.next_due(), 2100.0);
    }

    #[test]
    fn test_glide_display_position() {
        let settings = Settings {
            launcher_glide: true,
            ..Default::default()
        };
        let mut state = GameState::new(Layout::from_viewport(1000.0, 800.0), &settings);
        state.pointer_move(460.0, 0.0);
        assert_eq!(state.launcher.left, 400.0);
        // Partway through the transition the drawn launcher trails behind
        let mid = state.launcher_display_left(LAUNCHER_GLIDE_MS / 10.0);
        assert!(mid > 0.0 && mid < 400.0);
        assert!((state.launcher_display_left(LAUNCHER_GLIDE_MS) - 400.0).abs() < 1e-3);
    }

    #[test]
    fn test_glide_fires_from_drawn_launcher() {
        let settings = Settings {
            launcher_glide: true,
            ..Default::default()
        };
        let mut state = GameState::new(Layout::from_viewport(1000.0, 800.0), &settings);
        state.pointer_move(460.0, 0.0);

        let now = 100.0;
        let id = state.fire(now).unwrap();
        let p = state.projectiles.iter().find(|p| p.id == id).unwrap();
        let drawn = state.launcher_display_left(now);
        assert!((p.x - (drawn + LAUNCHER_WIDTH / 2.0)).abs() < 1e-4);
        // Still trailing well behind the logical position
        assert!((p.x - (state.launcher.left + LAUNCHER_WIDTH / 2.0)).abs() > 1.0);
    }

    #[test]
    fn test_glide_retarget_starts_from_drawn_position() {
        let settings = Settings {
            launcher_glide: true,
            ..Default::default()
        };
        let mut state = GameState::new(Layout::from_viewport(1000.0, 800.0), &settings);
        state.pointer_move(460.0, 0.0);

        let now = 100.0;
        let drawn = state.launcher_display_left(now);
        assert!(drawn > 0.0 && drawn < 400.0);

        state.pointer_move(160.0, now);
        assert_eq!(state.launcher.left, 100.0);
        // No jump at the moment of the move
        assert!((state.launcher_display_left(now) - drawn).abs() < 1e-4);
        // Heads from there toward the new target
        let later = state.launcher_display_left(now + LAUNCHER_GLIDE_MS / 10.0);
        assert!((later - drawn).abs() > 1e-3);
        assert!((later - 100.0).abs() < (drawn - 100.0).abs());
        assert!((state.launcher_display_left(now + LAUNCHER_GLIDE_MS) - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_undrained_events_are_bounded() {
        let mut state = state();
        state.start(0.0);
        // An hour of wave ticks with nobody draining
        for second in 1..=3600 {
            crate::sim::tick(&mut state, second as f64 * ALIENS_TICK_MS);
        }
        assert_eq!(state.aliens_progress, 3600);
        assert_eq!(state.events.len(), MAX_PENDING_EVENTS);

        let events = state.drain_events();
        assert_eq!(
            events.last(),
            Some(&GameEvent::AliensAdvanced { progress: 3600 })
        );
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_no_glide_by_default() {
        let mut state = state();
        state.pointer_move(460.0, 0.0);
        assert_eq!(state.launcher_display_left(0.0), 400.0);
    }

    #[test]
    fn test_drain_events() {
        let mut state = state();
        state.start(0.0);
        state.fire(0.0);
        let events = state.drain_events();
        assert_eq!(events.len(), 2);
        assert!(state.drain_events().is_empty());
    }
}
