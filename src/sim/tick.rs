//! Time advancement
//!
//! `tick` is called once per frame with the frame timestamp. It runs every
//! wave tick that has come due, launches fireworks spawned since the last
//! call, and retires fireworks whose flight is over.

use super::state::{GameEvent, GameState};

/// Upper bound on wave ticks caught up in one call (a long-hidden tab
/// would otherwise replay minutes of ticks in a single frame)
pub const MAX_WAVE_CATCHUP: u32 = 600;

/// Advance the game state to `now` (ms)
pub fn tick(state: &mut GameState, now: f64) {
    advance_wave(state, now);
    advance_projectiles(state, now);
}

fn advance_wave(state: &mut GameState, now: f64) {
    let Some(mut timer) = state.wave_timer else {
        return;
    };

    let mut caught_up = 0;
    while caught_up < MAX_WAVE_CATCHUP && timer.poll(now) {
        state.aliens_progress += 1;
        caught_up += 1;
        log::debug!("tick! progress={}", state.aliens_progress);
        state.push_event(GameEvent::AliensAdvanced {
            progress: state.aliens_progress,
        });
    }

    if caught_up == MAX_WAVE_CATCHUP && now >= timer.next_due() {
        // Drop the backlog; the wave resumes on the regular cadence from here
        let period = timer.period_ms;
        let behind = ((now - timer.next_due()) / period).floor() + 1.0;
        timer.armed_at += behind * period;
        log::warn!("Wave timer fell behind, skipped {} ticks", behind as u64);
    }

    state.wave_timer = Some(timer);
}

fn advance_projectiles(state: &mut GameState, now: f64) {
    let mut expired = Vec::new();
    let mut launched = Vec::new();

    // Pending fireworks take off on this tick; their clock starts now, so
    // none can expire on the same pass
    for projectile in &mut state.projectiles {
        if projectile.launch(now) {
            log::trace!(
                "Firework {} launched {:.1}ms after its click",
                projectile.id,
                projectile.launch_delay().unwrap_or_default()
            );
            launched.push(projectile.id);
        } else if projectile.is_expired(now) {
            expired.push(projectile.id);
        }
    }

    state.projectiles.retain(|p| !expired.contains(&p.id));

    for id in launched {
        state.push_event(GameEvent::ProjectileLaunched { id });
    }
    for id in expired {
        log::trace!("Firework {} done", id);
        state.push_event(GameEvent::ProjectileExpired { id });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::sim::{GamePhase, Layout};

    fn state() -> GameState {
        GameState::new(Layout::from_viewport(1000.0, 800.0), &Settings::default())
    }

    #[test]
    fn test_no_wave_before_start() {
        let mut state = state();
        tick(&mut state, 10_000.0);
        assert_eq!(state.aliens_progress, 0);
        assert_eq!(state.phase, GamePhase::NotStarted);
    }

    #[test]
    fn test_wave_ticks_once_per_period() {
        let mut state = state();
        state.start(0.0);
        tick(&mut state, 999.0);
        assert_eq!(state.aliens_progress, 0);
        tick(&mut state, 1000.0);
        assert_eq!(state.aliens_progress, 1);
        tick(&mut state, 1500.0);
        assert_eq!(state.aliens_progress, 1);
        tick(&mut state, 2000.0);
        assert_eq!(state.aliens_progress, 2);
    }

    #[test]
    fn test_wave_catches_up_in_order() {
        let mut state = state();
        state.start(0.0);
        state.drain_events();
        tick(&mut state, 3500.0);
        assert_eq!(state.aliens_progress, 3);
        let progress: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::AliensAdvanced { progress } => Some(progress),
                _ => None,
            })
            .collect();
        assert_eq!(progress, vec![1, 2, 3]);
    }

    #[test]
    fn test_second_start_does_not_double_tick() {
        let mut state = state();
        state.start(0.0);
        state.start(500.0);
        for frame in 0..=600 {
            tick(&mut state, frame as f64 * 16.0);
        }
        // 9600 ms window
        assert_eq!(state.aliens_progress, 9);
        assert_eq!(state.aliens.len(), 5);
    }

    #[test]
    fn test_huge_stall_is_capped() {
        let mut state = state();
        state.start(0.0);
        let stall = ALIENS_TICK_MS * (MAX_WAVE_CATCHUP as f64 + 50.0);
        tick(&mut state, stall);
        assert_eq!(state.aliens_progress, MAX_WAVE_CATCHUP as u64);
        // Next tick lands one period later, not in another burst
        tick(&mut state, stall + 1.0);
        assert_eq!(state.aliens_progress, MAX_WAVE_CATCHUP as u64);
        tick(&mut state, stall + ALIENS_TICK_MS);
        assert_eq!(state.aliens_progress, MAX_WAVE_CATCHUP as u64 + 1);
    }

    #[test]
    fn test_projectile_launches_on_next_tick() {
        let mut state = state();
        let id = state.fire(100.0).unwrap();
        assert!(state.projectiles[0].launched_at.is_none());
        tick(&mut state, 116.0);
        assert_eq!(state.projectiles[0].launched_at, Some(116.0));
        assert_eq!(state.projectiles[0].launch_delay(), Some(16.0));
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::ProjectileLaunched { id })
        );
    }

    #[test]
    fn test_projectile_removed_after_duration() {
        let mut state = state();
        let id = state.fire(0.0).unwrap();
        tick(&mut state, 0.0);
        tick(&mut state, FIREWORK_DURATION_MS - 1.0);
        assert_eq!(state.projectiles.len(), 1);
        tick(&mut state, FIREWORK_DURATION_MS);
        assert!(state.projectiles.is_empty());
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::ProjectileExpired { id })
        );
    }

    #[test]
    fn test_staggered_projectiles_expire_independently() {
        let mut state = state();
        let a = state.fire(0.0).unwrap();
        tick(&mut state, 0.0);
        let b = state.fire(400.0).unwrap();
        tick(&mut state, 400.0);

        tick(&mut state, 1000.0);
        let live: Vec<_> = state.projectiles.iter().map(|p| p.id).collect();
        assert_eq!(live, vec![b]);

        tick(&mut state, 1399.0);
        assert_eq!(state.projectiles.len(), 1);
        tick(&mut state, 1400.0);
        assert!(state.projectiles.iter().all(|p| p.id != a && p.id != b));
    }
}
