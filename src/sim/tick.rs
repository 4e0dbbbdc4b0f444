//! Fixed timestep simulation tick
//!
//! One call advances the game by one frame:
//! input intent -> spawning and movement -> rams -> enemy fire -> hits ->
//! explosion aging.
//! There is no delta time; every increment is a per-tick constant.

use super::collision::{CollisionReport, resolve_hits, resolve_rams};
use super::explosion::age_explosions;
use super::movement::{advance_entities, fly_player};
use super::spawner::{fire_bullet, run_fire_timer, run_spawn_timers};
use super::state::{GamePhase, GameState};

/// Autopilot fires at most once per this many ticks
const AUTOPILOT_FIRE_INTERVAL: u64 = 20;
/// Autopilot stops steering inside this x/y distance
const AUTOPILOT_DEAD_ZONE: f32 = 0.2;
/// Autopilot only fires at targets this well aligned on x/y
const AUTOPILOT_AIM_WINDOW: f32 = 0.8;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
    /// Fire pressed this tick (one bullet per press)
    pub fire: bool,
    /// Any key pressed this tick; restarts the run while game over
    pub any_key: bool,
    /// Demo mode - the simulation flies the craft
    pub autopilot: bool,
}

/// Outcome of one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// The simulation ran this tick
    pub simulated: bool,
    /// The run was restarted this tick
    pub reset: bool,
    pub collisions: CollisionReport,
}

/// Steer toward the nearest enemy ahead and shoot when lined up
fn autopilot_input(state: &GameState, base: &TickInput) -> TickInput {
    let mut input = TickInput {
        any_key: base.any_key,
        ..Default::default()
    };
    let me = state.player.pos;

    let target = state
        .enemies
        .iter()
        .filter(|e| e.pos.z < me.z)
        .min_by(|a, b| {
            a.pos
                .distance_squared(me)
                .partial_cmp(&b.pos.distance_squared(me))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(enemy) = target {
        let dx = enemy.pos.x - me.x;
        let dy = enemy.pos.y - me.y;
        input.left = dx < -AUTOPILOT_DEAD_ZONE;
        input.right = dx > AUTOPILOT_DEAD_ZONE;
        input.up = dy > AUTOPILOT_DEAD_ZONE;
        input.down = dy < -AUTOPILOT_DEAD_ZONE;
        input.fire = dx.abs() < AUTOPILOT_AIM_WINDOW
            && dy.abs() < AUTOPILOT_AIM_WINDOW
            && state.time_ticks % AUTOPILOT_FIRE_INTERVAL == 0;
    }

    input
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    state.events.clear();
    let mut outcome = TickOutcome::default();

    // Game over: only a key press does anything
    if state.phase == GamePhase::GameOver {
        if input.any_key {
            state.reset();
            outcome.reset = true;
        }
        return outcome;
    }

    state.time_ticks += 1;
    outcome.simulated = true;

    let input = if input.autopilot {
        autopilot_input(state, input)
    } else {
        input.clone()
    };

    // Input intent
    if input.fire {
        fire_bullet(state);
    }
    fly_player(&mut state.player, &input, &state.tuning);

    // Spawning and movement
    run_spawn_timers(state);
    advance_entities(state);
    state
        .terrain
        .advance(state.tuning.terrain_speed, &mut state.rng);

    // Collisions; the tick ends the moment the player is destroyed
    let mut report = resolve_rams(state);
    if !report.game_over {
        run_fire_timer(state);
        resolve_hits(state, &mut report);
    }
    let game_over = report.game_over;
    outcome.collisions = report;
    if game_over {
        return outcome;
    }

    age_explosions(&mut state.explosions, state.tuning.particle_shrink);

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameEvent;
    use crate::tuning::Tuning;
    use glam::Vec3;

    #[test]
    fn test_tick_counts_and_simulates() {
        let mut state = GameState::new(12345);
        let outcome = tick(&mut state, &TickInput::default());
        assert!(outcome.simulated);
        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.phase, GamePhase::Active);
    }

    #[test]
    fn test_fire_spawns_bullet_and_event() {
        let mut state = GameState::new(12345);
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.bullets.len(), 1);
        // Spawned at the craft, then advanced once
        assert!((state.bullets[0].pos.z + 0.2).abs() < 1e-6);
        assert!(state.events.contains(&GameEvent::ShotFired));

        // Events only describe the latest tick
        tick(&mut state, &TickInput::default());
        assert!(!state.events.contains(&GameEvent::ShotFired));
    }

    fn no_spawns() -> Tuning {
        Tuning {
            enemy_spawn_interval: u32::MAX,
            power_up_spawn_interval: u32::MAX,
            ..Tuning::default()
        }
    }

    #[test]
    fn test_ram_on_fire_tick_costs_one_health() {
        let mut state = GameState::with_tuning(3, no_spawns());
        state.timers.enemy_fire = state.tuning.enemy_fire_interval;
        state.spawn_enemy_at(Vec3::new(0.0, 0.0, -0.95));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.health, 2);
        assert!(state.enemies.is_empty());
        // The volley went off with nobody left to fire it
        assert_eq!(state.timers.enemy_fire, 0);
        assert!(state.enemy_bullets.is_empty());

        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.player.health, 2);
    }

    #[test]
    fn test_volley_fires_from_moved_enemies() {
        let mut state = GameState::with_tuning(3, no_spawns());
        state.timers.enemy_fire = state.tuning.enemy_fire_interval;
        state.spawn_enemy_at(Vec3::new(3.0, 0.0, -10.0));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemy_bullets.len(), 1);
        assert_eq!(state.enemy_bullets[0].pos, state.enemies[0].pos);
        assert!(state.enemy_bullets[0].pos.z > -10.0);
    }

    #[test]
    fn test_game_over_freezes_simulation() {
        let mut state = GameState::new(12345);
        state.player.health = 1;
        state.spawn_enemy_at(Vec3::new(0.0, 0.0, -0.05));
        state.spawn_bullet_at(Vec3::new(4.0, 0.0, -10.0));

        let outcome = tick(&mut state, &TickInput::default());
        assert!(outcome.collisions.game_over);
        assert_eq!(state.phase, GamePhase::GameOver);

        let ticks = state.time_ticks;
        let bullet_z = state.bullets[0].pos.z;
        let terrain = state.terrain.segments().to_vec();
        for _ in 0..50 {
            let outcome = tick(
                &mut state,
                &TickInput {
                    fire: true,
                    left: true,
                    ..Default::default()
                },
            );
            assert!(!outcome.simulated);
        }
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos.z, bullet_z);
        assert_eq!(state.terrain.segments(), terrain.as_slice());
        assert_eq!(state.player.health, 0);
    }

    #[test]
    fn test_any_key_resets_from_game_over_only() {
        let mut state = GameState::new(12345);
        let press = TickInput {
            any_key: true,
            ..Default::default()
        };
        let outcome = tick(&mut state, &press);
        assert!(!outcome.reset);
        assert!(outcome.simulated);

        state.phase = GamePhase::GameOver;
        state.score = 700;
        let outcome = tick(&mut state, &press);
        assert!(outcome.reset);
        assert!(!outcome.simulated);
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_autopilot_lines_up_and_fires() {
        let mut state = GameState::with_tuning(3, Tuning::without_timers());
        state.spawn_enemy_at(Vec3::new(3.0, 1.0, -25.0));
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &input);
            if state.score > 0 {
                break;
            }
        }
        assert_eq!(state.score, 100);
        assert!(state.player.pos.x > 1.0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                up: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..900 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.enemies, state2.enemies);
        assert_eq!(state1.power_ups, state2.power_ups);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.terrain.segments(), state2.terrain.segments());
        assert_eq!(state1.player, state2.player);
    }
}
