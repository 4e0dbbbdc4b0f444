//! Timed spawning
//!
//! Each timer counts ticks and fires once the count exceeds its interval,
//! then restarts from zero.

use glam::Vec3;
use rand::Rng;

use super::state::{GameEvent, GameState};

/// Count one tick; true when the counter passed `interval` (counter is reset)
pub fn step_timer(counter: &mut u32, interval: u32) -> bool {
    *counter = counter.saturating_add(1);
    if *counter > interval {
        *counter = 0;
        true
    } else {
        false
    }
}

/// Random point in the spawn box ahead of the player
fn spawn_point<R: Rng + ?Sized>(rng: &mut R, half_x: f32, half_y: f32, z: f32) -> Vec3 {
    let x = rng.random_range(-half_x..=half_x);
    let y = rng.random_range(-half_y..=half_y);
    Vec3::new(x, y, z)
}

/// Run the enemy and power-up spawn timers
pub fn run_spawn_timers(state: &mut GameState) {
    let (half_x, half_y, spawn_z) = (
        state.tuning.spawn_half_x,
        state.tuning.spawn_half_y,
        state.tuning.spawn_z,
    );

    if step_timer(&mut state.timers.enemy_spawn, state.tuning.enemy_spawn_interval) {
        let pos = spawn_point(&mut state.rng, half_x, half_y, spawn_z);
        let id = state.spawn_enemy_at(pos);
        log::debug!("Enemy {} spawned at {:?}", id, pos);
    }

    if step_timer(
        &mut state.timers.power_up_spawn,
        state.tuning.power_up_spawn_interval,
    ) {
        let pos = spawn_point(&mut state.rng, half_x, half_y, spawn_z);
        let id = state.spawn_power_up_at(pos);
        log::debug!("Power-up {} spawned at {:?}", id, pos);
    }
}

/// Run the enemy fire timer; every live enemy fires a bolt from where it is.
///
/// Called after rams are resolved so an enemy that hit the craft this tick
/// does not also fire.
pub fn run_fire_timer(state: &mut GameState) {
    if step_timer(&mut state.timers.enemy_fire, state.tuning.enemy_fire_interval) {
        let muzzles: Vec<Vec3> = state.enemies.iter().map(|e| e.pos).collect();
        for pos in muzzles {
            state.spawn_enemy_bullet_at(pos);
        }
    }
}

/// Fire one player bullet from the craft's current position
pub fn fire_bullet(state: &mut GameState) {
    let pos = state.player.pos;
    state.spawn_bullet_at(pos);
    state.events.push(GameEvent::ShotFired);
}
