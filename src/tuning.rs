//! Data-driven game balance
//!
//! Every per-tick constant of the simulation. Defaults reproduce the arcade
//! feel at 60 Hz; a JSON file may override any subset of fields.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::{ConfigError, load_or_default};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player flight ===
    /// Target speed per axis while a direction is held
    pub flight_speed: f32,
    /// Fraction of the previous velocity kept each tick
    pub velocity_smoothing: f32,
    /// Degrees per tick for roll/pitch/yaw while input is held
    pub rotation_speed: f32,
    /// Roll and pitch limit in degrees
    pub max_bank: f32,
    /// Roll/pitch multiplier per tick without input
    pub bank_decay: f32,

    // === Scrolling ===
    pub terrain_speed: f32,
    pub bullet_speed: f32,
    pub enemy_bullet_speed: f32,

    // === Enemies ===
    /// Fraction of the x/y gap to the player closed per tick
    pub enemy_seek_rate: f32,
    pub spawn_z: f32,
    /// Half-extent of the spawn box on x
    pub spawn_half_x: f32,
    /// Half-extent of the spawn box on y
    pub spawn_half_y: f32,

    // === Timers (ticks, fire when the counter exceeds the interval) ===
    pub enemy_spawn_interval: u32,
    pub power_up_spawn_interval: u32,
    pub enemy_fire_interval: u32,

    // === Range expiry ===
    pub enemy_despawn_z: f32,
    pub enemy_bullet_despawn_z: f32,
    pub power_up_despawn_z: f32,
    pub bullet_despawn_z: f32,

    // === Collision boxes (per-axis thresholds) ===
    pub enemy_contact_box: Vec3,
    pub enemy_bullet_box: Vec3,
    pub power_up_box: Vec3,
    pub bullet_hit_box: Vec3,

    // === Explosions ===
    pub explosion_particles: usize,
    /// Per-axis velocity range is [-particle_speed, particle_speed]
    pub particle_speed: f32,
    pub particle_size: f32,
    pub particle_lifetime: i32,
    pub particle_shrink: f32,

    // === Scoring and health ===
    pub start_health: u8,
    pub max_health: u8,
    pub score_per_kill: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            flight_speed: 0.1,
            velocity_smoothing: 0.9,
            rotation_speed: 2.0,
            max_bank: 30.0,
            bank_decay: 0.9,

            terrain_speed: TERRAIN_SPEED,
            bullet_speed: 0.2,
            enemy_bullet_speed: 0.2,

            enemy_seek_rate: 0.01,
            spawn_z: -30.0,
            spawn_half_x: 5.0,
            spawn_half_y: 2.0,

            enemy_spawn_interval: 60,
            power_up_spawn_interval: 300,
            enemy_fire_interval: 120,

            enemy_despawn_z: 10.0,
            enemy_bullet_despawn_z: 20.0,
            power_up_despawn_z: 10.0,
            bullet_despawn_z: -20.0,

            enemy_contact_box: Vec3::splat(1.0),
            enemy_bullet_box: Vec3::splat(0.5),
            power_up_box: Vec3::splat(0.5),
            bullet_hit_box: Vec3::splat(1.0),

            explosion_particles: 10,
            particle_speed: 0.1,
            particle_size: 0.2,
            particle_lifetime: 30,
            particle_shrink: 0.95,

            start_health: START_HEALTH,
            max_health: MAX_HEALTH,
            score_per_kill: SCORE_PER_KILL,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Load tuning from a JSON file (defaults on any error)
    pub fn load(path: &Path) -> Self {
        load_or_default::<Self>(path, "tuning").sanitized()
    }

    /// A tuning with every timer disabled, for scripted scenarios
    pub fn without_timers() -> Self {
        Self {
            enemy_spawn_interval: u32::MAX,
            power_up_spawn_interval: u32::MAX,
            enemy_fire_interval: u32::MAX,
            ..Self::default()
        }
    }

    /// Make every value usable by a tick, whatever the file said.
    ///
    /// Non-finite numbers fall back to their defaults. Sampling half-extents
    /// are taken as magnitudes so the ranges built from them are never empty.
    fn sanitized(mut self) -> Self {
        let d = Self::default();

        for (value, fallback) in [
            (&mut self.flight_speed, d.flight_speed),
            (&mut self.velocity_smoothing, d.velocity_smoothing),
            (&mut self.rotation_speed, d.rotation_speed),
            (&mut self.max_bank, d.max_bank),
            (&mut self.bank_decay, d.bank_decay),
            (&mut self.terrain_speed, d.terrain_speed),
            (&mut self.bullet_speed, d.bullet_speed),
            (&mut self.enemy_bullet_speed, d.enemy_bullet_speed),
            (&mut self.enemy_seek_rate, d.enemy_seek_rate),
            (&mut self.spawn_z, d.spawn_z),
            (&mut self.enemy_despawn_z, d.enemy_despawn_z),
            (&mut self.enemy_bullet_despawn_z, d.enemy_bullet_despawn_z),
            (&mut self.power_up_despawn_z, d.power_up_despawn_z),
            (&mut self.bullet_despawn_z, d.bullet_despawn_z),
            (&mut self.particle_size, d.particle_size),
            (&mut self.particle_shrink, d.particle_shrink),
        ] {
            *value = finite_or(*value, fallback);
        }

        self.spawn_half_x = finite_or(self.spawn_half_x, d.spawn_half_x).abs();
        self.spawn_half_y = finite_or(self.spawn_half_y, d.spawn_half_y).abs();
        self.particle_speed = finite_or(self.particle_speed, d.particle_speed).abs();
        // A negative bank limit would make clamps invert
        self.max_bank = self.max_bank.abs();

        for (value, fallback) in [
            (&mut self.enemy_contact_box, d.enemy_contact_box),
            (&mut self.enemy_bullet_box, d.enemy_bullet_box),
            (&mut self.power_up_box, d.power_up_box),
            (&mut self.bullet_hit_box, d.bullet_hit_box),
        ] {
            if !value.is_finite() {
                *value = fallback;
            }
        }

        self.max_health = self.max_health.max(1);
        self.start_health = self.start_health.clamp(1, self.max_health);
        self
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameState, TickInput, tick};

    #[test]
    fn test_overrides_are_partial() {
        let tuning = Tuning::from_json(r#"{ "enemy_spawn_interval": 10, "terrain_speed": 0.25 }"#)
            .unwrap();
        assert_eq!(tuning.enemy_spawn_interval, 10);
        assert!((tuning.terrain_speed - 0.25).abs() < 1e-6);
        assert_eq!(tuning.power_up_spawn_interval, 300);
        assert_eq!(tuning.bullet_hit_box, Vec3::splat(1.0));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_negative_spawn_extents_keep_spawning() {
        let tuning = Tuning::from_json(r#"{ "spawn_half_x": -5.0, "spawn_half_y": -2.0 }"#)
            .unwrap();
        assert_eq!(tuning.spawn_half_x, 5.0);
        assert_eq!(tuning.spawn_half_y, 2.0);

        let mut state = GameState::with_tuning(4, tuning);
        for _ in 0..70 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.enemies.len(), 1);
        assert!(state.enemies[0].pos.x.abs() <= 5.0);
    }

    #[test]
    fn test_negative_particle_speed_still_explodes() {
        let tuning = Tuning::from_json(r#"{ "particle_speed": -0.1 }"#).unwrap();
        assert!((tuning.particle_speed - 0.1).abs() < 1e-6);

        let mut state = GameState::with_tuning(
            4,
            Tuning {
                enemy_spawn_interval: u32::MAX,
                power_up_spawn_interval: u32::MAX,
                enemy_fire_interval: u32::MAX,
                ..tuning
            },
        );
        state.spawn_enemy_at(Vec3::new(0.0, 0.0, -5.0));
        state.spawn_bullet_at(Vec3::new(0.0, 0.0, -4.5));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 100);
        assert_eq!(state.explosions.len(), 1);
    }

    #[test]
    fn test_health_cap_at_u8_max_does_not_overflow() {
        let tuning = Tuning::from_json(r#"{ "max_health": 255, "start_health": 255 }"#).unwrap();
        assert_eq!(tuning.start_health, 255);

        let mut state = GameState::with_tuning(
            4,
            Tuning {
                enemy_spawn_interval: u32::MAX,
                power_up_spawn_interval: u32::MAX,
                enemy_fire_interval: u32::MAX,
                ..tuning
            },
        );
        state.spawn_power_up_at(Vec3::new(0.0, 0.0, -0.1));
        tick(&mut state, &TickInput::default());
        assert!(state.power_ups.is_empty());
        assert_eq!(state.player.health, 255);
    }

    #[test]
    fn test_non_finite_values_fall_back() {
        let tuning = Tuning {
            spawn_half_x: f32::NAN,
            particle_speed: f32::INFINITY,
            terrain_speed: f32::NAN,
            bullet_hit_box: Vec3::new(1.0, f32::NAN, 1.0),
            ..Tuning::default()
        }
        .sanitized();
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_health_limits_are_sanitized() {
        let tuning = Tuning::from_json(r#"{ "start_health": 9, "max_health": 4 }"#).unwrap();
        assert_eq!(tuning.max_health, 4);
        assert_eq!(tuning.start_health, 4);
    }
}
