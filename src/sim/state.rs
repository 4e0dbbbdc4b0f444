//! Game state and core simulation types
//!
//! `GameState` is the single owner of every live entity. Nothing in the
//! simulation keeps references between ticks; removal is by entity id.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::terrain::Terrain;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation running
    Active,
    /// Player destroyed; waits for a key press to reset
    GameOver,
}

/// Side effects of a tick for collaborators outside the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired,
    EnemyDestroyed { pos: Vec3 },
    PlayerHit { health: u8 },
    PowerUpCollected { health: u8 },
    GameOver { score: u64 },
}

/// The player's craft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
    /// Pitch, yaw, roll in degrees (x, y, z)
    pub rotation: Vec3,
    pub vel: Vec3,
    pub health: u8,
}

impl Player {
    pub fn new(health: u8) -> Self {
        Self {
            pos: Vec3::ZERO,
            rotation: Vec3::ZERO,
            vel: Vec3::ZERO,
            health,
        }
    }

    pub fn pitch(&self) -> f32 {
        self.rotation.x
    }

    pub fn yaw(&self) -> f32 {
        self.rotation.y
    }

    pub fn roll(&self) -> f32 {
        self.rotation.z
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec3,
}

/// A player bullet; travels forward at a fixed speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec3,
}

/// An enemy laser bolt. `prev_pos` is kept for streak rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyBullet {
    pub id: u32,
    pub pos: Vec3,
    pub prev_pos: Vec3,
}

/// A health pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub pos: Vec3,
    pub prev_pos: Vec3,
}

/// A single explosion fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    pub size: f32,
    /// Remaining lifetime in ticks
    pub lifetime: i32,
}

/// A burst of particles left by a destroyed enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub id: u32,
    pub particles: Vec<Particle>,
}

/// Frame counters driving spawns and enemy fire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timers {
    pub enemy_spawn: u32,
    pub power_up_spawn: u32,
    pub enemy_fire: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay constants
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    pub score: u64,
    /// Simulation tick counter (not reset by `reset`)
    pub time_ticks: u64,
    pub timers: Timers,
    /// Live entities, each kept in spawn order
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub power_ups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,
    /// Scrolling corridor; survives resets
    pub terrain: Terrain,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let terrain = Terrain::new(&mut rng);
        Self {
            seed,
            phase: GamePhase::Active,
            player: Player::new(tuning.start_health),
            score: 0,
            time_ticks: 0,
            timers: Timers::default(),
            enemies: Vec::new(),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            power_ups: Vec::new(),
            explosions: Vec::new(),
            terrain,
            events: Vec::new(),
            rng,
            tuning,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Start a fresh run: player, score and entities are reinitialised while
    /// the terrain keeps streaming from where it was.
    pub fn reset(&mut self) {
        self.player = Player::new(self.tuning.start_health);
        self.enemies.clear();
        self.bullets.clear();
        self.enemy_bullets.clear();
        self.power_ups.clear();
        self.explosions.clear();
        self.score = 0;
        self.phase = GamePhase::Active;
        log::info!("Game reset (tick {})", self.time_ticks);
    }

    /// Push an enemy at `pos`
    pub fn spawn_enemy_at(&mut self, pos: Vec3) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy { id, pos });
        id
    }

    /// Push a player bullet at `pos`
    pub fn spawn_bullet_at(&mut self, pos: Vec3) -> u32 {
        let id = self.next_entity_id();
        self.bullets.push(Bullet { id, pos });
        id
    }

    /// Push an enemy bullet at `pos`
    pub fn spawn_enemy_bullet_at(&mut self, pos: Vec3) -> u32 {
        let id = self.next_entity_id();
        self.enemy_bullets.push(EnemyBullet {
            id,
            pos,
            prev_pos: pos,
        });
        id
    }

    /// Push a power-up at `pos`
    pub fn spawn_power_up_at(&mut self, pos: Vec3) -> u32 {
        let id = self.next_entity_id();
        self.power_ups.push(PowerUp {
            id,
            pos,
            prev_pos: pos,
        });
        id
    }

    /// Total number of live entities across all five collections
    pub fn entity_count(&self) -> usize {
        self.enemies.len()
            + self.bullets.len()
            + self.enemy_bullets.len()
            + self.power_ups.len()
            + self.explosions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.player.health, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.entity_count(), 0);
        assert_eq!(state.terrain.segments().len(), 3);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(7);
        let a = state.spawn_enemy_at(Vec3::ZERO);
        let b = state.spawn_bullet_at(Vec3::ZERO);
        let c = state.spawn_power_up_at(Vec3::ZERO);
        assert!(a != b && b != c && a != c);
    }

    #[test]
    fn test_spawned_streaks_start_collapsed() {
        let mut state = GameState::new(7);
        state.spawn_enemy_bullet_at(Vec3::new(1.0, 2.0, 3.0));
        let bolt = &state.enemy_bullets[0];
        assert_eq!(bolt.pos, bolt.prev_pos);
    }
}
