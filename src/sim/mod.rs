//! Fixed-step simulation module
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - Fixed per-tick increments only (no delta time)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or audio dependencies

pub mod collision;
pub mod explosion;
pub mod movement;
pub mod spawner;
pub mod state;
pub mod terrain;
pub mod tick;

pub use collision::{CollisionReport, resolve_collisions, resolve_hits, resolve_rams};
pub use explosion::age_explosions;
pub use state::{
    Bullet, Enemy, EnemyBullet, Explosion, GameEvent, GamePhase, GameState, Particle, Player,
    PowerUp, Timers,
};
pub use terrain::{Terrain, TerrainFeature, TerrainSegment};
pub use tick::{TickInput, TickOutcome, tick};
