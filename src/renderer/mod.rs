//! Rendering boundary
//!
//! The renderer is stateless with respect to gameplay: each tick it receives a
//! borrowed `Frame` of the simulation and draws it. `SceneBuilder` is the
//! CPU half of that job, turning a frame into vertex buffers for a backend.

pub mod mesh;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use mesh::EnemyModel;
pub use scene::{DrawList, SceneBuilder};

use serde::Serialize;

use crate::sim::{
    Bullet, Enemy, EnemyBullet, Explosion, GameState, Player, PowerUp, TerrainFeature,
    TerrainSegment,
};

/// One terrain segment with its decorations
#[derive(Debug, Clone, Serialize)]
pub struct TerrainView<'a> {
    pub segment: TerrainSegment,
    pub features: &'a [TerrainFeature],
}

/// Everything a renderer needs for one tick
#[derive(Debug, Clone, Serialize)]
pub struct Frame<'a> {
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub bullets: &'a [Bullet],
    pub enemy_bullets: &'a [EnemyBullet],
    pub power_ups: &'a [PowerUp],
    pub explosions: &'a [Explosion],
    pub terrain: Vec<TerrainView<'a>>,
    pub health: u8,
    pub score: u64,
    pub game_over: bool,
}

impl<'a> Frame<'a> {
    pub fn from_state(state: &'a GameState) -> Self {
        let terrain = state
            .terrain
            .segments()
            .iter()
            .map(|segment| TerrainView {
                segment: *segment,
                features: state.terrain.features_for(segment.base_z).unwrap_or(&[]),
            })
            .collect();

        Self {
            player: &state.player,
            enemies: &state.enemies,
            bullets: &state.bullets,
            enemy_bullets: &state.enemy_bullets,
            power_ups: &state.power_ups,
            explosions: &state.explosions,
            terrain,
            health: state.player.health,
            score: state.score,
            game_over: state.is_game_over(),
        }
    }

    /// Overlay text lines, top to bottom
    pub fn hud_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Health: {}", self.health),
            format!("Score: {} pts", self.score),
        ];
        if self.game_over {
            lines.push("Game Over".to_string());
        }
        lines
    }
}

/// Receiver of per-tick frames
pub trait RenderSink {
    fn render(&mut self, frame: &Frame<'_>);
}
