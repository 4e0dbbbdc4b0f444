//! CPU-side scene assembly
//!
//! Builds one triangle list and one line list per frame. A GPU backend
//! uploads `triangle_bytes()` / `line_bytes()` with the `Vertex::desc()`
//! layout; a headless run can inspect the lists directly.

use glam::{EulerRot, Mat4, Quat, Vec3};

use super::mesh::EnemyModel;
use super::shapes;
use super::vertex::{Vertex, colors};
use super::{Frame, RenderSink};
use crate::consts::GROUND_Y;
use crate::sim::TerrainFeature;

/// Craft model scale
const CRAFT_SCALE: f32 = 0.5;
const BULLET_HALF: f32 = 0.1;
const POWER_UP_HALF: f32 = 0.3;

/// Vertex lists for one frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub triangles: Vec<Vertex>,
    pub lines: Vec<Vertex>,
    pub hud: Vec<String>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.triangles.clear();
        self.lines.clear();
        self.hud.clear();
    }

    pub fn triangle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }

    pub fn line_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lines)
    }
}

/// Model matrix of the player's craft from position and pitch/yaw/roll degrees
pub fn craft_transform(pos: Vec3, rotation: Vec3) -> Mat4 {
    let orientation = Quat::from_euler(
        EulerRot::XYZ,
        rotation.x.to_radians(),
        rotation.y.to_radians(),
        rotation.z.to_radians(),
    );
    Mat4::from_scale_rotation_translation(Vec3::splat(CRAFT_SCALE), orientation, pos)
}

/// Renderer sink that tessellates frames into a `DrawList`
pub struct SceneBuilder {
    enemy_model: EnemyModel,
    show_hud: bool,
    list: DrawList,
    frames: u64,
}

impl SceneBuilder {
    pub fn new(enemy_model: EnemyModel, show_hud: bool) -> Self {
        Self {
            enemy_model,
            show_hud,
            list: DrawList::default(),
            frames: 0,
        }
    }

    /// Draw list of the most recent frame
    pub fn draw_list(&self) -> &DrawList {
        &self.list
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    fn push_world(&mut self, frame: &Frame<'_>) {
        let tris = &mut self.list.triangles;
        tris.extend(shapes::skybox());

        for view in &frame.terrain {
            let z = view.segment.offset;
            tris.extend(shapes::ground(z));
            for feature in view.features {
                match *feature {
                    TerrainFeature::Hill { x, z: fz, size } => {
                        tris.extend(shapes::hill(Vec3::new(x, GROUND_Y, z + fz), size));
                    }
                    TerrainFeature::Tree { x, z: fz } => {
                        tris.extend(shapes::tree(Vec3::new(x, GROUND_Y, z + fz)));
                    }
                }
            }
        }

        let player = frame.player;
        tris.extend(shapes::craft(craft_transform(player.pos, player.rotation)));

        for enemy in frame.enemies {
            tris.extend(self.enemy_model.instance(enemy.pos));
        }
        for bullet in frame.bullets {
            tris.extend(shapes::cube(bullet.pos, BULLET_HALF, colors::BULLET));
        }
        for power_up in frame.power_ups {
            tris.extend(shapes::cube(power_up.pos, POWER_UP_HALF, colors::POWER_UP));
        }
        for explosion in frame.explosions {
            for particle in &explosion.particles {
                tris.extend(shapes::cube(particle.pos, particle.size, colors::PARTICLE));
            }
        }

        for bolt in frame.enemy_bullets {
            self.list.lines.extend(shapes::laser(bolt.prev_pos, bolt.pos));
        }
    }
}

impl RenderSink for SceneBuilder {
    fn render(&mut self, frame: &Frame<'_>) {
        self.list.clear();
        self.frames += 1;

        // Game over shows the overlay only
        if !frame.game_over {
            self.push_world(frame);
        }
        if self.show_hud || frame.game_over {
            self.list.hud = frame.hud_lines();
        }
    }
}
