//! Sky Corridor - a corridor flight-shooter simulation core
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (movement, spawning, collisions, terrain)
//! - `renderer`: Frame snapshots and CPU-side display lists
//! - `audio`: Sound effect dispatch with graceful degradation
//! - `settings`: Player preferences
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Nominal tick rate (frames per second)
    pub const TICK_HZ: u32 = 60;
    /// Wall-clock length of one tick, used only for pacing
    pub const TICK_SECONDS: f32 = 1.0 / TICK_HZ as f32;

    /// Player health limits
    pub const START_HEALTH: u8 = 3;
    pub const MAX_HEALTH: u8 = 5;

    /// Points per enemy destroyed by a player bullet
    pub const SCORE_PER_KILL: u64 = 100;

    /// Forward scroll speed shared by terrain, enemies and power-ups (units/tick)
    pub const TERRAIN_SPEED: f32 = 0.1;

    /// Terrain corridor layout
    pub const TERRAIN_SEGMENT_COUNT: usize = 3;
    pub const TERRAIN_SEGMENT_SPACING: i32 = 20;
    pub const TERRAIN_RECYCLE_Z: f32 = 20.0;
    pub const TERRAIN_SPAN: i32 = TERRAIN_SEGMENT_SPACING * TERRAIN_SEGMENT_COUNT as i32;
    /// Planar extent of feature placement around a segment center
    pub const FEATURE_EXTENT: f32 = 8.0;
    /// Ground plane height that terrain features stand on
    pub const GROUND_Y: f32 = -2.0;
}

/// Per-axis absolute distance between two points
#[inline]
pub fn axis_distance(a: Vec3, b: Vec3) -> Vec3 {
    (a - b).abs()
}

/// Box proximity: true iff every axis distance is strictly below its threshold
#[inline]
pub fn within_box(a: Vec3, b: Vec3, threshold: Vec3) -> bool {
    axis_distance(a, b).cmplt(threshold).all()
}
