//! Side Scroller - A procedurally generated platformer runtime
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, physics, gameplay resolution)
//! - `scene`: Scene host contract and Game/GameOver/GameClear flow
//! - `input`: Keyboard + virtual button merging into per-tick intents
//! - `render`: Drawing contract consumed by the host renderer
//! - `tuning`: Data-driven game balance

pub mod input;
pub mod render;
pub mod scene;
pub mod sim;
pub mod tuning;

pub use scene::{SceneFlow, SceneHost, SceneId, ScenePayload};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World dimensions (visible area height, camera viewport)
    pub const WORLD_WIDTH: f32 = 1920.0;
    pub const WORLD_HEIGHT: f32 = 1080.0;

    /// Top edge of the ground tiles
    pub const GROUND_TOP: f32 = 1016.0;
    /// Ground tiles are laid out on a fixed grid
    pub const TILE_WIDTH: f32 = 64.0;
    pub const TILE_HEIGHT: f32 = 64.0;

    /// Player body (collision box, centered on position)
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 72.0;
    /// Spawn point, above the platform band of the guaranteed-safe first section
    pub const PLAYER_SPAWN_X: f32 = 200.0;
    pub const PLAYER_SPAWN_Y: f32 = 400.0;

    /// Platform body
    pub const PLATFORM_WIDTH: f32 = 192.0;
    pub const PLATFORM_HEIGHT: f32 = 32.0;

    /// Coin body (circle) and bob motion
    pub const COIN_RADIUS: f32 = 16.0;
    pub const COIN_BOB_AMPLITUDE: f32 = 15.0;
    pub const COIN_BOB_PERIOD_MIN: f32 = 1.0;
    pub const COIN_BOB_PERIOD_MAX: f32 = 1.5;

    /// Enemy sprite bounds and reduced collision footprint
    pub const ENEMY_SPRITE_SIZE: f32 = 64.0;
    pub const ENEMY_BODY_WIDTH: f32 = 48.0;
    pub const ENEMY_BODY_HEIGHT: f32 = 40.0;
    /// Patrol motion (enemy walks [x, x + amplitude] and back)
    pub const ENEMY_PATROL_RANGE: f32 = 150.0;
    pub const ENEMY_PATROL_PERIOD_MIN: f32 = 2.0;
    pub const ENEMY_PATROL_PERIOD_MAX: f32 = 3.0;

    /// Goal flag (tall, narrow footprint)
    pub const FLAG_OFFSET_FROM_END: f32 = 300.0;
    pub const FLAG_BODY_WIDTH: f32 = 16.0;
    pub const FLAG_BODY_HEIGHT: f32 = 300.0;

    /// Score awards
    pub const COIN_SCORE: u64 = 10;
    pub const STOMP_SCORE: u64 = 50;
    pub const GOAL_SCORE: u64 = 1000;

    /// Score popup lifetime (seconds) and rise speed (px/s)
    pub const POPUP_LIFETIME: f32 = 0.8;
    pub const POPUP_RISE_SPEED: f32 = 60.0;
}

/// Convert a duration in seconds to whole simulation ticks (at least one)
#[inline]
pub fn secs_to_ticks(secs: f32) -> u32 {
    ((secs / consts::SIM_DT).round() as u32).max(1)
}
