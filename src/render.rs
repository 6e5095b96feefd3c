//! Drawing contract
//!
//! The simulation never draws. A host renderer implements `RenderHost` and
//! gets one call per visible thing, back to front by depth.

use glam::Vec2;

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::sim::{EntityKind, Facing, SessionState};

/// Depth layers (higher draws on top)
pub mod depth {
    pub const BACKGROUND: i32 = 0;
    pub const TERRAIN: i32 = 10;
    pub const PICKUPS: i32 = 20;
    pub const ACTORS: i32 = 30;
    pub const PLAYER: i32 = 40;
    pub const POPUPS: i32 = 50;
    pub const HUD: i32 = 100;
}

/// Sprite/text sink implemented by the host renderer
pub trait RenderHost {
    /// Draw the texture `key` centered at world position `pos`.
    ///
    /// `scroll_factor` is 1.0 for world objects, 0.0 for screen-fixed ones.
    fn draw_sprite(&mut self, key: &str, pos: Vec2, depth: i32, scroll_factor: f32, flip_x: bool);

    /// Draw text; `alpha` is 0-1
    fn draw_text(&mut self, text: &str, pos: Vec2, depth: i32, scroll_factor: f32, alpha: f32);
}

/// Emit every drawable of a session near the camera view
pub fn draw_session(state: &SessionState, host: &mut impl RenderHost) {
    let scroll = state.camera.scroll();
    let view_min = scroll - Vec2::splat(128.0);
    let view_max = scroll + Vec2::new(WORLD_WIDTH, WORLD_HEIGHT) + Vec2::splat(128.0);

    host.draw_sprite("sky", Vec2::new(WORLD_WIDTH, WORLD_HEIGHT) * 0.5, depth::BACKGROUND, 0.0, false);
    host.draw_sprite("hills", scroll * 0.3, depth::BACKGROUND + 1, 0.3, false);

    for entity in state.registry.iter() {
        if entity.pos.x < view_min.x || entity.pos.x > view_max.x {
            continue;
        }
        let depth = match entity.kind {
            EntityKind::Ground | EntityKind::Platform => depth::TERRAIN,
            EntityKind::Coin | EntityKind::Flag => depth::PICKUPS,
            EntityKind::Enemy => depth::ACTORS,
        };
        host.draw_sprite(entity.kind.texture_key(), entity.pos, depth, 1.0, false);
    }

    let player = &state.player;
    host.draw_sprite(
        "player",
        player.pos,
        depth::PLAYER,
        1.0,
        player.facing == Facing::Left,
    );

    for popup in &state.popups {
        host.draw_text(&popup.text, popup.pos, depth::POPUPS, 1.0, popup.life.clamp(0.0, 1.0));
    }

    let score = format!("Score: {}", player.score);
    host.draw_text(&score, Vec2::new(32.0, 32.0), depth::HUD, 0.0, 1.0);
}
