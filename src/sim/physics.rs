//! Arcade physics step for the player body
//!
//! Gravity, axis-separated movement against solid ground/platforms, and an
//! overlap query against every sensor (coin, enemy, flag). Level entities
//! are kinematic: only their oscillations move them.

use glam::Vec2;

use super::entity::{EntityId, EntityKind, EntityRegistry};
use super::player::PlayerState;
use super::shape::{Aabb, Shape, shapes_overlap};
use crate::Tuning;
use crate::consts::*;

/// Vertical slack ignored when pushing the player out sideways
const FLOOR_SKIN: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// Bodies passed through each other (sensor)
    Overlap,
    /// Solid body blocked the player
    Solid,
}

/// One (player, other) pair reported by a physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub other: EntityId,
    pub kind: EntityKind,
    pub contact: ContactKind,
}

impl Contact {
    pub fn is_overlap(&self) -> bool {
        self.contact == ContactKind::Overlap
    }
}

/// Integrate the player and return every contact for this step, in id order
pub fn step(
    player: &mut PlayerState,
    registry: &EntityRegistry,
    tuning: &Tuning,
    dt: f32,
) -> Vec<Contact> {
    let mut contacts = Vec::new();
    player.prev_feet = player.bounds().bottom();

    if player.gravity_enabled {
        player.vel.y = (player.vel.y + tuning.gravity * dt).min(tuning.max_fall_speed);
    }

    let half = Vec2::new(PLAYER_WIDTH / 2.0, PLAYER_HEIGHT / 2.0);

    // Horizontal pass
    player.pos.x += player.vel.x * dt;
    player.pos.x = player.pos.x.clamp(half.x, (tuning.level_width - half.x).max(half.x));
    let side_half = Vec2::new(half.x, (half.y - FLOOR_SKIN).max(0.0));
    for solid in registry.solids() {
        let body = Aabb::from_center(player.pos, side_half);
        let other = solid.shape.bounds_at(solid.pos);
        if !body.overlaps(&other) {
            continue;
        }
        if player.pos.x < other.center().x {
            player.pos.x = other.min.x - half.x;
        } else {
            player.pos.x = other.max.x + half.x;
        }
        player.vel.x = 0.0;
        contacts.push(solid_contact(solid.id, solid.kind));
    }

    // Vertical pass
    player.pos.y += player.vel.y * dt;
    player.on_ground = false;
    for solid in registry.solids() {
        let body = Aabb::from_center(player.pos, half);
        let other = solid.shape.bounds_at(solid.pos);
        if !body.overlaps(&other) {
            continue;
        }
        if player.vel.y >= 0.0 {
            player.pos.y = other.min.y - half.y;
            player.on_ground = true;
        } else {
            player.pos.y = other.max.y + half.y;
        }
        player.vel.y = 0.0;
        if !contacts.iter().any(|c| c.other == solid.id) {
            contacts.push(solid_contact(solid.id, solid.kind));
        }
    }

    contacts.extend(overlaps(player, registry));
    contacts.sort_by_key(|c| c.other);
    contacts
}

/// Sensor overlaps for the player's current position
pub fn overlaps(player: &PlayerState, registry: &EntityRegistry) -> Vec<Contact> {
    let body = Shape::rect(PLAYER_WIDTH, PLAYER_HEIGHT);
    registry
        .sensors()
        .filter(|e| shapes_overlap(&body, player.pos, &e.shape, e.pos))
        .map(|e| Contact {
            other: e.id,
            kind: e.kind,
            contact: ContactKind::Overlap,
        })
        .collect()
}

fn solid_contact(other: EntityId, kind: EntityKind) -> Contact {
    Contact {
        other,
        kind,
        contact: ContactKind::Solid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    fn floor_registry() -> EntityRegistry {
        let mut registry = EntityRegistry::new();
        for i in 0..10 {
            registry.spawn(
                EntityKind::Ground,
                Vec2::new(i as f32 * TILE_WIDTH + TILE_WIDTH / 2.0, GROUND_TOP + TILE_HEIGHT / 2.0),
                Shape::rect(TILE_WIDTH, TILE_HEIGHT),
            );
        }
        registry
    }

    #[test]
    fn test_falls_and_lands_on_ground() {
        let tuning = Tuning::default();
        let registry = floor_registry();
        let mut player = PlayerState::new(Vec2::new(200.0, 700.0));

        for _ in 0..120 {
            step(&mut player, &registry, &tuning, SIM_DT);
        }

        assert!(player.on_ground);
        assert!((player.bounds().bottom() - GROUND_TOP).abs() < 0.01);
        assert_eq!(player.vel.y, 0.0);
    }

    #[test]
    fn test_walks_across_tile_seams() {
        let tuning = Tuning::default();
        let registry = floor_registry();
        let mut player = PlayerState::new(Vec2::new(100.0, GROUND_TOP - PLAYER_HEIGHT / 2.0));

        for _ in 0..60 {
            player.vel.x = tuning.player_speed;
            step(&mut player, &registry, &tuning, SIM_DT);
        }

        // 400 px/s for one second, no snagging on tile edges
        assert!((player.pos.x - 500.0).abs() < 1.0);
        assert!(player.on_ground);
    }

    #[test]
    fn test_falls_through_gap() {
        let tuning = Tuning::default();
        let registry = EntityRegistry::new();
        let mut player = PlayerState::new(Vec2::new(200.0, 900.0));

        for _ in 0..60 {
            step(&mut player, &registry, &tuning, SIM_DT);
        }
        assert!(!player.on_ground);
        assert!(player.pos.y > tuning.fall_threshold());
    }

    #[test]
    fn test_head_bumps_platform() {
        let tuning = Tuning::default();
        let mut registry = EntityRegistry::new();
        let platform = registry.spawn(
            EntityKind::Platform,
            Vec2::new(200.0, 600.0),
            Shape::rect(PLATFORM_WIDTH, PLATFORM_HEIGHT),
        );
        let mut player = PlayerState::new(Vec2::new(200.0, 660.0));
        player.vel.y = -900.0;

        let contacts = step(&mut player, &registry, &tuning, SIM_DT);
        assert_eq!(player.vel.y, 0.0);
        assert!(player.bounds().top() >= 616.0 - 0.01);
        assert!(contacts.iter().any(|c| c.other == platform && !c.is_overlap()));
    }

    #[test]
    fn test_reports_sensor_overlaps() {
        let tuning = Tuning::default();
        let mut registry = EntityRegistry::new();
        let coin = registry.spawn(EntityKind::Coin, Vec2::new(210.0, 500.0), Shape::circle(COIN_RADIUS));
        registry.spawn(EntityKind::Coin, Vec2::new(900.0, 500.0), Shape::circle(COIN_RADIUS));
        let mut player = PlayerState::new(Vec2::new(200.0, 500.0));
        player.gravity_enabled = false;

        let contacts = step(&mut player, &registry, &tuning, SIM_DT);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].other, coin);
        assert!(contacts[0].is_overlap());
    }

    #[test]
    fn test_level_bounds_clamp() {
        let tuning = Tuning::default();
        let registry = EntityRegistry::new();
        let mut player = PlayerState::new(Vec2::new(30.0, 500.0));
        player.gravity_enabled = false;
        player.vel.x = -tuning.player_speed;

        step(&mut player, &registry, &tuning, SIM_DT);
        assert_eq!(player.pos.x, PLAYER_WIDTH / 2.0);
    }
}
