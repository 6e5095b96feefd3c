//! Live level entities
//!
//! Materializes generated sections into ground tiles, platforms, coins,
//! enemies and the goal flag. Coins and enemies carry an oscillation that
//! lives exactly as long as the entity.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::Section;
use super::motion::Oscillation;
use super::rng::LevelRng;
use super::shape::Shape;
use crate::consts::*;

/// Stable entity identifier (allocation order)
pub type EntityId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Ground,
    Platform,
    Coin,
    Enemy,
    Flag,
}

impl EntityKind {
    /// Solid bodies block the player; the rest only report overlaps
    pub fn is_solid(self) -> bool {
        matches!(self, EntityKind::Ground | EntityKind::Platform)
    }

    /// Texture key handed to the render host
    pub fn texture_key(self) -> &'static str {
        match self {
            EntityKind::Ground => "ground",
            EntityKind::Platform => "platform",
            EntityKind::Coin => "coin",
            EntityKind::Enemy => "enemy",
            EntityKind::Flag => "flag",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Center position
    pub pos: Vec2,
    pub shape: Shape,
    /// Whether the physics step applies gravity to this body
    pub gravity: bool,
}

/// All live entities of a session, sorted by id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    motions: BTreeMap<EntityId, Oscillation>,
    next_id: EntityId,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            motions: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Build the registry for a generated level, plus the goal flag
    pub fn build(sections: &[Section], level_width: f32, rng: &mut LevelRng) -> Self {
        let mut registry = Self::new();
        for section in sections {
            registry.add_section(section, rng);
        }
        registry.spawn_flag(level_width);

        log::info!(
            "Registry built: ground={}, platforms={}, coins={}, enemies={}",
            registry.count(EntityKind::Ground),
            registry.count(EntityKind::Platform),
            registry.count(EntityKind::Coin),
            registry.count(EntityKind::Enemy)
        );
        registry
    }

    /// Materialize one section
    pub fn add_section(&mut self, section: &Section, rng: &mut LevelRng) {
        for span in &section.ground_spans {
            let tiles = (span.width / TILE_WIDTH).ceil() as u32;
            for i in 0..tiles {
                let center = Vec2::new(
                    span.x + i as f32 * TILE_WIDTH + TILE_WIDTH / 2.0,
                    GROUND_TOP + TILE_HEIGHT / 2.0,
                );
                self.spawn(EntityKind::Ground, center, Shape::rect(TILE_WIDTH, TILE_HEIGHT));
            }
        }

        for platform in &section.platforms {
            self.spawn(
                EntityKind::Platform,
                Vec2::new(platform.x, platform.y),
                Shape::rect(PLATFORM_WIDTH, PLATFORM_HEIGHT),
            );
        }

        for coin in &section.coins {
            let origin = Vec2::new(coin.x, coin.y);
            let id = self.spawn(EntityKind::Coin, origin, Shape::circle(COIN_RADIUS));
            let period = rng.range_f32(COIN_BOB_PERIOD_MIN, COIN_BOB_PERIOD_MAX);
            self.attach_motion(id, Oscillation::bob(origin, COIN_BOB_AMPLITUDE, period));
        }

        for enemy in &section.enemies {
            let origin = Vec2::new(enemy.x, enemy.y);
            let id = self.spawn(
                EntityKind::Enemy,
                origin,
                Shape::rect(ENEMY_BODY_WIDTH, ENEMY_BODY_HEIGHT),
            );
            let period = rng.range_f32(ENEMY_PATROL_PERIOD_MIN, ENEMY_PATROL_PERIOD_MAX);
            self.attach_motion(id, Oscillation::patrol(origin, ENEMY_PATROL_RANGE, period));
        }
    }

    /// Place the goal flag near the end of the level
    pub fn spawn_flag(&mut self, level_width: f32) -> EntityId {
        let pos = Vec2::new(
            level_width - FLAG_OFFSET_FROM_END,
            GROUND_TOP - FLAG_BODY_HEIGHT / 2.0,
        );
        self.spawn(EntityKind::Flag, pos, Shape::rect(FLAG_BODY_WIDTH, FLAG_BODY_HEIGHT))
    }

    /// Add a gravity-free entity and return its id
    pub fn spawn(&mut self, kind: EntityKind, pos: Vec2, shape: Shape) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        self.entities.push(Entity {
            id,
            kind,
            pos,
            shape,
            gravity: false,
        });
        id
    }

    /// Bind a motion to a live entity (replaces any previous one)
    pub fn attach_motion(&mut self, id: EntityId, motion: Oscillation) {
        if self.get(id).is_some() {
            self.motions.insert(id, motion);
        }
    }

    /// Cancel the entity's motion, then remove it. Absent ids are a no-op.
    pub fn destroy(&mut self, id: EntityId) -> Option<Entity> {
        self.motions.remove(&id);
        let idx = self.index_of(id)?;
        Some(self.entities.remove(idx))
    }

    /// Step every motion and move its entity
    pub fn advance_motions(&mut self, dt: f32) {
        for (&id, motion) in self.motions.iter_mut() {
            let pos = motion.step(dt);
            if let Ok(idx) = self.entities.binary_search_by_key(&id, |e| e.id) {
                self.entities[idx].pos = pos;
            }
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|idx| &self.entities[idx])
    }

    pub fn motion(&self, id: EntityId) -> Option<&Oscillation> {
        self.motions.get(&id)
    }

    pub fn has_motion(&self, id: EntityId) -> bool {
        self.motions.contains_key(&id)
    }

    pub fn motion_count(&self) -> usize {
        self.motions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Solid bodies (ground + platforms)
    pub fn solids(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.kind.is_solid())
    }

    /// Bodies that report overlaps (coins, enemies, flag)
    pub fn sensors(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| !e.kind.is_solid())
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        // Ids are allocated increasing and removal keeps order
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }
}
