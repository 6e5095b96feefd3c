//! Gameplay resolution for player overlaps
//!
//! Turns the contacts of one physics step into score changes, entity
//! removals and at most one terminal outcome. Works on plain data so every
//! rule can be exercised without a running session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{EntityId, EntityKind, EntityRegistry};
use super::physics::Contact;
use super::player::{Outcome, PlayerState};
use crate::Tuning;
use crate::consts::{COIN_SCORE, GOAL_SCORE, STOMP_SCORE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Enemy(EntityId),
    Fall,
}

/// Something that happened this step that other systems react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected { entity: EntityId, pos: Vec2, points: u64 },
    EnemyStomped { entity: EntityId, pos: Vec2, points: u64 },
    Died { cause: DeathCause, score: u64 },
    GoalReached { score: u64 },
}

impl GameEvent {
    /// Terminal outcome carried by this event, if any
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            GameEvent::Died { .. } => Some(Outcome::Died),
            GameEvent::GoalReached { .. } => Some(Outcome::Goal),
            _ => None,
        }
    }

    /// Score popup text and position for award events
    pub fn popup(&self) -> Option<(String, Vec2)> {
        match self {
            GameEvent::CoinCollected { pos, points, .. }
            | GameEvent::EnemyStomped { pos, points, .. } => Some((format!("+{}", points), *pos)),
            _ => None,
        }
    }
}

/// How the player came into this step's contacts, fixed before any of them
/// is resolved so one pair cannot change the verdict for the next
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Approach {
    pub falling: bool,
    /// Feet height when the step began
    pub feet: f32,
}

impl Approach {
    pub fn of(player: &PlayerState) -> Self {
        Self {
            falling: player.vel.y > 0.0,
            feet: player.prev_feet,
        }
    }
}

/// Stomp iff the player is falling and its feet were above the enemy's center
pub fn is_stomp(approach: Approach, enemy_center_y: f32) -> bool {
    approach.falling && approach.feet < enemy_center_y
}

/// Resolve every overlap of this step, in order
pub fn resolve(
    contacts: &[Contact],
    player: &mut PlayerState,
    registry: &mut EntityRegistry,
    tuning: &Tuning,
) -> Vec<GameEvent> {
    let approach = Approach::of(player);
    let mut events = Vec::new();
    let mut stomped = false;

    for contact in contacts.iter().filter(|c| c.is_overlap()) {
        if !player.is_alive() {
            break;
        }

        let event = match contact.kind {
            EntityKind::Coin => collect_coin(contact.other, player, registry),
            EntityKind::Enemy => hit_enemy(contact.other, approach, player, registry),
            EntityKind::Flag => reach_goal(player),
            EntityKind::Ground | EntityKind::Platform => None,
        };

        if let Some(event) = event {
            stomped |= matches!(event, GameEvent::EnemyStomped { .. });
            log::debug!("{:?}", event);
            events.push(event);
        }
    }

    // One bounce however many enemies went down together
    if stomped && player.is_alive() {
        player.vel.y = tuning.stomp_bounce_velocity();
    }

    events
}

/// Kill the player once it drops below the world
pub fn check_fall(player: &mut PlayerState, tuning: &Tuning) -> Option<GameEvent> {
    if player.pos.y <= tuning.fall_threshold() {
        return None;
    }
    die(player, DeathCause::Fall)
}

fn collect_coin(
    id: EntityId,
    player: &mut PlayerState,
    registry: &mut EntityRegistry,
) -> Option<GameEvent> {
    // Already collected by an earlier pair this step
    let coin = registry.destroy(id)?;
    player.add_score(COIN_SCORE);
    Some(GameEvent::CoinCollected {
        entity: id,
        pos: coin.pos,
        points: COIN_SCORE,
    })
}

fn hit_enemy(
    id: EntityId,
    approach: Approach,
    player: &mut PlayerState,
    registry: &mut EntityRegistry,
) -> Option<GameEvent> {
    let enemy_y = registry.get(id)?.pos.y;

    if !is_stomp(approach, enemy_y) {
        return die(player, DeathCause::Enemy(id));
    }

    let enemy = registry.destroy(id)?;
    player.add_score(STOMP_SCORE);
    Some(GameEvent::EnemyStomped {
        entity: id,
        pos: enemy.pos,
        points: STOMP_SCORE,
    })
}

fn reach_goal(player: &mut PlayerState) -> Option<GameEvent> {
    if !player.try_enter_terminal(Outcome::Goal) {
        return None;
    }
    player.add_score(GOAL_SCORE);
    player.freeze();
    log::info!("Goal reached, score {}", player.score);
    Some(GameEvent::GoalReached {
        score: player.score,
    })
}

fn die(player: &mut PlayerState, cause: DeathCause) -> Option<GameEvent> {
    if !player.try_enter_terminal(Outcome::Died) {
        return None;
    }
    log::info!("Player died ({:?}), score {}", cause, player.score);
    Some(GameEvent::Died {
        cause,
        score: player.score,
    })
}
