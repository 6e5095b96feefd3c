//! Player body and lifecycle
//!
//! The lifecycle only moves forward: `Alive` can become `Dead` or
//! `GoalReached`, and both are final for the session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::shape::Aabb;
use crate::Tuning;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    Alive,
    Dead,
    GoalReached,
}

impl Lifecycle {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Lifecycle::Alive)
    }
}

/// Outcome of a terminal transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Died,
    Goal,
}

impl Outcome {
    pub fn lifecycle(self) -> Lifecycle {
        match self {
            Outcome::Died => Lifecycle::Dead,
            Outcome::Goal => Lifecycle::GoalReached,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    /// Bottom edge when the latest physics step began
    pub prev_feet: f32,
    pub on_ground: bool,
    pub facing: Facing,
    pub gravity_enabled: bool,
    pub lifecycle: Lifecycle,
    pub score: u64,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y))
    }
}

impl PlayerState {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            prev_feet: pos.y + PLAYER_HEIGHT / 2.0,
            on_ground: false,
            facing: Facing::Right,
            gravity_enabled: true,
            lifecycle: Lifecycle::Alive,
            score: 0,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lifecycle == Lifecycle::Alive
    }

    /// Collision box at the current position
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::new(PLAYER_WIDTH / 2.0, PLAYER_HEIGHT / 2.0))
    }

    /// Apply this frame's movement intent. Ignored once the run has ended.
    pub fn apply_movement_intent(&mut self, left: bool, right: bool, jump: bool, tuning: &Tuning) {
        if !self.is_alive() {
            return;
        }

        self.vel.x = match (left, right) {
            (true, false) => {
                self.facing = Facing::Left;
                -tuning.player_speed
            }
            (false, true) => {
                self.facing = Facing::Right;
                tuning.player_speed
            }
            _ => 0.0,
        };

        if jump && self.on_ground {
            self.vel.y = tuning.jump_velocity;
            self.on_ground = false;
        }
    }

    /// Award points; score only ever grows
    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Check-and-set terminal guard. Returns true only for the first call.
    pub fn try_enter_terminal(&mut self, outcome: Outcome) -> bool {
        if self.lifecycle.is_terminal() {
            log::trace!("Ignoring {:?}, already {:?}", outcome, self.lifecycle);
            return false;
        }
        self.lifecycle = outcome.lifecycle();
        true
    }

    /// Stop in place and stop falling
    pub fn freeze(&mut self) {
        self.vel = Vec2::ZERO;
        self.gravity_enabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grounded() -> PlayerState {
        let mut player = PlayerState::default();
        player.on_ground = true;
        player
    }

    #[test]
    fn test_run_and_face() {
        let tuning = Tuning::default();
        let mut player = grounded();

        player.apply_movement_intent(true, false, false, &tuning);
        assert_eq!(player.vel.x, -tuning.player_speed);
        assert_eq!(player.facing, Facing::Left);

        player.apply_movement_intent(false, true, false, &tuning);
        assert_eq!(player.vel.x, tuning.player_speed);
        assert_eq!(player.facing, Facing::Right);

        // Both held cancels out, facing unchanged
        player.apply_movement_intent(true, true, false, &tuning);
        assert_eq!(player.vel.x, 0.0);
        assert_eq!(player.facing, Facing::Right);
    }

    #[test]
    fn test_jump_requires_ground() {
        let tuning = Tuning::default();
        let mut player = grounded();

        player.apply_movement_intent(false, false, true, &tuning);
        assert_eq!(player.vel.y, tuning.jump_velocity);
        assert!(!player.on_ground);

        player.vel.y = 100.0;
        player.apply_movement_intent(false, false, true, &tuning);
        assert_eq!(player.vel.y, 100.0);
    }

    #[test]
    fn test_intent_ignored_after_terminal() {
        let tuning = Tuning::default();
        let mut player = grounded();
        assert!(player.try_enter_terminal(Outcome::Died));

        player.apply_movement_intent(false, true, true, &tuning);
        assert_eq!(player.vel, Vec2::ZERO);
        assert!(player.on_ground);
    }

    #[test]
    fn test_terminal_guard_is_one_shot() {
        let mut player = PlayerState::default();
        assert!(player.try_enter_terminal(Outcome::Goal));
        assert!(!player.try_enter_terminal(Outcome::Died));
        assert!(!player.try_enter_terminal(Outcome::Goal));
        assert_eq!(player.lifecycle, Lifecycle::GoalReached);
    }

    #[test]
    fn test_freeze() {
        let mut player = PlayerState::default();
        player.vel = Vec2::new(300.0, -200.0);
        player.freeze();
        assert_eq!(player.vel, Vec2::ZERO);
        assert!(!player.gravity_enabled);
    }
}
