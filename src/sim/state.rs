//! Session state and core simulation types
//!
//! One `SessionState` per attempt at a level. Restarting builds a fresh
//! value; nothing carries over from the previous attempt.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::entity::{EntityKind, EntityRegistry};
use super::level::{Section, generate};
use super::player::{Lifecycle, Outcome, PlayerState};
use super::resolve::GameEvent;
use super::rng::LevelRng;
use crate::consts::*;
use crate::scene::{SceneId, ScenePayload};
use crate::{Tuning, secs_to_ticks};

/// Floating "+N" score text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Popup {
    pub text: String,
    pub pos: Vec2,
    /// 1 at spawn, fades to 0
    pub life: f32,
}

impl Popup {
    pub fn new(text: String, pos: Vec2) -> Self {
        Self { text, pos, life: 1.0 }
    }

    /// Rise and fade; returns false once fully faded
    pub fn update(&mut self, dt: f32) -> bool {
        self.pos.y -= POPUP_RISE_SPEED * dt;
        self.life -= dt / POPUP_LIFETIME;
        self.life > 0.0
    }
}

/// A scene change waiting for its presentation delay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingExit {
    pub ticks_remaining: u32,
    pub scene: SceneId,
    pub payload: ScenePayload,
}

/// Scene change requested by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneRequest {
    pub scene: SceneId,
    pub payload: ScenePayload,
}

/// Compact end-of-run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub ticks: u64,
    pub score: u64,
    pub lifecycle: Lifecycle,
    pub player_x: f32,
    pub coins_left: usize,
    pub enemies_left: usize,
}

/// Complete state of one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Level seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Generated layout (kept for inspection; entities are built from it once)
    pub sections: Vec<Section>,
    pub registry: EntityRegistry,
    pub player: PlayerState,
    pub camera: Camera,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    /// Score popups (not gameplay-affecting)
    #[serde(skip)]
    pub popups: Vec<Popup>,
    /// Scene exit waiting on its delay
    pub pending_exit: Option<PendingExit>,
    /// Set once the scene exit has been handed to the host
    pub exit_fired: bool,
}

impl SessionState {
    /// Generate the level and spawn everything for a new session
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = LevelRng::new(seed);
        let sections = generate(tuning.level_width, tuning.section_width, &mut rng);
        let registry = EntityRegistry::build(&sections, tuning.level_width, &mut rng);
        let player = PlayerState::default();
        let mut camera = Camera::new(&tuning);
        camera.snap_to(player.pos);

        log::info!("Session started: seed={}, sections={}", seed, sections.len());

        Self {
            seed,
            tuning,
            sections,
            registry,
            player,
            camera,
            time_ticks: 0,
            events: Vec::new(),
            popups: Vec::new(),
            pending_exit: None,
            exit_fired: false,
        }
    }

    /// Schedule the scene exit for a terminal outcome. Only the first call counts.
    pub fn schedule_exit(&mut self, outcome: Outcome) -> bool {
        if self.pending_exit.is_some() || self.exit_fired {
            return false;
        }

        let (scene, delay) = match outcome {
            Outcome::Died => (SceneId::GameOver, self.tuning.death_exit_delay),
            Outcome::Goal => (SceneId::GameClear, self.tuning.goal_exit_delay),
        };
        let ticks = secs_to_ticks(delay);
        log::debug!("Scene exit to {:?} in {} ticks", scene, ticks);

        self.pending_exit = Some(PendingExit {
            ticks_remaining: ticks,
            scene,
            payload: ScenePayload {
                score: self.player.score,
            },
        });
        true
    }

    /// Count down the pending exit; yields the request exactly once
    pub fn advance_exit(&mut self) -> Option<SceneRequest> {
        let pending = self.pending_exit.as_mut()?;
        pending.ticks_remaining = pending.ticks_remaining.saturating_sub(1);
        if pending.ticks_remaining > 0 {
            return None;
        }

        let pending = self.pending_exit.take()?;
        self.exit_fired = true;
        log::info!("Leaving to {:?} with score {}", pending.scene, pending.payload.score);
        Some(SceneRequest {
            scene: pending.scene,
            payload: pending.payload,
        })
    }

    /// Age popups and drop the faded ones
    pub fn update_popups(&mut self, dt: f32) {
        self.popups.retain_mut(|p| p.update(dt));
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            seed: self.seed,
            ticks: self.time_ticks,
            score: self.player.score,
            lifecycle: self.player.lifecycle,
            player_x: self.player.pos.x,
            coins_left: self.registry.count(EntityKind::Coin),
            enemies_left: self.registry.count(EntityKind::Enemy),
        }
    }
}
