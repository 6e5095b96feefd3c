//! Scene host contract and scene flow
//!
//! The simulation asks for a scene change once per session; the host owns
//! what a scene actually is. `SceneFlow` is the in-crate host: it runs the
//! game scene and the two end screens, and restarts on a pointer press.

use serde::{Deserialize, Serialize};

use crate::Tuning;
use crate::sim::{SessionState, TickInput, tick};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneId {
    Game,
    GameOver,
    GameClear,
}

/// Data handed to the next scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScenePayload {
    /// Final score of the finished session (0 if absent)
    #[serde(default)]
    pub score: u64,
}

/// Something that can switch scenes
pub trait SceneHost {
    fn transition_to(&mut self, scene: SceneId, payload: ScenePayload);
}

/// What is currently on screen
#[derive(Debug, Clone)]
pub enum ActiveScene {
    Game(Box<SessionState>),
    /// End screen showing the final score, waiting for a pointer press
    Result { scene: SceneId, score: u64 },
}

/// Game → GameOver/GameClear → Game loop
#[derive(Debug, Clone)]
pub struct SceneFlow {
    pub tuning: Tuning,
    pub active: ActiveScene,
    /// Seed for the next session; bumped on every restart
    next_seed: u64,
    /// Number of scene transitions performed
    pub transitions: u32,
}

impl SceneFlow {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let session = SessionState::new(seed, tuning.clone());
        Self {
            tuning,
            active: ActiveScene::Game(Box::new(session)),
            next_seed: seed.wrapping_add(1),
            transitions: 0,
        }
    }

    pub fn scene_id(&self) -> SceneId {
        match &self.active {
            ActiveScene::Game(_) => SceneId::Game,
            ActiveScene::Result { scene, .. } => *scene,
        }
    }

    pub fn session(&self) -> Option<&SessionState> {
        match &self.active {
            ActiveScene::Game(session) => Some(session.as_ref()),
            ActiveScene::Result { .. } => None,
        }
    }

    /// Advance the game scene by one tick; end screens are static
    pub fn update(&mut self, input: &TickInput, dt: f32) {
        let request = match &mut self.active {
            ActiveScene::Game(session) => tick(session, input, dt),
            ActiveScene::Result { .. } => None,
        };
        if let Some(request) = request {
            self.transition_to(request.scene, request.payload);
        }
    }

    /// Pointer press: restart from an end screen
    pub fn pointer_down(&mut self) {
        if matches!(self.active, ActiveScene::Result { .. }) {
            self.transition_to(SceneId::Game, ScenePayload::default());
        }
    }
}

impl SceneHost for SceneFlow {
    fn transition_to(&mut self, scene: SceneId, payload: ScenePayload) {
        self.transitions += 1;
        log::info!("Scene -> {:?} (score {})", scene, payload.score);

        self.active = match scene {
            SceneId::Game => {
                // Fresh session; nothing from the previous run survives
                let seed = self.next_seed;
                self.next_seed = self.next_seed.wrapping_add(1);
                ActiveScene::Game(Box::new(SessionState::new(seed, self.tuning.clone())))
            }
            SceneId::GameOver | SceneId::GameClear => ActiveScene::Result {
                scene,
                score: payload.score,
            },
        };
    }
}
