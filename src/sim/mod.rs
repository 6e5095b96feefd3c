//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod camera;
pub mod entity;
pub mod level;
pub mod motion;
pub mod physics;
pub mod player;
pub mod resolve;
pub mod rng;
pub mod shape;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use entity::{Entity, EntityId, EntityKind, EntityRegistry};
pub use level::{CoinSpec, EnemySpec, GroundSpan, PlatformSpec, Section, generate, generate_section};
pub use motion::{Axis, Oscillation};
pub use physics::{Contact, ContactKind};
pub use player::{Facing, Lifecycle, Outcome, PlayerState};
pub use resolve::{Approach, DeathCause, GameEvent, check_fall, is_stomp, resolve};
pub use rng::LevelRng;
pub use shape::{Aabb, Shape};
pub use state::{Popup, SceneRequest, SessionState, SessionSummary};
pub use tick::{TickInput, autopilot, tick};
