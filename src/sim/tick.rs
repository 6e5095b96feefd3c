//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session deterministically. Per tick:
//! movement intent, entity motions, physics, overlap resolution, fall check,
//! camera, then deferred work (popups, scene exit).

use super::entity::EntityKind;
use super::physics;
use super::resolve::{check_fall, resolve};
use super::state::{Popup, SceneRequest, SessionState};
use crate::consts::*;

/// How far ahead the autopilot looks for ground and enemies
const AUTOPILOT_LOOKAHEAD: f32 = 110.0;
const AUTOPILOT_ENEMY_RANGE: f32 = 160.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Jump requested this tick
    pub jump: bool,
    /// Idle/demo mode - autopilot plays the level
    pub idle_mode: bool,
}

/// Advance the session by one fixed timestep.
///
/// Returns the scene change on the tick its delay runs out, and never again.
pub fn tick(state: &mut SessionState, input: &TickInput, dt: f32) -> Option<SceneRequest> {
    state.time_ticks += 1;
    state.events.clear();

    let input = if input.idle_mode {
        autopilot(state)
    } else {
        input.clone()
    };

    state
        .player
        .apply_movement_intent(input.move_left, input.move_right, input.jump, &state.tuning);

    state.registry.advance_motions(dt);

    let contacts = physics::step(&mut state.player, &state.registry, &state.tuning, dt);

    // All pairs of this tick are resolved together before anything else reacts
    let mut events = resolve(&contacts, &mut state.player, &mut state.registry, &state.tuning);
    events.extend(check_fall(&mut state.player, &state.tuning));

    for event in &events {
        if let Some((text, pos)) = event.popup() {
            state.popups.push(Popup::new(text, pos));
        }
        if let Some(outcome) = event.outcome() {
            state.schedule_exit(outcome);
        }
    }
    state.events = events;

    state.camera.follow(state.player.pos);
    state.update_popups(dt);
    state.advance_exit()
}

/// Demo input: run right, jump over gaps and enemies
pub fn autopilot(state: &SessionState) -> TickInput {
    let player = &state.player;
    let probe_x = player.pos.x + AUTOPILOT_LOOKAHEAD;

    let ground_ahead = state.registry.solids().any(|e| {
        let b = e.shape.bounds_at(e.pos);
        e.kind == EntityKind::Ground && b.min.x <= probe_x && b.max.x >= probe_x
    });

    let feet = player.bounds().bottom();
    let enemy_ahead = state.registry.sensors().any(|e| {
        let dx = e.pos.x - player.pos.x;
        e.kind == EntityKind::Enemy
            && dx > 0.0
            && dx < AUTOPILOT_ENEMY_RANGE
            && (e.pos.y - feet).abs() < PLAYER_HEIGHT
    });

    TickInput {
        move_left: false,
        move_right: true,
        jump: player.on_ground && (!ground_ahead || enemy_ahead),
        idle_mode: true,
    }
}
