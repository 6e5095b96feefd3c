//! Data-driven game balance
//!
//! All values a designer might want to tweak without touching code. Loaded
//! from JSON; any field missing from the file keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Level ===
    /// Total level width (px)
    pub level_width: f32,
    /// Width of one generated section (px)
    pub section_width: f32,

    // === Player ===
    /// Horizontal run speed (px/s)
    pub player_speed: f32,
    /// Vertical velocity applied on jump (negative = up)
    pub jump_velocity: f32,
    /// Gravity acceleration (px/s²)
    pub gravity: f32,
    /// Terminal fall speed (px/s)
    pub max_fall_speed: f32,
    /// Upward impulse magnitude used for stomp bounces
    pub bounce_impulse: f32,
    /// Fraction of `bounce_impulse` applied after a stomp
    pub stomp_bounce_factor: f32,
    /// Distance below the world bottom at which the player is considered fallen
    pub fall_margin: f32,

    // === Scene exit ===
    /// Delay before leaving the scene after death (seconds)
    pub death_exit_delay: f32,
    /// Delay before leaving the scene after reaching the goal (seconds)
    pub goal_exit_delay: f32,

    // === Camera ===
    /// Deadzone size as (width, height) in px
    pub camera_deadzone: (f32, f32),
    /// Per-tick follow lerp factor (0-1)
    pub camera_lerp: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            level_width: 12800.0,
            section_width: 1600.0,

            player_speed: 400.0,
            jump_velocity: -950.0,
            gravity: 2000.0,
            max_fall_speed: 1400.0,
            bounce_impulse: 950.0,
            stomp_bounce_factor: 0.6,
            fall_margin: 100.0,

            death_exit_delay: 1.0,
            goal_exit_delay: 2.5,

            camera_deadzone: (WORLD_WIDTH * 0.2, WORLD_HEIGHT * 0.3),
            camera_lerp: 0.1,
        }
    }
}

impl Tuning {
    /// Parse tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize tuning to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Vertical position past which the player has fallen out of the world
    pub fn fall_threshold(&self) -> f32 {
        WORLD_HEIGHT + self.fall_margin
    }

    /// Vertical velocity applied to the player after stomping an enemy
    pub fn stomp_bounce_velocity(&self) -> f32 {
        -self.stomp_bounce_factor * self.bounce_impulse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_speed": 250.0 }"#).unwrap();
        assert_eq!(tuning.player_speed, 250.0);
        assert_eq!(tuning.level_width, Tuning::default().level_width);
    }

    #[test]
    fn test_json_roundtrip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load("/definitely/not/here/tuning.json");
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_derived_values() {
        let tuning = Tuning::default();
        assert!((tuning.stomp_bounce_velocity() - (-570.0)).abs() < 0.001);
        assert!(tuning.fall_threshold() > WORLD_HEIGHT);
    }
}
