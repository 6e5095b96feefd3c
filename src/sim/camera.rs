//! Deadzone camera follow
//!
//! The camera only moves once the target leaves a box around the view
//! center, then eases toward it. The view never leaves the level.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Tuning;
use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// View center in world space
    pub center: Vec2,
    /// Visible area size
    pub viewport: Vec2,
    /// Deadzone size around the center
    pub deadzone: Vec2,
    /// Fraction of the remaining distance covered per update (0-1]
    pub lerp: f32,
    /// World extent the view is clamped to, from (0, 0)
    pub bounds: Vec2,
}

impl Camera {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            center: Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0),
            viewport: Vec2::new(WORLD_WIDTH, WORLD_HEIGHT),
            deadzone: Vec2::new(tuning.camera_deadzone.0, tuning.camera_deadzone.1),
            lerp: tuning.camera_lerp.clamp(0.0, 1.0),
            bounds: Vec2::new(tuning.level_width, WORLD_HEIGHT),
        }
    }

    /// Center on the target immediately (session start)
    pub fn snap_to(&mut self, target: Vec2) {
        self.center = self.clamp_center(target);
    }

    /// Move toward the target if it has left the deadzone
    pub fn follow(&mut self, target: Vec2) {
        let half_dz = self.deadzone * 0.5;
        let delta = target - self.center;

        // Distance the target sits outside the deadzone on each axis
        let excess = Vec2::new(
            excess_1d(delta.x, half_dz.x),
            excess_1d(delta.y, half_dz.y),
        );

        self.center = self.clamp_center(self.center + excess * self.lerp);
    }

    /// Top-left corner of the view
    pub fn scroll(&self) -> Vec2 {
        self.center - self.viewport * 0.5
    }

    fn clamp_center(&self, center: Vec2) -> Vec2 {
        let half = self.viewport * 0.5;
        let clamp_axis = |c: f32, half: f32, extent: f32| {
            if extent <= half * 2.0 {
                // Level smaller than the view: pin to the level middle
                extent / 2.0
            } else {
                c.clamp(half, extent - half)
            }
        };
        Vec2::new(
            clamp_axis(center.x, half.x, self.bounds.x),
            clamp_axis(center.y, half.y, self.bounds.y),
        )
    }
}

fn excess_1d(delta: f32, half: f32) -> f32 {
    if delta > half {
        delta - half
    } else if delta < -half {
        delta + half
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        let tuning = Tuning::default();
        let mut camera = Camera::new(&tuning);
        camera.lerp = 1.0;
        camera
    }

    #[test]
    fn test_no_motion_inside_deadzone() {
        let mut camera = camera();
        camera.snap_to(Vec2::new(5000.0, 540.0));
        let before = camera.center;

        camera.follow(Vec2::new(5000.0 + camera.deadzone.x * 0.4, 540.0));
        assert_eq!(camera.center, before);
    }

    #[test]
    fn test_follows_past_deadzone_edge() {
        let mut camera = camera();
        camera.snap_to(Vec2::new(5000.0, 540.0));
        let target = Vec2::new(5000.0 + camera.deadzone.x * 0.5 + 100.0, 540.0);

        camera.follow(target);
        assert!((camera.center.x - 5100.0).abs() < 0.001);
    }

    #[test]
    fn test_lerp_smooths_motion() {
        let mut camera = camera();
        camera.lerp = 0.1;
        camera.snap_to(Vec2::new(5000.0, 540.0));
        camera.follow(Vec2::new(5000.0 + camera.deadzone.x * 0.5 + 100.0, 540.0));
        assert!((camera.center.x - 5010.0).abs() < 0.001);
    }

    #[test]
    fn test_clamped_to_level() {
        let mut camera = camera();
        camera.snap_to(Vec2::new(0.0, 0.0));
        assert_eq!(camera.scroll(), Vec2::ZERO);

        camera.snap_to(Vec2::new(1.0e6, 1.0e6));
        assert_eq!(camera.scroll().x + camera.viewport.x, camera.bounds.x);
        assert_eq!(camera.center.y, WORLD_HEIGHT / 2.0);
    }
}
