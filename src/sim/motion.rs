//! Repeating positional motions (coin bob, enemy patrol)
//!
//! An oscillation is a yoyo tween bound to one entity: it eases from its
//! origin out to `origin + amplitude` along one axis and back, forever.
//! The registry owns them keyed by entity id so destroying an entity can
//! cancel its motion in the same step.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis an oscillation moves along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn unit(self) -> Vec2 {
        match self {
            Axis::Horizontal => Vec2::X,
            Axis::Vertical => Vec2::Y,
        }
    }
}

/// Continuously repeating yoyo motion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Oscillation {
    /// Position at phase 0
    pub origin: Vec2,
    pub axis: Axis,
    /// Signed peak displacement (negative bobs upward)
    pub amplitude: f32,
    /// Full out-and-back period (seconds)
    pub period: f32,
    /// Time into the current cycle (seconds)
    pub elapsed: f32,
    /// Playback direction (+1 forward, -1 reversed)
    pub direction: f32,
}

impl Oscillation {
    pub fn new(origin: Vec2, axis: Axis, amplitude: f32, period: f32) -> Self {
        Self {
            origin,
            axis,
            amplitude,
            period: period.max(f32::EPSILON),
            elapsed: 0.0,
            direction: 1.0,
        }
    }

    /// Vertical bob (negative amplitude moves up first)
    pub fn bob(origin: Vec2, amplitude: f32, period: f32) -> Self {
        Self::new(origin, Axis::Vertical, -amplitude, period)
    }

    /// Horizontal patrol from origin to origin + range
    pub fn patrol(origin: Vec2, range: f32, period: f32) -> Self {
        Self::new(origin, Axis::Horizontal, range, period)
    }

    /// Advance the cycle and return the new position
    pub fn step(&mut self, dt: f32) -> Vec2 {
        self.elapsed = (self.elapsed + dt * self.direction).rem_euclid(self.period);
        self.position()
    }

    /// Eased displacement: 0 at phase 0, full amplitude at half period
    pub fn offset(&self) -> f32 {
        let phase = self.elapsed / self.period;
        self.amplitude * (1.0 - (phase * TAU).cos()) * 0.5
    }

    pub fn position(&self) -> Vec2 {
        self.origin + self.axis.unit() * self.offset()
    }

    /// Jump back to the start of the cycle
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
        self.direction = 1.0;
    }

    /// Play the cycle backwards from the current point
    pub fn reverse(&mut self) {
        self.direction = -self.direction;
    }
}
