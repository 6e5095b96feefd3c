//! Collision shapes and overlap tests
//!
//! Bodies are either axis-aligned boxes or circles, both centered on the
//! entity position. Physics pushes the player out of solid boxes one axis
//! at a time; sensors only need a yes/no overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Collision shape, relative to the owning entity's center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Axis-aligned box with half extents
    Rect { half: Vec2 },
    /// Circle with radius
    Circle { radius: f32 },
}

impl Shape {
    pub fn rect(width: f32, height: f32) -> Self {
        Shape::Rect {
            half: Vec2::new(width / 2.0, height / 2.0),
        }
    }

    pub fn circle(radius: f32) -> Self {
        Shape::Circle { radius }
    }

    /// Bounding box of the shape placed at `pos`
    pub fn bounds_at(&self, pos: Vec2) -> Aabb {
        match *self {
            Shape::Rect { half } => Aabb::from_center(pos, half),
            Shape::Circle { radius } => Aabb::from_center(pos, Vec2::splat(radius)),
        }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    /// Lower edge (y grows downward)
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Strict overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Closest point inside the box to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

/// Check whether two placed shapes overlap
pub fn shapes_overlap(a: &Shape, a_pos: Vec2, b: &Shape, b_pos: Vec2) -> bool {
    match (*a, *b) {
        (Shape::Rect { .. }, Shape::Rect { .. }) => a.bounds_at(a_pos).overlaps(&b.bounds_at(b_pos)),
        (Shape::Rect { .. }, Shape::Circle { radius }) => {
            circle_box_overlap(b_pos, radius, &a.bounds_at(a_pos))
        }
        (Shape::Circle { radius }, Shape::Rect { .. }) => {
            circle_box_overlap(a_pos, radius, &b.bounds_at(b_pos))
        }
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            a_pos.distance_squared(b_pos) < (ra + rb) * (ra + rb)
        }
    }
}

/// Circle vs box overlap via closest point
pub fn circle_box_overlap(center: Vec2, radius: f32, aabb: &Aabb) -> bool {
    let closest = aabb.closest_point(center);
    center.distance_squared(closest) < radius * radius
}
