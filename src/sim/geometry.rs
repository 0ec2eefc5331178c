//! 2D geometry helpers for the canvas plane
//!
//! Canvas coordinates: origin top-left, y grows downward.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A canvas position or direction
pub type Point = Vec2;

/// Unit vector from `from` toward `to`.
///
/// `None` when the two points coincide; callers treat that as
/// "already at the destination".
#[inline]
pub fn direction_between(from: Point, to: Point) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// The visible canvas rectangle `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Inclusive containment test
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }

    /// Containment in the rectangle grown by `margin` on every side
    pub fn contains_expanded(&self, p: Point, margin: Vec2) -> bool {
        p.x >= -margin.x
            && p.x <= self.width + margin.x
            && p.y >= -margin.y
            && p.y <= self.height + margin.y
    }

    /// Uniformly random point inside the rectangle
    pub fn random_point<R: Rng>(&self, rng: &mut R) -> Point {
        Vec2::new(
            rng.random::<f32>() * self.width,
            rng.random::<f32>() * self.height,
        )
    }
}

/// Axis-aligned sprite box centered on an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteBox {
    pub center: Point,
    pub half_extents: Vec2,
}

impl SpriteBox {
    pub fn new(center: Point, size: Vec2) -> Self {
        Self {
            center,
            half_extents: size / 2.0,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        let d = (p - self.center).abs();
        d.x <= self.half_extents.x && d.y <= self.half_extents.y
    }
}
