//! Egg entity

use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// An egg waiting to hatch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Egg {
    pub id: u32,
    pub coords: Point,
    /// When the egg was laid (ms)
    pub layed_time: f64,
    pub hatching_duration: f64,
}

impl Egg {
    pub fn new(id: u32, coords: Point, layed_time: f64, hatching_duration: f64) -> Self {
        Self {
            id,
            coords,
            layed_time,
            hatching_duration,
        }
    }

    /// True once the hatch time has been reached
    #[inline]
    pub fn is_hatched(&self, now: f64) -> bool {
        now >= self.layed_time + self.hatching_duration
    }

    /// Fraction of the hatch time elapsed, in `[0, 1]`
    pub fn hatch_progress(&self, now: f64) -> f32 {
        ((now - self.layed_time) / self.hatching_duration).clamp(0.0, 1.0) as f32
    }
}
