//! Frame timestamps to simulation deltas

use serde::{Deserialize, Serialize};

/// Converts display-synced callback timestamps (ms) into elapsed seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationClock {
    previous: Option<f64>,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self { previous: None }
    }

    /// Timestamp of the last frame seen (ms)
    pub fn previous(&self) -> Option<f64> {
        self.previous
    }

    /// Seconds since the previous frame, clamped to `[0, max_dt]`.
    ///
    /// The first frame yields zero. The `max_dt` cap is intentional: after a
    /// long stall (a backgrounded tab) entities move at most one capped step
    /// instead of jumping by the whole gap.
    pub fn advance(&mut self, now: f64, max_dt: f32) -> f32 {
        let dt = match self.previous {
            Some(prev) => ((now - prev) / 1000.0) as f32,
            None => 0.0,
        };
        self.previous = Some(now);
        dt.clamp(0.0, max_dt)
    }
}
