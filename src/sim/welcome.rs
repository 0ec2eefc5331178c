//! Welcome screen intro animation
//!
//! The mascot hops in place until the player taps or presses a key. The
//! intro then waits for the mascot to touch the ground, and finally shrinks
//! it from 2x to 1x before the main game starts.

use serde::{Deserialize, Serialize};

/// Result of advancing the intro by one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroStep {
    /// Still hopping, or waiting for the mascot to land
    Waiting,
    /// Scale-down transition running
    Transitioning,
    /// Transition complete; enter the main game
    Finished,
}

/// Welcome screen timers
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WelcomeIntro {
    /// When the welcome screen appeared (ms)
    pub started_at: f64,
    /// First input timestamp, then restarted at the landing zero-cross
    pub transition_start: Option<f64>,
    /// Mascot has landed after the first input
    pub jump_done: bool,
}

impl WelcomeIntro {
    pub fn new(started_at: f64) -> Self {
        Self {
            started_at,
            transition_start: None,
            jump_done: false,
        }
    }

    /// Record a tap or key press; only the first one counts
    pub fn record_input(&mut self, now: f64) {
        if self.transition_start.is_none() {
            self.transition_start = Some(now);
        }
    }

    /// Mascot height above ground (px), never negative
    pub fn jump_y(&self, now: f64, slowing_factor: f64, sprite_height: f32) -> f32 {
        if self.jump_done {
            return 0.0;
        }
        let angle = ((now - self.started_at) / slowing_factor).to_radians();
        (-(angle.cos() as f32) * sprite_height / 2.0).max(0.0)
    }

    /// Linear progress of the scale-down transition, in `[0, 1]`
    pub fn transition_progress(&self, now: f64, transition_ms: f64) -> f32 {
        match (self.jump_done, self.transition_start) {
            (true, Some(start)) => ((now - start) / transition_ms).clamp(0.0, 1.0) as f32,
            _ => 0.0,
        }
    }

    /// Mascot draw scale: 2x while hopping, shrinking to 1x during the transition
    pub fn scale(&self, now: f64, transition_ms: f64) -> f32 {
        2.0 - self.transition_progress(now, transition_ms)
    }

    /// Advance the intro state machine
    pub fn advance(
        &mut self,
        now: f64,
        slowing_factor: f64,
        sprite_height: f32,
        transition_ms: f64,
    ) -> IntroStep {
        if !self.jump_done {
            if self.transition_start.is_some()
                && self.jump_y(now, slowing_factor, sprite_height) <= 0.0
            {
                self.jump_done = true;
                self.transition_start = Some(now);
                return IntroStep::Transitioning;
            }
            return IntroStep::Waiting;
        }

        if self.transition_progress(now, transition_ms) >= 1.0 {
            IntroStep::Finished
        } else {
            IntroStep::Transitioning
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLOWING: f64 = 3.0;
    const HEIGHT: f32 = 64.0;
    const TRANSITION: f64 = 500.0;

    #[test]
    fn test_hops_forever_without_input() {
        let mut intro = WelcomeIntro::new(0.0);
        for t in (0..5000).step_by(37) {
            assert_eq!(
                intro.advance(t as f64, SLOWING, HEIGHT, TRANSITION),
                IntroStep::Waiting
            );
        }
        assert!(!intro.jump_done);
    }

    #[test]
    fn test_jump_height_clamped() {
        let intro = WelcomeIntro::new(0.0);
        assert_eq!(intro.jump_y(0.0, SLOWING, HEIGHT), 0.0);
        // 540ms / 3 = 180 degrees: top of the hop
        assert!((intro.jump_y(540.0, SLOWING, HEIGHT) - 32.0).abs() < 1e-3);
        // 900ms = 300 degrees: ground half of the cycle
        assert_eq!(intro.jump_y(900.0, SLOWING, HEIGHT), 0.0);
    }

    #[test]
    fn test_input_mid_air_waits_for_landing() {
        let mut intro = WelcomeIntro::new(0.0);
        intro.record_input(400.0);
        assert_eq!(intro.advance(400.0, SLOWING, HEIGHT, TRANSITION), IntroStep::Waiting);
        assert_eq!(intro.advance(600.0, SLOWING, HEIGHT, TRANSITION), IntroStep::Waiting);

        // Lands at 270 degrees + a little
        assert_eq!(
            intro.advance(820.0, SLOWING, HEIGHT, TRANSITION),
            IntroStep::Transitioning
        );
        assert!(intro.jump_done);
        assert_eq!(intro.transition_start, Some(820.0));
    }

    #[test]
    fn test_transition_lasts_half_a_second() {
        let mut intro = WelcomeIntro::new(0.0);
        intro.record_input(0.0);
        assert_eq!(intro.advance(0.0, SLOWING, HEIGHT, TRANSITION), IntroStep::Transitioning);
        assert_eq!(intro.scale(250.0, TRANSITION), 1.5);
        assert_eq!(
            intro.advance(499.0, SLOWING, HEIGHT, TRANSITION),
            IntroStep::Transitioning
        );
        assert_eq!(intro.advance(500.0, SLOWING, HEIGHT, TRANSITION), IntroStep::Finished);
        assert_eq!(intro.scale(500.0, TRANSITION), 1.0);
    }

    #[test]
    fn test_only_first_input_recorded() {
        let mut intro = WelcomeIntro::new(0.0);
        intro.record_input(100.0);
        intro.record_input(200.0);
        assert_eq!(intro.transition_start, Some(100.0));
        assert_eq!(intro.scale(200.0, TRANSITION), 2.0);
    }
}
