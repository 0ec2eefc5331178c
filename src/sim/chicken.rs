//! Chicken entity and its per-tick state machine

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{Bounds, Point, SpriteBox, direction_between};
use crate::settings::Tuning;

/// Chicken behaviour state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChickenState {
    /// Wandering toward a random destination
    Moving,
    /// Airborne after a tap; lands back in `Moving`
    Jumping,
    /// Sent away by a reset wave; removed once off-screen
    Leaving,
}

/// What happened to a chicken during its update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChickenFate {
    Stays,
    /// Left the expanded canvas and must be removed
    Left,
}

/// Everything a chicken needs to know about the current tick
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    /// Frame timestamp (ms)
    pub now: f64,
    /// Elapsed seconds since the previous frame
    pub dt: f32,
    pub bounds: Bounds,
    pub sprite_size: Vec2,
    pub tuning: &'a Tuning,
}

/// A chicken entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chicken {
    pub id: u32,
    pub coords: Point,
    /// Unit direction of travel (zero while standing at its destination)
    pub move_vec: Vec2,
    pub move_vec_last_change: f64,
    /// Re-roll the destination after this long (ms)
    pub move_duration: f64,
    /// Speed (px/s)
    pub v: f32,
    pub state: ChickenState,
    pub jump_start: f64,
    /// Current height above ground while jumping (px, render only)
    pub jump_offset: f32,
    /// Walk cycle origin (render only)
    pub move_animation_start: f64,
}

impl Chicken {
    /// Spawn a moving chicken heading for a fresh random destination
    pub fn spawn<R: Rng>(id: u32, coords: Point, ctx: &TickContext<'_>, rng: &mut R) -> Self {
        let mut chicken = Self {
            id,
            coords,
            move_vec: Vec2::ZERO,
            move_vec_last_change: ctx.now,
            move_duration: 0.0,
            v: ctx.tuning.chicken_speed,
            state: ChickenState::Moving,
            jump_start: 0.0,
            jump_offset: 0.0,
            move_animation_start: ctx.now,
        };
        chicken.reroll_destination(ctx, rng);
        chicken
    }

    /// Tap hit box
    pub fn sprite_box(&self, sprite_size: Vec2) -> SpriteBox {
        SpriteBox::new(self.coords, sprite_size)
    }

    /// Head for `destination`, restarting the re-roll timer
    pub fn head_toward(&mut self, destination: Point, now: f64, move_duration: f64) {
        // Coincident points: stand still until the timer re-rolls
        self.move_vec = direction_between(self.coords, destination).unwrap_or(Vec2::ZERO);
        self.move_vec_last_change = now;
        self.move_duration = move_duration;
    }

    /// Pick a new uniformly random destination and move duration
    pub fn reroll_destination<R: Rng>(&mut self, ctx: &TickContext<'_>, rng: &mut R) {
        let destination = ctx.bounds.random_point(rng);
        let duration = ctx.tuning.move_duration_base_ms
            + rng.random::<f64>() * ctx.tuning.move_duration_variance_ms;
        self.head_toward(destination, ctx.now, duration);
    }

    /// Advance one tick
    pub fn update<R: Rng>(&mut self, ctx: &TickContext<'_>, rng: &mut R) -> ChickenFate {
        match self.state {
            ChickenState::Moving => {
                self.coords += self.move_vec * self.v * ctx.dt;

                let expired = ctx.now - self.move_vec_last_change > self.move_duration;
                if expired || !ctx.bounds.contains(self.coords) {
                    self.reroll_destination(ctx, rng);
                }
                ChickenFate::Stays
            }
            ChickenState::Jumping => {
                let elapsed = ctx.now - self.jump_start;
                let angle = (elapsed / ctx.tuning.jump_slowing_factor).to_radians();
                let offset =
                    angle.sin() as f32 * ctx.sprite_size.y / ctx.tuning.jump_height_divisor;
                self.coords.x += ctx.tuning.jump_drift * ctx.dt;

                // A frame stamped before the tap has not left the ground yet
                if elapsed > 0.0 && offset < 0.0 {
                    self.land(ctx, rng);
                } else {
                    self.jump_offset = offset.max(0.0);
                }
                ChickenFate::Stays
            }
            ChickenState::Leaving => {
                self.coords += self.move_vec * self.v * ctx.dt;

                if ctx.bounds.contains_expanded(self.coords, ctx.sprite_size) {
                    ChickenFate::Stays
                } else {
                    ChickenFate::Left
                }
            }
        }
    }

    /// Back on the ground: faster, with a new destination
    fn land<R: Rng>(&mut self, ctx: &TickContext<'_>, rng: &mut R) {
        self.state = ChickenState::Moving;
        self.jump_offset = 0.0;
        self.v *= ctx.tuning.tap_speed_factor;
        self.move_animation_start = ctx.now;
        self.reroll_destination(ctx, rng);
    }

    /// Tap a moving chicken: it starts jumping and returns where its egg lands.
    ///
    /// The egg goes behind the chicken, opposite to its horizontal heading.
    pub fn tap(&mut self, now: f64, egg_offset_x: f32) -> Option<Point> {
        if self.state != ChickenState::Moving {
            return None;
        }
        self.state = ChickenState::Jumping;
        self.jump_start = now;
        self.jump_offset = 0.0;

        let dx = if self.move_vec.x > 0.0 {
            -egg_offset_x
        } else {
            egg_offset_x
        };
        Some(Vec2::new(self.coords.x + dx, self.coords.y))
    }

    /// Send the chicken off toward `destination`, multiplying its speed.
    ///
    /// Applies again to chickens that are already leaving, so speed compounds.
    pub fn leave(&mut self, destination: Point, speed_factor: f32) {
        self.state = ChickenState::Leaving;
        self.jump_offset = 0.0;
        self.move_vec = direction_between(self.coords, destination)
            .or_else(|| self.move_vec.try_normalize())
            .unwrap_or(Vec2::X);
        self.v *= speed_factor;
    }
}
