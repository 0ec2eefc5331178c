//! Simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - Timestamps come in from the caller (ms)
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod chicken;
pub mod clock;
pub mod egg;
pub mod geometry;
pub mod state;
pub mod tick;
pub mod welcome;

pub use chicken::{Chicken, ChickenFate, ChickenState, TickContext};
pub use clock::SimulationClock;
pub use egg::Egg;
pub use geometry::{Bounds, Point, SpriteBox, direction_between};
pub use state::{GameEvent, GamePhase, GameState, Layout};
pub use tick::{finish_loading, input_time, key_press, resize, tap_at, update};
pub use welcome::{IntroStep, WelcomeIntro};
