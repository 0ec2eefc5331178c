//! Chicken Tap - a browser tapping game
//!
//! Core modules:
//! - `sim`: Simulation (entities, phases, per-frame update)
//! - `assets`: Asset manifest, loading gate and named lookup
//! - `input`: Raw pointer/key events to simulation commands
//! - `render`: Read-only frame snapshot and sprite selection
//! - `audio`: Sound cues for game events
//! - `settings`: Data-driven game balance

pub mod assets;
pub mod audio;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError, Tuning};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Population cap; exceeding it triggers a reset wave
    pub const MAX_CHICKEN_QUANTITY: usize = 25;

    /// Egg hatch time (ms)
    pub const HATCHING_DURATION_MS: f64 = 4000.0;
    /// Horizontal distance between a tapped chicken and its egg
    pub const EGG_OFFSET_X: f32 = 30.0;

    /// Destination re-roll timer: base + U(0,1) * variance (ms)
    pub const MOVE_DURATION_BASE_MS: f64 = 1000.0;
    pub const MOVE_DURATION_VARIANCE_MS: f64 = 5000.0;

    /// Starting chicken speed (px/s)
    pub const CHICKEN_SPEED: f32 = 100.0;
    /// Speed multiplier applied after every completed jump (uncapped)
    pub const TAP_SPEED_FACTOR: f32 = 1.1;
    /// Speed multiplier applied when a reset wave sends a chicken away
    pub const LEAVE_SPEED_FACTOR: f32 = 2.0;

    /// Jump arc: sin(elapsed / slowing * deg) * sprite_h / divisor
    pub const JUMP_SLOWING_FACTOR: f64 = 5.0;
    pub const JUMP_HEIGHT_DIVISOR: f32 = 1.5;
    /// Horizontal nudge while airborne (px/s)
    pub const JUMP_DRIFT: f32 = 0.1;

    /// Welcome mascot jump cycle slowing factor
    pub const WELCOME_SLOWING_FACTOR: f64 = 3.0;
    /// Welcome scale-down transition length (ms)
    pub const WELCOME_TRANSITION_MS: f64 = 500.0;

    /// Largest frame delta fed to the simulation (s), e.g. after a hidden tab
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Give up on asset loading after this long (ms)
    pub const ASSET_TIMEOUT_MS: f64 = 15_000.0;

    /// Walk cycle frame length (ms)
    pub const WALK_FRAME_MS: f64 = 150.0;

    /// Sprite size used until the real images report their dimensions
    pub const DEFAULT_SPRITE_WIDTH: f32 = 64.0;
    pub const DEFAULT_SPRITE_HEIGHT: f32 = 64.0;
}
