//! Game balance and preferences
//!
//! Read once at startup from inline JSON; never written back.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while reading a settings document
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub max_chicken_quantity: usize,
    pub hatching_duration_ms: f64,
    pub egg_offset_x: f32,
    pub move_duration_base_ms: f64,
    pub move_duration_variance_ms: f64,
    pub chicken_speed: f32,
    pub tap_speed_factor: f32,
    pub leave_speed_factor: f32,
    pub jump_slowing_factor: f64,
    pub jump_height_divisor: f32,
    pub jump_drift: f32,
    pub welcome_slowing_factor: f64,
    pub welcome_transition_ms: f64,
    pub max_frame_dt: f32,
    pub asset_timeout_ms: f64,
    pub walk_frame_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_chicken_quantity: MAX_CHICKEN_QUANTITY,
            hatching_duration_ms: HATCHING_DURATION_MS,
            egg_offset_x: EGG_OFFSET_X,
            move_duration_base_ms: MOVE_DURATION_BASE_MS,
            move_duration_variance_ms: MOVE_DURATION_VARIANCE_MS,
            chicken_speed: CHICKEN_SPEED,
            tap_speed_factor: TAP_SPEED_FACTOR,
            leave_speed_factor: LEAVE_SPEED_FACTOR,
            jump_slowing_factor: JUMP_SLOWING_FACTOR,
            jump_height_divisor: JUMP_HEIGHT_DIVISOR,
            jump_drift: JUMP_DRIFT,
            welcome_slowing_factor: WELCOME_SLOWING_FACTOR,
            welcome_transition_ms: WELCOME_TRANSITION_MS,
            max_frame_dt: MAX_FRAME_DT,
            asset_timeout_ms: ASSET_TIMEOUT_MS,
            walk_frame_ms: WALK_FRAME_MS,
        }
    }
}

impl Tuning {
    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_chicken_quantity == 0 {
            return Err(SettingsError::Invalid(
                "max_chicken_quantity must be at least 1".into(),
            ));
        }

        let durations = [
            ("hatching_duration_ms", self.hatching_duration_ms),
            ("move_duration_base_ms", self.move_duration_base_ms),
            ("jump_slowing_factor", self.jump_slowing_factor),
            ("welcome_slowing_factor", self.welcome_slowing_factor),
            ("welcome_transition_ms", self.welcome_transition_ms),
            ("asset_timeout_ms", self.asset_timeout_ms),
            ("walk_frame_ms", self.walk_frame_ms),
        ];
        for (name, value) in durations {
            if !(value > 0.0) {
                return Err(SettingsError::Invalid(format!("{name} must be positive")));
            }
        }
        if self.move_duration_variance_ms < 0.0 {
            return Err(SettingsError::Invalid(
                "move_duration_variance_ms must not be negative".into(),
            ));
        }

        let factors = [
            ("chicken_speed", self.chicken_speed),
            ("tap_speed_factor", self.tap_speed_factor),
            ("leave_speed_factor", self.leave_speed_factor),
            ("jump_height_divisor", self.jump_height_divisor),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (name, value) in factors {
            if !(value > 0.0) {
                return Err(SettingsError::Invalid(format!("{name} must be positive")));
            }
        }

        Ok(())
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gameplay balance
    pub tuning: Tuning,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Start muted (browsers block autoplay anyway until the first tap)
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            master_volume: 0.8,
            muted: false,
        }
    }
}

impl Settings {
    /// Element holding optional inline JSON settings
    pub const ELEMENT_ID: &'static str = "tuning";

    /// Parse and validate a settings document; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.tuning.validate()?;
        Ok(settings)
    }

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        let Some(json) = json else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from page");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring page settings: {}", e);
                Self::default()
            }
        }
    }

    /// Native builds read `CHICKEN_TAP_SETTINGS` if it is set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(json) = std::env::var("CHICKEN_TAP_SETTINGS") else {
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring CHICKEN_TAP_SETTINGS: {}", e);
                Self::default()
            }
        }
    }
}
