//! Frame snapshot for the renderer
//!
//! The renderer never touches `GameState` directly. Each frame the shell
//! captures a [`Snapshot`] after `update` and hands it to a [`Renderer`].

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use serde::Serialize;

use crate::assets::names;
use crate::sim::{Chicken, ChickenState, Egg, GamePhase, GameState};

/// Egg sprite switches to cracked for the last quarter of the hatch time
const EGG_CRACK_PROGRESS: f32 = 0.75;

/// Draws one frame from a snapshot
pub trait Renderer {
    type Error;

    fn draw(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error>;
}

/// A chicken as drawn this frame (center coordinates)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChickenSprite {
    pub x: f32,
    pub y: f32,
    /// Height above ground while jumping
    pub lift: f32,
    pub image: &'static str,
    /// Facing left
    pub flipped: bool,
}

/// An egg as drawn this frame (center coordinates)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EggSprite {
    pub x: f32,
    pub y: f32,
    pub image: &'static str,
}

/// The welcome screen mascot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MascotSprite {
    pub x: f32,
    pub y: f32,
    pub lift: f32,
    pub scale: f32,
}

/// Read-only view of the game for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub width: f32,
    pub height: f32,
    pub sprite_width: f32,
    pub sprite_height: f32,
    pub chickens: Vec<ChickenSprite>,
    pub eggs: Vec<EggSprite>,
    pub mascot: Option<MascotSprite>,
    pub score: u64,
    pub population: usize,
}

impl Snapshot {
    pub fn capture(state: &GameState, now: f64) -> Self {
        let bounds = state.layout.bounds;
        let sprite = state.layout.sprite_size;
        let tuning = &state.tuning;

        let mascot = (state.phase == GamePhase::WelcomeScreen).then(|| {
            let center = bounds.center();
            MascotSprite {
                x: center.x,
                y: center.y,
                lift: state
                    .welcome
                    .jump_y(now, tuning.welcome_slowing_factor, sprite.y),
                scale: state.welcome.scale(now, tuning.welcome_transition_ms),
            }
        });

        let (chickens, eggs) = if state.phase == GamePhase::MainGame {
            (
                state
                    .chickens
                    .iter()
                    .map(|c| chicken_sprite(c, now, tuning.walk_frame_ms))
                    .collect(),
                state.eggs.iter().map(|e| egg_sprite(e, now)).collect(),
            )
        } else {
            (Vec::new(), Vec::new())
        };

        Self {
            phase: state.phase,
            width: bounds.width,
            height: bounds.height,
            sprite_width: sprite.x,
            sprite_height: sprite.y,
            chickens,
            eggs,
            mascot,
            score: state.total_score,
            population: state.resident_count(),
        }
    }

    /// JSON form, for debugging overlays
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Pick the chicken image: jump pose in the air, two-frame walk otherwise
pub fn chicken_frame(chicken: &Chicken, now: f64, walk_frame_ms: f64) -> &'static str {
    if chicken.state == ChickenState::Jumping {
        return names::CHICKEN_JUMP;
    }
    if chicken.move_vec.x == 0.0 && chicken.move_vec.y == 0.0 {
        return names::CHICKEN;
    }
    let elapsed = (now - chicken.move_animation_start).max(0.0);
    if (elapsed / walk_frame_ms) as u64 % 2 == 0 {
        names::CHICKEN_WALK_1
    } else {
        names::CHICKEN_WALK_2
    }
}

fn chicken_sprite(chicken: &Chicken, now: f64, walk_frame_ms: f64) -> ChickenSprite {
    ChickenSprite {
        x: chicken.coords.x,
        y: chicken.coords.y,
        lift: chicken.jump_offset,
        image: chicken_frame(chicken, now, walk_frame_ms),
        flipped: chicken.move_vec.x < 0.0,
    }
}

fn egg_sprite(egg: &Egg, now: f64) -> EggSprite {
    let image = if egg.hatch_progress(now) >= EGG_CRACK_PROGRESS {
        names::EGG_CRACKED
    } else {
        names::EGG
    };
    EggSprite {
        x: egg.coords.x,
        y: egg.coords.y,
        image,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use crate::sim::{self, Layout};
    use glam::Vec2;

    fn main_game() -> GameState {
        let mut state = GameState::new(6, Tuning::default(), Layout::new(800.0, 600.0));
        state.phase = GamePhase::MainGame;
        state
    }

    #[test]
    fn test_walk_cycle_alternates() {
        let mut state = main_game();
        state.add_chicken(Vec2::new(100.0, 100.0), 0.0);
        let chicken = &mut state.chickens[0];
        chicken.move_vec = Vec2::X;

        assert_eq!(chicken_frame(chicken, 0.0, 150.0), names::CHICKEN_WALK_1);
        assert_eq!(chicken_frame(chicken, 160.0, 150.0), names::CHICKEN_WALK_2);
        assert_eq!(chicken_frame(chicken, 310.0, 150.0), names::CHICKEN_WALK_1);

        chicken.move_vec = Vec2::ZERO;
        assert_eq!(chicken_frame(chicken, 160.0, 150.0), names::CHICKEN);

        chicken.state = ChickenState::Jumping;
        assert_eq!(chicken_frame(chicken, 160.0, 150.0), names::CHICKEN_JUMP);
    }

    #[test]
    fn test_capture_main_game() {
        let mut state = main_game();
        state.add_chicken(Vec2::new(100.0, 100.0), 0.0);
        state.chickens[0].move_vec = Vec2::NEG_X;
        state.add_egg(Vec2::new(50.0, 50.0), 0.0);
        state.total_score = 7;

        let snap = Snapshot::capture(&state, 3500.0);
        assert_eq!(snap.chickens.len(), 1);
        assert!(snap.chickens[0].flipped);
        assert_eq!(snap.eggs[0].image, names::EGG_CRACKED);
        assert_eq!(snap.score, 7);
        assert_eq!(snap.population, 1);
        assert!(snap.mascot.is_none());
    }

    #[test]
    fn test_capture_welcome_has_mascot_only() {
        let mut state = GameState::new(6, Tuning::default(), Layout::new(800.0, 600.0));
        sim::finish_loading(&mut state, 0.0);
        let snap = Snapshot::capture(&state, 540.0);
        let mascot = snap.mascot.expect("mascot on welcome screen");
        assert_eq!(mascot.scale, 2.0);
        assert!((mascot.lift - 32.0).abs() < 1e-3);
        assert!(snap.chickens.is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = main_game();
        let json = Snapshot::capture(&state, 0.0).to_json().unwrap();
        assert!(json.contains("\"phase\":\"MainGame\""));
    }
}
