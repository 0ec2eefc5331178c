//! Game state and core simulation types
//!
//! One `GameState` owns every chicken and egg. It is created by the shell,
//! mutated only by the functions in `tick`, and read by the renderer.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::chicken::{Chicken, ChickenState, TickContext};
use super::clock::SimulationClock;
use super::egg::Egg;
use super::geometry::{Bounds, Point};
use super::welcome::WelcomeIntro;
use crate::consts::{DEFAULT_SPRITE_HEIGHT, DEFAULT_SPRITE_WIDTH};
use crate::settings::Tuning;

/// Top-level game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for assets; input ignored
    Loading,
    /// Mascot intro, waiting for the first tap
    WelcomeScreen,
    /// Active gameplay
    MainGame,
    /// Run ended (no transition leads here yet)
    GameOver,
}

/// Things that happened during a tick or input dispatch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    EggLaid { pos: (f32, f32) },
    EggHatched { pos: (f32, f32) },
    /// A leaving chicken made it off-screen (+1 score)
    ChickenLeft { id: u32 },
    /// Population cap exceeded; `leaving` chickens were sent away
    ResetWave { leaving: usize },
}

/// Canvas and sprite dimensions the simulation works against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub bounds: Bounds,
    /// Chicken sprite size (px); also the hit box
    pub sprite_size: Vec2,
}

impl Layout {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            bounds: Bounds::new(width, height),
            sprite_size: Vec2::new(DEFAULT_SPRITE_WIDTH, DEFAULT_SPRITE_HEIGHT),
        }
    }

    pub fn with_sprite_size(mut self, width: f32, height: f32) -> Self {
        self.sprite_size = Vec2::new(width, height);
        self
    }

    /// Per-tick context for entity updates
    pub fn context<'a>(&self, tuning: &'a Tuning, now: f64, dt: f32) -> TickContext<'a> {
        TickContext {
            now,
            dt,
            bounds: self.bounds,
            sprite_size: self.sprite_size,
            tuning,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub layout: Layout,
    /// Current phase
    pub phase: GamePhase,
    /// Live chickens in insertion order
    pub chickens: Vec<Chicken>,
    /// Unhatched eggs in lay order
    pub eggs: Vec<Egg>,
    /// When the welcome screen appeared (ms)
    pub game_initialised: f64,
    pub welcome: WelcomeIntro,
    /// Chickens that left through a reset wave
    pub total_score: u64,
    pub clock: SimulationClock,
    /// Pending events, drained by the shell each frame
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game state in the `Loading` phase
    pub fn new(seed: u64, tuning: Tuning, layout: Layout) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            layout,
            phase: GamePhase::Loading,
            chickens: Vec::new(),
            eggs: Vec::new(),
            game_initialised: 0.0,
            welcome: WelcomeIntro::default(),
            total_score: 0,
            clock: SimulationClock::new(),
            events: Vec::new(),
            next_id: 1,
        };
        state.reset();
        state
    }

    /// Reinitialize every mutable field except the phase
    pub fn reset(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.chickens.clear();
        self.eggs.clear();
        self.game_initialised = 0.0;
        self.welcome = WelcomeIntro::new(0.0);
        self.total_score = 0;
        self.clock = SimulationClock::new();
        self.events.clear();
        self.next_id = 1;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of chickens that are not on their way out
    pub fn resident_count(&self) -> usize {
        self.chickens
            .iter()
            .filter(|c| c.state != ChickenState::Leaving)
            .count()
    }

    /// Append a moving chicken at `coords`.
    ///
    /// Going over the population cap sends every other chicken away toward
    /// the canvas center with doubled speed. Chickens already leaving are
    /// sent again and their speed compounds.
    pub fn add_chicken(&mut self, coords: Point, now: f64) -> u32 {
        let id = self.next_entity_id();
        let ctx = self.layout.context(&self.tuning, now, 0.0);
        let chicken = Chicken::spawn(id, coords, &ctx, &mut self.rng);
        self.chickens.push(chicken);

        if self.chickens.len() > self.tuning.max_chicken_quantity {
            self.start_reset_wave();
        }
        id
    }

    /// Send all but the newest chicken toward the center and off-screen
    fn start_reset_wave(&mut self) {
        let center = self.layout.bounds.center();
        let spread = self.layout.sprite_size.x / 2.0;
        let factor = self.tuning.leave_speed_factor;
        let Some((_, older)) = self.chickens.split_last_mut() else {
            return;
        };

        for chicken in older.iter_mut() {
            let jitter = Vec2::new(
                (self.rng.random::<f32>() * 2.0 - 1.0) * spread,
                (self.rng.random::<f32>() * 2.0 - 1.0) * spread,
            );
            chicken.leave(center + jitter, factor);
        }

        let leaving = older.len();
        log::info!("Reset wave: {} chickens leaving", leaving);
        self.events.push(GameEvent::ResetWave { leaving });
    }

    /// Lay an egg at `coords`
    pub fn add_egg(&mut self, coords: Point, now: f64) -> u32 {
        let id = self.next_entity_id();
        self.eggs
            .push(Egg::new(id, coords, now, self.tuning.hatching_duration_ms));
        self.events.push(GameEvent::EggLaid {
            pos: (coords.x, coords.y),
        });
        id
    }
}
