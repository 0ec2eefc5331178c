//! Per-frame update and input handling
//!
//! The shell calls `update` once per animation frame and the input
//! functions synchronously from its event handlers.

use glam::Vec2;

use super::chicken::{ChickenFate, ChickenState};
use super::geometry::Point;
use super::state::{GameEvent, GamePhase, GameState};
use super::welcome::{IntroStep, WelcomeIntro};

/// Advance the game by one animation frame at timestamp `now` (ms)
pub fn update(state: &mut GameState, now: f64) {
    let dt = state.clock.advance(now, state.tuning.max_frame_dt);

    match state.phase {
        GamePhase::Loading | GamePhase::GameOver => {}
        GamePhase::WelcomeScreen => update_welcome(state, now),
        GamePhase::MainGame => update_main_game(state, now, dt),
    }
}

/// Timestamp for an input event, on the same clock as `update`.
///
/// Uses the last frame time; `fallback` only before the first frame.
pub fn input_time(state: &GameState, fallback: f64) -> f64 {
    state.clock.previous().unwrap_or(fallback)
}

/// All assets are in: show the welcome screen
pub fn finish_loading(state: &mut GameState, now: f64) {
    if state.phase != GamePhase::Loading {
        log::debug!("finish_loading ignored in {:?}", state.phase);
        return;
    }
    state.game_initialised = now;
    state.welcome = WelcomeIntro::new(now);
    set_phase(state, GamePhase::WelcomeScreen);
}

/// The canvas changed size
pub fn resize(state: &mut GameState, width: f32, height: f32) {
    state.layout.bounds.width = width;
    state.layout.bounds.height = height;
}

/// Handle a tap/click at canvas coordinates.
///
/// Returns the id of the chicken that was hit, if any.
pub fn tap_at(state: &mut GameState, pos: Point, now: f64) -> Option<u32> {
    match state.phase {
        GamePhase::Loading | GamePhase::GameOver => {
            log::debug!("Tap ignored in {:?}", state.phase);
            None
        }
        GamePhase::WelcomeScreen => {
            state.welcome.record_input(now);
            None
        }
        GamePhase::MainGame => tap_chicken(state, pos, now),
    }
}

/// Handle a key press: advances the welcome screen, or taps a random spot
pub fn key_press(state: &mut GameState, now: f64) -> Option<u32> {
    match state.phase {
        GamePhase::Loading | GamePhase::GameOver => None,
        GamePhase::WelcomeScreen => {
            state.welcome.record_input(now);
            None
        }
        GamePhase::MainGame => {
            let pos = state.layout.bounds.random_point(&mut state.rng);
            tap_chicken(state, pos, now)
        }
    }
}

/// First moving chicken under the pointer jumps and lays an egg
fn tap_chicken(state: &mut GameState, pos: Point, now: f64) -> Option<u32> {
    let sprite_size = state.layout.sprite_size;
    let offset = state.tuning.egg_offset_x;

    let chicken = state
        .chickens
        .iter_mut()
        .find(|c| c.state == ChickenState::Moving && c.sprite_box(sprite_size).contains(pos))?;
    let id = chicken.id;
    let egg_pos = chicken.tap(now, offset)?;

    state.add_egg(egg_pos, now);
    Some(id)
}

fn set_phase(state: &mut GameState, to: GamePhase) {
    let from = state.phase;
    if from == to {
        return;
    }
    log::info!("Phase {:?} -> {:?}", from, to);
    state.phase = to;
    state.events.push(GameEvent::PhaseChanged { from, to });
}

fn update_welcome(state: &mut GameState, now: f64) {
    let step = state.welcome.advance(
        now,
        state.tuning.welcome_slowing_factor,
        state.layout.sprite_size.y,
        state.tuning.welcome_transition_ms,
    );

    if step == IntroStep::Finished {
        set_phase(state, GamePhase::MainGame);
        // The mascot becomes the first chicken
        let center = state.layout.bounds.center();
        state.add_chicken(center, now);
    }
}

fn update_main_game(state: &mut GameState, now: f64, dt: f32) {
    // Chickens
    let ctx = state.layout.context(&state.tuning, now, dt);
    let mut departed = Vec::new();
    for (i, chicken) in state.chickens.iter_mut().enumerate() {
        if chicken.update(&ctx, &mut state.rng) == ChickenFate::Left {
            departed.push(i);
        }
    }
    // Reverse order keeps the remaining indices valid
    for i in departed.into_iter().rev() {
        let chicken = state.chickens.remove(i);
        state.total_score += 1;
        log::debug!("Chicken {} left, score {}", chicken.id, state.total_score);
        state.events.push(GameEvent::ChickenLeft { id: chicken.id });
    }

    // Eggs
    let hatched: Vec<usize> = state
        .eggs
        .iter()
        .enumerate()
        .filter(|(_, egg)| egg.is_hatched(now))
        .map(|(i, _)| i)
        .collect();
    let mut nests: Vec<Vec2> = Vec::with_capacity(hatched.len());
    for i in hatched.into_iter().rev() {
        nests.push(state.eggs.remove(i).coords);
    }
    // Spawn in lay order
    for coords in nests.into_iter().rev() {
        log::debug!("Egg hatched at ({:.0}, {:.0})", coords.x, coords.y);
        state.events.push(GameEvent::EggHatched {
            pos: (coords.x, coords.y),
        });
        state.add_chicken(coords, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use crate::sim::state::Layout;

    fn main_game(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default(), Layout::new(800.0, 600.0));
        state.phase = GamePhase::MainGame;
        state
    }

    /// Put a chicken at `pos` heading right with a long re-roll timer
    fn place_chicken(state: &mut GameState, pos: Vec2, now: f64) -> usize {
        state.add_chicken(pos, now);
        let idx = state.chickens.len() - 1;
        let chicken = &mut state.chickens[idx];
        chicken.move_vec = Vec2::X;
        chicken.move_duration = 1.0e9;
        idx
    }

    #[test]
    fn test_loading_to_welcome_to_main_game() {
        let mut state = GameState::new(1, Tuning::default(), Layout::new(800.0, 600.0));
        update(&mut state, 0.0);
        assert_eq!(state.phase, GamePhase::Loading);

        // Input is ignored while loading
        assert_eq!(tap_at(&mut state, Vec2::new(1.0, 1.0), 0.0), None);
        assert_eq!(state.welcome.transition_start, None);

        finish_loading(&mut state, 0.0);
        assert_eq!(state.phase, GamePhase::WelcomeScreen);
        assert_eq!(state.game_initialised, 0.0);

        // Mascot is on the ground at t=0, so a tap there starts the transition
        tap_at(&mut state, Vec2::new(1.0, 1.0), 0.0);
        update(&mut state, 0.0);
        assert!(state.welcome.jump_done);
        update(&mut state, 499.0);
        assert_eq!(state.phase, GamePhase::WelcomeScreen);
        update(&mut state, 500.0);
        assert_eq!(state.phase, GamePhase::MainGame);

        // Mascot turned into the first chicken
        assert_eq!(state.chickens.len(), 1);
        assert_eq!(state.chickens[0].coords, Vec2::new(400.0, 300.0));
        assert!(state.drain_events().contains(&GameEvent::PhaseChanged {
            from: GamePhase::WelcomeScreen,
            to: GamePhase::MainGame,
        }));
    }

    #[test]
    fn test_welcome_needs_input() {
        let mut state = GameState::new(1, Tuning::default(), Layout::new(800.0, 600.0));
        finish_loading(&mut state, 1000.0);
        for t in (1000..20_000).step_by(16) {
            update(&mut state, t as f64);
        }
        assert_eq!(state.phase, GamePhase::WelcomeScreen);

        key_press(&mut state, 20_000.0);
        assert_eq!(state.welcome.transition_start, Some(20_000.0));
    }

    #[test]
    fn test_finish_loading_only_once() {
        let mut state = GameState::new(1, Tuning::default(), Layout::new(800.0, 600.0));
        finish_loading(&mut state, 10.0);
        finish_loading(&mut state, 20.0);
        assert_eq!(state.game_initialised, 10.0);
    }

    #[test]
    fn test_tap_lays_one_egg_behind_chicken() {
        let mut state = main_game(5);
        let idx = place_chicken(&mut state, Vec2::new(200.0, 200.0), 0.0);
        let id = state.chickens[idx].id;

        let hit = tap_at(&mut state, Vec2::new(210.0, 190.0), 100.0);
        assert_eq!(hit, Some(id));
        assert_eq!(state.chickens[idx].state, ChickenState::Jumping);
        assert_eq!(state.eggs.len(), 1);
        assert_eq!(state.eggs[0].coords, Vec2::new(170.0, 200.0));
        assert_eq!(state.eggs[0].layed_time, 100.0);

        // Jumping chickens ignore taps
        assert_eq!(tap_at(&mut state, Vec2::new(200.0, 200.0), 120.0), None);
        assert_eq!(state.eggs.len(), 1);
    }

    #[test]
    fn test_tap_miss() {
        let mut state = main_game(5);
        place_chicken(&mut state, Vec2::new(200.0, 200.0), 0.0);
        assert_eq!(tap_at(&mut state, Vec2::new(300.0, 300.0), 0.0), None);
        assert!(state.eggs.is_empty());
    }

    #[test]
    fn test_tap_first_match_wins() {
        let mut state = main_game(5);
        let first = place_chicken(&mut state, Vec2::new(200.0, 200.0), 0.0);
        let second = place_chicken(&mut state, Vec2::new(210.0, 200.0), 0.0);

        tap_at(&mut state, Vec2::new(205.0, 200.0), 0.0);
        assert_eq!(state.chickens[first].state, ChickenState::Jumping);
        assert_eq!(state.chickens[second].state, ChickenState::Moving);

        // With the first one airborne, the next tap falls through
        tap_at(&mut state, Vec2::new(205.0, 200.0), 10.0);
        assert_eq!(state.chickens[second].state, ChickenState::Jumping);
        assert_eq!(state.eggs.len(), 2);
    }

    #[test]
    fn test_egg_hatches_into_chicken() {
        let mut tuning = Tuning::default();
        tuning.hatching_duration_ms = 3000.0;
        let mut state = GameState::new(3, tuning, Layout::new(800.0, 600.0));
        state.phase = GamePhase::MainGame;
        state.add_egg(Vec2::new(50.0, 60.0), 0.0);

        update(&mut state, 0.0);
        update(&mut state, 2999.0);
        assert_eq!(state.eggs.len(), 1);
        assert!(state.chickens.is_empty());

        update(&mut state, 3000.0);
        assert!(state.eggs.is_empty());
        assert_eq!(state.chickens.len(), 1);
        assert_eq!(state.chickens[0].coords, Vec2::new(50.0, 60.0));
        assert_eq!(state.chickens[0].state, ChickenState::Moving);
    }

    #[test]
    fn test_eggs_hatch_in_lay_order() {
        let mut state = main_game(3);
        state.add_egg(Vec2::new(10.0, 10.0), 0.0);
        state.add_egg(Vec2::new(20.0, 20.0), 10.0);
        state.add_egg(Vec2::new(30.0, 30.0), 9000.0);

        update(&mut state, 5000.0);
        assert_eq!(state.eggs.len(), 1);
        assert_eq!(state.eggs[0].coords, Vec2::new(30.0, 30.0));
        assert_eq!(state.chickens[0].coords, Vec2::new(10.0, 10.0));
        assert_eq!(state.chickens[1].coords, Vec2::new(20.0, 20.0));
    }

    #[test]
    fn test_leaving_chickens_score() {
        let mut state = main_game(8);
        place_chicken(&mut state, Vec2::new(5.0, 100.0), 0.0);
        place_chicken(&mut state, Vec2::new(400.0, 300.0), 0.0);
        place_chicken(&mut state, Vec2::new(5.0, 200.0), 0.0);
        let kept = state.chickens[1].id;
        for (i, chicken) in state.chickens.iter_mut().enumerate() {
            if i != 1 {
                chicken.state = ChickenState::Leaving;
                chicken.move_vec = Vec2::NEG_X;
                chicken.v = 1000.0;
            }
        }

        update(&mut state, 0.0);
        update(&mut state, 100.0);
        assert_eq!(state.chickens.len(), 1);
        assert_eq!(state.chickens[0].id, kept);
        assert_eq!(state.total_score, 2);
    }

    #[test]
    fn test_jump_completes_and_speeds_up() {
        let mut state = main_game(11);
        let idx = place_chicken(&mut state, Vec2::new(400.0, 300.0), 0.0);
        tap_at(&mut state, Vec2::new(400.0, 300.0), 0.0);

        let mut t = 0.0;
        while t <= 1000.0 {
            update(&mut state, t);
            t += 16.0;
        }
        let chicken = &state.chickens[idx];
        assert_eq!(chicken.state, ChickenState::Moving);
        assert!((chicken.v - 110.0).abs() < 1e-3);
    }

    #[test]
    fn test_input_time_follows_frame_clock() {
        let mut state = main_game(11);
        assert_eq!(input_time(&state, 1234.0), 1234.0);
        update(&mut state, 990.0);
        assert_eq!(input_time(&state, 1234.0), 990.0);
    }

    #[test]
    fn test_frame_stamped_before_tap_keeps_jumping() {
        let mut state = main_game(11);
        let idx = place_chicken(&mut state, Vec2::new(400.0, 300.0), 0.0);
        update(&mut state, 990.0);
        tap_at(&mut state, Vec2::new(400.0, 300.0), 1000.0);

        update(&mut state, 996.0);
        let chicken = &state.chickens[idx];
        assert_eq!(chicken.state, ChickenState::Jumping);
        assert_eq!(chicken.jump_offset, 0.0);
        assert_eq!(chicken.v, 100.0);

        update(&mut state, 1100.0);
        assert!(state.chickens[idx].jump_offset > 0.0);
    }

    #[test]
    fn test_reset_wave_sends_jumping_chicken_away() {
        let mut state = main_game(13);
        let idx = place_chicken(&mut state, Vec2::new(400.0, 300.0), 0.0);
        let id = state.chickens[idx].id;
        tap_at(&mut state, Vec2::new(400.0, 300.0), 0.0);
        update(&mut state, 0.0);
        update(&mut state, 100.0);
        assert_eq!(state.chickens[idx].state, ChickenState::Jumping);
        assert!(state.chickens[idx].jump_offset > 0.0);

        // Overflow the cap while it is airborne
        for i in 0..25 {
            state.add_chicken(Vec2::new(20.0 + i as f32 * 30.0, 550.0), 100.0);
        }
        let chicken = &state.chickens[idx];
        assert_eq!(chicken.state, ChickenState::Leaving);
        assert_eq!(chicken.jump_offset, 0.0);
        assert_eq!(chicken.v, 200.0);

        // No landing bonus on the way out
        update(&mut state, 116.0);
        assert_eq!(state.chickens[idx].state, ChickenState::Leaving);
        assert_eq!(state.chickens[idx].v, 200.0);

        let mut t = 116.0;
        while t <= 10_000.0 {
            t += 16.0;
            update(&mut state, t);
        }
        assert!(state.chickens.iter().all(|c| c.id != id));
        assert_eq!(state.total_score, 25);
    }

    #[test]
    fn test_key_press_in_main_game_taps_somewhere() {
        let mut state = main_game(2);
        // A chicken that fills the whole canvas cannot be missed
        state.layout.sprite_size = Vec2::new(2000.0, 2000.0);
        place_chicken(&mut state, Vec2::new(400.0, 300.0), 0.0);
        assert!(key_press(&mut state, 0.0).is_some());
        assert_eq!(state.eggs.len(), 1);
    }

    #[test]
    fn test_game_over_is_inert() {
        let mut state = main_game(2);
        place_chicken(&mut state, Vec2::new(400.0, 300.0), 0.0);
        state.phase = GamePhase::GameOver;
        let before = state.chickens.clone();
        update(&mut state, 0.0);
        update(&mut state, 100.0);
        assert_eq!(state.chickens, before);
        assert_eq!(tap_at(&mut state, Vec2::new(400.0, 300.0), 100.0), None);
    }

    #[test]
    fn test_resize_updates_bounds() {
        let mut state = main_game(2);
        resize(&mut state, 320.0, 480.0);
        assert_eq!(state.layout.bounds.center(), Vec2::new(160.0, 240.0));
    }
}
