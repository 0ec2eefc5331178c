//! Chicken Tap entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, HtmlAudioElement, HtmlCanvasElement, HtmlImageElement,
        KeyboardEvent, MouseEvent, TouchEvent,
    };

    use chicken_tap::Settings;
    use chicken_tap::assets::{
        AssetGate, AssetKind, AssetStore, GateStatus, MANIFEST, gated_count, names,
    };
    use chicken_tap::audio::{AudioManager, SoundEffect};
    use chicken_tap::input::{Command, InputRouter, dispatch};
    use chicken_tap::render::{CanvasRenderer, Renderer, Snapshot};
    use chicken_tap::sim::{self, GamePhase, GameState, Layout};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        audio: AudioManager,
        router: InputRouter,
        gate: Rc<RefCell<AssetGate>>,
        /// Reference image for the sprite size once loaded
        chicken_image: HtmlImageElement,
        load_failed: bool,
    }

    impl Game {
        /// Leave the loading screen once the gate resolves
        fn poll_loading(&mut self, time: f64) {
            if self.state.phase != GamePhase::Loading || self.load_failed {
                return;
            }
            let status = self.gate.borrow().poll(time);
            match status {
                GateStatus::Pending { .. } => {}
                GateStatus::Ready => {
                    let (w, h) = (
                        self.chicken_image.natural_width(),
                        self.chicken_image.natural_height(),
                    );
                    if w > 0 && h > 0 {
                        self.state.layout = self.state.layout.with_sprite_size(w as f32, h as f32);
                    }
                    log::info!("All assets loaded");
                    sim::finish_loading(&mut self.state, time);
                }
                GateStatus::Failed(err) => {
                    log::warn!("Asset loading failed: {}", err);
                    self.load_failed = true;
                    show_error(&err.to_string());
                }
            }
        }

        fn handle(&mut self, command: Command) {
            // Frame timestamps can trail performance.now(); stamp with the frame clock
            let fallback = web_sys::window()
                .and_then(|w| w.performance())
                .map(|p| p.now())
                .unwrap_or(0.0);
            let now = sim::input_time(&self.state, fallback);
            dispatch(&mut self.state, command, now);
        }

        fn frame(&mut self, time: f64) {
            self.poll_loading(time);
            sim::update(&mut self.state, time);

            for event in self.state.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
            }

            let snapshot = Snapshot::capture(&self.state, time);
            if let Err(e) = self.renderer.draw(&snapshot) {
                log::warn!("Render error: {:?}", e);
            }
        }
    }

    /// Replace the loading text with an error message
    fn show_error(message: &str) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("loading") {
            el.set_text_content(Some(&format!("Could not start the game: {}", message)));
            let _ = el.set_attribute("class", "error");
        }
    }

    /// Viewport size in CSS pixels
    fn viewport_size() -> (f32, f32) {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
            .map(|root| (root.client_width() as f32, root.client_height() as f32))
            .unwrap_or((800.0, 600.0))
    }

    /// Start loading every manifest entry, reporting to the gate
    fn load_assets(
        gate: &Rc<RefCell<AssetGate>>,
    ) -> Result<(AssetStore<HtmlImageElement>, AssetStore<HtmlAudioElement>), JsValue> {
        let mut images = AssetStore::new(HtmlImageElement::new()?);
        let mut clips = AssetStore::new(HtmlAudioElement::new()?);

        for spec in MANIFEST {
            let name = spec.name;
            let gated = spec.kind.gates_start();
            let on_load = {
                let gate = gate.clone();
                Closure::<dyn FnMut()>::new(move || {
                    if gated {
                        gate.borrow_mut().complete(name);
                    } else {
                        log::debug!("Loaded '{}'", name);
                    }
                })
            };
            let on_error = {
                let gate = gate.clone();
                Closure::<dyn FnMut()>::new(move || {
                    if gated {
                        gate.borrow_mut().fail(name, "network or decode error");
                    } else {
                        log::warn!("Could not load '{}', continuing without it", name);
                    }
                })
            };

            match spec.kind {
                AssetKind::Image => {
                    let img = HtmlImageElement::new()?;
                    img.set_onload(Some(on_load.as_ref().unchecked_ref()));
                    img.set_onerror(Some(on_error.as_ref().unchecked_ref()));
                    img.set_src(spec.path);
                    images.insert(name, img);
                }
                AssetKind::Audio => {
                    let clip = HtmlAudioElement::new()?;
                    clip.add_event_listener_with_callback(
                        "canplaythrough",
                        on_load.as_ref().unchecked_ref(),
                    )?;
                    clip.add_event_listener_with_callback(
                        "error",
                        on_error.as_ref().unchecked_ref(),
                    )?;
                    clip.set_preload("auto");
                    clip.set_src(spec.path);
                    clips.insert(name, clip);
                }
            }
            on_load.forget();
            on_error.forget();
        }

        Ok((images, clips))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Chicken Tap starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let performance = window.performance().expect("no performance");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()?;
        let (width, height) = viewport_size();
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        let settings = Settings::load();
        let gate = Rc::new(RefCell::new(AssetGate::new(
            gated_count(),
            performance.now(),
            settings.tuning.asset_timeout_ms,
        )));
        let (images, clips) = load_assets(&gate)?;
        let chicken_image = images.get(names::CHICKEN).clone();

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(seed, settings.tuning.clone(), Layout::new(width, height));
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            renderer: CanvasRenderer::new(ctx, images),
            audio: AudioManager::new(clips, &settings),
            router: InputRouter::default(),
            gate,
            chicken_image,
            load_failed: false,
        }));

        setup_input_handlers(&canvas, game.clone())?;
        request_animation_frame(game);

        log::info!("Chicken Tap running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().expect("no window");

        // Mouse click
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let rect = canvas_clone.get_bounding_client_rect();
                g.router.canvas_origin = Vec2::new(rect.left() as f32, rect.top() as f32);
                let command = g.router.pointer(event.client_x() as f32, event.client_y() as f32);
                g.handle(command);
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let rect = canvas_clone.get_bounding_client_rect();
                    g.router.canvas_origin = Vec2::new(rect.left() as f32, rect.top() as f32);
                    let command =
                        g.router.pointer(touch.client_x() as f32, touch.client_y() as f32);
                    g.handle(command);
                }
            });
            canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                log::debug!("key: {}", event.key());
                let mut g = game.borrow_mut();
                let command = g.router.key();
                g.handle(command);
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Resize
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let (width, height) = viewport_size();
                canvas_clone.set_width(width as u32);
                canvas_clone.set_height(height as u32);
                let mut g = game.borrow_mut();
                let command = g.router.resized(width, height);
                g.handle(command);
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Chicken Tap (native) starting...");
    log::info!("Native mode runs a headless demo - use `trunk serve` for the web version");

    let summary = demo::run(demo::DEMO_SECONDS);
    println!(
        "\nDemo finished: {} chickens, {} eggs, score {}",
        summary.chickens, summary.eggs, summary.score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless scripted session for native builds
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use chicken_tap::Settings;
    use chicken_tap::assets::{AssetGate, GateStatus};
    use chicken_tap::input::{InputRouter, dispatch};
    use chicken_tap::sim::{self, ChickenState, GamePhase, GameState, Layout};

    pub const DEMO_SECONDS: f64 = 60.0;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const TAP_EVERY_MS: f64 = 250.0;

    pub struct Summary {
        pub chickens: usize,
        pub eggs: usize,
        pub score: u64,
    }

    pub fn run(seconds: f64) -> Summary {
        let settings = Settings::load();
        let mut state = GameState::new(0xC41C_4E11, settings.tuning.clone(), Layout::new(800.0, 600.0));
        let router = InputRouter::default();

        // Nothing to fetch natively
        let gate = AssetGate::new(0, 0.0, settings.tuning.asset_timeout_ms);
        if gate.poll(0.0) == GateStatus::Ready {
            sim::finish_loading(&mut state, 0.0);
        }
        dispatch(&mut state, router.key(), 0.0);

        let mut now = 0.0;
        let mut next_tap = 0.0;
        while now < seconds * 1000.0 {
            sim::update(&mut state, now);

            if state.phase == GamePhase::MainGame && now >= next_tap {
                let target = state
                    .chickens
                    .iter()
                    .find(|c| c.state == ChickenState::Moving)
                    .map(|c| c.coords);
                if let Some(p) = target {
                    dispatch(&mut state, router.pointer(p.x, p.y), now);
                }
                next_tap = now + TAP_EVERY_MS;
            }

            for event in state.drain_events() {
                log::debug!("{:?}", event);
            }
            now += FRAME_MS;
        }

        log::info!(
            "Simulated {:.0}s: {} chickens, {} eggs, score {}",
            seconds,
            state.chickens.len(),
            state.eggs.len(),
            state.total_score
        );

        Summary {
            chickens: state.chickens.len(),
            eggs: state.eggs.len(),
            score: state.total_score,
        }
    }
}
