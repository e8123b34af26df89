//! Neon Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlInputElement, KeyboardEvent, MouseEvent, TouchEvent};

    use neon_dash::highscores::{Leaderboard, format_time, sanitize_initials};
    use neon_dash::levels::LEVELS;
    use neon_dash::renderer::{RenderState, build_scene};
    use neon_dash::settings::Settings;
    use neon_dash::sim::{TickInput, TickOutcome, World, tick};

    /// Shell-level game flow. The simulation only knows about one level
    /// attempt; the shell strings attempts into a campaign.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Phase {
        Start,
        Playing,
        Paused,
        Dead,
        LevelClear,
        Victory,
    }

    /// Game instance holding all state
    struct Game {
        world: World,
        render_state: Option<RenderState>,
        settings: Settings,
        leaderboard: Leaderboard,
        phase: Phase,
        level_index: usize,
        /// Milliseconds banked from earlier attempts and levels this run.
        /// The current attempt lives in `world.elapsed` until it ends.
        session_ms: f64,
        /// Campaign time frozen at the moment of victory.
        final_ms: f64,
        score_submitted: bool,
        input: TickInput,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(world: World) -> Self {
            Self {
                world,
                render_state: None,
                settings: Settings::load(),
                leaderboard: Leaderboard::load(),
                phase: Phase::Start,
                level_index: 0,
                session_ms: 0.0,
                final_ms: 0.0,
                score_submitted: false,
                input: TickInput::default(),
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Campaign clock: banked time plus the current attempt.
        fn total_ms(&self) -> f64 {
            self.session_ms + self.world.elapsed as f64 * 1000.0
        }

        /// Bank the current attempt's time before the world resets.
        fn bank_attempt(&mut self) {
            self.session_ms += self.world.elapsed as f64 * 1000.0;
        }

        fn begin_run(&mut self) {
            let seed = js_sys::Date::now() as u64;
            match World::new(LEVELS[0], seed) {
                Ok(world) => {
                    self.world = world;
                    self.level_index = 0;
                    self.session_ms = 0.0;
                    self.final_ms = 0.0;
                    self.score_submitted = false;
                    self.input = TickInput::default();
                    self.phase = Phase::Playing;
                    log::info!("Run started with seed: {seed}");
                }
                Err(err) => log::error!("Level setup failed: {err}"),
            }
        }

        fn retry(&mut self) {
            self.bank_attempt();
            self.world.restart();
            self.input = TickInput::default();
            self.phase = Phase::Playing;
        }

        fn advance_level(&mut self) {
            self.bank_attempt();
            let next = self.level_index + 1;
            let seed = js_sys::Date::now() as u64;
            match World::new(LEVELS[next], seed) {
                Ok(world) => {
                    self.world = world;
                    self.level_index = next;
                    self.input = TickInput::default();
                    self.phase = Phase::Playing;
                    log::info!("Entering level {}: {}", next + 1, LEVELS[next].name);
                }
                Err(err) => log::error!("Level setup failed: {err}"),
            }
        }

        fn return_to_start(&mut self) {
            self.session_ms = 0.0;
            self.input = TickInput::default();
            self.phase = Phase::Start;
        }

        /// The one action button: context-sensitive on phase.
        fn action(&mut self) {
            match self.phase {
                Phase::Start => self.begin_run(),
                Phase::Playing => self.input.jump = true,
                Phase::Paused => self.phase = Phase::Playing,
                Phase::Dead => self.retry(),
                Phase::LevelClear => self.advance_level(),
                Phase::Victory => {}
            }
        }

        /// Run one simulation tick if playing
        fn update(&mut self, dt: f32, time: f64) {
            if self.phase == Phase::Playing {
                let input = self.input;
                let outcome = tick(&mut self.world, &input, dt);
                // Clear one-shot inputs after processing
                self.input.jump = false;

                match outcome {
                    TickOutcome::Continue => {}
                    TickOutcome::Died => {
                        self.phase = Phase::Dead;
                        log::info!(
                            "Died at {:.0}% of {}",
                            self.world.progress() * 100.0,
                            self.world.config.name
                        );
                    }
                    TickOutcome::LevelComplete => {
                        if self.level_index + 1 >= LEVELS.len() {
                            self.final_ms = self.total_ms();
                            self.phase = Phase::Victory;
                            log::info!(
                                "Campaign complete in {}",
                                format_time(self.final_ms.round() as u32)
                            );
                        } else {
                            self.phase = Phase::LevelClear;
                        }
                    }
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_scene(&self.world, &self.settings);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let in_level = matches!(self.phase, Phase::Playing | Phase::Paused);
            set_visible(&document, "hud", in_level);
            set_visible(&document, "start-screen", self.phase == Phase::Start);
            set_visible(&document, "pause-overlay", self.phase == Phase::Paused);
            set_visible(&document, "death-screen", self.phase == Phase::Dead);
            set_visible(&document, "clear-screen", self.phase == Phase::LevelClear);
            set_visible(&document, "victory-screen", self.phase == Phase::Victory);

            let config = &self.world.config;
            if in_level {
                set_text(
                    &document,
                    "#hud-level .hud-value",
                    &format!("{} {}/{}", config.name, self.level_index + 1, LEVELS.len()),
                );
                set_text(&document, "#hud-subtitle", config.subtitle);
                set_text(
                    &document,
                    "#hud-time .hud-value",
                    &format_time(self.total_ms().round() as u32),
                );
                let progress = self.world.progress() * 100.0;
                set_text(&document, "#hud-progress .hud-value", &format!("{progress:.0}%"));
                if let Some(bar) = document.get_element_by_id("progress-fill") {
                    let _ = bar.set_attribute("style", &format!("width:{progress:.1}%"));
                }

                set_visible(&document, "hud-fps", self.settings.show_fps);
                if self.settings.show_fps {
                    set_text(&document, "#hud-fps .hud-value", &self.fps.to_string());
                }
            }

            match self.phase {
                Phase::Start => {
                    if let Some(best) = self.leaderboard.best_time() {
                        set_text(
                            &document,
                            "#start-best",
                            &format!("BEST {}", format_time(best)),
                        );
                    }
                    set_text(&document, "#start-quality", self.settings.quality.as_str());
                }
                Phase::Dead => {
                    set_text(
                        &document,
                        "#death-progress",
                        &format!("{:.0}%", self.world.progress() * 100.0),
                    );
                }
                Phase::LevelClear => {
                    set_text(&document, "#clear-level", config.name);
                    set_text(&document, "#clear-next", LEVELS[self.level_index + 1].name);
                    set_text(
                        &document,
                        "#clear-time",
                        &format_time(self.total_ms().round() as u32),
                    );
                }
                Phase::Victory => {
                    let final_ms = self.final_ms.round() as u32;
                    set_text(&document, "#final-time", &format_time(final_ms));
                    set_text(&document, "#leaderboard-list", &leaderboard_text(&self.leaderboard));
                    let show_form = !self.score_submitted && self.leaderboard.qualifies(final_ms);
                    set_visible(&document, "initials-form", show_form);
                }
                _ => {}
            }
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let class = if visible { "" } else { "hidden" };
            let _ = el.set_attribute("class", class);
        }
    }

    fn set_text(document: &web_sys::Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn leaderboard_text(board: &Leaderboard) -> String {
        if board.is_empty() {
            return "NO TIMES YET".to_string();
        }
        board
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{}. {}  {}", i + 1, e.name, format_time(e.time_ms)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let world = match World::new(LEVELS[0], seed) {
            Ok(world) => world,
            Err(err) => {
                log::error!("Level setup failed: {err}");
                return;
            }
        };
        let game = Rc::new(RefCell::new(Game::new(world)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_victory_buttons(game.clone());
        setup_auto_pause(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Neon Dash running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard: jump/advance on the action keys, settings on Q and F.
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" | "w" | "W" => {
                        event.prevent_default();
                        g.action();
                    }
                    "Escape" => {
                        if g.phase == Phase::Playing {
                            g.phase = Phase::Paused;
                        } else if g.phase != Phase::Start {
                            g.return_to_start();
                        }
                    }
                    "q" | "Q" => {
                        g.settings.quality = g.settings.quality.cycled();
                        g.settings.save();
                        log::info!("Quality: {}", g.settings.quality.as_str());
                    }
                    "f" | "F" => {
                        g.settings.show_fps = !g.settings.show_fps;
                        g.settings.save();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().action();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().action();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Delta time in seconds; the tick clamps it for timers.
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                1.0 / 60.0
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_victory_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Submit initials to the leaderboard
        if let Some(btn) = document.get_element_by_id("submit-score-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                let raw = document
                    .get_element_by_id("initials-input")
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                    .map(|input| input.value())
                    .unwrap_or_default();

                let mut g = game.borrow_mut();
                if g.score_submitted {
                    return;
                }
                let name = sanitize_initials(&raw);
                let time_ms = g.final_ms.round() as u32;
                if let Some(rank) = g.leaderboard.add_entry(&name, time_ms, js_sys::Date::now()) {
                    g.leaderboard.save();
                    log::info!("Leaderboard entry {} at rank {}", name, rank);
                }
                g.score_submitted = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Back to the start screen
        if let Some(btn) = document.get_element_by_id("play-again-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().return_to_start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.phase == Phase::Playing {
                        g.phase = Phase::Paused;
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.phase == Phase::Playing {
                    g.phase = Phase::Paused;
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Dash (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    // Run a scripted course pass to sanity-check the simulation
    println!("\nRunning scripted course pass...");
    scripted_course_pass();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn scripted_course_pass() {
    use neon_dash::levels::LEVELS;
    use neon_dash::sim::{TickInput, TickOutcome, World, tick};

    let dt = 1.0 / 60.0;
    let mut world = World::new(LEVELS[0], 12345).expect("level table is static");

    let mut outcome = TickOutcome::Continue;
    let mut ticks = 0u32;
    while outcome == TickOutcome::Continue && ticks < 36_000 {
        // Hop on a fixed cadence; enough to survive a while, not to win.
        let input = TickInput {
            jump: ticks % 45 == 0,
        };
        outcome = tick(&mut world, &input, dt);
        ticks += 1;
    }

    println!(
        "✓ {} ended with {:?} after {} ticks at {:.1}% progress",
        world.config.name,
        outcome,
        ticks,
        world.progress() * 100.0
    );
    assert_ne!(outcome, TickOutcome::Continue, "course pass should resolve");
}
