//! Space Rocks entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use space_rocks::audio::AudioManager;
    use space_rocks::renderer::{RenderState, ShapeBatch, draw_scene};
    use space_rocks::sim::{GamePhase, GameState, Keyboard};
    use space_rocks::{Arena, SetupError, Settings, Tuning};

    /// LocalStorage key for an optional tuning override
    const TUNING_KEY: &str = "space_rocks_tuning";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        keyboard: Keyboard,
        audio: AudioManager,
        settings: Settings,
        render_state: Option<RenderState>,
        batch: ShapeBatch,
    }

    impl Game {
        fn new(arena: Arena, tuning: Tuning, settings: Settings, seed: u64) -> Self {
            Self {
                state: GameState::new(arena, tuning, seed),
                keyboard: Keyboard::new(),
                audio: AudioManager::new(&settings),
                settings,
                render_state: None,
                batch: ShapeBatch::new(arena.width, arena.height),
            }
        }

        fn toggle_mute(&mut self) {
            let muted = self.settings.toggle_muted();
            self.audio.set_muted(muted);
        }

        /// Advance the simulation to this frame
        fn update(&mut self, time: f64) {
            self.state.animate(time, &self.keyboard, &mut self.audio);
        }

        /// Render the current frame
        fn render(&mut self) {
            draw_scene(&self.state, &mut self.batch);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.batch.vertices()) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.reconfigure();
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

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            if let Some(el) = document.query_selector("#hud-hi .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.hi_score.to_string()));
            }

            if let Some(el) = document.get_element_by_id("hud-prompt") {
                let text = match self.state.phase {
                    GamePhase::Intro => "Click to start",
                    GamePhase::GameOver => "GAME OVER",
                    _ => "",
                };
                if el.text_content().as_deref() != Some(text) {
                    el.set_text_content(Some(text));
                }
            }
        }
    }

    /// Tuning override from LocalStorage, defaults when absent or invalid
    fn load_tuning() -> Tuning {
        let json = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|storage| storage.get_item(TUNING_KEY).ok())
            .flatten();

        match json.map(|json| Tuning::from_json(&json)) {
            Some(Ok(tuning)) => tuning,
            Some(Err(e)) => {
                log::warn!("Ignoring stored tuning: {}", e);
                Tuning::default()
            }
            None => Tuning::default(),
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Space Rocks starting...");

        if let Err(e) = start().await {
            log::error!("Start-up failed: {}", e);
        }
    }

    async fn start() -> Result<(), SetupError> {
        let window = web_sys::window().ok_or(SetupError::NoWindow)?;
        let document = window.document().ok_or(SetupError::NoWindow)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| SetupError::NoCanvas("canvas".into()))?
            .dyn_into()
            .map_err(|_| SetupError::NoCanvas("canvas".into()))?;

        let arena = Arena::default();

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = match canvas.client_width() {
            w if w > 0 => w as f64,
            _ => arena.width as f64,
        };
        let client_h = match canvas.client_height() {
            h if h > 0 => h as f64,
            _ => arena.height as f64,
        };
        let width = (client_w * dpr) as u32;
        let height = (client_h * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(arena, load_tuning(), settings, seed)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| SetupError::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| SetupError::NoAdapter(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, arena).await?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&window, game.clone())?;
        setup_start_listener(&document, game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Space Rocks running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), SetupError> {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut g = game.borrow_mut();
                if g.keyboard.record_key_down(&key) {
                    event.prevent_default();
                } else if Settings::is_mute_key(&key) && !event.repeat() {
                    g.toggle_mute();
                }
            });
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                .map_err(|_| SetupError::NoWindow)?;
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().keyboard.record_key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())
                .map_err(|_| SetupError::NoWindow)?;
            closure.forget();
        }

        // Window blur: key-up events will never arrive
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().keyboard.release_all();
            });
            window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())
                .map_err(|_| SetupError::NoWindow)?;
            closure.forget();
        }

        Ok(())
    }

    /// The first pointer-down leaves the intro. The listener is registered
    /// with `once` so the browser drops it after firing.
    fn setup_start_listener(
        document: &web_sys::Document,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), SetupError> {
        let callback = Closure::once_into_js(move |_event: PointerEvent| {
            let mut g = game.borrow_mut();
            // Browsers only allow audio after a user gesture
            g.audio.resume();
            g.state.start();
        });

        let options = web_sys::AddEventListenerOptions::new();
        options.set_once(true);
        document
            .add_event_listener_with_callback_and_add_event_listener_options(
                "pointerdown",
                callback.unchecked_ref(),
                &options,
            )
            .map_err(|_| SetupError::NoWindow)?;
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
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
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
    log::info!("Space Rocks (native) starting...");
    log::info!("Native mode runs a headless session - serve the wasm build for the real game");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match headless::load_tuning(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => space_rocks::Tuning::default(),
    };

    headless::run(tuning, 120.0);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use space_rocks::audio::Silence;
    use space_rocks::consts::FRAME_MS;
    use space_rocks::sim::{GamePhase, GameState, Keyboard};
    use space_rocks::{Arena, SetupError, Tuning};

    pub fn load_tuning(path: &str) -> Result<Tuning, SetupError> {
        let json = std::fs::read_to_string(path)?;
        Tuning::from_json(&json)
    }

    /// Autopilot: spin slowly, keep firing, thrust in short bursts
    fn script(keyboard: &mut Keyboard, frame: u64) {
        keyboard.record_key_down(" ");
        keyboard.record_key_down("ArrowRight");
        if frame % 180 < 20 {
            keyboard.record_key_down("ArrowUp");
        } else {
            keyboard.record_key_up("ArrowUp");
        }
    }

    /// Play `seconds` of game time at 60 frames per second
    pub fn run(tuning: Tuning, seconds: f64) {
        let mut state = GameState::new(Arena::default(), tuning, 0x5eed);
        let mut keyboard = Keyboard::new();
        let mut sound = Silence::default();

        state.start();

        let frames = (seconds * 1000.0 / FRAME_MS as f64) as u64;
        let mut phase = state.phase;
        for frame in 0..frames {
            script(&mut keyboard, frame);
            state.animate(frame as f64 * FRAME_MS as f64, &keyboard, &mut sound);

            if state.phase != phase {
                log::debug!("Frame {}: {:?} -> {:?}", frame, phase, state.phase);
                phase = state.phase;
            }
            if frame > 0 && frame % 600 == 0 {
                log::info!(
                    "t={}s level {} score {} lives {} rocks {}",
                    frame / 60,
                    state.level,
                    state.score,
                    state.lives,
                    state.rocks.len()
                );
            }
        }

        println!(
            "Session over after {:.0}s: level {}, score {}, hi-score {}, ships left {}, phase {:?}",
            seconds, state.level, state.score, state.hi_score, state.lives, phase
        );
        if phase == GamePhase::GameOver {
            println!("Ended on the game over screen");
        }
    }
}
