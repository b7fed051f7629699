//! Circle Merge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, PointerEvent};

    use circle_merge::consts::*;
    use circle_merge::sim::{ArcadeWorld, Controller, GameEvent, GameMessage};
    use circle_merge::{GameConfig, hud, palette};

    /// Game instance holding all state
    struct Game {
        controller: Controller,
        world: ArcadeWorld,
        ctx: CanvasRenderingContext2d,
        accumulator: f32,
        last_time: f64,
        score_text: String,
        next_text: String,
    }

    impl Game {
        fn new(config: GameConfig, ctx: CanvasRenderingContext2d) -> Result<Self, JsValue> {
            let controller =
                Controller::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
            let world = ArcadeWorld::from_config(controller.config());
            Ok(Self {
                controller,
                world,
                ctx,
                accumulator: 0.0,
                last_time: 0.0,
                score_text: hud::score_label(0),
                next_text: String::new(),
            })
        }

        fn send(&mut self, message: GameMessage) {
            if let Err(e) = self.controller.dispatch(&mut self.world, message) {
                log::error!("{:?} failed: {}", message, e);
            }
        }

        /// Run simulation frames
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                if let Err(e) = self.controller.run_frame(&mut self.world, SIM_DT) {
                    log::error!("Frame failed: {}", e);
                }
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
        }

        /// Feed pending rule-engine events to the HUD and notification sinks
        fn flush_events(&mut self) {
            for event in self.controller.drain_events() {
                match event {
                    GameEvent::ScoreChanged { score } => self.score_text = hud::score_label(score),
                    GameEvent::NextSize { size } => self.next_text = hud::next_label(size),
                    GameEvent::GameOver { score } => {
                        if let Some(window) = web_sys::window() {
                            let _ = window.alert_with_message(&hud::game_over_message(score));
                        }
                    }
                    _ => {}
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            let config = self.controller.config();
            let (w, h) = (config.width as f64, config.height as f64);
            let ctx = &self.ctx;

            ctx.set_fill_style_str(&palette::css_hex(BACKGROUND_COLOR));
            ctx.fill_rect(0.0, 0.0, w, h);

            // Starting line
            ctx.begin_path();
            ctx.move_to(0.0, config.starting_line_y as f64);
            ctx.line_to(w, config.starting_line_y as f64);
            ctx.set_stroke_style_str(&palette::css_hex(STARTING_LINE_COLOR));
            ctx.stroke();

            for body in self.world.bodies() {
                ctx.begin_path();
                let _ = ctx.arc(
                    body.pos.x as f64,
                    body.pos.y as f64,
                    body.radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                );
                ctx.set_fill_style_str(&palette::css_hex(body.color));
                ctx.fill();
            }

            ctx.set_font("18px sans-serif");
            ctx.set_fill_style_str(&palette::css_hex(TEXT_COLOR));
            let _ = ctx.fill_text(&self.score_text, 10.0, 28.0);
            let _ = ctx.fill_text(&self.next_text, 200.0, 28.0);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Circle Merge starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let container = document
            .get_element_by_id("game-container")
            .ok_or("no #game-container")?;

        let seed = js_sys::Date::now() as u64;
        let config = GameConfig::with_seed(seed);

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_width(config.width as u32);
        canvas.set_height(config.height as u32);
        container.append_child(&canvas)?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let game = Rc::new(RefCell::new(Game::new(config, ctx)?));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());

        request_animation_frame(game);
        log::info!("Circle Merge running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer press drops the previewed piece at the pointer's x
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            if !event.is_primary() {
                return;
            }
            let mut g = game.borrow_mut();
            // Canvas may be scaled by CSS
            let scale = g.controller.config().width / canvas_clone.client_width().max(1) as f32;
            let x = event.offset_x() as f32 * scale;
            g.send(GameMessage::PointerDown { x });
        });
        let _ = canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(btn) = document.get_element_by_id("restart-button") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().send(GameMessage::Restart);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No #restart-button found");
        }
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

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.flush_events();
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Circle Merge (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    if let Err(e) = headless::run() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

/// Headless demo: drops pieces at seeded random positions until the board overflows
///
/// An optional first argument names a JSON config file; missing fields keep their defaults.
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use circle_merge::consts::SIM_DT;
    use circle_merge::sim::{ArcadeWorld, Controller, GameEvent, GameMessage};
    use circle_merge::{GameConfig, GameError, hud};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    const SEED: u64 = 2024;
    /// Frames between drops (about two thirds of a second)
    const DROP_INTERVAL: u32 = 40;
    const MAX_FRAMES: u32 = 60 * 120;

    pub fn run() -> Result<(), GameError> {
        let config = load_config(std::env::args().nth(1).as_deref())?;
        log::debug!("Config: {}", config.to_json()?);
        let mut game = Controller::new(config)?;
        let mut world = ArcadeWorld::from_config(game.config());
        let mut pointer = Pcg32::seed_from_u64(SEED ^ 0x5eed);

        for frame in 0..MAX_FRAMES {
            if frame % DROP_INTERVAL == 0 {
                let margin = game.tiers().max() as f32 / 2.0;
                let x = pointer.random_range(margin..game.config().width - margin);
                game.dispatch(&mut world, GameMessage::PointerDown { x })?;
            }
            game.run_frame(&mut world, SIM_DT)?;

            for event in game.drain_events() {
                match event {
                    GameEvent::ScoreChanged { score } => log::info!("{}", hud::score_label(score)),
                    GameEvent::NextSize { size } => log::debug!("{}", hud::next_label(size)),
                    GameEvent::GameOver { score } => {
                        log::info!("{} (frame {})", hud::game_over_message(score), frame);
                    }
                    other => log::debug!("{:?}", other),
                }
            }

            if game.state().is_over() {
                break;
            }
        }

        log::info!("Final state: {}", game.snapshot_json()?);
        Ok(())
    }

    /// Config from a JSON file, or the default board seeded with `SEED`
    fn load_config(path: Option<&str>) -> Result<GameConfig, GameError> {
        let Some(path) = path else {
            return Ok(GameConfig::with_seed(SEED));
        };
        GameConfig::load(std::path::Path::new(path))
    }
}
