//! Bored Runner entry point
//!
//! On the web this wires the page (keyboard, touch, HUD, auto-pause) to a
//! `WebGame`. Natively it runs a seeded headless session with a simple
//! autopilot and prints a JSON summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod page {
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, TouchEvent};

    use bored_runner::platform::web::{WebGame, init_logging};
    use bored_runner::{GameEvent, GamePhase};

    const CANVAS_ID: &str = "canvas";

    pub fn run() -> Result<(), JsValue> {
        init_logging();
        log::info!("Bored Runner starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let game = Rc::new(WebGame::new(CANVAS_ID)?);
        fit_to_window(&game, &window);

        {
            let document = document.clone();
            game.set_listener(move |event| update_hud(&document, event));
        }

        setup_keyboard(&game, &window)?;
        setup_touch(&game, &document)?;
        setup_auto_pause(&game, &document)?;
        setup_resize(&game, &window)?;

        set_text(&document, "hud-score", "0");
        set_text(&document, "hud-coins", "0");
        show(&document, "start-prompt", true);

        log::info!("Bored Runner ready");
        Ok(())
    }

    fn phase(game: &WebGame) -> GamePhase {
        game.engine().borrow().phase()
    }

    /// Space/ArrowUp/touch: jump while running, otherwise start a run
    fn jump_or_start(game: &WebGame) {
        match phase(game) {
            GamePhase::Running => {
                game.jump();
            }
            GamePhase::Paused => game.toggle_pause(),
            GamePhase::Idle | GamePhase::Over => {
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    set_text(&document, "hud-score", "0");
                    set_text(&document, "hud-coins", "0");
                    show(&document, "start-prompt", false);
                    show(&document, "game-over", false);
                }
                game.start();
            }
        }
    }

    fn update_hud(document: &Document, event: &GameEvent) {
        match event {
            GameEvent::Score(score) => set_text(document, "hud-score", &score.to_string()),
            GameEvent::Coins(coins) => set_text(document, "hud-coins", &coins.to_string()),
            GameEvent::GameOver(final_score) => {
                set_text(document, "final-score", &final_score.to_string());
                show(document, "game-over", true);
            }
            GameEvent::PlayerMove(_) => {}
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn show(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn fit_to_window(game: &WebGame, window: &web_sys::Window) {
        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(300.0);
        game.resize(width as f32, (height * 0.6) as f32);
    }

    fn setup_keyboard(game: &Rc<WebGame>, window: &web_sys::Window) -> Result<(), JsValue> {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            match event.key().as_str() {
                " " | "ArrowUp" => {
                    event.prevent_default();
                    jump_or_start(&game);
                }
                "Escape" | "p" | "P" => game.toggle_pause(),
                _ => {}
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_touch(game: &Rc<WebGame>, document: &Document) -> Result<(), JsValue> {
        let Some(canvas) = document.get_element_by_id(CANVAS_ID) else {
            return Ok(());
        };
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            event.prevent_default();
            jump_or_start(&game);
        });
        canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_auto_pause(game: &Rc<WebGame>, document: &Document) -> Result<(), JsValue> {
        let game = game.clone();
        let doc = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if doc.visibility_state() == web_sys::VisibilityState::Hidden
                && phase(&game) == GamePhase::Running
            {
                game.toggle_pause();
                log::info!("Auto-paused (tab hidden)");
            }
        });
        document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_resize(game: &Rc<WebGame>, window: &web_sys::Window) -> Result<(), JsValue> {
        let game = game.clone();
        let win = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            fit_to_window(&game, &win);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    page::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use clap::Parser;
    use serde::Serialize;

    use bored_runner::platform::ManualScheduler;
    use bored_runner::renderer::RecordingSurface;
    use bored_runner::sim::{GameState, ObstacleKind};
    use bored_runner::{GameEngine, GameEvent, GamePhase, Settings};

    /// Jump when a grounded obstacle is this many frames away
    const JUMP_LEAD_FRAMES: f32 = 12.0;

    #[derive(Debug, Serialize)]
    pub struct RunSummary {
        pub seed: u64,
        pub frames: u64,
        pub score: u32,
        pub coins: u32,
        pub final_score: Option<u32>,
        pub jumps: u32,
        pub game_speed: f64,
    }

    /// Headless run with a look-ahead autopilot
    #[derive(Parser, Debug)]
    #[command(name = "bored-runner")]
    #[command(about = "Run a seeded headless session and print a JSON summary")]
    pub struct Options {
        /// RNG seed; overrides the settings file, random when neither sets one
        #[arg(long)]
        pub seed: Option<u64>,
        /// Stop after this many frames if the runner is still alive
        #[arg(long, default_value_t = 3600)]
        pub frames: u64,
    }

    /// Jump over the nearest grounded obstacle; floating ones are run under
    fn should_jump(state: &GameState) -> bool {
        if !state.player.is_grounded() {
            return false;
        }
        let player_right = state.player.body.right();
        let lead = state.game_speed as f32 * JUMP_LEAD_FRAMES;

        let mut grounded_ahead = false;
        for obstacle in &state.obstacles {
            let gap = obstacle.body.pos.x - player_right;
            match obstacle.kind {
                ObstacleKind::Floating => {
                    if obstacle.body.right() >= state.player.x() && gap <= lead * 2.0 {
                        return false;
                    }
                }
                _ => grounded_ahead |= (0.0..=lead).contains(&gap),
            }
        }
        grounded_ahead
    }

    pub fn run(opts: Options) -> RunSummary {
        let mut settings = Settings::load();
        if opts.seed.is_some() {
            settings.seed = opts.seed;
        }
        let seed = settings.seed.unwrap_or_else(rand::random);
        settings.seed = Some(seed);

        let mut engine = GameEngine::new(settings, ManualScheduler::new());
        engine.init(RecordingSurface::new(800.0, 300.0));
        engine.start();

        let mut jumps = 0;
        let mut final_score = None;
        while engine.state().frame_count < opts.frames {
            if should_jump(engine.state()) && engine.jump() {
                jumps += 1;
            }
            let Some(handle) = engine.scheduler_mut().take_due() else {
                break;
            };
            engine.on_frame(handle);

            for event in engine.drain_events() {
                match event {
                    GameEvent::GameOver(score) => final_score = Some(score),
                    GameEvent::Score(score) => log::debug!("score {}", score),
                    GameEvent::Coins(coins) => log::debug!("coins {}", coins),
                    GameEvent::PlayerMove(_) => {}
                }
            }
            if engine.phase() == GamePhase::Over {
                break;
            }
        }

        let state = engine.state();
        RunSummary {
            seed,
            frames: state.frame_count,
            score: state.score,
            coins: state.coins,
            final_score,
            jumps,
            game_speed: state.game_speed,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    log::info!("Bored Runner (native) starting headless run...");

    let summary = headless::run(headless::Options::parse());
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode summary: {}", e),
    }
}
