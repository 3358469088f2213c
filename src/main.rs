//! Rooftop Runner entry point
//!
//! Browser host on wasm32, headless autopilot runner natively.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use rooftop_runner::platform::input::{self, Action};
    use rooftop_runner::renderer::{Backdrop, CanvasPainter, build_scene};
    use rooftop_runner::sim::{
        GameEvent, GameState, RunPhase, press_primary, restart, set_crouch, tick,
    };
    use rooftop_runner::{HighScore, Tuning, TuningPreset};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        painter: CanvasPainter,
        backdrop: Backdrop,
        document: Document,
    }

    impl Game {
        /// One frame: tick, react to events, draw
        fn frame(&mut self) {
            tick(&mut self.state);
            for event in self.state.drain_events() {
                self.handle_event(event);
            }
            if let Err(e) = self.painter.paint(&build_scene(&self.state, &self.backdrop)) {
                log::warn!("Render error: {:?}", e);
            }
            if self.state.phase == RunPhase::Running {
                self.update_hud();
            }
        }

        fn handle_event(&mut self, event: GameEvent) {
            match event {
                GameEvent::RunStarted => self.show_game_over(None),
                GameEvent::RunEnded {
                    score,
                    new_high_score,
                    ..
                } => {
                    if new_high_score {
                        HighScore::new(self.state.high_score).save();
                    }
                    self.update_hud();
                    self.show_game_over(Some(score));
                }
                _ => {}
            }
        }

        fn apply(&mut self, action: Action) {
            match action {
                Action::Primary => press_primary(&mut self.state),
                Action::Crouch(down) => set_crouch(&mut self.state, down),
                Action::Restart => {
                    if restart(&mut self.state) {
                        log::info!("Restarted from keyboard");
                    }
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            if let Some(el) = self.document.get_element_by_id("score") {
                el.set_text_content(Some(&format!("Score: {}", self.state.score)));
            }
            if let Some(el) = self.document.get_element_by_id("high-score") {
                el.set_text_content(Some(&format!("High: {}", self.state.high_score)));
            }
        }

        /// Show the overlay with a final score, or hide it
        fn show_game_over(&self, final_score: Option<u64>) {
            let Some(el) = self.document.get_element_by_id("game-over") else {
                return;
            };
            match final_score {
                Some(score) => {
                    if let Some(score_el) = self.document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&score.to_string()));
                    }
                    let _ = el.set_attribute("class", "");
                }
                None => {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    /// Preset named by a `tuning=` pair in a URL query string
    fn preset_from_query(search: &str) -> TuningPreset {
        search
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "tuning")
            .and_then(|(_, value)| TuningPreset::from_str(value))
            .unwrap_or_default()
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Rooftop Runner starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let painter = CanvasPainter::new(&canvas)?;

        let preset = preset_from_query(&window.location().search().unwrap_or_default());
        let tuning = Tuning::load(preset);
        let high = HighScore::load().best;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(tuning, seed, high),
            painter,
            backdrop: Backdrop::generate(seed),
            document: document.clone(),
        }));

        log::info!("Game initialized with seed: {}", seed);

        {
            let g = game.borrow();
            g.update_hud();
            g.show_game_over(None);
        }

        setup_input_handlers(&canvas, &document, game.clone())?;
        setup_restart_button(&document, game.clone())?;

        request_animation_frame(game);

        log::info!("Rooftop Runner running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        document: &Document,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = input::key_down(&event.code()) {
                    event.prevent_default();
                    if event.repeat() && action == Action::Primary {
                        return;
                    }
                    game.borrow_mut().apply(action);
                }
            });
            document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = input::key_up(&event.code()) {
                    event.prevent_default();
                    game.borrow_mut().apply(action);
                }
            });
            document.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer click
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().apply(Action::Primary);
            });
            canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let Some(btn) = document.get_element_by_id("restart-btn") else {
            log::warn!("No restart button, use R to restart");
            return Ok(());
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut g = game.borrow_mut();
            if restart(&mut g.state) {
                g.show_game_over(None);
                log::info!("Game restarted");
            }
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        if window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::error!("requestAnimationFrame failed, game loop stopped");
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use serde::Serialize;

    use rooftop_runner::sim::autopilot::steer;
    use rooftop_runner::sim::{EndCause, GameEvent, GameState, RunPhase, start_game, tick};
    use rooftop_runner::{Tuning, TuningPreset};

    /// Command line: `[seed] [max_ticks] [preset]`
    pub struct Args {
        pub seed: u64,
        pub max_ticks: u64,
        pub preset: TuningPreset,
    }

    impl Args {
        pub fn parse(args: impl IntoIterator<Item = String>) -> Self {
            let mut args = args.into_iter();
            let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);
            let max_ticks = args.next().and_then(|s| s.parse().ok()).unwrap_or(3_600);
            let preset = match args.next() {
                Some(name) => TuningPreset::from_str(&name).unwrap_or_else(|| {
                    log::warn!("Unknown preset {:?}, using default", name);
                    TuningPreset::default()
                }),
                None => TuningPreset::default(),
            };
            Self {
                seed,
                max_ticks,
                preset,
            }
        }
    }

    /// Outcome of one autopilot run
    #[derive(Debug, Serialize)]
    pub struct RunSummary {
        pub seed: u64,
        pub preset: &'static str,
        pub ticks: u64,
        pub score: u64,
        pub final_speed: f32,
        pub chaser_cycles: u32,
        pub edge_clips: u32,
        pub ended_by: Option<EndCause>,
    }

    pub fn run(args: &Args) -> RunSummary {
        let tuning = Tuning::load(args.preset);
        let mut state = GameState::new(tuning, args.seed, 0);
        start_game(&mut state);

        let mut edge_clips = 0;
        let mut ended_by = None;
        while state.phase == RunPhase::Running && state.time_ticks < args.max_ticks {
            steer(&mut state);
            tick(&mut state);
            for event in state.drain_events() {
                match event {
                    GameEvent::EdgeClip { .. } => edge_clips += 1,
                    GameEvent::RunEnded { cause, .. } => ended_by = Some(cause),
                    _ => {}
                }
            }
        }

        RunSummary {
            seed: args.seed,
            preset: args.preset.as_str(),
            ticks: state.time_ticks,
            score: state.score,
            final_speed: state.speed,
            chaser_cycles: state.chaser.cycle_count,
            edge_clips,
            ended_by,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Rooftop Runner (native) starting...");
    log::info!("Native mode runs the autopilot headless - build for wasm32 to play");

    let args = headless::Args::parse(std::env::args().skip(1));
    let summary = headless::run(&args);
    match summary.ended_by {
        Some(cause) => log::info!("Autopilot ended ({:?}) after {} ticks", cause, summary.ticks),
        None => log::info!("Autopilot survived {} ticks", summary.ticks),
    }

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
