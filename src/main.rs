//! Rock Dodge entry point
//!
//! Handles platform-specific initialization and runs the tick loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use rock_dodge::renderer::CanvasSurface;
    use rock_dodge::sim::SimStatus;
    use rock_dodge::{KeyEvent, SimConfig, Simulation};

    /// Game instance holding all state
    struct Game {
        sim: Simulation,
        surface: CanvasSurface,
    }

    /// Listeners and timer registered for one mounted game.
    ///
    /// Dropping it stops the simulation, clears the interval and removes the
    /// key listeners.
    struct Session {
        game: Rc<RefCell<Game>>,
        on_keydown: Closure<dyn FnMut(KeyboardEvent)>,
        on_keyup: Closure<dyn FnMut(KeyboardEvent)>,
        // Kept alive for the interval; never called after drop
        _on_tick: Closure<dyn FnMut()>,
        interval: Rc<Cell<Option<i32>>>,
    }

    impl Drop for Session {
        fn drop(&mut self) {
            self.game.borrow_mut().sim.stop();

            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(id) = self.interval.take() {
                window.clear_interval_with_handle(id);
            }
            if let Some(document) = window.document() {
                let _ = document.remove_event_listener_with_callback(
                    "keydown",
                    self.on_keydown.as_ref().unchecked_ref(),
                );
                let _ = document.remove_event_listener_with_callback(
                    "keyup",
                    self.on_keyup.as_ref().unchecked_ref(),
                );
            }
            log::info!("Rock Dodge torn down");
        }
    }

    thread_local! {
        static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        // A second mount replaces the first
        teardown();

        log::info!("Rock Dodge starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No <canvas id=\"canvas\"> element");
            return;
        };

        // A seed stored with the config wins over the clock
        let config = SimConfig::load().seed_or(js_sys::Date::now() as u64);
        canvas.set_width(config.canvas_width);
        canvas.set_height(config.canvas_height);

        let Some(mut surface) = CanvasSurface::from_canvas(&canvas) else {
            log::error!("Canvas has no 2D context");
            return;
        };

        let mut sim = Simulation::new(&config);
        sim.start(&mut surface);
        let period_ms =
            i32::try_from(sim.state().ship.tick_period().as_millis()).unwrap_or(i32::MAX);
        let game = Rc::new(RefCell::new(Game { sim, surface }));

        let on_keydown = key_listener(&document, "keydown", game.clone(), KeyEvent::key_down);
        let on_keyup = key_listener(&document, "keyup", game.clone(), KeyEvent::key_up);
        let interval = Rc::new(Cell::new(None));
        let on_tick = start_interval(&window, game.clone(), interval.clone(), period_ms);

        let session = Session {
            game,
            on_keydown,
            on_keyup,
            _on_tick: on_tick,
            interval,
        };
        SESSION.with(|s| *s.borrow_mut() = Some(session));
    }

    /// Stop the game and release every listener and timer
    pub fn teardown() {
        let session = SESSION.with(|s| s.borrow_mut().take());
        drop(session);
    }

    fn key_listener(
        document: &web_sys::Document,
        kind: &str,
        game: Rc<RefCell<Game>>,
        map: fn(&str) -> Option<KeyEvent>,
    ) -> Closure<dyn FnMut(KeyboardEvent)> {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(key) = map(&event.code()) {
                game.borrow_mut().sim.handle_key(key);
            }
        });
        let _ = document.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        closure
    }

    fn start_interval(
        window: &web_sys::Window,
        game: Rc<RefCell<Game>>,
        interval: Rc<Cell<Option<i32>>>,
        period_ms: i32,
    ) -> Closure<dyn FnMut()> {
        let closure = {
            let interval = interval.clone();
            Closure::<dyn FnMut()>::new(move || {
                let status = {
                    let mut g = game.borrow_mut();
                    let Game { sim, surface } = &mut *g;
                    sim.tick(surface)
                };
                if status == SimStatus::Halted {
                    if let (Some(window), Some(id)) = (web_sys::window(), interval.take()) {
                        window.clear_interval_with_handle(id);
                    }
                }
            })
        };

        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period_ms,
        ) {
            Ok(id) => interval.set(Some(id)),
            Err(e) => log::error!("Failed to start tick interval: {:?}", e),
        }
        closure
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Unmount the game: stops ticking and removes the key listeners
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn teardown() {
    wasm_game::teardown();
}

/// Upper bound for a headless native run (about a minute at 10 ms ticks)
#[cfg(not(target_arch = "wasm32"))]
const NATIVE_MAX_TICKS: u64 = 6000;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rock_dodge::renderer::RecordingSurface;
    use rock_dodge::{SharedInput, SimConfig, Simulation};

    env_logger::init();
    log::info!("Rock Dodge (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the playable version");

    let config = SimConfig::load();
    let mut sim = Simulation::new(&config);
    let input = SharedInput::new();
    let mut surface = RecordingSurface::new();

    sim.run_blocking(&input, &mut surface, NATIVE_MAX_TICKS);

    let state = sim.state();
    match state.halted_at {
        Some(halt) => println!(
            "Halted after {} ticks ({:?}), {} frames drawn",
            halt.tick, halt.reason, surface.frames
        ),
        None => println!("Still running after {} ticks", state.time_ticks),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
