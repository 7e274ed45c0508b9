//! Court Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;

    use court_runner::genai::{self, Backdrop};
    use court_runner::render::{self, Renderer};
    use court_runner::sim::{GameState, InputState, KeyCode, tick};

    /// Prompt sent once per session to the image model
    const BACKDROP_PROMPT: &str = "A top-down 2D pixel art professional basketball \
        court. Hardwood floor with polished finish, center circle, three-point \
        lines, and hoops at both ends. Vibrant indoor lighting, professional \
        sports arena style.";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputState,
        renderer: Renderer,
        backdrop: Backdrop,
    }

    impl Game {
        fn new(renderer: Renderer) -> Self {
            Self {
                state: GameState::new(),
                input: InputState::new(),
                renderer,
                backdrop: Backdrop::Pending,
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("Court Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let renderer = Renderer::new(&document)?;
        render::install_overlays(&document)?;

        let game = Rc::new(RefCell::new(Game::new(renderer)));

        // Fire-and-forget backdrop generation. The loop never waits on this;
        // the slot flips to Ready or Absent whenever the task finishes.
        {
            let game = game.clone();
            spawn_local(async move {
                let backdrop = match genai::generate_backdrop(BACKDROP_PROMPT).await {
                    Some(url) => match genai::decode_image(&url).await {
                        Some(img) => {
                            log::info!("court backdrop ready");
                            Backdrop::Ready(img)
                        }
                        None => Backdrop::Absent,
                    },
                    None => Backdrop::Absent,
                };
                game.borrow_mut().backdrop = backdrop;
            });
        }

        setup_key_handlers(&window, game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Court Runner running!");
        Ok(())
    }

    fn setup_key_handlers(
        window: &web_sys::Window,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Keydown: only keys in the game's vocabulary, with default
        // scrolling suppressed for them
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if let Some(key) = KeyCode::from_code(&event.code()) {
                    event.prevent_default();
                    game.borrow_mut().input.key_down(key);
                }
            });
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyup
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if let Some(key) = KeyCode::from_code(&event.code()) {
                    game.borrow_mut().input.key_up(key);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
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
            let g = &mut *g;

            // One simulation pass and one draw per display refresh
            tick(&mut g.state, &mut g.input);

            if let Err(err) = g
                .renderer
                .render(&g.state, g.input.facing_left, &g.backdrop, time)
            {
                log::warn!("render error: {err:?}");
            }
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                render::sync_overlays(&document, &g.state, &g.backdrop);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(err) = wasm_game::run().await {
        log::error!("startup failed: {err:?}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Court Runner (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Run a scripted pass over the whole quest flow
    println!("\nRunning quest flow smoke pass...");
    smoke_quest_flow();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_quest_flow() {
    use court_runner::sim::{
        DROP_ZONE, GOALS, GamePhase, GameState, InputState, KeyCode, PICKUP_ZONE, tick,
    };
    use glam::Vec2;

    let mut state = GameState::new();
    let mut input = InputState::new();

    input.key_down(KeyCode::Enter);
    tick(&mut state, &mut input);
    assert_eq!(state.phase, GamePhase::Playing, "start input should begin play");
    input.key_up(KeyCode::Enter);

    for goal in GOALS {
        state.player.pos = PICKUP_ZONE.pos - Vec2::splat(state.player.size / 2.0);
        tick(&mut state, &mut input);
        assert_eq!(state.player.held_goal, Some(goal.id), "pickup should trigger");

        state.player.pos = DROP_ZONE.pos - Vec2::splat(state.player.size / 2.0);
        tick(&mut state, &mut input);
        assert_eq!(state.phase, GamePhase::GoalInfo, "delivery should open info");

        input.key_down(KeyCode::Enter);
        tick(&mut state, &mut input);
        input.key_up(KeyCode::Enter);
    }

    assert_eq!(state.phase, GamePhase::Completed);
    println!("✓ All {} goals delivered", GOALS.len());
}
