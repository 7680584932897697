//! Barricade Invaders entry point
//!
//! The browser build wires DOM events and `requestAnimationFrame` to a
//! [`Session`](barricade_invaders::Session); the native build runs a headless
//! autopilot game and logs the outcome.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, Window};

    use barricade_invaders::platform::Key;
    use barricade_invaders::renderer::{RenderState, shapes};
    use barricade_invaders::{RenderError, Session, Tuning};

    /// Game instance holding all browser-side state
    struct Game {
        session: Session,
        canvas: HtmlCanvasElement,
        render_state: Option<RenderState>,
        /// A frame callback is currently scheduled
        loop_active: bool,
        /// Last score written to the HUD
        shown_score: Option<u64>,
    }

    impl Game {
        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = shapes::scene(self.session.world());
            match render_state.render(&vertices) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost) => render_state.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of GPU memory");
                }
                Err(e) => log::warn!("Render error: {e:?}"),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let score = self.session.score();
            if self.shown_score != Some(score) {
                if let Some(el) = document.get_element_by_id("hud-score") {
                    el.set_text_content(Some(&format!("Score: {score}")));
                }
                self.shown_score = Some(score);
            }

            if let Some(overlay) = document.get_element_by_id("game-over") {
                match self.session.message() {
                    Some(message) => {
                        if let Some(el) = document.get_element_by_id("game-over-message") {
                            el.set_text_content(Some(message));
                        }
                        let _ = overlay.set_attribute("class", "");
                    }
                    None => {
                        let _ = overlay.set_attribute("class", "hidden");
                    }
                }
            }
        }
    }

    fn js_error(err: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&err.to_string())
    }

    fn window() -> Result<Window, JsValue> {
        web_sys::window().ok_or_else(|| js_error("no window"))
    }

    /// Match the canvas to the window; returns the logical viewport and
    /// the backing size in physical pixels
    fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement) -> (Vec2, u32, u32) {
        let logical_w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let logical_h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        let dpr = window.device_pixel_ratio();
        let width = (logical_w * dpr) as u32;
        let height = (logical_h * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (Vec2::new(logical_w as f32, logical_h as f32), width, height)
    }

    /// Balance values from `<script id="tuning" type="application/json">`
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
            .filter(|text| !text.trim().is_empty())
        else {
            return Tuning::default();
        };

        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning document");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning document: {e}");
                Tuning::default()
            }
        }
    }

    async fn init_renderer(
        instance: &wgpu::Instance,
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
        viewport: Vec2,
    ) -> Result<RenderState, RenderError> {
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);
        RenderState::new(surface, &adapter, width, height, viewport).await
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_error)?;

        log::info!("Barricade Invaders starting...");

        let window = window()?;
        let document = window.document().ok_or_else(|| js_error("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| js_error("no canvas"))?
            .dyn_into()?;

        let (viewport, width, height) = fit_canvas(&window, &canvas);
        let tuning = load_tuning(&document);
        let seed = js_sys::Date::now() as u64;
        let session = Session::new(viewport.x, viewport.y, tuning, seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });
        let render_state = init_renderer(&instance, &canvas, width, height, viewport)
            .await
            .map_err(|e| {
                log::error!("WebGPU setup failed: {e}");
                js_error(e)
            })?;

        let game = Rc::new(RefCell::new(Game {
            session,
            canvas,
            render_state: Some(render_state),
            loop_active: false,
            shown_score: None,
        }));

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        setup_keyboard(&window, game.clone())?;
        setup_resize(&window, game.clone())?;
        setup_focus_handling(&window, &document, game.clone())?;
        setup_restart_button(&document, game.clone())?;

        game.borrow_mut().update_hud();
        ensure_loop(&game);

        log::info!("Barricade Invaders running!");
        Ok(())
    }

    fn setup_keyboard(window: &Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.code()) {
                    event.prevent_default();
                    game.borrow_mut().session.key_down(key, event.repeat());
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(key) = Key::from_code(&event.code()) {
                event.prevent_default();
                game.borrow_mut().session.key_up(key);
            }
        });
        window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// A new window size starts a new game at that size
    fn setup_resize(window: &Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            {
                let mut g = game.borrow_mut();
                let (viewport, width, height) = fit_canvas(&window, &g.canvas);
                g.session.resize(viewport.x, viewport.y);
                if let Some(render_state) = g.render_state.as_mut() {
                    render_state.resize(width, height);
                    render_state.set_viewport(viewport);
                }
                g.render();
                g.update_hud();
            }
            ensure_loop(&game);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Drop held keys on blur; pause while the tab is hidden
    fn setup_focus_handling(
        window: &Window,
        document: &Document,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().session.release_all();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                game.borrow_mut().session.stop();
                log::info!("Paused (tab hidden)");
            } else {
                game.borrow_mut().session.start();
                ensure_loop(&game);
            }
        });
        document.add_event_listener_with_callback(
            "visibilitychange",
            closure.as_ref().unchecked_ref(),
        )?;
        closure.forget();
        Ok(())
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let Some(btn) = document.get_element_by_id("restart-btn") else {
            log::warn!("No restart button in page");
            return Ok(());
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            {
                let mut g = game.borrow_mut();
                g.session.restart();
                g.update_hud();
            }
            ensure_loop(&game);
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Schedule frames again if the session wants them and none are pending
    fn ensure_loop(game: &Rc<RefCell<Game>>) {
        let start = {
            let mut g = game.borrow_mut();
            let start = !g.loop_active && g.session.is_running();
            if start {
                g.loop_active = true;
            }
            start
        };
        if start {
            request_animation_frame(game.clone());
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let keep_going = {
            let mut g = game.borrow_mut();
            let keep_going = g.session.frame();
            g.render();
            g.update_hud();
            if !keep_going {
                g.loop_active = false;
            }
            keep_going
        };

        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use barricade_invaders::platform::Key;
    use barricade_invaders::{Session, Tuning};

    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;
    pub const SEED: u64 = 0x1978;
    pub const FRAME_CAP: u64 = 20_000;
    /// Frames between fire presses
    const FIRE_INTERVAL: u64 = 8;

    /// Sweep wall to wall and fire at a steady rate
    pub fn play(tuning: Tuning) -> Session {
        let mut session = Session::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT, tuning, SEED);
        let mut heading = Key::Right;

        while session.is_running() && session.frames() < FRAME_CAP {
            let world = session.world();
            let ship = world.player.hitbox();
            if ship.left() <= 0.0 {
                heading = Key::Right;
            } else if ship.right() >= world.viewport.x {
                heading = Key::Left;
            }

            session.key_up(Key::Left);
            session.key_up(Key::Right);
            session.key_down(heading, false);
            if session.frames() % FIRE_INTERVAL == 0 {
                session.key_down(Key::Fire, false);
            }
            session.frame();
        }
        session
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use barricade_invaders::Tuning;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Barricade Invaders (headless) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{path}: {e}");
                return std::process::ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    let session = headless::play(tuning);
    match session.message() {
        Some(message) => log::info!(
            "{message} in {} frames with score {}",
            session.frames(),
            session.score()
        ),
        None => log::info!(
            "Stopped at the {}-frame cap with score {}",
            headless::FRAME_CAP,
            session.score()
        ),
    }
    std::process::ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
