//! Fox Dash entry point
//!
//! Platform glue: input capture, the requestAnimationFrame loop, and DOM
//! HUD/overlay updates. All gameplay lives in `fox_dash::sim`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, FocusEvent, KeyboardEvent, TouchEvent};

    use fox_dash::save::SaveData;
    use fox_dash::sim::{FrameInput, Outcome, Session, SessionEnd, SessionState};

    /// Minimum swipe travel in CSS pixels before a gesture registers
    const SWIPE_THRESHOLD: f32 = 30.0;

    /// App instance holding the session and per-frame platform state
    struct App {
        session: Session,
        data: SaveData,
        input: FrameInput,
        last_time: f64,
        touch_start: Option<(f32, f32)>,
        last_end: Option<SessionEnd>,
    }

    impl App {
        fn new(seed: u64) -> Self {
            Self {
                session: Session::new(seed),
                data: SaveData::load(),
                input: FrameInput::default(),
                last_time: 0.0,
                touch_start: None,
                last_end: None,
            }
        }

        /// Advance one frame from the wall clock and clear one-shot inputs
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            let input = self.input;
            self.input = FrameInput::default();

            if let Some(end) = self.session.tick(input, dt, &mut self.data) {
                self.last_end = Some(end);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let hud = self.session.hud();

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&hud.score.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-coins .hud-value").ok().flatten() {
                el.set_text_content(Some(&hud.coins.to_string()));
            }
            if let Some(el) = document
                .query_selector("#hud-distance .hud-value")
                .ok()
                .flatten()
            {
                el.set_text_content(Some(&format!("{}m", hud.distance.floor() as u64)));
            }
            if let Some(el) = document.query_selector("#hud-gap .hud-value").ok().flatten() {
                el.set_text_content(Some(&format!("{:.1}m", hud.gap)));
            }
        }

        /// Show the overlay matching the current state, hide the rest
        fn update_overlays(&self, document: &Document) {
            let state = self.session.state();
            set_visible(document, "menu-screen", state == SessionState::Menu);
            set_visible(document, "pause-menu", state == SessionState::Paused);
            set_visible(document, "game-over", state == SessionState::GameOver);
            set_visible(document, "hud", state == SessionState::Playing);

            if state == SessionState::GameOver {
                if let Some(end) = self.last_end {
                    if let Some(el) = document.get_element_by_id("final-title") {
                        let title = match end.outcome {
                            Outcome::Caught => "You caught BipBip!",
                            Outcome::Obstacle => "Wipeout!",
                        };
                        el.set_text_content(Some(title));
                    }
                    if let Some(el) = document.get_element_by_id("final-score") {
                        el.set_text_content(Some(&end.score.to_string()));
                    }
                    if let Some(el) = document.get_element_by_id("final-coins") {
                        el.set_text_content(Some(&end.coins.to_string()));
                    }
                    if let Some(el) = document.get_element_by_id("final-best") {
                        el.set_text_content(Some(&end.high_score.to_string()));
                    }
                }
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let class = if visible { "" } else { "hidden" };
            let _ = el.set_attribute("class", class);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Fox Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed)));
        log::info!("Session created with seed: {}", seed);

        // The HUD and overlays must exist before the session can start
        let required = ["hud", "menu-screen", "pause-menu", "game-over"];
        let missing = required
            .iter()
            .find(|id| document.get_element_by_id(id).is_none());
        if let Some(id) = missing {
            app.borrow_mut()
                .session
                .fail_loading(&format!("missing element #{id}"));
            return;
        }

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }
        app.borrow_mut().session.finish_loading();

        setup_keyboard(app.clone());
        setup_touch(app.clone());
        setup_buttons(app.clone());
        setup_auto_pause(app.clone());

        request_animation_frame(app);

        log::info!("Fox Dash running!");
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let document = web_sys::window().unwrap().document().unwrap();
            let mut a = app.borrow_mut();
            a.update(time);
            a.update_hud(&document);
            a.update_overlays(&document);
        }
        request_animation_frame(app);
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if event.repeat() {
                return;
            }
            let mut a = app.borrow_mut();
            match event.key().as_str() {
                "ArrowLeft" | "a" | "A" => a.input.left = true,
                "ArrowRight" | "d" | "D" => a.input.right = true,
                "ArrowUp" | "w" | "W" | " " => a.input.jump = true,
                "ArrowDown" | "s" | "S" => a.input.slide = true,
                "Escape" => match a.session.state() {
                    SessionState::Playing => a.session.pause(),
                    SessionState::Paused => a.session.resume(),
                    _ => {}
                },
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_touch(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    app.borrow_mut().touch_start =
                        Some((touch.client_x() as f32, touch.client_y() as f32));
                }
            });
            let _ = document
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Swipe resolves on touchend along the dominant axis
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut a = app.borrow_mut();
                let Some((sx, sy)) = a.touch_start.take() else {
                    return;
                };
                let Some(touch) = event.changed_touches().get(0) else {
                    return;
                };
                let dx = touch.client_x() as f32 - sx;
                let dy = touch.client_y() as f32 - sy;
                if dx.abs() < SWIPE_THRESHOLD && dy.abs() < SWIPE_THRESHOLD {
                    return;
                }
                if dx.abs() > dy.abs() {
                    if dx > 0.0 {
                        a.input.right = true;
                    } else {
                        a.input.left = true;
                    }
                } else if dy < 0.0 {
                    a.input.jump = true;
                } else {
                    a.input.slide = true;
                }
            });
            let _ = document
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        on_click(&document, "start-btn", app.clone(), |a| a.session.start());
        on_click(&document, "pause-btn", app.clone(), |a| a.session.pause());
        on_click(&document, "resume-btn", app.clone(), |a| a.session.resume());
        on_click(&document, "retry-btn", app.clone(), |a| {
            a.last_end = None;
            a.session.start();
        });
        on_click(&document, "menu-btn", app, |a| {
            a.last_end = None;
            a.session.go_to_menu();
        });
    }

    fn on_click(
        document: &Document,
        id: &str,
        app: Rc<RefCell<App>>,
        handler: fn(&mut App),
    ) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                handler(&mut app.borrow_mut());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut a = app.borrow_mut();
                    if a.session.state() == SessionState::Playing {
                        a.session.pause();
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
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: FocusEvent| {
                let mut a = app.borrow_mut();
                if a.session.state() == SessionState::Playing {
                    a.session.pause();
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use fox_dash::save::SaveData;
    use fox_dash::sim::{FrameInput, Session};

    env_logger::init();
    log::info!("Fox Dash (native) starting...");
    log::info!("Native mode is a headless smoke run - serve the web build for the full game");

    let mut session = Session::new(42);
    session.finish_loading();
    session.start();

    let mut data = SaveData::load();
    let dt = 1.0 / 60.0;
    for frame in 0..600 {
        let input = FrameInput {
            // Hop now and then so the airborne path gets exercised too
            jump: frame % 120 == 0,
            ..FrameInput::default()
        };
        if let Some(end) = session.tick(input, dt, &mut data) {
            println!(
                "Session ended ({}): score {}, coins {}",
                end.outcome.as_str(),
                end.score,
                end.coins
            );
            return;
        }
    }

    let hud = session.hud();
    println!(
        "10s smoke run: score {}, coins {}, distance {:.1}m, gap {:.1}m",
        hud.score, hud.coins, hud.distance, hud.gap
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
