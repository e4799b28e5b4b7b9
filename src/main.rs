//! Arena Shooter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use arena_shooter::input::KeyTracker;
    use arena_shooter::render::{self, DrawCmd};
    use arena_shooter::sim::{Arena, Color, GameEvent, GameState, InputEvent, tick};
    use arena_shooter::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        keys: KeyTracker,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl Game {
        /// One scheduler callback: tick, render, then let the DOM catch up
        fn frame(&mut self) {
            let input = self.keys.snapshot();
            tick(&mut self.state, &input);
            let cmds = render::draw_with_settings(&self.state, &self.settings);
            self.paint(&cmds);

            for event in self.state.drain_events() {
                match event {
                    GameEvent::InventoryChanged => self.update_inventory_ui(),
                    GameEvent::ProjectileFired => {}
                    other => log::debug!("{:?}", other),
                }
            }
        }

        fn handle(&mut self, event: InputEvent) {
            if let InputEvent::Resized {
                viewport_width,
                viewport_height,
            } = event
            {
                let arena = Arena::from_viewport(viewport_width, viewport_height);
                self.canvas.set_width(arena.width as u32);
                self.canvas.set_height(arena.height as u32);
            }
            self.state.handle_event(event);
        }

        fn paint(&self, cmds: &[DrawCmd]) {
            let ctx = &self.ctx;
            for cmd in cmds {
                match cmd {
                    DrawCmd::Clear(color) => {
                        ctx.set_fill_style_str(&css(*color));
                        ctx.fill_rect(
                            0.0,
                            0.0,
                            self.canvas.width() as f64,
                            self.canvas.height() as f64,
                        );
                    }
                    DrawCmd::Circle {
                        center,
                        size,
                        color,
                    } => {
                        ctx.set_fill_style_str(&css(*color));
                        ctx.begin_path();
                        let _ = ctx.arc(center.x, center.y, size / 2.0, 0.0, TAU);
                        ctx.fill();
                    }
                    DrawCmd::Rect {
                        rect,
                        corner_radius,
                        fill,
                        stroke,
                    } => {
                        rounded_rect_path(ctx, rect.x, rect.y, rect.w, rect.h, *corner_radius);
                        ctx.set_fill_style_str(&css(*fill));
                        ctx.fill();
                        if let Some(stroke) = stroke {
                            ctx.set_stroke_style_str(&css(stroke.color));
                            ctx.set_line_width(stroke.width);
                            ctx.stroke();
                        }
                    }
                    DrawCmd::Text {
                        pos,
                        text,
                        size,
                        color,
                    } => {
                        ctx.set_fill_style_str(&css(*color));
                        ctx.set_font(&format!("{}px sans-serif", size));
                        ctx.set_text_align("center");
                        ctx.set_text_baseline("middle");
                        let _ = ctx.fill_text(text, pos.x, pos.y);
                    }
                }
            }
        }

        /// Re-render the side panel inventory slots
        fn update_inventory_ui(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let Ok(slots) = document.query_selector_all(".inventory-slot") else {
                return;
            };
            let items = self.state.player.inventory.items();
            for i in 0..slots.length() {
                let Some(el) = slots.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
                    continue;
                };
                let style = el.style();
                match items.get(i as usize) {
                    Some(weapon) => {
                        let _ = style.set_property("background-color", "#666");
                        let _ = style.set_property("display", "flex");
                        let _ = style.set_property("justify-content", "center");
                        let _ = style.set_property("align-items", "center");
                        let _ = style.set_property("color", "white");
                        let _ = style.set_property("font-size", "0.8rem");
                        el.set_inner_text(weapon.short_label());
                    }
                    None => {
                        let _ = style.set_property("background-color", "#333");
                        el.set_inner_text("");
                    }
                }
            }
        }
    }

    fn css(c: Color) -> String {
        format!("rgba({},{},{},{})", c.r, c.g, c.b, c.a as f64 / 255.0)
    }

    fn rounded_rect_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
        let r = r.min(w / 2.0).min(h / 2.0);
        ctx.begin_path();
        ctx.move_to(x + r, y);
        let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
        let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
        let _ = ctx.arc_to(x, y + h, x, y, r);
        let _ = ctx.arc_to(x, y, x + w, y, r);
        ctx.close_path();
    }

    fn viewport() -> (f64, f64) {
        let Some(window) = web_sys::window() else {
            return (1024.0, 768.0);
        };
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(1024.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(768.0);
        (w, h)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Arena Shooter starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no #canvas element")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        let (vw, vh) = viewport();
        let arena = Arena::from_viewport(vw, vh);
        canvas.set_width(arena.width as u32);
        canvas.set_height(arena.height as u32);

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(seed, arena, &Tuning::default());
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            settings: Settings::load(),
            keys: KeyTracker::new(),
            canvas: canvas.clone(),
            ctx,
        }));
        game.borrow().update_inventory_ui();

        setup_input_handlers(&canvas, game.clone())?;
        request_animation_frame(game);

        log::info!("Arena Shooter running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        {
            let game = game.clone();
            let on_keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let Game { keys, settings, .. } = &mut *g;
                keys.press(&e.key(), &settings.bindings);
            });
            window.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;
            on_keydown.forget();
        }

        {
            let game = game.clone();
            let on_keyup = Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let released = {
                    let Game { keys, settings, .. } = &mut *g;
                    keys.release(&e.key(), &settings.bindings)
                };
                if let Some(event) = released {
                    g.handle(event);
                }
            });
            window.add_event_listener_with_callback("keyup", on_keyup.as_ref().unchecked_ref())?;
            on_keyup.forget();
        }

        {
            let game = game.clone();
            let on_blur = Closure::<dyn FnMut()>::new(move || {
                game.borrow_mut().keys.clear();
            });
            window.add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref())?;
            on_blur.forget();
        }

        {
            let game = game.clone();
            let on_move = Closure::<dyn FnMut(MouseEvent)>::new(move |e: MouseEvent| {
                let pos = glam::DVec2::new(e.offset_x() as f64, e.offset_y() as f64);
                game.borrow_mut().handle(InputEvent::PointerMoved(pos));
            });
            canvas.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
            on_move.forget();
        }

        {
            let game = game.clone();
            let on_down = Closure::<dyn FnMut(MouseEvent)>::new(move |e: MouseEvent| {
                let pos = glam::DVec2::new(e.offset_x() as f64, e.offset_y() as f64);
                game.borrow_mut().handle(InputEvent::Click(pos));
            });
            canvas.add_event_listener_with_callback("mousedown", on_down.as_ref().unchecked_ref())?;
            on_down.forget();
        }

        {
            let on_resize = Closure::<dyn FnMut()>::new(move || {
                let (vw, vh) = viewport();
                game.borrow_mut().handle(InputEvent::Resized {
                    viewport_width: vw,
                    viewport_height: vh,
                });
            });
            window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
            on_resize.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        if let Some(window) = web_sys::window() {
            let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
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

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use arena_shooter::Tuning;
    use arena_shooter::run_frame;
    use arena_shooter::sim::{Arena, GameState, InputEvent, TickInput, slot_rect};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Arena Shooter (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let tuning = match std::env::var_os("ARENA_SHOOTER_TUNING") {
        Some(path) => Tuning::load_or_default(std::path::Path::new(&path)),
        None => Tuning::default(),
    };

    let arena = Arena::from_viewport(1000.0, 600.0);
    let mut state = GameState::new(0x5EED, arena, &tuning);

    // Shop: take the first card and start
    let pick = slot_rect(0, &state.arena).center();
    state.handle_event(InputEvent::Click(pick));
    state.handle_event(InputEvent::ConfirmReleased);

    // Circle the arena, pausing briefly halfway through
    let script = [
        TickInput {
            right: true,
            ..Default::default()
        },
        TickInput {
            down: true,
            ..Default::default()
        },
        TickInput {
            left: true,
            ..Default::default()
        },
        TickInput {
            up: true,
            ..Default::default()
        },
    ];
    let mut fired = 0usize;
    for frame in 0..600usize {
        if frame == 300 || frame == 330 {
            state.handle_event(InputEvent::PauseReleased);
        }
        let input = script[(frame / 60) % script.len()];
        let cmds = run_frame(&mut state, &input);
        fired += state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, arena_shooter::sim::GameEvent::ProjectileFired))
            .count();

        if frame % 120 == 0 {
            log::info!(
                "frame {:>3} tick {:>3}: player ({:.1}, {:.1}) projectiles {} draw cmds {}",
                frame,
                state.time_ticks,
                state.player.pos.x,
                state.player.pos.y,
                state.projectiles.len(),
                cmds.len()
            );
        }
    }

    log::info!(
        "Demo finished: {} ticks simulated, {} projectiles fired",
        state.time_ticks,
        fired
    );
}
