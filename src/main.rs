//! Rockfield entry point
//!
//! Browser builds drive the game from `requestAnimationFrame` on a canvas.
//! Native builds run a scripted headless session and log what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use rockfield::renderer::{Color, DrawSurface, colors};
    use rockfield::sim::Simulation;
    use rockfield::{Bounds, FixedStep, HeldKeys, Settings};

    /// Canvas 2D context as a draw surface
    struct CanvasSurface<'a> {
        ctx: &'a CanvasRenderingContext2d,
    }

    impl DrawSurface for CanvasSurface<'_> {
        fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color) {
            self.ctx.set_stroke_style_str(&colors::css(color));
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                center.x as f64,
                center.y as f64,
                radius as f64,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.stroke();
        }

        fn stroke_polygon(&mut self, points: &[Vec2], color: Color) {
            let Some((first, rest)) = points.split_first() else {
                return;
            };
            self.ctx.set_stroke_style_str(&colors::css(color));
            self.ctx.begin_path();
            self.ctx.move_to(first.x as f64, first.y as f64);
            for p in rest {
                self.ctx.line_to(p.x as f64, p.y as f64);
            }
            self.ctx.close_path();
            self.ctx.stroke();
        }

        fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
            self.ctx.set_fill_style_str(&colors::css(color));
            self.ctx
                .fill_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
        }
    }

    /// Game instance holding all state
    struct Game {
        sim: Simulation,
        keys: HeldKeys,
        clock: FixedStep,
        last_time: Option<f64>,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl Game {
        fn bounds(&self) -> Bounds {
            Bounds::new(self.canvas.width() as f32, self.canvas.height() as f32)
        }

        /// One animation frame: fixed-step updates, then a single render
        fn frame(&mut self, time: f64) {
            let elapsed = self
                .last_time
                .map_or(0.0, |last| ((time - last) / 1000.0) as f32);
            self.last_time = Some(time);

            let bounds = self.bounds();
            let ticks = self.clock.accumulate(elapsed);
            for _ in 0..ticks {
                self.sim.update(&self.keys, bounds, self.clock.step());
                for event in self.sim.events() {
                    log::debug!("{event:?}");
                }
            }

            self.ctx.set_fill_style_str(&colors::css(colors::BACKGROUND));
            self.ctx
                .fill_rect(0.0, 0.0, bounds.width as f64, bounds.height as f64);
            self.sim.render(&mut CanvasSurface { ctx: &self.ctx });
        }
    }

    fn fit_canvas_to_window(canvas: &HtmlCanvasElement) {
        let window = web_sys::window().unwrap();
        let width = window.inner_width().ok().and_then(|v| v.as_f64());
        let height = window.inner_height().ok().and_then(|v| v.as_f64());
        if let (Some(w), Some(h)) = (width, height) {
            canvas.set_width(w as u32);
            canvas.set_height(h as u32);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("page must contain a #canvas element")
            .dyn_into()
            .expect("#canvas must be a <canvas>");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("canvas 2d context unavailable")
            .dyn_into()
            .unwrap();
        fit_canvas_to_window(&canvas);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            sim: Simulation::new(Settings::with_seed(seed)),
            keys: HeldKeys::new(),
            clock: FixedStep::default(),
            last_time: None,
            canvas,
            ctx,
        }));
        log::info!("Rockfield started with seed: {}", seed);

        setup_input_handlers(game.clone());
        request_animation_frame(game);
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().keys.key_down(&event.code()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().keys.key_up(&event.code()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-ups will never arrive, so drop held keys
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.keys.clear();
                g.clock.reset();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize: the simulation picks up new bounds on the next tick
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                fit_canvas_to_window(&game.borrow().canvas);
            });
            let _ =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game.borrow_mut().frame(time);
            request_animation_frame(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    // Usage: rockfield [settings.json] [ticks] [offscreen|edge]
    let mut args = std::env::args().skip(1);
    let mut settings = args
        .next()
        .map(|path| rockfield::Settings::load(path))
        .unwrap_or_default();
    let ticks: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(600);
    if let Some(arg) = args.next() {
        match rockfield::settings::WrapRule::from_str(&arg) {
            Some(rule) => settings.wrap_rule = rule,
            None => log::warn!(
                "Unknown wrap rule '{}', keeping {}",
                arg,
                settings.wrap_rule.as_str()
            ),
        }
    }

    log::info!("Rockfield (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the playable version");
    headless::run(settings, ticks);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rockfield::renderer::VertexBatch;
    use rockfield::sim::{SimEvent, Simulation, TickInput};
    use rockfield::{Bounds, FixedStep, Settings};

    /// Scripted pilot: circles while firing, with short thrust bursts
    fn pilot(tick: u32) -> TickInput {
        TickInput {
            rotate_left: tick % 240 < 120,
            rotate_right: false,
            thrust: tick % 90 < 10,
            fire: true,
        }
    }

    pub fn run(settings: Settings, ticks: u32) {
        let bounds = Bounds::default();
        let clock = FixedStep::default();
        let mut sim = Simulation::new(settings);
        log::info!(
            "Headless run: seed {:#x}, wrap rule {}, {} ticks",
            sim.settings().seed,
            sim.settings().wrap_rule.as_str(),
            ticks
        );
        let mut batch = VertexBatch::new();

        let mut shots = 0;
        let mut rocks_destroyed = 0;
        let mut ship_lost_at = None;
        let mut peak_vertices = 0;

        for t in 0..ticks {
            rockfield::sim::tick(&mut sim, &pilot(t), bounds, clock.step());
            for event in sim.events() {
                match event {
                    SimEvent::ProjectileFired { .. } => shots += 1,
                    SimEvent::AsteroidDestroyed { .. } => rocks_destroyed += 1,
                    SimEvent::ShipDestroyed { .. } => ship_lost_at = Some(sim.time_ticks()),
                    SimEvent::ProjectileExpired { .. } => {}
                }
            }

            batch.clear();
            sim.render(&mut batch);
            peak_vertices = peak_vertices.max(batch.lines.len() + batch.triangles.len());
        }

        log::info!(
            "{} ticks: {} shots, {} asteroids destroyed, {} asteroids left",
            sim.time_ticks(),
            shots,
            rocks_destroyed,
            sim.asteroid_count()
        );
        match (ship_lost_at, sim.ship_state()) {
            (Some(t), _) => log::info!("Ship destroyed at tick {}", t),
            (None, Some(ship)) => log::info!(
                "Ship survived, heading {:.1} degrees",
                ship.heading.to_degrees()
            ),
            (None, None) => log::info!("No ship in this session"),
        }
        log::info!("Peak frame size: {} vertices", peak_vertices);

        match sim.snapshot().to_json() {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("Snapshot serialization failed: {err}"),
        }
    }
}
