//! Curveball 3D entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, MouseEvent};

    use curveball::renderer::anaglyph::project_to_canvas;
    use curveball::renderer::{AnaglyphRenderer, SceneBatch, draw_scene};
    use curveball::sim::{GameEvent, GameMode};
    use curveball::{Game, GameConfig, InputEvent};

    /// Browser-side state around the game
    struct Shell {
        game: Game,
        renderer: Option<AnaglyphRenderer>,
        batch: SceneBatch,
        /// Mode shown by the page chrome, to toggle classes only on change
        shown_mode: Option<GameMode>,
    }

    impl Shell {
        fn new(game: Game) -> Self {
            Self {
                game,
                renderer: None,
                batch: SceneBatch::new(),
                shown_mode: None,
            }
        }

        fn frame(&mut self, time: f64) {
            for event in self.game.frame(time) {
                match event {
                    GameEvent::GameStarted => log::info!("Game started"),
                    GameEvent::GameOver { score } => log::info!("Game over, final score {}", score),
                    GameEvent::BallMissed => log::info!("Ball missed"),
                    GameEvent::PaddleHit { score } => log::debug!("Hit! score {}", score),
                    GameEvent::WallBounce { .. } => {}
                }
            }

            draw_scene(
                &mut self.batch,
                self.game.state(),
                self.game.config(),
                self.game.button_hovered(),
            );

            if let Some(ref mut renderer) = self.renderer {
                match renderer.render(&self.batch, self.game.viewport(), self.game.config()) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        renderer.resize(renderer.size.0, renderer.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Lay out text labels over the canvas and toggle page classes
        fn update_page(&mut self, document: &Document) {
            let Some(container) = document.get_element_by_id("labels") else {
                return;
            };
            let viewport = self.game.viewport();
            let vfov = self.game.config().vfov();

            // Reuse label elements, creating or hiding as needed
            let children = container.children();
            for (i, label) in self.batch.labels.iter().enumerate() {
                let el = match children.item(i as u32) {
                    Some(el) => el,
                    None => match document.create_element("div") {
                        Ok(el) => {
                            let _ = container.append_child(&el);
                            el
                        }
                        Err(_) => continue,
                    },
                };
                let Ok(el) = el.dyn_into::<HtmlElement>() else {
                    continue;
                };
                let style = el.style();
                let Some(pos) = project_to_canvas(label.position, viewport, vfov) else {
                    let _ = style.set_property("display", "none");
                    continue;
                };
                el.set_text_content(Some(&label.text));
                let _ = style.set_property("display", "block");
                let _ = style.set_property("left", &format!("{}px", pos.x));
                let _ = style.set_property("top", &format!("{}px", pos.y));
                let _ = style.set_property("font-size", &format!("{}px", label.size));
            }
            for i in self.batch.labels.len() as u32..children.length() {
                if let Some(el) = children.item(i).and_then(|e| e.dyn_into::<HtmlElement>().ok()) {
                    let _ = el.style().set_property("display", "none");
                }
            }

            let mode = self.game.mode();
            if self.shown_mode != Some(mode) {
                if let Some(main) = document.query_selector("main").ok().flatten() {
                    let classes = main.class_list();
                    let _ = if mode == GameMode::Playing {
                        classes.add_1("in-game")
                    } else {
                        classes.remove_1("in-game")
                    };
                }
                self.shown_mode = Some(mode);
            }
        }
    }

    fn canvas_size(canvas: &HtmlCanvasElement) -> Vec2 {
        Vec2::new(canvas.client_width() as f32, canvas.client_height() as f32)
    }

    fn offset(event: &MouseEvent) -> Vec2 {
        Vec2::new(event.offset_x() as f32, event.offset_y() as f32)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Curveball 3D starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let css_size = canvas_size(&canvas);
        let width = (css_size.x as f64 * dpr) as u32;
        let height = (css_size.y as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let config = GameConfig::load();
        let shell = Rc::new(RefCell::new(Shell::new(Game::new(config, css_size))));

        // Initialize WebGPU (falls back to WebGL2)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match AnaglyphRenderer::new(surface, &adapter, width, height).await {
            Ok(renderer) => shell.borrow_mut().renderer = Some(renderer),
            Err(e) => log::error!("Failed to create device: {}", e),
        }

        setup_input_handlers(&canvas, shell.clone());
        setup_resize_handler(canvas, shell.clone());

        request_animation_frame(shell);

        log::info!("Curveball 3D running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, shell: Rc<RefCell<Shell>>) {
        // Mouse move
        {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                shell
                    .borrow_mut()
                    .game
                    .push(InputEvent::PointerMoved(offset(&event)));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                shell.borrow_mut().game.push(InputEvent::Click(offset(&event)));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: HtmlCanvasElement, shell: Rc<RefCell<Shell>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio();
            let css_size = canvas_size(&canvas);
            let width = (css_size.x as f64 * dpr) as u32;
            let height = (css_size.y as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);

            let mut s = shell.borrow_mut();
            s.game.push(InputEvent::Resized(css_size));
            if let Some(ref mut renderer) = s.renderer {
                renderer.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(shell: Rc<RefCell<Shell>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(shell, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(shell: Rc<RefCell<Shell>>, time: f64) {
        {
            let mut s = shell.borrow_mut();
            s.frame(time);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                s.update_page(&document);
            }
        }

        request_animation_frame(shell);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use curveball::sim::{Axis, GameEvent};
    use curveball::{Game, GameConfig};
    use glam::Vec2;

    env_logger::init();
    log::info!("Curveball 3D (native) starting...");
    log::info!("Rendering requires a browser - build for wasm32 and serve the page");

    // Headless attract loop: the menu ball bouncing around the box
    let mut game = Game::new(GameConfig::load(), Vec2::new(1280.0, 720.0));
    let mut bounces = [0u32; 3];
    for frame in 0..600 {
        for event in game.frame(frame as f64 * 1000.0 / 60.0) {
            if let GameEvent::WallBounce { axis } = event {
                let i = match axis {
                    Axis::X => 0,
                    Axis::Y => 1,
                    Axis::Z => 2,
                };
                bounces[i] += 1;
            }
        }
    }
    let ball = game.state().ball;
    println!(
        "After 10s of menu: ball at ({:.0}, {:.0}, {:.0}), bounces x={} y={} z={}",
        ball.pos.x, ball.pos.y, ball.pos.z, bounces[0], bounces[1], bounces[2]
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
