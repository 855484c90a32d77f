//! Window shell: event plumbing between winit and the controller.
//!
//! Everything interesting happens in [`SimulationController`]; this layer
//! only creates the window, forwards raw pixel coordinates, and keeps the
//! title bar current.

use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

use crate::config::Settings;
use crate::controller::SimulationController;
use crate::engine::traits::StepEngine;
use crate::error::InitError;
use crate::input::InputState;
use crate::pattern::Pattern;
use crate::perf::FrameCounter;
use crate::render::RenderEngine;

const ZOOM_STEP: f64 = 1.1;
const MIN_GRID_DIM: u32 = 32;
const MAX_GRID_DIM: u32 = 4096;

pub struct LichenApp {
    event_loop: Option<EventLoop<()>>,
    state: AppState,
}

struct AppState {
    settings: Settings,
    controller: SimulationController,
    window: Option<Arc<Window>>,
    render: Option<RenderEngine>,
    input: InputState,
    frames: FrameCounter,
    vsync: bool,
}

impl LichenApp {
    /// Build the application from validated settings and a step backend.
    pub fn new(settings: Settings, engine: Box<dyn StepEngine>) -> Result<Self, InitError> {
        let event_loop = EventLoop::new().expect("Failed to create event loop");
        let controller = SimulationController::new(&settings, engine)?;
        let vsync = settings.vsync;

        Ok(Self {
            event_loop: Some(event_loop),
            state: AppState {
                controller,
                window: None,
                render: None,
                input: InputState::new(),
                frames: FrameCounter::new(Instant::now()),
                vsync,
                settings,
            },
        })
    }

    /// Access the controller before the event loop starts, e.g. to seed a
    /// pattern or switch the framing mode.
    pub fn controller_mut(&mut self) -> &mut SimulationController {
        &mut self.state.controller
    }

    /// Run the application (consumes self and starts the event loop).
    pub fn run(mut self) {
        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);
        log_controls();

        event_loop
            .run_app(&mut self.state)
            .expect("Failed to run event loop");
    }
}

fn log_controls() {
    log::info!("SPACE pause | left mouse draw/stamp | right drag pan | wheel zoom at cursor");
    log::info!("C clear | R randomize | G glider mode | T rotate glider | H reset view");
    log::info!("1-4 seed glider/blinker/block/gun | -/= resize grid | [/] speed | U speed limit");
    log::info!("L toggle vsync | ESC quit");
}

impl AppState {
    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key_code: KeyCode) {
        match key_code {
            KeyCode::Space => {
                self.controller.toggle_paused();
            }
            KeyCode::KeyC => self.controller.clear(),
            KeyCode::KeyR => self.controller.randomize(),
            KeyCode::KeyG => {
                self.controller.toggle_glider_mode();
            }
            KeyCode::KeyT => {
                self.controller.rotate_stamp();
            }
            KeyCode::KeyH => self.controller.reset_view(),
            KeyCode::KeyL => {
                self.vsync = !self.vsync;
                if let Some(render) = self.render.as_mut() {
                    render.set_vsync(self.vsync);
                }
            }
            KeyCode::KeyU => {
                let limit = self.controller.limit_speed();
                self.controller.set_limit_speed(!limit);
            }
            KeyCode::BracketLeft => {
                let rate = self.controller.updates_per_second();
                let _ = self.controller.set_updates_per_second(rate / 2.0);
            }
            KeyCode::BracketRight => {
                let rate = self.controller.updates_per_second();
                let _ = self.controller.set_updates_per_second(rate * 2.0);
            }
            KeyCode::Minus => self.resize_grid_by(|dim| (dim / 2).max(MIN_GRID_DIM)),
            KeyCode::Equal => self.resize_grid_by(|dim| (dim * 2).min(MAX_GRID_DIM)),
            KeyCode::Digit1 => self.controller.seed_pattern(Pattern::Glider),
            KeyCode::Digit2 => self.controller.seed_pattern(Pattern::Blinker),
            KeyCode::Digit3 => self.controller.seed_pattern(Pattern::Block),
            KeyCode::Digit4 => self.controller.seed_pattern(Pattern::GosperGun),
            KeyCode::Escape => event_loop.exit(),
            _ => {}
        }
    }

    fn resize_grid_by(&mut self, scale: impl Fn(u32) -> u32) {
        let width = scale(self.controller.grid().width());
        let height = scale(self.controller.grid().height());
        if let Err(err) = self.controller.resize_grid(width, height) {
            log::warn!("grid resize failed: {err}");
        }
    }

    fn update_title(&mut self, now: Instant) {
        let Some(fps) = self.frames.tick(now) else {
            return;
        };
        if let Some(window) = self.window.as_ref() {
            let status = if self.controller.is_paused() {
                "Paused"
            } else {
                "Running"
            };
            window.set_title(&format!(
                "Lichen - Game of Life ({}) | gen {} | FPS: {} | {}",
                self.controller.engine_name(),
                self.controller.generation(),
                fps,
                status,
            ));
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = WindowAttributes::default()
            .with_title("Lichen - Game of Life")
            .with_inner_size(LogicalSize::new(
                self.settings.window_width,
                self.settings.window_height,
            ));

        let Ok(window) = event_loop.create_window(attributes) else {
            log::error!("failed to create window");
            event_loop.exit();
            return;
        };
        let window = Arc::new(window);
        let (width, height): (u32, u32) = window.inner_size().into();
        self.controller.on_window_resize(width, height);

        match RenderEngine::new(window.clone(), width, height, self.vsync) {
            Ok(render) => {
                self.render = Some(render);
                self.window = Some(window);
            }
            Err(err) => {
                log::error!("failed to initialize renderer: {err}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.controller.on_window_resize(width, height);
                if let Some(render) = self.render.as_mut() {
                    render.resize(width, height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle_key(event_loop, key_code),
            WindowEvent::CursorMoved { position, .. } => {
                if let Some((dx, dy)) = self.input.cursor_moved(position.x, position.y) {
                    self.controller.pan_view(dx, dy);
                } else if self.input.left_held() && !self.controller.glider_mode() {
                    // Freehand drawing follows the drag; gliders stamp once
                    // per press instead.
                    let (x, y) = self.input.cursor();
                    self.controller.pointer_draw(x, y);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => match button {
                MouseButton::Left => {
                    let pressed = state == ElementState::Pressed;
                    self.input.set_left_held(pressed);
                    if pressed {
                        let (x, y) = self.input.cursor();
                        self.controller.pointer_draw(x, y);
                    }
                }
                MouseButton::Right => {
                    self.input.set_right_held(state == ElementState::Pressed);
                }
                _ => {}
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y as f64,
                    MouseScrollDelta::PixelDelta(position) => position.y,
                };
                if scroll != 0.0 {
                    let factor = if scroll > 0.0 {
                        ZOOM_STEP
                    } else {
                        1.0 / ZOOM_STEP
                    };
                    let (x, y) = self.input.cursor();
                    self.controller.zoom_at(x, y, factor);
                }
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                self.controller.tick(now);
                if let Some(render) = self.render.as_mut() {
                    render.render_frame(self.controller.grid(), self.controller.view());
                }
                self.update_title(now);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}
