//! Simulation orchestration.
//!
//! The controller owns the grid, the step backend, the camera, and the
//! pacing clock, and serializes every state mutation (stepping, drawing,
//! stamping, resizing) through `&mut self`. No step ever overlaps another,
//! and no user action lands while a step is writing the inactive buffer.

use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::engine::traits::StepEngine;
use crate::error::{ConfigError, GridError, InitError};
use crate::grid::GridBuffer;
use crate::pattern::{self, Pattern, Rotation};
use crate::view::ViewTransform;

/// Governs step cadence independently of render cadence.
pub struct SimulationClock {
    updates_per_second: f64,
    limit_speed: bool,
    last_step: Option<Instant>,
}

impl SimulationClock {
    pub fn new(updates_per_second: f64, limit_speed: bool) -> Result<Self, ConfigError> {
        if !(updates_per_second > 0.0) {
            return Err(ConfigError::InvalidUpdateRate(updates_per_second));
        }
        Ok(Self {
            updates_per_second,
            limit_speed,
            last_step: None,
        })
    }

    pub fn updates_per_second(&self) -> f64 {
        self.updates_per_second
    }

    /// Reconfigure the rate. Non-positive (or NaN) values are rejected and
    /// the previous rate stays in effect.
    pub fn set_updates_per_second(&mut self, rate: f64) -> Result<(), ConfigError> {
        if !(rate > 0.0) {
            return Err(ConfigError::InvalidUpdateRate(rate));
        }
        self.updates_per_second = rate;
        Ok(())
    }

    pub fn limit_speed(&self) -> bool {
        self.limit_speed
    }

    pub fn set_limit_speed(&mut self, limit: bool) {
        self.limit_speed = limit;
    }

    /// Whether a step is due at `now`. Unlimited mode steps on every tick;
    /// limited mode waits out the configured interval.
    pub fn should_step(&mut self, now: Instant) -> bool {
        if !self.limit_speed {
            self.last_step = Some(now);
            return true;
        }
        let interval = Duration::from_secs_f64(1.0 / self.updates_per_second);
        match self.last_step {
            Some(last) if now.duration_since(last) < interval => false,
            _ => {
                self.last_step = Some(now);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last_step = None;
    }
}

/// Owns the simulation state and dispatches operator actions onto it.
pub struct SimulationController {
    grid: GridBuffer,
    engine: Box<dyn StepEngine>,
    view: ViewTransform,
    clock: SimulationClock,
    paused: bool,
    glider_mode: bool,
    rotation: Rotation,
    generation: u64,
}

impl SimulationController {
    /// Build the initial state from validated settings. The board starts
    /// randomized.
    pub fn new(settings: &Settings, engine: Box<dyn StepEngine>) -> Result<Self, InitError> {
        settings.validate()?;
        let mut grid = GridBuffer::new(settings.grid_width, settings.grid_height)?;
        grid.randomize();
        let view = ViewTransform::new(
            settings.window_width,
            settings.window_height,
            settings.grid_width,
            settings.grid_height,
        );
        let clock = SimulationClock::new(settings.updates_per_second, settings.limit_speed)?;
        Ok(Self {
            grid,
            engine,
            view,
            clock,
            paused: false,
            glider_mode: false,
            rotation: Rotation::default(),
            generation: 0,
        })
    }

    /// Advance one generation if the simulation is running and a step is
    /// due. Returns whether a step was taken.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.paused || !self.clock.should_step(now) {
            return false;
        }
        self.engine.step(&mut self.grid);
        self.generation += 1;
        true
    }

    pub fn toggle_paused(&mut self) -> bool {
        self.paused = !self.paused;
        log::info!("{}", if self.paused { "paused" } else { "resumed" });
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn randomize(&mut self) {
        self.grid.randomize();
        self.generation = 0;
        log::info!("board randomized");
    }

    pub fn clear(&mut self) {
        self.grid.clear();
        self.generation = 0;
        log::info!("board cleared");
    }

    /// Replace the grid. All-or-nothing: the new buffers are fully built
    /// before anything is torn down, so a failure leaves the old grid, view,
    /// and run state untouched. A successful resize pauses the simulation,
    /// reseeds the board, and returns the camera home.
    pub fn resize_grid(&mut self, width: u32, height: u32) -> Result<(), GridError> {
        let mut grid = GridBuffer::new(width, height)?;
        grid.randomize();

        self.paused = true;
        self.grid = grid;
        self.generation = 0;
        self.view.set_grid_size(width, height);
        self.clock.reset();
        log::info!("grid resized to {width}x{height}");
        Ok(())
    }

    pub fn set_updates_per_second(&mut self, rate: f64) -> Result<(), ConfigError> {
        match self.clock.set_updates_per_second(rate) {
            Ok(()) => {
                log::info!("update rate set to {rate} updates/s");
                Ok(())
            }
            Err(err) => {
                log::warn!("{err}; keeping {} updates/s", self.clock.updates_per_second());
                Err(err)
            }
        }
    }

    pub fn set_limit_speed(&mut self, limit: bool) {
        self.clock.set_limit_speed(limit);
        log::info!("speed limit {}", if limit { "on" } else { "off" });
    }

    pub fn limit_speed(&self) -> bool {
        self.clock.limit_speed()
    }

    pub fn updates_per_second(&self) -> f64 {
        self.clock.updates_per_second()
    }

    pub fn toggle_glider_mode(&mut self) -> bool {
        self.glider_mode = !self.glider_mode;
        log::info!(
            "glider mode {}",
            if self.glider_mode { "on" } else { "off" }
        );
        self.glider_mode
    }

    pub fn glider_mode(&self) -> bool {
        self.glider_mode
    }

    /// Cycle the stamp a quarter turn. Only meaningful while glider mode is
    /// active, so it is a no-op otherwise.
    pub fn rotate_stamp(&mut self) -> Rotation {
        if self.glider_mode {
            self.rotation = self.rotation.next();
            log::info!("glider rotation set to {} degrees", self.rotation.degrees());
        }
        self.rotation
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// A pointer action at a screen pixel: unproject through the view and
    /// either draw a single cell or stamp the rotated glider. Pixels in the
    /// bars or off the board are ignored.
    pub fn pointer_draw(&mut self, screen_x: f64, screen_y: f64) {
        let Some((x, y)) = self.view.screen_to_cell(screen_x, screen_y) else {
            return;
        };
        if self.glider_mode {
            pattern::stamp(
                &mut self.grid,
                (x as i32, y as i32),
                Pattern::Glider.offsets(),
                self.rotation,
            );
        } else {
            self.grid.set_cell(x, y, true);
        }
    }

    /// Clear the board and stamp a named pattern at the grid center.
    pub fn seed_pattern(&mut self, pattern: Pattern) {
        self.grid.clear();
        self.generation = 0;
        let center = (
            (self.grid.width() / 2) as i32,
            (self.grid.height() / 2) as i32,
        );
        pattern::stamp(&mut self.grid, center, pattern.offsets(), Rotation::R0);
        log::info!("seeded {} pattern", pattern.as_str());
    }

    pub fn pan_view(&mut self, screen_dx: f64, screen_dy: f64) {
        self.view.pan(screen_dx, screen_dy);
    }

    pub fn zoom_at(&mut self, screen_x: f64, screen_y: f64, factor: f64) {
        self.view.zoom_at(screen_x, screen_y, factor);
    }

    pub fn reset_view(&mut self) {
        self.view.reset();
        log::info!("view reset");
    }

    pub fn on_window_resize(&mut self, width: u32, height: u32) {
        self.view.set_window_size(width, height);
    }

    pub fn grid(&self) -> &GridBuffer {
        &self.grid
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn set_framing(&mut self, framing: crate::view::Framing) {
        self.view.set_framing(framing);
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }
}
