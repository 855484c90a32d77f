// src/lib.rs
//! Lichen
//!
//! A toroidal Conway's Game of Life engine built on wgpu and winit. The grid
//! steps through a double-buffered, data-parallel transition (CPU thread
//! fan-out by default, an optional GPU compute backend behind the same
//! trait), and is viewed through a pan/zoom camera whose forward projection
//! and inverse mouse unprojection share one set of formulas.

pub mod app;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod grid;
pub mod input;
pub mod pattern;
pub mod perf;
pub mod prelude;
pub mod render;
pub mod view;

// Re-export main types for convenience
pub use app::LichenApp;

/// Creates a default application instance: default settings, CPU backend.
pub fn default() -> Result<LichenApp, error::InitError> {
    LichenApp::new(
        config::Settings::default(),
        Box::new(engine::CpuStepEngine::new()),
    )
}
