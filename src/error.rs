//! Error types for the lichen engine.
//!
//! Configuration problems are recoverable: the offending operation is
//! rejected and the previous state stays in effect. Grid allocation and GPU
//! initialization failures are fatal and propagate to the caller.

use thiserror::Error;

/// Invalid operator-supplied configuration. Never fatal; the caller keeps
/// its prior valid state.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidGridSize { width: u32, height: u32 },

    #[error("window dimensions must be positive, got {width}x{height}")]
    InvalidWindowSize { width: u32, height: u32 },

    #[error("updates per second must be a positive number, got {0}")]
    InvalidUpdateRate(f64),
}

/// Grid construction failures. Allocation failure is fatal; the caller must
/// not be left with a partially-built grid.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("failed to allocate two {cells}-cell buffers")]
    Allocation {
        cells: usize,
        #[source]
        source: std::collections::TryReserveError,
    },
}

/// Anything that can stop the engine from coming up.
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Gpu(#[from] GpuError),
}

/// GPU initialization failures, for the compute backend and the renderer.
#[derive(Debug, Error)]
pub enum GpuError {
    #[error("no compatible GPU adapter found")]
    NoAdapter,

    #[error("failed to create GPU device")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),

    #[error("failed to create rendering surface")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
}
