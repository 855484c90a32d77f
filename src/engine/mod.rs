//! Generation step engines.
//!
//! A step engine computes the next generation into the grid's inactive
//! buffer and publishes it with a buffer swap. The rule is pure and
//! order-independent across cells, so backends are free to schedule the work
//! however they like: [`cpu::CpuStepEngine`] fans out over row bands on a
//! thread scope, [`gpu::GpuStepEngine`] dispatches a compute shader.

pub mod cpu;
pub mod gpu;
pub mod traits;

pub use cpu::CpuStepEngine;
pub use gpu::GpuStepEngine;
pub use traits::StepEngine;
