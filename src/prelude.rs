//! Convenience imports for typical embedders.
//!
//! ```no_run
//! use lichen::prelude::*;
//!
//! fn main() -> Result<(), lichen::error::InitError> {
//!     let app = LichenApp::new(Settings::default(), Box::new(CpuStepEngine::new()))?;
//!     app.run();
//!     Ok(())
//! }
//! ```

pub use crate::app::LichenApp;
pub use crate::config::Settings;
pub use crate::controller::{SimulationClock, SimulationController};
pub use crate::engine::{CpuStepEngine, GpuStepEngine, StepEngine};
pub use crate::error::{ConfigError, GpuError, GridError, InitError};
pub use crate::grid::GridBuffer;
pub use crate::pattern::{stamp, Pattern, Rotation};
pub use crate::view::{Framing, ViewTransform};
