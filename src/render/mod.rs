//! Presentation of the active buffer.
//!
//! A single fullscreen pass samples the cell texture through the view
//! transform. The aspect/crop scale is computed once per frame on the CPU by
//! [`crate::view::ViewTransform::final_scale`] and handed to the shader as a
//! uniform, so the render path can never disagree with the input path about
//! where a cell sits on screen.

pub mod engine;

pub use engine::RenderEngine;
