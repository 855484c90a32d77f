//! The step engine seam between the controller and compute backends.

use crate::grid::GridBuffer;

/// Computes one generation transition.
///
/// `step` reads the grid's active buffer, writes generation N+1 into the
/// inactive buffer, and finishes by swapping the two. The active buffer must
/// not be mutated during the pass; callers observe either generation N or
/// generation N+1, never a partial state.
pub trait StepEngine {
    fn step(&mut self, grid: &mut GridBuffer);

    /// Backend name for logging and the window title.
    fn name(&self) -> &str;
}
