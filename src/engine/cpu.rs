//! Portable data-parallel step backend.
//!
//! The grid is split into horizontal bands, one per worker, and each band of
//! the next-generation buffer is filled on its own scoped thread while every
//! worker reads the shared current buffer. Band boundaries need no
//! synchronization: writes are disjoint and reads are immutable for the
//! whole pass.

use crate::engine::traits::StepEngine;
use crate::grid::GridBuffer;

/// CPU step engine with a fixed worker fan-out.
pub struct CpuStepEngine {
    workers: usize,
}

impl CpuStepEngine {
    /// One worker per logical core.
    pub fn new() -> Self {
        Self::with_workers(num_cpus::get())
    }

    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }
}

impl Default for CpuStepEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StepEngine for CpuStepEngine {
    fn step(&mut self, grid: &mut GridBuffer) {
        let width = grid.width() as usize;
        let height = grid.height() as usize;
        let workers = self.workers.min(height);
        let band_rows = height.div_ceil(workers);
        let (current, next) = grid.split();

        if workers == 1 {
            step_band(current, next, width, height, 0);
        } else {
            std::thread::scope(|scope| {
                for (band, rows) in next.chunks_mut(band_rows * width).enumerate() {
                    let first_row = band * band_rows;
                    scope.spawn(move || step_band(current, rows, width, height, first_row));
                }
            });
        }

        grid.swap();
    }

    fn name(&self) -> &str {
        "cpu"
    }
}

/// Fill `band` (rows starting at `first_row`) of the next generation from
/// the full current buffer, with toroidal neighbor addressing.
fn step_band(current: &[bool], band: &mut [bool], width: usize, height: usize, first_row: usize) {
    let rows = band.len() / width;
    for local_y in 0..rows {
        let y = first_row + local_y;
        for x in 0..width {
            let mut neighbors = 0u8;
            for dy in -1i64..=1 {
                for dx in -1i64..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = (x as i64 + dx).rem_euclid(width as i64) as usize;
                    let ny = (y as i64 + dy).rem_euclid(height as i64) as usize;
                    if current[ny * width + nx] {
                        neighbors += 1;
                    }
                }
            }

            let alive = current[y * width + x];
            band[local_y * width + x] = match (alive, neighbors) {
                (true, 2) | (true, 3) => true,
                (false, 3) => true,
                _ => false,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{stamp, Pattern, Rotation};

    fn copy_of(grid: &GridBuffer) -> GridBuffer {
        let mut other = GridBuffer::new(grid.width(), grid.height()).unwrap();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                other.set_cell(x, y, grid.cell(x, y));
            }
        }
        other
    }

    #[test]
    fn step_is_deterministic() {
        let mut a = GridBuffer::new(32, 32).unwrap();
        a.randomize();
        let mut b = copy_of(&a);

        CpuStepEngine::with_workers(3).step(&mut a);
        CpuStepEngine::with_workers(3).step(&mut b);
        assert_eq!(a.cells(), b.cells());
    }

    #[test]
    fn worker_count_does_not_change_the_result() {
        let mut single = GridBuffer::new(31, 17).unwrap();
        single.randomize();
        let mut many = copy_of(&single);

        CpuStepEngine::with_workers(1).step(&mut single);
        CpuStepEngine::with_workers(8).step(&mut many);
        assert_eq!(single.cells(), many.cells());
    }

    #[test]
    fn block_still_life_is_stable() {
        let mut grid = GridBuffer::new(6, 4).unwrap();
        stamp(&mut grid, (2, 1), Pattern::Block.offsets(), Rotation::R0);
        let before: Vec<bool> = grid.cells().to_vec();

        let mut engine = CpuStepEngine::with_workers(2);
        engine.step(&mut grid);
        assert_eq!(grid.cells(), &before[..]);
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let mut grid = GridBuffer::new(10, 10).unwrap();
        stamp(&mut grid, (5, 5), Pattern::Blinker.offsets(), Rotation::R0);
        let horizontal: Vec<bool> = grid.cells().to_vec();

        let mut engine = CpuStepEngine::new();
        engine.step(&mut grid);
        assert!(grid.cell(5, 4) && grid.cell(5, 5) && grid.cell(5, 6));
        assert!(!grid.cell(4, 5) && !grid.cell(6, 5));

        engine.step(&mut grid);
        assert_eq!(grid.cells(), &horizontal[..]);
    }

    #[test]
    fn corner_neighbors_wrap_around_the_torus() {
        // Three live cells sharing the wrapped corner with (0, 0): a flat
        // implementation would count zero neighbors there and let everything
        // die; the torus counts three and births (0, 0) into a wrapped block.
        let mut grid = GridBuffer::new(5, 5).unwrap();
        grid.set_cell(4, 4, true);
        grid.set_cell(0, 4, true);
        grid.set_cell(4, 0, true);

        let mut engine = CpuStepEngine::new();
        engine.step(&mut grid);
        assert!(grid.cell(0, 0));
        assert!(grid.cell(4, 4) && grid.cell(0, 4) && grid.cell(4, 0));
        assert_eq!(grid.live_count(), 4);

        // The wrapped 2x2 block is a still life.
        let before: Vec<bool> = grid.cells().to_vec();
        engine.step(&mut grid);
        assert_eq!(grid.cells(), &before[..]);
    }

    #[test]
    fn glider_translates_one_cell_per_period() {
        let mut grid = GridBuffer::new(16, 16).unwrap();
        stamp(&mut grid, (5, 5), Pattern::Glider.offsets(), Rotation::R0);

        let mut engine = CpuStepEngine::new();
        for _ in 0..4 {
            engine.step(&mut grid);
        }

        let mut expected = GridBuffer::new(16, 16).unwrap();
        stamp(&mut expected, (6, 6), Pattern::Glider.offsets(), Rotation::R0);
        assert_eq!(grid.cells(), expected.cells());
    }
}
