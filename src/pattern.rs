//! Pattern stamping with quarter-turn rotation.
//!
//! Patterns are ordered lists of cell offsets relative to a stamp center.
//! Stamping writes each rotated offset into the active buffer; offsets that
//! land outside the grid are skipped individually, so partial stamps near an
//! edge are expected rather than an error.

use crate::grid::GridBuffer;

/// Quarter-turn rotation state for stamping, cycled by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// The next quarter turn, wrapping after 270°.
    pub fn next(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R90,
            Rotation::R90 => Rotation::R180,
            Rotation::R180 => Rotation::R270,
            Rotation::R270 => Rotation::R0,
        }
    }

    /// Rotation angle in degrees, for status reporting.
    pub fn degrees(self) -> u32 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }

    /// Rotate an offset by this many quarter turns: (dx, dy) -> (-dy, dx)
    /// per turn.
    pub fn apply(self, (dx, dy): (i32, i32)) -> (i32, i32) {
        match self {
            Rotation::R0 => (dx, dy),
            Rotation::R90 => (-dy, dx),
            Rotation::R180 => (-dx, -dy),
            Rotation::R270 => (dy, -dx),
        }
    }
}

/// Named cell patterns with offsets relative to the stamp center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Glider,
    Blinker,
    Block,
    GosperGun,
}

impl Pattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pattern::Glider => "Glider",
            Pattern::Blinker => "Blinker",
            Pattern::Block => "Block",
            Pattern::GosperGun => "Gosper Gun",
        }
    }

    /// Relative cell offsets making up this pattern.
    pub fn offsets(&self) -> &'static [(i32, i32)] {
        match self {
            Pattern::Glider => &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
            Pattern::Blinker => &[(-1, 0), (0, 0), (1, 0)],
            Pattern::Block => &[(0, 0), (1, 0), (0, 1), (1, 1)],
            Pattern::GosperGun => &[
                (24, 0),
                (22, 1),
                (24, 1),
                (12, 2),
                (13, 2),
                (20, 2),
                (21, 2),
                (34, 2),
                (35, 2),
                (11, 3),
                (15, 3),
                (20, 3),
                (21, 3),
                (34, 3),
                (35, 3),
                (0, 4),
                (1, 4),
                (10, 4),
                (16, 4),
                (20, 4),
                (21, 4),
                (0, 5),
                (1, 5),
                (10, 5),
                (14, 5),
                (16, 5),
                (17, 5),
                (22, 5),
                (24, 5),
                (10, 6),
                (16, 6),
                (24, 6),
                (11, 7),
                (15, 7),
                (12, 8),
                (13, 8),
            ],
        }
    }
}

/// Write a rotated pattern onto the active buffer, centered at `center`.
///
/// Each offset is rotated, translated, and written if it lands inside the
/// grid; out-of-bounds cells are dropped one by one.
pub fn stamp(grid: &mut GridBuffer, center: (i32, i32), offsets: &[(i32, i32)], rotation: Rotation) {
    for &offset in offsets {
        let (dx, dy) = rotation.apply(offset);
        let x = center.0 + dx;
        let y = center.1 + dy;
        if x >= 0 && y >= 0 {
            grid.set_cell(x as u32, y as u32, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_cells(grid: &GridBuffer) -> Vec<(u32, u32)> {
        let mut cells = Vec::new();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if grid.cell(x, y) {
                    cells.push((x, y));
                }
            }
        }
        cells.sort();
        cells
    }

    #[test]
    fn rotation_cycles_through_four_states() {
        let mut rotation = Rotation::R0;
        for _ in 0..4 {
            rotation = rotation.next();
        }
        assert_eq!(rotation, Rotation::R0);
        assert_eq!(Rotation::R90.degrees(), 90);
    }

    #[test]
    fn quarter_turn_maps_offsets() {
        assert_eq!(Rotation::R90.apply((1, 0)), (0, 1));
        assert_eq!(Rotation::R90.apply((2, 1)), (-1, 2));
        assert_eq!(Rotation::R180.apply((1, 2)), (-1, -2));
        assert_eq!(Rotation::R270.apply((1, 0)), (0, -1));
    }

    #[test]
    fn glider_stamped_with_quarter_turn() {
        let mut grid = GridBuffer::new(20, 20).unwrap();
        stamp(
            &mut grid,
            (10, 10),
            Pattern::Glider.offsets(),
            Rotation::R90,
        );

        let mut expected: Vec<(u32, u32)> = [(0, 1), (-1, 2), (-2, 0), (-2, 1), (-2, 2)]
            .iter()
            .map(|&(dx, dy)| ((10 + dx) as u32, (10 + dy) as u32))
            .collect();
        expected.sort();
        assert_eq!(live_cells(&grid), expected);
    }

    #[test]
    fn stamp_near_edge_skips_out_of_bounds_cells() {
        let mut grid = GridBuffer::new(10, 10).unwrap();
        // Unrotated glider at the bottom-right corner: offsets past the edge
        // are dropped, the rest land.
        stamp(&mut grid, (9, 9), Pattern::Glider.offsets(), Rotation::R0);
        assert_eq!(live_cells(&grid), vec![]);

        stamp(&mut grid, (8, 8), Pattern::Glider.offsets(), Rotation::R0);
        assert_eq!(live_cells(&grid), vec![(9, 8)]);
    }

    #[test]
    fn stamp_at_negative_center_is_safe() {
        let mut grid = GridBuffer::new(10, 10).unwrap();
        stamp(&mut grid, (-1, -1), Pattern::Block.offsets(), Rotation::R0);
        assert_eq!(live_cells(&grid), vec![(0, 0)]);
    }

    #[test]
    fn block_is_a_two_by_two() {
        let mut grid = GridBuffer::new(8, 8).unwrap();
        stamp(&mut grid, (2, 2), Pattern::Block.offsets(), Rotation::R0);
        assert_eq!(live_cells(&grid), vec![(2, 2), (2, 3), (3, 2), (3, 3)]);
    }
}
