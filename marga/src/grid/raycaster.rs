//! Bresenham line traversal for line-of-sight checks.
//!
//! Integer-only line rasterization between grid cells. Every cell the
//! rasterized line touches is yielded exactly once, start and end included:
//!
//! ```text
//! From (0,0) to (7,3):
//!
//!     3 │              ●
//!     2 │          ● ●
//!     1 │    ● ● ●
//!     0 ● ●
//!       └────────────────
//!        0 1 2 3 4 5 6 7
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use marga::grid::raycaster::{BresenhamLine, has_line_of_sight};
//!
//! for cell in BresenhamLine::new(start, end) {
//!     // inspect cell
//! }
//!
//! let clear = has_line_of_sight(&grid, start, end);
//! ```

use super::OccupancyGrid;
use crate::core::{GridCoord, WorldPoint};

/// Bresenham's line algorithm iterator.
///
/// Uses the symmetric error form (`err = dx - dy`), stepping x and y
/// independently so diagonal moves happen in a single step.
pub struct BresenhamLine {
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    error: i32,
    end_x: i32,
    end_y: i32,
    done: bool,
}

impl BresenhamLine {
    /// Create a new Bresenham line iterator from start to end coordinates.
    pub fn new(start: GridCoord, end: GridCoord) -> Self {
        let dx = (end.x - start.x).abs();
        let dy = -(end.y - start.y).abs();
        Self {
            x: start.x,
            y: start.y,
            dx,
            dy,
            sx: if start.x < end.x { 1 } else { -1 },
            sy: if start.y < end.y { 1 } else { -1 },
            error: dx + dy,
            end_x: end.x,
            end_y: end.y,
            done: false,
        }
    }

    /// Create a line iterator between world points (floor projection).
    pub fn from_world(start: WorldPoint, end: WorldPoint, resolution: f32) -> Self {
        let to_cell = |p: WorldPoint| {
            GridCoord::new(
                (p.x / resolution).floor() as i32,
                (p.y / resolution).floor() as i32,
            )
        };
        Self::new(to_cell(start), to_cell(end))
    }
}

impl Iterator for BresenhamLine {
    type Item = GridCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = GridCoord::new(self.x, self.y);

        if self.x == self.end_x && self.y == self.end_y {
            self.done = true;
            return Some(result);
        }

        let e2 = 2 * self.error;
        if e2 >= self.dy {
            if self.x == self.end_x {
                self.done = true;
                return Some(result);
            }
            self.error += self.dy;
            self.x += self.sx;
        }
        if e2 <= self.dx {
            if self.y == self.end_y {
                self.done = true;
                return Some(result);
            }
            self.error += self.dx;
            self.y += self.sy;
        }

        Some(result)
    }
}

/// Check if the straight line between two cells crosses no blocked or
/// out-of-bounds cell. Visited cells do not block.
pub fn has_line_of_sight(grid: &OccupancyGrid, start: GridCoord, end: GridCoord) -> bool {
    BresenhamLine::new(start, end).all(|cell| grid.is_passable(cell))
}

/// World-space variant of [`has_line_of_sight`].
///
/// Always false on a grid with a non-positive resolution.
pub fn has_world_line_of_sight(grid: &OccupancyGrid, start: WorldPoint, end: WorldPoint) -> bool {
    if grid.resolution() <= 0.0 {
        return false;
    }
    has_line_of_sight(grid, grid.world_to_grid(start), grid.world_to_grid(end))
}
