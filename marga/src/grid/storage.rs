//! Occupancy grid storage.
//!
//! The grid uses a coordinate system where:
//! - (0, 0) is the world origin
//! - Cell (x, y) covers `[x*res, (x+1)*res) x [y*res, (y+1)*res)`
//! - Cells are stored row-major, one [`CellState`] per cell
//!
//! A grid is a value: [`GridBuilder`](super::GridBuilder) returns a fresh one
//! for every planning request and nothing mutates it in place afterwards,
//! apart from the visited overlay a search publishes for visualization.

use crate::core::{CellState, GridCoord, MapSpec, WorldPoint};

/// Row-major occupancy grid.
#[derive(Clone, Debug, PartialEq)]
pub struct OccupancyGrid {
    cells: Vec<CellState>,
    width: usize,
    height: usize,
    resolution: f32,
}

impl OccupancyGrid {
    /// Create an all-free grid
    pub fn new(width: usize, height: usize, resolution: f32) -> Self {
        Self {
            cells: vec![CellState::Free; width * height],
            width,
            height,
            resolution,
        }
    }

    /// Create an all-free grid sized for a map (0x0 for a non-positive resolution)
    pub fn for_map(map: &MapSpec) -> Self {
        let (width, height) = map.grid_dimensions();
        Self::new(width, height, map.resolution)
    }

    /// Parse a grid from ASCII rows (`#` blocked, anything else free).
    ///
    /// Row 0 of the input becomes grid row y = 0.
    pub fn from_ascii(rows: &[&str], resolution: f32) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new(width, height, resolution);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    grid.set(GridCoord::new(x as i32, y as i32), CellState::Blocked);
                }
            }
        }
        grid
    }

    /// Grid width in cells
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// World units per cell
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// True if the grid has no cells (degenerate map)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Raw access to the cell array
    #[inline]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Convert world coordinates to grid coordinates
    #[inline]
    pub fn world_to_grid(&self, point: WorldPoint) -> GridCoord {
        GridCoord::new(
            (point.x / self.resolution).floor() as i32,
            (point.y / self.resolution).floor() as i32,
        )
    }

    /// Convert grid coordinates to world coordinates (cell center)
    #[inline]
    pub fn grid_to_world(&self, coord: GridCoord) -> WorldPoint {
        WorldPoint::new(
            (coord.x as f32 + 0.5) * self.resolution,
            (coord.y as f32 + 0.5) * self.resolution,
        )
    }

    /// Check if grid coordinates are within bounds
    #[inline]
    pub fn is_valid_coord(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    /// Convert grid coordinates to flat array index
    #[inline]
    pub fn coord_to_index(&self, coord: GridCoord) -> Option<usize> {
        if self.is_valid_coord(coord) {
            Some(coord.y as usize * self.width + coord.x as usize)
        } else {
            None
        }
    }

    /// Convert flat array index to grid coordinates
    #[inline]
    pub fn index_to_coord(&self, index: usize) -> GridCoord {
        GridCoord::new((index % self.width) as i32, (index / self.width) as i32)
    }

    /// Cell state at grid coordinates
    #[inline]
    pub fn get(&self, coord: GridCoord) -> Option<CellState> {
        self.coord_to_index(coord).map(|i| self.cells[i])
    }

    /// Set a cell. Returns false if the coordinate is out of bounds.
    #[inline]
    pub fn set(&mut self, coord: GridCoord, state: CellState) -> bool {
        match self.coord_to_index(coord) {
            Some(i) => {
                self.cells[i] = state;
                true
            }
            None => false,
        }
    }

    /// In bounds and not blocked
    #[inline]
    pub fn is_passable(&self, coord: GridCoord) -> bool {
        self.get(coord).is_some_and(CellState::is_passable)
    }

    /// Out of bounds or blocked
    #[inline]
    pub fn is_blocked(&self, coord: GridCoord) -> bool {
        !self.is_passable(coord)
    }

    /// Number of cells in the given state
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Coordinates of every cell in the given state, row-major
    pub fn coords_with(&self, state: CellState) -> impl Iterator<Item = GridCoord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |&(_, &c)| c == state)
            .map(|(i, _)| self.index_to_coord(i))
    }

    /// Reset every visited cell back to free
    pub fn clear_visited(&mut self) {
        for cell in &mut self.cells {
            if *cell == CellState::Visited {
                *cell = CellState::Free;
            }
        }
    }

    /// ASCII dump, one row per line (y = 0 first)
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width.max(1)) {
            out.extend(row.iter().map(|c| c.as_char()));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_conversion() {
        let grid = OccupancyGrid::new(10, 8, 10.0);
        let coord = GridCoord::new(3, 4);
        assert_eq!(grid.grid_to_world(coord), WorldPoint::new(35.0, 45.0));
        assert_eq!(grid.world_to_grid(WorldPoint::new(39.9, 40.0)), coord);

        let idx = grid.coord_to_index(coord).unwrap();
        assert_eq!(grid.index_to_coord(idx), coord);
        assert!(grid.coord_to_index(GridCoord::new(10, 0)).is_none());
        assert!(grid.coord_to_index(GridCoord::new(0, -1)).is_none());
    }

    #[test]
    fn test_passability() {
        let mut grid = OccupancyGrid::new(4, 4, 1.0);
        grid.set(GridCoord::new(1, 1), CellState::Blocked);
        grid.set(GridCoord::new(2, 2), CellState::Visited);
        assert!(grid.is_blocked(GridCoord::new(1, 1)));
        assert!(grid.is_passable(GridCoord::new(2, 2)));
        assert!(grid.is_blocked(GridCoord::new(-1, 0)));
        assert!(!grid.set(GridCoord::new(4, 0), CellState::Blocked));

        grid.clear_visited();
        assert_eq!(grid.count(CellState::Visited), 0);
        assert_eq!(grid.count(CellState::Blocked), 1);
    }

    #[test]
    fn test_degenerate_map() {
        let grid = OccupancyGrid::for_map(&MapSpec::new(10, 10, 0.0));
        assert!(grid.is_empty());
        assert_eq!(grid.width(), 0);
        assert_eq!(grid.to_ascii(), "");
    }

    #[test]
    fn test_ascii_round_trip() {
        let rows = ["..#", "#..", "..."];
        let grid = OccupancyGrid::from_ascii(&rows, 1.0);
        assert_eq!(grid.to_ascii(), "..#\n#..\n...\n");
        let blocked: Vec<_> = grid.coords_with(CellState::Blocked).collect();
        assert_eq!(blocked, vec![GridCoord::new(2, 0), GridCoord::new(0, 1)]);
    }
}
