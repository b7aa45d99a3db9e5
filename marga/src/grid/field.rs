//! Multi-source breadth-first distance fields.
//!
//! A [`FloodField`] stores, per grid cell, the 4-connected step count to the
//! nearest seed cell. Seeds hold 0, cells the flood never reached hold
//! [`FloodField::UNREACHED`].
//!
//! Two fields are used by the planner:
//! - [`DistanceField`]: seeded from the raw (uninflated) obstacle rectangles,
//!   drives the Safe-mode clearance penalty
//! - [`WaypointField`]: seeded from the declared waypoints, drives the
//!   attraction cost of Direct planning

use std::collections::VecDeque;

use super::OccupancyGrid;
use super::builder::cells_in_rect;
use crate::core::{GridCoord, Rect, WorldPoint};

/// Per-cell BFS distance to the nearest seed.
#[derive(Clone, Debug, PartialEq)]
pub struct FloodField {
    values: Vec<i32>,
    width: usize,
    height: usize,
}

/// Distance in cells to the nearest raw obstacle.
pub type DistanceField = FloodField;

/// Distance in cells to the nearest waypoint.
pub type WaypointField = FloodField;

impl FloodField {
    /// Sentinel for cells the flood did not reach
    pub const UNREACHED: i32 = -1;

    /// Flood from the given seed cells. Out-of-bounds and duplicate seeds are ignored.
    pub fn from_seeds(
        width: usize,
        height: usize,
        seeds: impl IntoIterator<Item = GridCoord>,
    ) -> Self {
        let mut field = Self {
            values: vec![Self::UNREACHED; width * height],
            width,
            height,
        };

        let mut queue = VecDeque::new();
        for seed in seeds {
            if let Some(i) = field.index(seed) {
                if field.values[i] == Self::UNREACHED {
                    field.values[i] = 0;
                    queue.push_back(seed);
                }
            }
        }

        while let Some(cell) = queue.pop_front() {
            let Some(ci) = field.index(cell) else {
                continue;
            };
            let next_value = field.values[ci] + 1;
            for neighbor in cell.neighbors_4() {
                if let Some(ni) = field.index(neighbor) {
                    if field.values[ni] == Self::UNREACHED {
                        field.values[ni] = next_value;
                        queue.push_back(neighbor);
                    }
                }
            }
        }

        field
    }

    /// Distance to the nearest raw obstacle, seeded from every cell whose
    /// centre lies inside an obstacle rectangle.
    pub fn distance_to_obstacles(grid: &OccupancyGrid, obstacles: &[Rect]) -> DistanceField {
        if grid.is_empty() {
            return Self::from_seeds(grid.width(), grid.height(), std::iter::empty());
        }
        let seeds: Vec<GridCoord> = obstacles
            .iter()
            .flat_map(|rect| cells_in_rect(grid, rect))
            .collect();
        Self::from_seeds(grid.width(), grid.height(), seeds)
    }

    /// Distance to the nearest waypoint cell.
    pub fn distance_to_waypoints(grid: &OccupancyGrid, waypoints: &[WorldPoint]) -> WaypointField {
        if grid.is_empty() {
            return Self::from_seeds(grid.width(), grid.height(), std::iter::empty());
        }
        let seeds: Vec<GridCoord> = waypoints.iter().map(|&p| grid.world_to_grid(p)).collect();
        Self::from_seeds(grid.width(), grid.height(), seeds)
    }

    /// Field width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Field height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// True if the field has no cells
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True if the field has the same dimensions as the grid
    pub fn matches(&self, grid: &OccupancyGrid) -> bool {
        self.width == grid.width() && self.height == grid.height()
    }

    /// True if at least one cell was seeded
    pub fn has_seeds(&self) -> bool {
        self.values.contains(&0)
    }

    /// Raw value including the sentinel; `None` out of bounds
    #[inline]
    pub fn raw(&self, coord: GridCoord) -> Option<i32> {
        self.index(coord).map(|i| self.values[i])
    }

    /// Distance in cells; `None` if out of bounds or unreached
    #[inline]
    pub fn get(&self, coord: GridCoord) -> Option<i32> {
        self.raw(coord).filter(|&v| v != Self::UNREACHED)
    }

    #[inline]
    fn index(&self, coord: GridCoord) -> Option<usize> {
        if coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
        {
            Some(coord.y as usize * self.width + coord.x as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_seed_neighbors() {
        let field = FloodField::from_seeds(5, 5, [GridCoord::new(0, 0)]);
        assert_eq!(field.get(GridCoord::new(0, 0)), Some(0));
        assert_eq!(field.get(GridCoord::new(1, 0)), Some(1));
        assert_eq!(field.get(GridCoord::new(0, 1)), Some(1));
        // 4-connected: diagonal costs two steps
        assert_eq!(field.get(GridCoord::new(1, 1)), Some(2));
        assert_eq!(field.get(GridCoord::new(4, 4)), Some(8));
    }

    #[test]
    fn test_multi_source_takes_nearest() {
        let field = FloodField::from_seeds(9, 1, [GridCoord::new(0, 0), GridCoord::new(8, 0)]);
        let row: Vec<i32> = (0..9).filter_map(|x| field.get(GridCoord::new(x, 0))).collect();
        assert_eq!(row, vec![0, 1, 2, 3, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_no_seeds_stays_unreached() {
        let field = FloodField::from_seeds(3, 3, [GridCoord::new(7, 7)]);
        assert!(!field.has_seeds());
        assert_eq!(field.raw(GridCoord::new(1, 1)), Some(FloodField::UNREACHED));
        assert_eq!(field.get(GridCoord::new(1, 1)), None);
        assert_eq!(field.raw(GridCoord::new(3, 0)), None);
    }

    #[test]
    fn test_distance_to_obstacles_uses_raw_rect() {
        let grid = OccupancyGrid::new(10, 10, 10.0);
        // Only cell (0,0) has its centre (5,5) inside
        let field = DistanceField::distance_to_obstacles(&grid, &[Rect::new(0.0, 0.0, 8.0, 8.0)]);
        assert_eq!(field.get(GridCoord::new(0, 0)), Some(0));
        assert_eq!(field.get(GridCoord::new(1, 0)), Some(1));
        assert_eq!(field.get(GridCoord::new(0, 1)), Some(1));
        assert!(field.matches(&grid));
    }

    #[test]
    fn test_distance_to_waypoints() {
        let grid = OccupancyGrid::new(10, 10, 10.0);
        let field = WaypointField::distance_to_waypoints(
            &grid,
            &[WorldPoint::new(55.0, 55.0), WorldPoint::new(-5.0, 0.0)],
        );
        assert_eq!(field.get(GridCoord::new(5, 5)), Some(0));
        assert_eq!(field.get(GridCoord::new(5, 8)), Some(3));
        assert_eq!(field.get(GridCoord::new(0, 0)), Some(10));
    }
}
