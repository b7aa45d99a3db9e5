//! A* pathfinding algorithm.
//!
//! Implements A* search on the occupancy grid with support for:
//! - 8-connected movement without corner cutting
//! - Elliptical corridor pruning around the straight line
//! - Clearance penalty and waypoint attraction fields
//! - Blocked endpoint repair by nearest free cell

mod planner;
mod types;

pub use planner::AStarPlanner;
pub use types::{
    AStarConfig, DIAGONAL_COST, HEURISTIC_DIAGONAL, ORTHOGONAL_COST, PathFailure, PathResult,
    heuristic,
};

use crate::core::GridCoord;
use crate::grid::OccupancyGrid;

/// Quick path finding with default configuration
pub fn find_path(grid: &OccupancyGrid, start: GridCoord, goal: GridCoord) -> PathResult {
    AStarPlanner::with_defaults(grid).find_path(start, goal)
}

/// Check if a path exists within the default corridor
pub fn path_exists(grid: &OccupancyGrid, start: GridCoord, goal: GridCoord) -> bool {
    find_path(grid, start, goal).success
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CellState;

    #[test]
    fn test_path_exists() {
        let mut grid = OccupancyGrid::new(10, 10, 10.0);
        assert!(path_exists(&grid, GridCoord::new(0, 0), GridCoord::new(9, 9)));

        for y in 0..10 {
            grid.set(GridCoord::new(5, y), CellState::Blocked);
        }
        assert!(!path_exists(&grid, GridCoord::new(0, 0), GridCoord::new(9, 9)));
    }
}
