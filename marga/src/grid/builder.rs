//! Configuration-space rasterization.
//!
//! Turns a [`PlanningScene`] into an [`OccupancyGrid`]: every obstacle is
//! grown by the robot's inflation radius and every cell whose centre falls
//! inside a grown rectangle is blocked. An optional band along the map
//! border is blocked as well.

use log::debug;

use super::OccupancyGrid;
use crate::core::{CellState, GridCoord, PathMode, PlanningScene, Rect};

/// Builds occupancy grids from planning scenes.
#[derive(Clone, Copy, Debug)]
pub struct GridBuilder {
    mode: PathMode,
    safety_threshold: f32,
    edge_threshold: f32,
}

impl GridBuilder {
    /// Create a builder.
    ///
    /// `safety_threshold` multiplies the inflation radius in Safe mode only.
    /// `edge_threshold` is the width of the blocked border in world units.
    pub fn new(mode: PathMode, safety_threshold: f32, edge_threshold: f32) -> Self {
        Self {
            mode,
            safety_threshold,
            edge_threshold,
        }
    }

    /// Obstacle inflation radius for a scene
    pub fn inflation_radius(&self, scene: &PlanningScene) -> f32 {
        let radius = scene.robot.inflation_radius();
        match self.mode {
            PathMode::Safe => radius * self.safety_threshold,
            PathMode::Aggressive => radius,
        }
    }

    /// Rasterize the scene. A non-positive resolution yields an empty grid.
    pub fn build(&self, scene: &PlanningScene) -> OccupancyGrid {
        let mut grid = OccupancyGrid::for_map(&scene.map);
        if grid.is_empty() {
            debug!(
                "[GridBuilder] Degenerate map {}x{} @ {}",
                scene.map.width, scene.map.height, scene.map.resolution
            );
            return grid;
        }

        let inflate = self.inflation_radius(scene);
        for obstacle in &scene.obstacles {
            mark_rect(&mut grid, &obstacle.inflated(inflate));
        }

        if self.edge_threshold > 0.0 {
            let band = (self.edge_threshold / grid.resolution()).ceil() as usize;
            mark_border(&mut grid, band);
        }

        debug!(
            "[GridBuilder] {}x{} grid, {:?} mode, inflate={:.1}, blocked={}",
            grid.width(),
            grid.height(),
            self.mode,
            inflate,
            grid.count(CellState::Blocked)
        );
        grid
    }
}

/// Cells whose centres fall inside `rect` (edges included), clipped to the grid.
pub(crate) fn cells_in_rect(grid: &OccupancyGrid, rect: &Rect) -> Vec<GridCoord> {
    let res = grid.resolution();
    let x0 = ((rect.left() / res).floor() as i64).max(0);
    let y0 = ((rect.top() / res).floor() as i64).max(0);
    let x1 = ((rect.right() / res).ceil() as i64).min(grid.width() as i64);
    let y1 = ((rect.bottom() / res).ceil() as i64).min(grid.height() as i64);

    let mut cells = Vec::new();
    for y in y0..y1 {
        for x in x0..x1 {
            let coord = GridCoord::new(x as i32, y as i32);
            if rect.contains(grid.grid_to_world(coord)) {
                cells.push(coord);
            }
        }
    }
    cells
}

fn mark_rect(grid: &mut OccupancyGrid, rect: &Rect) {
    for coord in cells_in_rect(grid, rect) {
        grid.set(coord, CellState::Blocked);
    }
}

fn mark_border(grid: &mut OccupancyGrid, band: usize) {
    if band == 0 {
        return;
    }
    let (w, h) = (grid.width(), grid.height());
    for y in 0..h {
        for x in 0..w {
            if x < band || x + band >= w || y < band || y + band >= h {
                grid.set(GridCoord::new(x as i32, y as i32), CellState::Blocked);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MapSpec, RobotFootprint};

    fn scene() -> PlanningScene {
        PlanningScene::new(MapSpec::new(20, 20, 10.0)).with_robot(RobotFootprint::new(20.0, 10.0))
    }

    #[test]
    fn test_empty_scene_is_free() {
        let grid = GridBuilder::new(PathMode::Safe, 1.5, 0.0).build(&scene());
        assert_eq!(grid.width(), 20);
        assert_eq!(grid.height(), 20);
        assert_eq!(grid.count(CellState::Blocked), 0);
    }

    #[test]
    fn test_inflation_radius_by_mode() {
        let s = scene();
        assert_eq!(GridBuilder::new(PathMode::Aggressive, 1.5, 0.0).inflation_radius(&s), 10.0);
        assert_eq!(GridBuilder::new(PathMode::Safe, 1.5, 0.0).inflation_radius(&s), 15.0);
    }

    #[test]
    fn test_obstacle_inflation() {
        // 20x20 obstacle at (100,100) grown by 10 covers x,y in [90, 130]
        let s = scene().with_obstacle(Rect::new(100.0, 100.0, 20.0, 20.0));
        let grid = GridBuilder::new(PathMode::Aggressive, 1.5, 0.0).build(&s);

        // centres 95, 105, 115, 125 fall inside; 85 and 135 do not
        for v in 9..=12 {
            assert!(grid.is_blocked(GridCoord::new(v, 10)));
            assert!(grid.is_blocked(GridCoord::new(10, v)));
        }
        assert!(grid.is_passable(GridCoord::new(8, 10)));
        assert!(grid.is_passable(GridCoord::new(13, 10)));
        assert_eq!(grid.count(CellState::Blocked), 16);
    }

    #[test]
    fn test_obstacle_clipped_to_map() {
        let s = scene().with_obstacle(Rect::new(-50.0, -50.0, 70.0, 70.0));
        let grid = GridBuilder::new(PathMode::Aggressive, 1.0, 0.0).build(&s);
        assert!(grid.is_blocked(GridCoord::new(0, 0)));
        assert!(grid.is_blocked(GridCoord::new(2, 2)));
        assert!(grid.is_passable(GridCoord::new(3, 3)));
    }

    #[test]
    fn test_edge_band() {
        let grid = GridBuilder::new(PathMode::Aggressive, 1.0, 15.0).build(&scene());
        // ceil(15 / 10) = 2 cells on every side
        assert!(grid.is_blocked(GridCoord::new(1, 10)));
        assert!(grid.is_blocked(GridCoord::new(18, 10)));
        assert!(grid.is_blocked(GridCoord::new(10, 19)));
        assert!(grid.is_passable(GridCoord::new(2, 2)));
        assert!(grid.is_passable(GridCoord::new(17, 17)));
        assert_eq!(grid.count(CellState::Blocked), 400 - 16 * 16);
    }

    #[test]
    fn test_degenerate_resolution() {
        let s = PlanningScene::new(MapSpec::new(10, 10, 0.0))
            .with_obstacle(Rect::new(0.0, 0.0, 10.0, 10.0));
        let grid = GridBuilder::new(PathMode::Safe, 1.5, 10.0).build(&s);
        assert!(grid.is_empty());
    }
}
