//! Test utilities for Marga integration tests.
//!
//! Scene builders and path checks shared by the test binaries.

#![allow(dead_code)]

use std::path::PathBuf;

use marga::core::{CellState, GridCoord, MapSpec, PlanningScene, Rect, RobotFootprint, WorldPoint};
use marga::grid::{OccupancyGrid, has_line_of_sight};

/// Initialize logging once per test binary.
pub fn init_logging() {
    env_logger::try_init().ok();
}

/// Path of a fixture under tests/scenes/.
pub fn scene_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("scenes")
        .join(name)
}

/// Open map with a zero-size robot, so obstacles are not inflated.
pub fn point_robot_scene(width: usize, height: usize, resolution: f32) -> PlanningScene {
    PlanningScene::new(MapSpec::new(width, height, resolution))
        .with_robot(RobotFootprint::new(0.0, 0.0))
}

/// 30x30 map (resolution 10) with a wall at cells x 12..=13, y 5..=15.
///
/// The wall sits on the straight line between cells (1,10) and (25,10).
pub fn wall_scene() -> PlanningScene {
    point_robot_scene(30, 30, 10.0).with_obstacle(Rect::new(120.0, 50.0, 20.0, 110.0))
}

/// Grid with a random share of blocked cells.
pub fn random_grid(rng: &mut impl rand::Rng, width: usize, height: usize, density: f64) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(width, height, 10.0);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            if rng.random_bool(density) {
                grid.set(GridCoord::new(x, y), CellState::Blocked);
            }
        }
    }
    grid
}

/// Random passable cell.
pub fn random_free_cell(rng: &mut impl rand::Rng, grid: &OccupancyGrid) -> Option<GridCoord> {
    let free: Vec<GridCoord> = grid.coords_with(CellState::Free).collect();
    if free.is_empty() {
        None
    } else {
        Some(free[rng.random_range(0..free.len())])
    }
}

/// Assert the path is 8-connected with no corner cutting.
pub fn assert_valid_grid_path(grid: &OccupancyGrid, path: &[GridCoord]) {
    for pair in path.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(grid.is_passable(b), "path enters blocked cell {:?}", b);
        assert_eq!(a.chebyshev_distance(&b), 1, "non-adjacent step {:?} -> {:?}", a, b);
        if a.x != b.x && a.y != b.y {
            assert!(
                grid.is_passable(GridCoord::new(b.x, a.y)) && grid.is_passable(GridCoord::new(a.x, b.y)),
                "corner cut at {:?} -> {:?}",
                a,
                b
            );
        }
    }
}

/// Assert `pulled` is an ordered subsequence of `path` with clear straight legs.
pub fn assert_valid_pull(grid: &OccupancyGrid, path: &[GridCoord], pulled: &[GridCoord]) {
    let mut cursor = 0;
    for p in pulled {
        let offset = path[cursor..]
            .iter()
            .position(|c| c == p)
            .unwrap_or_else(|| panic!("{:?} is not a later element of the path", p));
        cursor += offset + 1;
    }
    for pair in pulled.windows(2) {
        assert!(has_line_of_sight(grid, pair[0], pair[1]));
    }
}

/// Largest gap between consecutive points.
pub fn max_step(points: &[WorldPoint]) -> f32 {
    points
        .windows(2)
        .map(|pair| pair[0].distance(&pair[1]))
        .fold(0.0, f32::max)
}
