//! Stateful planner facade.
//!
//! [`Pathfinder`] bundles grid construction, field generation, A* search and
//! the smoothing suite behind one object. Every call that needs a grid
//! rebuilds it from the [`PlanningScene`] it is given; the only state kept
//! between calls is the most recently built grid (with the last search's
//! closed cells marked [`CellState::Visited`]) and its fields, which
//! visualization code reads through [`Pathfinder::grid`].

use log::debug;

use super::astar::{AStarConfig, AStarPlanner, PathResult};
use super::progress::{NoProgress, SearchProgress};
use super::smoothing::{self, PathSmoother};
use crate::core::{CellState, GridCoord, PathMode, PlanningScene, WorldPoint};
use crate::grid::{DistanceField, FloodField, GridBuilder, OccupancyGrid, WaypointField};

/// Grid planner with a published grid snapshot.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    config: AStarConfig,
    grid: OccupancyGrid,
    distance_field: Option<DistanceField>,
    waypoint_field: Option<WaypointField>,
}

impl Default for Pathfinder {
    fn default() -> Self {
        Self::new(AStarConfig::default())
    }
}

impl Pathfinder {
    /// Create a pathfinder with an empty grid
    pub fn new(config: AStarConfig) -> Self {
        Self {
            config,
            grid: OccupancyGrid::new(0, 0, 0.0),
            distance_field: None,
            waypoint_field: None,
        }
    }

    /// Search configuration
    pub fn config(&self) -> &AStarConfig {
        &self.config
    }

    /// Set the corridor detour factor
    pub fn set_detour_factor(&mut self, detour_factor: f32) {
        self.config.detour_factor = detour_factor;
    }

    /// Set the corridor margin in cells
    pub fn set_detour_margin(&mut self, detour_margin: i32) {
        self.config.detour_margin = detour_margin;
    }

    /// Most recently built grid
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Distance field of the most recent Safe-mode build, if any
    pub fn distance_field(&self) -> Option<&DistanceField> {
        self.distance_field.as_ref()
    }

    /// Most recently generated waypoint field, if any
    pub fn waypoint_field(&self) -> Option<&WaypointField> {
        self.waypoint_field.as_ref()
    }

    /// Rebuild the configuration-space grid.
    ///
    /// Invalidates both fields; Safe mode rebuilds the distance field.
    pub fn generate_configuration_space(
        &mut self,
        scene: &PlanningScene,
        mode: PathMode,
        safety_threshold: f32,
        edge_threshold: f32,
    ) -> &OccupancyGrid {
        self.grid = GridBuilder::new(mode, safety_threshold, edge_threshold).build(scene);
        self.waypoint_field = None;
        self.distance_field = match mode {
            PathMode::Safe => Some(FloodField::distance_to_obstacles(&self.grid, &scene.obstacles)),
            PathMode::Aggressive => None,
        };
        &self.grid
    }

    /// Rebuild the waypoint attraction field on the current grid
    pub fn generate_waypoint_field(&mut self, scene: &PlanningScene) -> &WaypointField {
        let field = FloodField::distance_to_waypoints(&self.grid, &scene.waypoint_positions());
        self.waypoint_field.insert(field)
    }

    /// Rebuild the grid for `mode` and search from `start` to `goal`.
    ///
    /// An empty `path_grid` signals failure; `failure_reason` says why.
    #[allow(clippy::too_many_arguments)]
    pub fn find_path(
        &mut self,
        scene: &PlanningScene,
        start: GridCoord,
        goal: GridCoord,
        mode: PathMode,
        safety_threshold: f32,
        edge_threshold: f32,
        use_waypoint_field: bool,
    ) -> PathResult {
        self.find_path_with_progress(
            scene,
            start,
            goal,
            mode,
            safety_threshold,
            edge_threshold,
            use_waypoint_field,
            &mut NoProgress,
        )
    }

    /// [`find_path`](Self::find_path) with progress reporting.
    #[allow(clippy::too_many_arguments)]
    pub fn find_path_with_progress<P: SearchProgress + ?Sized>(
        &mut self,
        scene: &PlanningScene,
        start: GridCoord,
        goal: GridCoord,
        mode: PathMode,
        safety_threshold: f32,
        edge_threshold: f32,
        use_waypoint_field: bool,
        progress: &mut P,
    ) -> PathResult {
        self.generate_configuration_space(scene, mode, safety_threshold, edge_threshold);
        if use_waypoint_field {
            self.generate_waypoint_field(scene);
        }

        let result = {
            let mut planner = AStarPlanner::new(&self.grid, self.config.clone());
            if let Some(field) = &self.distance_field {
                planner = planner.with_distance_field(field);
            }
            if use_waypoint_field {
                if let Some(field) = &self.waypoint_field {
                    planner = planner.with_waypoint_field(field);
                }
            }
            planner.find_path_with_progress(start, goal, progress)
        };

        for &coord in &result.visited {
            self.grid.set(coord, CellState::Visited);
        }
        debug!(
            "[Pathfinder] {:?} search: success={}, expanded={}",
            mode, result.success, result.nodes_expanded
        );
        result
    }

    /// String-pull a grid path against the current grid
    pub fn smooth_path_string_pulling(&self, path: &[GridCoord]) -> Vec<GridCoord> {
        PathSmoother::new(&self.grid).string_pull(path)
    }

    /// String-pull a world path against the current grid
    pub fn smooth_world_path_string_pulling(&self, path: &[WorldPoint]) -> Vec<WorldPoint> {
        PathSmoother::new(&self.grid).string_pull_world(path)
    }

    /// Centripetal Catmull-Rom through the control points
    pub fn smooth_path_catmull_rom(
        &self,
        points: &[WorldPoint],
        tension: f32,
        samples_per_span: usize,
    ) -> Vec<WorldPoint> {
        smoothing::catmull_rom(points, tension, samples_per_span)
    }

    /// Chaikin corner cutting, reverting on collision with the current grid
    pub fn smooth_path_chaikin(&self, points: &[WorldPoint], iterations: usize) -> Vec<WorldPoint> {
        PathSmoother::new(&self.grid).chaikin(points, iterations)
    }

    /// Uniform arc-length resampling
    pub fn resample_by_arc_length(&self, points: &[WorldPoint], spacing: f32) -> Vec<WorldPoint> {
        smoothing::resample_by_arc_length(points, spacing)
    }
}
