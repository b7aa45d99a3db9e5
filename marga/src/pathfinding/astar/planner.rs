//! A* planner implementation.

use std::collections::{BinaryHeap, VecDeque};

use log::{debug, trace};

use super::types::{
    AStarConfig, DIAGONAL_COST, ORTHOGONAL_COST, OpenEntry, PathFailure, PathResult, SearchNode,
    heuristic,
};
use crate::core::{GridCoord, WorldPoint};
use crate::grid::{DistanceField, OccupancyGrid, WaypointField};
use crate::pathfinding::progress::{NoProgress, SearchProgress};

/// Corridor-bounded A* over an occupancy grid.
///
/// Searches 8-connected without corner cutting. The step cost is the move
/// cost plus an optional clearance penalty (from a [`DistanceField`]) and an
/// optional waypoint attraction (from a [`WaypointField`]).
pub struct AStarPlanner<'a> {
    grid: &'a OccupancyGrid,
    config: AStarConfig,
    distance_field: Option<&'a DistanceField>,
    waypoint_field: Option<&'a WaypointField>,
}

impl<'a> AStarPlanner<'a> {
    /// Create a new A* planner
    pub fn new(grid: &'a OccupancyGrid, config: AStarConfig) -> Self {
        Self {
            grid,
            config,
            distance_field: None,
            waypoint_field: None,
        }
    }

    /// Create with default configuration
    pub fn with_defaults(grid: &'a OccupancyGrid) -> Self {
        Self::new(grid, AStarConfig::default())
    }

    /// Enable the clearance penalty. Ignored if the field was built for another grid.
    pub fn with_distance_field(mut self, field: &'a DistanceField) -> Self {
        if field.matches(self.grid) {
            self.distance_field = Some(field);
        } else {
            debug!("[AStar] Distance field size mismatch, clearance penalty disabled");
        }
        self
    }

    /// Enable waypoint attraction. Ignored if the field was built for another
    /// grid or has no seeds.
    pub fn with_waypoint_field(mut self, field: &'a WaypointField) -> Self {
        if field.matches(self.grid) && field.has_seeds() {
            self.waypoint_field = Some(field);
        } else {
            debug!("[AStar] Waypoint field unusable, attraction disabled");
        }
        self
    }

    /// Planner configuration
    pub fn config(&self) -> &AStarConfig {
        &self.config
    }

    /// Find a path from start to goal (grid coordinates)
    pub fn find_path(&self, start: GridCoord, goal: GridCoord) -> PathResult {
        self.find_path_with_progress(start, goal, &mut NoProgress)
    }

    /// Find a path from start to goal (world coordinates, floor projection)
    pub fn find_path_world(&self, start: WorldPoint, goal: WorldPoint) -> PathResult {
        self.find_path(self.grid.world_to_grid(start), self.grid.world_to_grid(goal))
    }

    /// Find a path, reporting the explored corridor fraction along the way.
    pub fn find_path_with_progress<P: SearchProgress + ?Sized>(
        &self,
        start: GridCoord,
        goal: GridCoord,
        progress: &mut P,
    ) -> PathResult {
        trace!(
            "[AStar] find_path: start=({},{}) goal=({},{})",
            start.x, start.y, goal.x, goal.y
        );

        if self.grid.is_empty() {
            debug!("[AStar] FAILED: DegenerateGrid");
            return PathResult::failed(PathFailure::DegenerateGrid, 0);
        }

        let start = match self.repair_endpoint(start, "start") {
            Ok(c) => c,
            Err(reason) => return PathResult::failed(reason, 0),
        };
        let goal = match self.repair_endpoint(goal, "goal") {
            Ok(c) => c,
            Err(reason) => return PathResult::failed(reason, 0),
        };

        let lower_bound = heuristic(start, goal);
        let limit = self.config.corridor_limit(lower_bound);
        let corridor_cells = if progress.is_active() {
            self.corridor_size(start, goal, limit).max(1)
        } else {
            1
        };
        debug!(
            "[AStar] Search ({},{}) -> ({},{}), lower_bound={}, limit={}",
            start.x, start.y, goal.x, goal.y, lower_bound, limit
        );

        let mut nodes = vec![SearchNode::default(); self.grid.cell_count()];
        let mut open_set = BinaryHeap::new();
        let mut visited = Vec::new();

        let start_index = self.index(start);
        let goal_index = self.index(goal);
        nodes[start_index].opened = true;
        open_set.push(OpenEntry {
            index: start_index,
            g_cost: 0,
            h_cost: lower_bound,
        });

        let mut nodes_expanded = 0;

        while let Some(current) = open_set.pop() {
            let node = nodes[current.index];
            if node.closed || current.g_cost != node.g_cost {
                continue;
            }

            // Goal reached
            if current.index == goal_index {
                progress.report(1.0);
                return self.reconstruct_path(&nodes, goal_index, current.g_cost, nodes_expanded, visited);
            }

            nodes[current.index].closed = true;
            nodes_expanded += 1;
            let coord = self.grid.index_to_coord(current.index);
            visited.push(coord);

            if self.config.progress_interval > 0 && nodes_expanded % self.config.progress_interval == 0 {
                progress.report((visited.len() as f32 / corridor_cells as f32).min(1.0));
            }

            for (i, next) in coord.neighbors_8().into_iter().enumerate() {
                if !self.grid.is_passable(next) {
                    continue;
                }

                // No corner cutting
                let diagonal = i >= 4;
                if diagonal
                    && (self.grid.is_blocked(GridCoord::new(next.x, coord.y))
                        || self.grid.is_blocked(GridCoord::new(coord.x, next.y)))
                {
                    continue;
                }

                if heuristic(start, next) + heuristic(next, goal) > limit {
                    continue;
                }

                let next_index = self.index(next);
                if nodes[next_index].closed {
                    continue;
                }

                let move_cost = if diagonal { DIAGONAL_COST } else { ORTHOGONAL_COST };
                let new_g = current.g_cost + move_cost + self.safety_penalty(next) + self.attraction(next);

                let neighbor = &mut nodes[next_index];
                if !neighbor.opened || new_g < neighbor.g_cost {
                    neighbor.opened = true;
                    neighbor.g_cost = new_g;
                    neighbor.parent = Some(current.index);
                    open_set.push(OpenEntry {
                        index: next_index,
                        g_cost: new_g,
                        h_cost: heuristic(next, goal),
                    });
                }
            }
        }

        debug!(
            "[AStar] FAILED: NoPath after expanding {} nodes (limit={})",
            nodes_expanded, limit
        );
        let mut result = PathResult::failed(PathFailure::NoPath, nodes_expanded);
        result.visited = visited;
        result
    }

    /// Nearest passable cell to `coord` by 8-connected breadth-first search.
    ///
    /// Returns `coord` itself if it is passable and `None` if it lies outside
    /// the grid or no passable cell exists.
    pub fn nearest_passable(&self, coord: GridCoord) -> Option<GridCoord> {
        if self.grid.is_passable(coord) {
            return Some(coord);
        }
        if !self.grid.is_valid_coord(coord) {
            return None;
        }

        let mut seen = vec![false; self.grid.cell_count()];
        let mut queue = VecDeque::new();
        seen[self.index(coord)] = true;
        queue.push_back(coord);

        while let Some(current) = queue.pop_front() {
            for next in current.neighbors_8() {
                let Some(i) = self.grid.coord_to_index(next) else {
                    continue;
                };
                if seen[i] {
                    continue;
                }
                if self.grid.is_passable(next) {
                    return Some(next);
                }
                seen[i] = true;
                queue.push_back(next);
            }
        }
        None
    }

    fn repair_endpoint(&self, coord: GridCoord, label: &str) -> Result<GridCoord, PathFailure> {
        if self.grid.is_passable(coord) {
            return Ok(coord);
        }
        if !self.grid.is_valid_coord(coord) {
            debug!(
                "[AStar] FAILED: OutOfBounds - {} ({},{}) outside {}x{} grid",
                label,
                coord.x,
                coord.y,
                self.grid.width(),
                self.grid.height()
            );
            return Err(PathFailure::OutOfBounds);
        }
        match self.nearest_passable(coord) {
            Some(free) => {
                debug!(
                    "[AStar] {} ({},{}) blocked, moved to ({},{})",
                    label, coord.x, coord.y, free.x, free.y
                );
                Ok(free)
            }
            None => {
                debug!("[AStar] FAILED: NoFreeCell for {} ({},{})", label, coord.x, coord.y);
                Err(PathFailure::NoFreeCell)
            }
        }
    }

    /// Clearance penalty `W / (d + 1)^2` with `d` in world units.
    ///
    /// Cells the field never reached (no obstacle anywhere in their region)
    /// cost nothing extra rather than the full `W`.
    fn safety_penalty(&self, coord: GridCoord) -> i64 {
        let Some(d) = self.distance_field.and_then(|f| f.get(coord)) else {
            return 0;
        };
        let d_world = d as f64 * self.grid.resolution() as f64;
        (self.config.safety_weight / ((d_world + 1.0) * (d_world + 1.0))) as i64
    }

    /// Attraction cost: distance to the nearest waypoint in world units.
    fn attraction(&self, coord: GridCoord) -> i64 {
        match self.waypoint_field.and_then(|f| f.get(coord)) {
            Some(d) if d > 0 => (d as f64 * self.grid.resolution() as f64) as i64,
            _ => 0,
        }
    }

    fn corridor_size(&self, start: GridCoord, goal: GridCoord, limit: i64) -> usize {
        (0..self.grid.cell_count())
            .map(|i| self.grid.index_to_coord(i))
            .filter(|&c| self.grid.is_passable(c) && heuristic(start, c) + heuristic(c, goal) <= limit)
            .count()
    }

    #[inline]
    fn index(&self, coord: GridCoord) -> usize {
        coord.y as usize * self.grid.width() + coord.x as usize
    }

    /// Follow parent links back from the goal
    fn reconstruct_path(
        &self,
        nodes: &[SearchNode],
        goal_index: usize,
        cost: i64,
        nodes_expanded: usize,
        visited: Vec<GridCoord>,
    ) -> PathResult {
        let mut path_grid = Vec::new();
        let mut current = Some(goal_index);
        while let Some(index) = current {
            path_grid.push(self.grid.index_to_coord(index));
            current = nodes[index].parent;
        }
        path_grid.reverse();

        let path_world: Vec<WorldPoint> = path_grid.iter().map(|c| self.grid.grid_to_world(*c)).collect();

        debug!(
            "[AStar] SUCCESS: path length={} cells, cost={}, nodes_expanded={}",
            path_grid.len(),
            cost,
            nodes_expanded
        );

        PathResult {
            path_grid,
            path_world,
            cost,
            nodes_expanded,
            visited,
            success: true,
            failure_reason: None,
        }
    }
}
