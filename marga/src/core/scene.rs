//! Planning scene: the immutable input of every planning call.
//!
//! A [`PlanningScene`] is a snapshot of what the map editor knows at the
//! moment a plan is requested: map extent and resolution, the robot
//! footprint, obstacle rectangles, waypoints and the route endpoints.
//! Planners never hold on to it between calls.

use serde::{Deserialize, Serialize};

use super::point::{GridCoord, WorldPoint};
use super::rect::Rect;

/// Per-leg planning mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathMode {
    /// Inflate obstacles by the safety multiplier and add a clearance cost
    #[default]
    Safe,
    /// Plain footprint inflation, no clearance cost
    Aggressive,
}

/// How the route between start and goal is assembled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathfindingMode {
    /// One search from start to goal, pulled towards waypoints
    #[default]
    Direct,
    /// One search per leg through every waypoint
    WaypointStrict,
    /// Same leg-by-leg flow as `WaypointStrict`
    WaypointGuided,
}

/// Map extent and resolution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapSpec {
    /// Map width in cells
    pub width: usize,
    /// Map height in cells
    pub height: usize,
    /// World units per cell
    pub resolution: f32,
}

impl Default for MapSpec {
    fn default() -> Self {
        Self {
            width: 150,
            height: 150,
            resolution: 10.0,
        }
    }
}

impl MapSpec {
    /// Create a map specification
    pub fn new(width: usize, height: usize, resolution: f32) -> Self {
        Self {
            width,
            height,
            resolution,
        }
    }

    /// Grid dimensions `(width, height)`; `(0, 0)` for a non-positive resolution.
    pub fn grid_dimensions(&self) -> (usize, usize) {
        if self.resolution > 0.0 {
            (self.width, self.height)
        } else {
            (0, 0)
        }
    }

    /// True if the grid built from this map has no cells
    pub fn is_degenerate(&self) -> bool {
        let (w, h) = self.grid_dimensions();
        w == 0 || h == 0
    }

    /// Cell containing a world point (floor division, may be out of bounds)
    #[inline]
    pub fn world_to_grid(&self, point: WorldPoint) -> GridCoord {
        GridCoord::new(
            (point.x / self.resolution).floor() as i32,
            (point.y / self.resolution).floor() as i32,
        )
    }

    /// World coordinates of a cell centre
    #[inline]
    pub fn grid_to_world(&self, coord: GridCoord) -> WorldPoint {
        WorldPoint::new(
            (coord.x as f32 + 0.5) * self.resolution,
            (coord.y as f32 + 0.5) * self.resolution,
        )
    }
}

/// Rectangular robot footprint.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RobotFootprint {
    /// Footprint width in world units
    pub width: f32,
    /// Footprint height in world units
    pub height: f32,
}

impl Default for RobotFootprint {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
        }
    }
}

impl RobotFootprint {
    /// Create a footprint
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Obstacle inflation radius: half the larger side
    #[inline]
    pub fn inflation_radius(&self) -> f32 {
        self.width.max(self.height) / 2.0
    }
}

/// A declared waypoint with the mode of its leg.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Position in world coordinates
    pub position: WorldPoint,
    /// Planning mode attached to this waypoint
    #[serde(default)]
    pub mode: PathMode,
}

impl Waypoint {
    /// Create a waypoint
    pub fn new(position: WorldPoint, mode: PathMode) -> Self {
        Self { position, mode }
    }

    /// Safe-mode waypoint at `(x, y)`
    pub fn safe(x: f32, y: f32) -> Self {
        Self::new(WorldPoint::new(x, y), PathMode::Safe)
    }
}

/// Everything a planning call reads from the map editor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanningScene {
    /// Map extent and resolution
    #[serde(default)]
    pub map: MapSpec,

    /// Robot footprint
    #[serde(default)]
    pub robot: RobotFootprint,

    /// Obstacle rectangles in world coordinates
    #[serde(default)]
    pub obstacles: Vec<Rect>,

    /// Ordered waypoints
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,

    /// Route start (ignored for loop routes)
    #[serde(default)]
    pub start: Option<WorldPoint>,

    /// Route goal (ignored for loop routes)
    #[serde(default)]
    pub goal: Option<WorldPoint>,

    /// Close the waypoint chain into a loop
    #[serde(default)]
    pub loop_route: bool,
}

impl PlanningScene {
    /// Empty scene on the given map
    pub fn new(map: MapSpec) -> Self {
        Self {
            map,
            ..Default::default()
        }
    }

    /// Builder-style setter for the robot footprint
    pub fn with_robot(mut self, robot: RobotFootprint) -> Self {
        self.robot = robot;
        self
    }

    /// Builder-style obstacle insertion
    pub fn with_obstacle(mut self, obstacle: Rect) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    /// Builder-style waypoint insertion
    pub fn with_waypoint(mut self, waypoint: Waypoint) -> Self {
        self.waypoints.push(waypoint);
        self
    }

    /// Builder-style setter for start and goal
    pub fn with_endpoints(mut self, start: WorldPoint, goal: WorldPoint) -> Self {
        self.start = Some(start);
        self.goal = Some(goal);
        self
    }

    /// Builder-style setter for loop routes
    pub fn with_loop(mut self, loop_route: bool) -> Self {
        self.loop_route = loop_route;
        self
    }

    /// Waypoint positions in order
    pub fn waypoint_positions(&self) -> Vec<WorldPoint> {
        self.waypoints.iter().map(|w| w.position).collect()
    }

    /// Ordered route points: `start, wp0..wpn, goal`, or `wp0..wpn, wp0` for loops.
    ///
    /// Returns `None` when the route cannot be formed (missing endpoints, or
    /// fewer than two waypoints for a loop).
    pub fn route_points(&self) -> Option<Vec<WorldPoint>> {
        if self.loop_route {
            if self.waypoints.len() < 2 {
                return None;
            }
            let mut points = self.waypoint_positions();
            points.push(self.waypoints[0].position);
            Some(points)
        } else {
            let (start, goal) = (self.start?, self.goal?);
            let mut points = Vec::with_capacity(self.waypoints.len() + 2);
            points.push(start);
            points.extend(self.waypoints.iter().map(|w| w.position));
            points.push(goal);
            Some(points)
        }
    }

    /// Planning mode of route leg `leg`.
    ///
    /// Non-loop leg `i` takes waypoint `i`'s mode, so the final leg into the
    /// goal falls back to Safe. Loop legs clamp to the last waypoint.
    pub fn leg_mode(&self, leg: usize) -> PathMode {
        let index = if self.loop_route {
            leg.min(self.waypoints.len().saturating_sub(1))
        } else {
            leg
        };
        self.waypoints
            .get(index)
            .map(|w| w.mode)
            .unwrap_or(PathMode::Safe)
    }
}
