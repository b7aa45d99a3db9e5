//! Route export for the robot controller.
//!
//! Scene coordinates are millimetres; the controller consumes metres. The
//! export lists the robot size, waypoints with their mode flags, obstacles as
//! `[x, y, w, h]`, the map grid and every route segment. Each segment point
//! carries the compass heading towards the next point (north = 0, east = 90);
//! a segment's last point keeps the heading of the point before it.
//!
//! Points of the final segment also carry a stopping weight that falls
//! linearly from [`FINAL_WEIGHT`] at its first point to 0 at the goal.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{PathMode, PathfindingMode, PlanningScene, WorldPoint};
use crate::pathfinding::Route;

/// Scene units per exported unit (millimetres to metres)
pub const UNITS_PER_METRE: f32 = 1000.0;

/// Stopping weight at the start of the final segment
pub const FINAL_WEIGHT: f32 = 999.0;

/// Error type for export writing
#[derive(Debug, Clone)]
pub enum ExportError {
    /// I/O error
    Io(String),
    /// Serialization error
    Serialize(String),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io(msg) => write!(f, "I/O error: {}", msg),
            ExportError::Serialize(msg) => write!(f, "Serialize error: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {}

/// Exported waypoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportWaypoint {
    /// X in metres
    pub x: f32,
    /// Y in metres
    pub y: f32,
    /// Leg mode attached to the waypoint
    pub mode: PathMode,
}

/// Exported route point
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportPoint {
    /// X in metres
    pub x: f32,
    /// Y in metres
    pub y: f32,
    /// Compass heading in degrees
    pub heading: f32,
    /// Stopping weight, final segment only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
}

/// Exported map grid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportMap {
    /// Cell size in metres
    pub resolution: f32,
    /// Width in cells
    pub width: usize,
    /// Height in cells
    pub height: usize,
}

/// Serializable listing of a planned route and the scene it was planned on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteExport {
    /// Planning mode used for open routes
    pub search_mode: PathfindingMode,
    /// Chaikin passes applied after planning
    pub smooth_iterations: usize,
    /// True if the route closes on its first waypoint
    pub is_loop: bool,
    /// Robot `[width, height]` in metres
    pub robot: [f32; 2],
    /// Waypoints in declaration order
    pub waypoints: Vec<ExportWaypoint>,
    /// Route segments
    pub segments: Vec<Vec<ExportPoint>>,
    /// Obstacles as `[x, y, w, h]` in metres
    pub obstacles: Vec<[f32; 4]>,
    /// Map grid
    pub map: ExportMap,
}

impl RouteExport {
    /// Build the export listing for `route` planned over `scene`
    pub fn new(
        scene: &PlanningScene,
        route: &Route,
        search_mode: PathfindingMode,
        smooth_iterations: usize,
    ) -> Self {
        let last = route.segments.len().saturating_sub(1);
        let segments = route
            .segments
            .iter()
            .enumerate()
            .map(|(i, segment)| export_segment(segment, i == last))
            .collect();

        Self {
            search_mode,
            smooth_iterations,
            is_loop: route.is_loop,
            robot: [to_metres(scene.robot.width), to_metres(scene.robot.height)],
            waypoints: scene
                .waypoints
                .iter()
                .map(|w| ExportWaypoint {
                    x: to_metres(w.position.x),
                    y: to_metres(w.position.y),
                    mode: w.mode,
                })
                .collect(),
            segments,
            obstacles: scene
                .obstacles
                .iter()
                .map(|r| {
                    [
                        to_metres(r.x),
                        to_metres(r.y),
                        to_metres(r.width),
                        to_metres(r.height),
                    ]
                })
                .collect(),
            map: ExportMap {
                resolution: to_metres(scene.map.resolution),
                width: scene.map.width,
                height: scene.map.height,
            },
        }
    }

    /// Total number of exported route points
    pub fn point_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String, ExportError> {
        serde_yaml::to_string(self).map_err(|e| ExportError::Serialize(e.to_string()))
    }

    /// Write as YAML to `path`
    pub fn save(&self, path: &Path) -> Result<(), ExportError> {
        let yaml = self.to_yaml()?;
        std::fs::write(path, yaml).map_err(|e| ExportError::Io(e.to_string()))
    }
}

#[inline]
fn to_metres(value: f32) -> f32 {
    value / UNITS_PER_METRE
}

fn export_segment(segment: &[WorldPoint], is_final: bool) -> Vec<ExportPoint> {
    let n = segment.len();
    let mut heading = 0.0;
    segment
        .iter()
        .enumerate()
        .map(|(j, p)| {
            if j + 1 < n {
                heading = p.heading_to(&segment[j + 1]);
            }
            let weight = is_final.then(|| {
                if n > 1 {
                    FINAL_WEIGHT * (1.0 - j as f32 / (n - 1) as f32)
                } else {
                    0.0
                }
            });
            ExportPoint {
                x: to_metres(p.x),
                y: to_metres(p.y),
                heading,
                weight,
            }
        })
        .collect()
}
