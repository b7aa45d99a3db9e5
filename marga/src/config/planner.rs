//! Planner configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::core::PathfindingMode;

/// Grid construction and A* search settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlannerSection {
    /// Obstacle inflation multiplier for Safe legs
    #[serde(default = "defaults::safety_threshold")]
    pub safety_threshold: f32,

    /// Width of the blocked map border (world units, 0=disabled)
    #[serde(default = "defaults::edge_threshold")]
    pub edge_threshold: f32,

    /// Allowed detour as a multiple of the straight-line estimate
    #[serde(default = "defaults::detour_factor")]
    pub detour_factor: f32,

    /// Extra corridor slack (cells)
    #[serde(default = "defaults::detour_margin")]
    pub detour_margin: i32,

    /// How waypoints shape an open route
    #[serde(default = "defaults::pathfinding_mode")]
    pub pathfinding_mode: PathfindingMode,

    /// Clearance penalty numerator
    #[serde(default = "defaults::safety_weight")]
    pub safety_weight: f64,

    /// Expansions between progress reports
    #[serde(default = "defaults::progress_interval")]
    pub progress_interval: usize,
}

impl Default for PlannerSection {
    fn default() -> Self {
        Self {
            safety_threshold: defaults::safety_threshold(),
            edge_threshold: defaults::edge_threshold(),
            detour_factor: defaults::detour_factor(),
            detour_margin: defaults::detour_margin(),
            pathfinding_mode: defaults::pathfinding_mode(),
            safety_weight: defaults::safety_weight(),
            progress_interval: defaults::progress_interval(),
        }
    }
}
