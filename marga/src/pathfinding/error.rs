//! Route planning error types.

use std::fmt;

use super::astar::PathFailure;

/// Errors that stop a route from being planned.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteError {
    /// The map resolution is not positive, so the grid has no cells.
    DegenerateGrid,

    /// A non-loop route needs both a start and a goal.
    MissingEndpoints,

    /// A loop route needs at least two waypoints.
    NotEnoughWaypoints {
        /// Waypoints a loop needs.
        required: usize,
        /// Waypoints declared.
        found: usize,
    },

    /// A* found no path for one leg of the route.
    LegFailed {
        /// Index of the failing leg.
        leg: usize,
        /// True if the route is a closed loop.
        is_loop: bool,
        /// Route point index the leg starts from.
        from: usize,
        /// Route point (or waypoint, for loops) index the leg ends at.
        to: usize,
        /// Why the search failed.
        reason: PathFailure,
    },
}

impl RouteError {
    /// Get a short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DegenerateGrid => "DEGENERATE_GRID",
            Self::MissingEndpoints => "MISSING_ENDPOINTS",
            Self::NotEnoughWaypoints { .. } => "NOT_ENOUGH_WAYPOINTS",
            Self::LegFailed { .. } => "LEG_FAILED",
        }
    }

    /// Message suitable for showing to the person editing the map.
    pub fn user_message(&self) -> String {
        match self {
            Self::DegenerateGrid => "Map resolution must be positive.".to_string(),
            Self::MissingEndpoints => "Start or Goal not set.".to_string(),
            Self::NotEnoughWaypoints { required, .. } => {
                format!("Loop requires at least {} waypoints.", required)
            }
            Self::LegFailed {
                is_loop: true,
                from,
                to,
                ..
            } => format!("Loop path failed at WP {} -> {}", from, to),
            Self::LegFailed { from, to, .. } => {
                format!("Path failed at segment {} -> {}", from, to)
            }
        }
    }

    /// Index of the failing leg, if a search failed.
    pub fn failed_leg(&self) -> Option<usize> {
        match self {
            Self::LegFailed { leg, .. } => Some(*leg),
            _ => None,
        }
    }
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateGrid => write!(f, "Map resolution is not positive"),
            Self::MissingEndpoints => write!(f, "Route needs both a start and a goal"),
            Self::NotEnoughWaypoints { required, found } => write!(
                f,
                "Loop needs at least {} waypoints, {} declared",
                required, found
            ),
            Self::LegFailed {
                leg,
                is_loop,
                from,
                to,
                reason,
            } => write!(
                f,
                "{} leg {} ({} -> {}) failed: {}",
                if *is_loop { "Loop" } else { "Route" },
                leg,
                from,
                to,
                reason
            ),
        }
    }
}

impl std::error::Error for RouteError {}
