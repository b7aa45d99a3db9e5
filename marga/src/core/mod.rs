//! Core types for the marga path planner.
//!
//! This module provides the fundamental types used throughout the library:
//! - [`CellState`]: Occupancy grid cell tag
//! - [`GridCoord`] and [`WorldPoint`]: Coordinate types
//! - [`Rect`]: Obstacle rectangles
//! - [`PlanningScene`]: Map, robot, obstacles and waypoints for one planning call

mod cell;
mod point;
mod rect;
mod scene;

pub use cell::CellState;
pub use point::{GridCoord, WorldPoint};
pub use rect::Rect;
pub use scene::{MapSpec, PathMode, PathfindingMode, PlanningScene, RobotFootprint, Waypoint};
