//! Default value functions for serde deserialization.

use crate::core::PathfindingMode;

// Planner defaults
pub fn safety_threshold() -> f32 {
    1.5
}
pub fn edge_threshold() -> f32 {
    0.0
}
pub fn detour_factor() -> f32 {
    1.6
}
pub fn detour_margin() -> i32 {
    8
}
pub fn pathfinding_mode() -> PathfindingMode {
    PathfindingMode::Direct
}
pub fn safety_weight() -> f64 {
    5e5
}
pub fn progress_interval() -> usize {
    1024
}

// Smoothing defaults
pub fn tension() -> f32 {
    0.5
}
pub fn spline_resolution() -> usize {
    30
}
pub fn chaikin_iterations() -> usize {
    3
}

// Common defaults
pub fn enabled() -> bool {
    true
}
