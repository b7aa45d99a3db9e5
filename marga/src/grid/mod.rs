//! Occupancy grid construction and queries.
//!
//! - [`OccupancyGrid`]: row-major cell storage with world/grid conversion
//! - [`GridBuilder`]: rasterizes a scene into configuration space
//! - [`FloodField`]: BFS distance to obstacles or waypoints
//! - [`raycaster`]: Bresenham line-of-sight

mod builder;
mod field;
pub mod raycaster;
mod storage;

pub use builder::GridBuilder;
pub use field::{DistanceField, FloodField, WaypointField};
pub use raycaster::{BresenhamLine, has_line_of_sight, has_world_line_of_sight};
pub use storage::OccupancyGrid;
