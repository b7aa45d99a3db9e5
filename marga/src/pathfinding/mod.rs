//! Path planning algorithms.
//!
//! This module provides path planning on the occupancy grid:
//!
//! - **A* Search**: Corridor-bounded shortest paths with clearance costs
//! - **Path Smoothing**: String pulling, Catmull-Rom, Chaikin, resampling
//! - **Pathfinder**: Grid rebuild + search + smoothing behind one object
//! - **Routes**: Multi-leg and loop routes stitched into smooth segments
//!
//! ## A* Pathfinding
//!
//! ```rust,ignore
//! use marga::pathfinding::{AStarPlanner, AStarConfig};
//!
//! let planner = AStarPlanner::new(&grid, AStarConfig::default());
//! let result = planner.find_path(start, goal);
//! if result.success {
//!     println!("Path found with {} cells", result.path_grid.len());
//! }
//! ```
//!
//! ## Routes
//!
//! ```rust,ignore
//! use marga::pathfinding::RoutePlanner;
//!
//! let mut planner = RoutePlanner::default();
//! match planner.plan(&scene) {
//!     Ok(route) => println!("{} segments", route.len()),
//!     Err(e) => eprintln!("{}", e.user_message()),
//! }
//! ```

pub mod astar;
mod error;
mod pathfinder;
pub mod progress;
mod route;
pub mod smoothing;

pub use astar::{AStarConfig, AStarPlanner, PathFailure, PathResult, find_path, path_exists};
pub use error::RouteError;
pub use pathfinder::Pathfinder;
pub use progress::{NoProgress, SearchProgress};
pub use route::{MIN_LOOP_WAYPOINTS, Route, RouteConfig, RoutePlanner, RouteState};
pub use smoothing::{PathSmoother, catmull_rom, path_length, resample_by_arc_length};
