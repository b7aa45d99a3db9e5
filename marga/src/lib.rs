//! # Marga: Grid Motion Path Planning
//!
//! Plans collision-free, smooth routes for a rectangular robot across a 2D
//! map of rectangular obstacles.
//!
//! ## Features
//!
//! - **Configuration Space**: Obstacles inflated by the robot footprint,
//!   optionally with a safety multiplier and a blocked map border
//! - **Corridor-Pruned A***: 8-connected search with no corner cutting,
//!   clearance costs and waypoint attraction
//! - **Smoothing**: String pulling, centripetal Catmull-Rom, Chaikin corner
//!   cutting and arc-length resampling
//! - **Routes**: Direct, leg-by-leg and closed-loop routes with per-leg
//!   Safe/Aggressive modes
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use marga::core::{MapSpec, PlanningScene, Rect, WorldPoint};
//! use marga::pathfinding::RoutePlanner;
//!
//! let scene = PlanningScene::new(MapSpec::new(40, 30, 10.0))
//!     .with_obstacle(Rect::new(150.0, 0.0, 20.0, 220.0))
//!     .with_endpoints(WorldPoint::new(15.0, 15.0), WorldPoint::new(385.0, 285.0));
//!
//! let mut planner = RoutePlanner::default();
//! match planner.plan(&scene) {
//!     Ok(route) => println!("{} segments, {:.0} units", route.len(), route.length()),
//!     Err(e) => eprintln!("{}", e.user_message()),
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: Coordinates, rectangles, cell states and the planning scene
//! - [`grid`]: Occupancy grid, configuration-space builder, line iterator, BFS fields
//! - [`pathfinding`]: A*, smoothing, the `Pathfinder` facade and route planning
//! - [`config`]: YAML configuration
//! - [`io`]: Scene files, route export and SVG overlays
//!
//! ## Data Flow
//!
//! ```text
//! PlanningScene ──► GridBuilder ──► OccupancyGrid ──┬──► DistanceField
//!                                                   └──► WaypointField
//!                                                          │
//!                        AStarPlanner ◄────────────────────┘
//!                             │ grid path
//!                             ▼
//!                      string pulling ──► Catmull-Rom ──► segments
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod core;
pub mod grid;
pub mod io;
pub mod pathfinding;

// Re-export main types at crate root
pub use self::config::{ConfigLoadError, MargaConfig};
pub use self::core::{
    CellState, GridCoord, MapSpec, PathMode, PathfindingMode, PlanningScene, Rect,
    RobotFootprint, Waypoint, WorldPoint,
};
pub use self::grid::{GridBuilder, OccupancyGrid};
pub use self::pathfinding::{
    AStarConfig, AStarPlanner, PathResult, Pathfinder, Route, RouteConfig, RouteError,
    RoutePlanner, RouteState,
};
