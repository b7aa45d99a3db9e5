//! Scene files, route export and visualization.
//!
//! - **Scene files**: YAML [`PlanningScene`](crate::core::PlanningScene) snapshots
//! - **Route export**: Planned segments with headings, scaled to metres
//! - **SVG export**: Grid, obstacles, waypoints and route overlay for inspection
//!
//! ## Loading a Scene
//!
//! ```rust,ignore
//! use marga::io::load_scene;
//! use std::path::Path;
//!
//! let scene = load_scene(Path::new("scenes/warehouse.yaml"))?;
//! ```
//!
//! ## Exporting a Route
//!
//! ```rust,ignore
//! use marga::io::RouteExport;
//!
//! let export = RouteExport::new(&scene, &route, PathfindingMode::Direct, 0);
//! export.save(Path::new("route.yaml"))?;
//! ```

pub mod export;
pub mod scene;
pub mod svg;

pub use export::{ExportError, ExportMap, ExportPoint, ExportWaypoint, RouteExport};
pub use scene::{SceneError, load_scene, scene_from_yaml, validate_scene};
pub use self::svg::{SvgStyle, render_svg, save_svg};
