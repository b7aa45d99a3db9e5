//! SVG overlay of a planning run.
//!
//! Draws the most recently published grid (blocked and visited cells), the
//! raw obstacle rectangles, waypoints, route endpoints and route segments.
//! World y grows downwards, as in the map editor.

use std::path::Path;

use ::svg::Document;
use ::svg::node::element::{Circle, Group, Polyline, Rectangle};

use super::export::ExportError;
use crate::core::{CellState, PathMode, PlanningScene, WorldPoint};
use crate::grid::OccupancyGrid;
use crate::pathfinding::Route;

/// Colors and sizes for SVG rendering
#[derive(Clone, Debug)]
pub struct SvgStyle {
    /// Pixels per grid cell
    pub cell_px: f32,
    /// Background color
    pub background: &'static str,
    /// Blocked cell color
    pub blocked: &'static str,
    /// Visited cell color
    pub visited: &'static str,
    /// Raw obstacle outline color
    pub obstacle: &'static str,
    /// Safe waypoint color
    pub waypoint_safe: &'static str,
    /// Aggressive waypoint color
    pub waypoint_aggressive: &'static str,
    /// Route color
    pub route: &'static str,
    /// Route stroke width in pixels
    pub route_width: f32,
    /// Waypoint and endpoint marker radius in pixels
    pub marker_radius: f32,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            cell_px: 4.0,
            background: "#FFFFFF",
            blocked: "#555555",
            visited: "#CFE8FF",
            obstacle: "#D55E00",
            waypoint_safe: "#009E73",
            waypoint_aggressive: "#E69F00",
            route: "#0072B2",
            route_width: 2.0,
            marker_radius: 4.0,
        }
    }
}

/// Render the grid, scene and (optionally) a route into an SVG document
pub fn render_svg(
    grid: &OccupancyGrid,
    scene: &PlanningScene,
    route: Option<&Route>,
    style: &SvgStyle,
) -> Document {
    let width = grid.width() as f32 * style.cell_px;
    let height = grid.height() as f32 * style.cell_px;
    let scale = if grid.resolution() > 0.0 {
        style.cell_px / grid.resolution()
    } else {
        0.0
    };

    let mut doc = Document::new()
        .set("width", width)
        .set("height", height)
        .set("viewBox", (0.0, 0.0, width, height));

    // Layer 0: Background
    doc = doc.add(
        Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", width)
            .set("height", height)
            .set("fill", style.background),
    );

    // Layer 1: Grid cells
    doc = doc.add(render_cells(grid, style));

    // Layer 2: Raw obstacles
    let mut obstacles = Group::new().set("id", "obstacles");
    for rect in &scene.obstacles {
        obstacles = obstacles.add(
            Rectangle::new()
                .set("x", rect.x * scale)
                .set("y", rect.y * scale)
                .set("width", rect.width * scale)
                .set("height", rect.height * scale)
                .set("fill", "none")
                .set("stroke", style.obstacle)
                .set("stroke-width", 1),
        );
    }
    doc = doc.add(obstacles);

    // Layer 3: Route
    if let Some(route) = route {
        let mut group = Group::new().set("id", "route");
        for segment in route.segments.iter().filter(|s| s.len() >= 2) {
            let points: String = segment
                .iter()
                .map(|p| format!("{:.1},{:.1}", p.x * scale, p.y * scale))
                .collect::<Vec<_>>()
                .join(" ");
            group = group.add(
                Polyline::new()
                    .set("points", points)
                    .set("fill", "none")
                    .set("stroke", style.route)
                    .set("stroke-width", style.route_width)
                    .set("stroke-linecap", "round")
                    .set("stroke-linejoin", "round"),
            );
        }
        doc = doc.add(group);
    }

    // Layer 4: Waypoints and endpoints
    let mut markers = Group::new().set("id", "markers");
    for wp in &scene.waypoints {
        let color = match wp.mode {
            PathMode::Safe => style.waypoint_safe,
            PathMode::Aggressive => style.waypoint_aggressive,
        };
        markers = markers.add(marker(wp.position, scale, style.marker_radius, color));
    }
    if !scene.loop_route {
        for point in scene.start.iter().chain(scene.goal.iter()) {
            markers = markers.add(marker(*point, scale, style.marker_radius * 1.5, style.route));
        }
    }
    doc.add(markers)
}

/// Render and write an SVG file
pub fn save_svg(
    path: &Path,
    grid: &OccupancyGrid,
    scene: &PlanningScene,
    route: Option<&Route>,
    style: &SvgStyle,
) -> Result<(), ExportError> {
    let doc = render_svg(grid, scene, route, style);
    ::svg::save(path, &doc).map_err(|e| ExportError::Io(e.to_string()))
}

fn render_cells(grid: &OccupancyGrid, style: &SvgStyle) -> Group {
    let mut group = Group::new().set("id", "grid");
    for (index, cell) in grid.cells().iter().enumerate() {
        let color = match cell {
            CellState::Free => continue,
            CellState::Blocked => style.blocked,
            CellState::Visited => style.visited,
        };
        let coord = grid.index_to_coord(index);
        group = group.add(
            Rectangle::new()
                .set("x", coord.x as f32 * style.cell_px)
                .set("y", coord.y as f32 * style.cell_px)
                .set("width", style.cell_px)
                .set("height", style.cell_px)
                .set("fill", color),
        );
    }
    group
}

fn marker(point: WorldPoint, scale: f32, radius: f32, color: &str) -> Circle {
    Circle::new()
        .set("cx", point.x * scale)
        .set("cy", point.y * scale)
        .set("r", radius)
        .set("fill", color)
        .set("stroke", "white")
        .set("stroke-width", 1)
}
