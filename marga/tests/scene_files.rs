//! Planning from YAML scene fixtures.

mod common;

use marga::config::MargaConfig;
use marga::io::{RouteExport, SceneError, SvgStyle, load_scene, render_svg};
use marga::pathfinding::{RouteError, RoutePlanner};
use marga::{PathfindingMode, Route, RouteState};

use common::{init_logging, scene_path};

fn planner(config: &MargaConfig) -> RoutePlanner {
    RoutePlanner::new(config.to_astar_config(), config.to_route_config())
}

#[test]
fn test_open_field_direct() {
    init_logging();
    let scene = load_scene(&scene_path("open_field.yaml")).unwrap();
    let route = planner(&MargaConfig::default()).plan(&scene).unwrap();

    assert_eq!(route.len(), 1);
    assert_eq!(route.segments[0].len(), 31);
}

#[test]
fn test_wall_detour_direct_and_chained() {
    init_logging();
    let scene = load_scene(&scene_path("wall_detour.yaml")).unwrap();

    let direct = planner(&MargaConfig::default()).plan(&scene).unwrap();
    assert_eq!(direct.len(), 1);

    let chained_config = MargaConfig::from_yaml("planner:\n  pathfinding_mode: waypoint_strict\n").unwrap();
    assert_eq!(chained_config.planner.pathfinding_mode, PathfindingMode::WaypointStrict);
    let mut chained_planner = planner(&chained_config);
    let chained = chained_planner.plan(&scene).unwrap();
    assert_eq!(chained.len(), 3);
    assert_eq!(chained_planner.state(), RouteState::Succeeded);

    for route in [&direct, &chained] {
        assert!(route.length() > 370.0);
        let highest = route.flatten().iter().map(|p| p.y).fold(f32::MIN, f32::max);
        assert!(highest > 200.0, "route never clears the wall");
    }
}

#[test]
fn test_loop_triangle() {
    init_logging();
    let scene = load_scene(&scene_path("loop_triangle.yaml")).unwrap();
    assert!(scene.loop_route);

    let route = planner(&MargaConfig::default()).plan(&scene).unwrap();
    assert!(route.is_loop);
    assert_eq!(route.len(), scene.waypoints.len());
}

#[test]
fn test_enclosed_goal_falls_back_to_straight_line() {
    init_logging();
    let scene = load_scene(&scene_path("enclosed_goal.yaml")).unwrap();
    let err = planner(&MargaConfig::default()).plan(&scene).unwrap_err();
    assert_eq!(err.code(), "LEG_FAILED");
    assert!(matches!(err, RouteError::LegFailed { leg: 0, is_loop: false, .. }));

    let fallback = Route::straight_line(&scene).unwrap();
    assert_eq!(fallback.len(), 1);
    assert_eq!(fallback.segments[0], vec![scene.start.unwrap(), scene.goal.unwrap()]);
}

#[test]
fn test_invalid_scene_rejected() {
    let err = load_scene(&scene_path("bad_obstacle.yaml")).unwrap_err();
    assert!(matches!(err, SceneError::Invalid(_)));
}

#[test]
fn test_export_and_svg_from_planned_route() {
    init_logging();
    let scene = load_scene(&scene_path("wall_detour.yaml")).unwrap();
    let mut planner = planner(&MargaConfig::default());
    let route = planner.plan(&scene).unwrap();

    let export = RouteExport::new(&scene, &route, PathfindingMode::Direct, 0);
    assert_eq!(export.waypoints.len(), 2);
    assert_eq!(export.point_count(), route.segments[0].len());
    let last = export.segments[0].last().unwrap();
    assert_eq!(last.weight, Some(0.0));

    let dir = std::env::temp_dir().join("marga_scene_files_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("wall_detour_route.yaml");
    export.save(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("search_mode: direct"));

    let svg = render_svg(planner.pathfinder().grid(), &scene, Some(&route), &SvgStyle::default()).to_string();
    assert!(svg.contains("<polyline"));
}
