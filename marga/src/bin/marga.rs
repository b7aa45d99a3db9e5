//! Command-line route planner.
//!
//! Plans a route over a YAML scene file and optionally writes the route
//! export and an SVG overlay.
//!
//! # Usage
//!
//! ```bash
//! marga --scene scenes/warehouse.yaml
//! marga --scene scenes/warehouse.yaml --output route.yaml --svg route.svg
//! marga --scene scenes/loop.yaml --config configs/config.yaml --chaikin
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};

use marga::MargaConfig;
use marga::io::{RouteExport, SvgStyle, load_scene, save_svg};
use marga::pathfinding::{Route, RoutePlanner};

/// Grid motion path planner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scene file (YAML)
    #[arg(short, long)]
    scene: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = "configs/config.yaml")]
    config: PathBuf,

    /// Write the route export (YAML) here
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write an SVG overlay here
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Apply Chaikin corner cutting to every segment
    #[arg(long)]
    chaikin: bool,

    /// Emit straight lines between route points if planning fails
    #[arg(long)]
    fallback: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = load_config(&args.config);

    let scene = match load_scene(&args.scene) {
        Ok(scene) => scene,
        Err(e) => {
            error!("Failed to load scene {}: {}", args.scene.display(), e);
            return ExitCode::FAILURE;
        }
    };
    info!(
        "Scene: {}x{} cells @ {}, {} obstacles, {} waypoints{}",
        scene.map.width,
        scene.map.height,
        scene.map.resolution,
        scene.obstacles.len(),
        scene.waypoints.len(),
        if scene.loop_route { " (loop)" } else { "" }
    );

    let mut planner = RoutePlanner::new(config.to_astar_config(), config.to_route_config());
    let mut last_reported = 0;
    let mut progress = |fraction: f32| {
        let percent = (fraction * 100.0) as u32;
        if percent >= last_reported + 10 {
            last_reported = percent;
            info!("Planning... {}%", percent);
        }
    };

    let mut route = match planner.plan_with_progress(&scene, &mut progress) {
        Ok(route) => route,
        Err(e) => {
            error!("[{}] {}", e.code(), e);
            warn!("{}", e.user_message());
            if !args.fallback {
                return ExitCode::FAILURE;
            }
            match Route::straight_line(&scene) {
                Some(route) => {
                    warn!("Using straight-line fallback");
                    route
                }
                None => return ExitCode::FAILURE,
            }
        }
    };

    let iterations = if args.chaikin {
        config.smoothing.chaikin_iterations
    } else {
        0
    };
    planner.smooth_route_chaikin(&scene, &mut route, iterations);

    info!(
        "Route: {} segments, {} points, length {:.1}",
        route.len(),
        route.segments.iter().map(Vec::len).sum::<usize>(),
        route.length()
    );

    if let Some(path) = &args.output {
        let export = RouteExport::new(
            &scene,
            &route,
            config.planner.pathfinding_mode,
            iterations,
        );
        if let Err(e) = export.save(path) {
            error!("Failed to write {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
        info!("Saved: {}", path.display());
    }

    if let Some(path) = &args.svg {
        let grid = planner.pathfinder().grid();
        if let Err(e) = save_svg(path, grid, &scene, Some(&route), &SvgStyle::default()) {
            error!("Failed to write {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
        info!("Saved: {}", path.display());
    }

    ExitCode::SUCCESS
}

fn load_config(path: &Path) -> MargaConfig {
    if path.exists() {
        MargaConfig::load(path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}, using defaults", e);
            MargaConfig::default()
        })
    } else {
        info!("Config not found at {}, using defaults", path.display());
        MargaConfig::default()
    }
}
