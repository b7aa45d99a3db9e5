//! Route orchestration.
//!
//! [`RoutePlanner`] drives the whole chain (grid, A*, string pulling,
//! Catmull-Rom, resampling) once per route and assembles the output
//! segments.
//!
//! ## Flows
//!
//! ```text
//! Direct (open route, PathfindingMode::Direct):
//!   start ──A* (Safe, waypoint attraction)──> goal
//!         └─ string pull ─ Catmull-Rom ─> 1 segment
//!
//! Chained (waypoint modes, or any loop):
//!   p0 ─A*─> p1 ─A*─> p2 ... ─A*─> pn      (one search per leg, leg mode)
//!   pull each leg, join at shared vertices, Catmull-Rom once,
//!   split back into one segment per leg (loops: arc-length resample)
//! ```
//!
//! ## States
//!
//! `Idle -> SearchingSegment(0) -> ... -> SearchingSegment(n-1) -> Succeeded`,
//! or `SearchingSegment(i) -> Failed(i)` on the first leg A* cannot solve.

use log::{debug, info, warn};

use super::astar::{AStarConfig, PathFailure};
use super::error::RouteError;
use super::pathfinder::Pathfinder;
use super::progress::{LegProgress, NoProgress, SearchProgress};
use super::smoothing::PathSmoother;
use crate::core::{GridCoord, PathMode, PathfindingMode, PlanningScene, WorldPoint};
use crate::grid::{GridBuilder, OccupancyGrid};

/// Minimum waypoints for a loop route
pub const MIN_LOOP_WAYPOINTS: usize = 2;

/// Route assembly configuration
#[derive(Clone, Debug, PartialEq)]
pub struct RouteConfig {
    /// Direct or chained planning for open routes
    pub pathfinding_mode: PathfindingMode,
    /// Inflation multiplier for Safe legs
    pub safety_threshold: f32,
    /// Blocked border width in world units
    pub edge_threshold: f32,
    /// Catmull-Rom knot exponent
    pub tension: f32,
    /// Catmull-Rom samples per control-point span
    pub spline_resolution: usize,
    /// Arc-length resample loop segments at the map resolution
    pub loop_resample: bool,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            pathfinding_mode: PathfindingMode::Direct,
            safety_threshold: 1.5,
            edge_threshold: 0.0,
            tension: 0.5,
            spline_resolution: 30,
            loop_resample: true,
        }
    }
}

/// Orchestrator state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteState {
    /// No route planned yet
    Idle,
    /// Searching leg `i`
    SearchingSegment(usize),
    /// Leg `i` had no path
    Failed(usize),
    /// Every leg planned and smoothed
    Succeeded,
}

/// A planned route: ordered world-space segments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Route {
    /// Output segments, consecutive segments share their junction point
    pub segments: Vec<Vec<WorldPoint>>,
    /// True if the route closes on its first waypoint
    pub is_loop: bool,
}

impl Route {
    /// Straight lines between consecutive route points.
    ///
    /// The simple fallback after a [`RouteError`]; `None` if the scene has no
    /// valid route points.
    pub fn straight_line(scene: &PlanningScene) -> Option<Route> {
        let points = scene.route_points()?;
        let segments = points.windows(2).map(|pair| pair.to_vec()).collect();
        Some(Route {
            segments,
            is_loop: scene.loop_route,
        })
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True if there are no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// One continuous polyline.
    ///
    /// Consecutive segments share their junction sample, so each later
    /// segment drops its first point to keep the junction once.
    pub fn flatten(&self) -> Vec<WorldPoint> {
        let mut flat: Vec<WorldPoint> = Vec::new();
        for segment in &self.segments {
            if flat.is_empty() {
                flat.extend_from_slice(segment);
            } else if segment.len() > 1 {
                flat.extend_from_slice(&segment[1..]);
            }
        }
        flat
    }

    /// Total length over all segments
    pub fn length(&self) -> f32 {
        self.segments
            .iter()
            .map(|s| super::smoothing::path_length(s))
            .sum()
    }
}

/// Plans complete routes over a [`PlanningScene`].
pub struct RoutePlanner {
    pathfinder: Pathfinder,
    config: RouteConfig,
    state: RouteState,
}

impl Default for RoutePlanner {
    fn default() -> Self {
        Self::new(AStarConfig::default(), RouteConfig::default())
    }
}

impl RoutePlanner {
    /// Create a route planner
    pub fn new(astar: AStarConfig, config: RouteConfig) -> Self {
        Self {
            pathfinder: Pathfinder::new(astar),
            config,
            state: RouteState::Idle,
        }
    }

    /// Current state
    pub fn state(&self) -> RouteState {
        self.state
    }

    /// Route configuration
    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Underlying pathfinder (holds the last published grid)
    pub fn pathfinder(&self) -> &Pathfinder {
        &self.pathfinder
    }

    /// Mutable access, e.g. to change the detour corridor
    pub fn pathfinder_mut(&mut self) -> &mut Pathfinder {
        &mut self.pathfinder
    }

    /// Plan a route through the scene.
    pub fn plan(&mut self, scene: &PlanningScene) -> Result<Route, RouteError> {
        self.plan_with_progress(scene, &mut NoProgress)
    }

    /// Plan a route, reporting overall progress across legs.
    pub fn plan_with_progress<P: SearchProgress + ?Sized>(
        &mut self,
        scene: &PlanningScene,
        progress: &mut P,
    ) -> Result<Route, RouteError> {
        self.state = RouteState::Idle;

        let points = route_points(scene)?;
        if scene.map.is_degenerate() {
            warn!("[Route] Degenerate map, resolution={}", scene.map.resolution);
            return Err(RouteError::DegenerateGrid);
        }

        let route = if !scene.loop_route && self.config.pathfinding_mode == PathfindingMode::Direct {
            self.plan_direct(scene, &points, progress)?
        } else {
            self.plan_chained(scene, &points, progress)?
        };

        self.state = RouteState::Succeeded;
        info!(
            "[Route] Planned {} segment(s), {} points, length={:.1}",
            route.len(),
            route.segments.iter().map(Vec::len).sum::<usize>(),
            route.length()
        );
        Ok(route)
    }

    /// Single search from start to goal with waypoint attraction.
    fn plan_direct<P: SearchProgress + ?Sized>(
        &mut self,
        scene: &PlanningScene,
        points: &[WorldPoint],
        progress: &mut P,
    ) -> Result<Route, RouteError> {
        let start = points[0];
        let goal = points[points.len() - 1];
        self.state = RouteState::SearchingSegment(0);

        let result = self.pathfinder.find_path_with_progress(
            scene,
            scene.map.world_to_grid(start),
            scene.map.world_to_grid(goal),
            PathMode::Safe,
            self.config.safety_threshold,
            self.config.edge_threshold,
            true,
            progress,
        );
        if !result.success {
            self.state = RouteState::Failed(0);
            let reason = result.failure_reason.unwrap_or(PathFailure::NoPath);
            warn!("[Route] Direct search failed: {}", reason);
            return Err(RouteError::LegFailed {
                leg: 0,
                is_loop: false,
                from: 0,
                to: 1,
                reason,
            });
        }

        let pulled = self.pathfinder.smooth_path_string_pulling(&result.path_grid);
        let world = to_world(scene, &pulled);
        let segment = if world.len() >= 2 {
            self.pathfinder
                .smooth_path_catmull_rom(&world, self.config.tension, self.config.spline_resolution)
        } else {
            world
        };
        Ok(Route {
            segments: vec![segment],
            is_loop: false,
        })
    }

    /// One search per leg, smoothed as one chain.
    fn plan_chained<P: SearchProgress + ?Sized>(
        &mut self,
        scene: &PlanningScene,
        points: &[WorldPoint],
        progress: &mut P,
    ) -> Result<Route, RouteError> {
        let legs = points.len() - 1;
        let mut control_legs: Vec<Vec<WorldPoint>> = Vec::with_capacity(legs);
        let mut chain: Vec<WorldPoint> = Vec::new();

        for leg in 0..legs {
            self.state = RouteState::SearchingSegment(leg);
            let mode = scene.leg_mode(leg);
            debug!("[Route] Leg {}/{} in {:?} mode", leg + 1, legs, mode);

            let result = self.pathfinder.find_path_with_progress(
                scene,
                scene.map.world_to_grid(points[leg]),
                scene.map.world_to_grid(points[leg + 1]),
                mode,
                self.config.safety_threshold,
                self.config.edge_threshold,
                false,
                &mut LegProgress::new(progress, leg, legs),
            );

            if !result.success {
                self.state = RouteState::Failed(leg);
                let to = if scene.loop_route {
                    (leg + 1) % scene.waypoints.len()
                } else {
                    leg + 1
                };
                let reason = result.failure_reason.unwrap_or(PathFailure::NoPath);
                warn!("[Route] Leg {} -> {} failed: {}", leg, to, reason);
                return Err(RouteError::LegFailed {
                    leg,
                    is_loop: scene.loop_route,
                    from: leg,
                    to,
                    reason,
                });
            }

            let pulled = self.pathfinder.smooth_path_string_pulling(&result.path_grid);
            let mut world = to_world(scene, &pulled);
            if world.len() < 2 {
                world = vec![points[leg], points[leg + 1]];
            }

            if chain.is_empty() {
                chain.extend_from_slice(&world);
            } else {
                chain.extend_from_slice(&world[1..]);
            }
            control_legs.push(world);
        }

        if chain.len() < 2 {
            return Ok(Route {
                segments: control_legs,
                is_loop: scene.loop_route,
            });
        }

        let resolution = self.config.spline_resolution;
        let smooth = self
            .pathfinder
            .smooth_path_catmull_rom(&chain, self.config.tension, resolution);
        let mut segments = split_by_legs(&smooth, &control_legs, resolution);

        if scene.loop_route && self.config.loop_resample {
            let spacing = scene.map.resolution.max(1.0);
            segments = segments
                .iter()
                .map(|s| self.pathfinder.resample_by_arc_length(s, spacing))
                .collect();
        }

        Ok(Route {
            segments,
            is_loop: scene.loop_route,
        })
    }

    /// Chaikin corner cutting over every segment of `route`.
    ///
    /// Segment `i` is checked against a grid built in the mode its leg was
    /// searched in, so a Safe leg keeps its margin even when the last
    /// search published an Aggressive grid.
    pub fn smooth_route_chaikin(&self, scene: &PlanningScene, route: &mut Route, iterations: usize) {
        if iterations == 0 || scene.map.is_degenerate() {
            return;
        }

        let mut safe: Option<OccupancyGrid> = None;
        let mut aggressive: Option<OccupancyGrid> = None;
        for (i, segment) in route.segments.iter_mut().enumerate() {
            let mode = self.segment_mode(scene, i);
            let slot = match mode {
                PathMode::Safe => &mut safe,
                PathMode::Aggressive => &mut aggressive,
            };
            let grid = slot.get_or_insert_with(|| {
                GridBuilder::new(mode, self.config.safety_threshold, self.config.edge_threshold)
                    .build(scene)
            });
            let before = segment.len();
            *segment = PathSmoother::new(grid).chaikin(segment, iterations);
            debug!(
                "[Route] Chaikin segment {} ({:?}): {} -> {} points",
                i,
                mode,
                before,
                segment.len()
            );
        }
    }

    /// Mode segment `i` of a route over `scene` was searched in
    pub fn segment_mode(&self, scene: &PlanningScene, segment: usize) -> PathMode {
        if !scene.loop_route && self.config.pathfinding_mode == PathfindingMode::Direct {
            PathMode::Safe
        } else {
            scene.leg_mode(segment)
        }
    }
}

fn route_points(scene: &PlanningScene) -> Result<Vec<WorldPoint>, RouteError> {
    if let Some(points) = scene.route_points() {
        return Ok(points);
    }
    if scene.loop_route {
        Err(RouteError::NotEnoughWaypoints {
            required: MIN_LOOP_WAYPOINTS,
            found: scene.waypoints.len(),
        })
    } else {
        Err(RouteError::MissingEndpoints)
    }
}

fn to_world(scene: &PlanningScene, path: &[GridCoord]) -> Vec<WorldPoint> {
    path.iter().map(|&c| scene.map.grid_to_world(c)).collect()
}

/// Split the smoothed chain back into one segment per leg.
///
/// Leg `i` with `c` control points owns `(c - 1) * resolution` samples after
/// its first; every segment includes both of its end samples.
fn split_by_legs(
    smooth: &[WorldPoint],
    control_legs: &[Vec<WorldPoint>],
    resolution: usize,
) -> Vec<Vec<WorldPoint>> {
    let mut segments = Vec::with_capacity(control_legs.len());
    let mut start = 0;
    for (i, leg) in control_legs.iter().enumerate() {
        let samples = leg.len().saturating_sub(1) * resolution;
        let begin = start.min(smooth.len());
        let end = if i + 1 == control_legs.len() {
            smooth.len()
        } else {
            (start + samples + 1).min(smooth.len())
        };
        segments.push(smooth[begin..end].to_vec());
        start += samples;
    }
    segments
}
