//! Randomized invariant checks with seeded generators.

mod common;

use approx::assert_relative_eq;
use marga::core::{GridCoord, WorldPoint};
use marga::grid::{BresenhamLine, FloodField};
use marga::pathfinding::{AStarConfig, AStarPlanner, PathSmoother, catmull_rom, resample_by_arc_length};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use common::{assert_valid_grid_path, assert_valid_pull, random_free_cell, random_grid};

const TRIALS: usize = 200;

#[test]
fn test_paths_are_connected_and_never_cut_corners() {
    common::init_logging();
    let mut rng = StdRng::seed_from_u64(7);
    let mut found = 0;

    for _ in 0..TRIALS {
        let grid = random_grid(&mut rng, 24, 18, 0.3);
        let (Some(start), Some(goal)) = (random_free_cell(&mut rng, &grid), random_free_cell(&mut rng, &grid)) else {
            continue;
        };

        let planner = AStarPlanner::new(&grid, AStarConfig::with_detour(10.0, 100));
        let result = planner.find_path(start, goal);
        if !result.success {
            assert!(result.path_grid.is_empty());
            continue;
        }
        found += 1;

        assert_eq!(result.start(), Some(start));
        assert_eq!(result.goal(), Some(goal));
        assert_eq!(result.path_world.len(), result.path_grid.len());
        assert_valid_grid_path(&grid, &result.path_grid);

        let pulled = PathSmoother::new(&grid).string_pull(&result.path_grid);
        assert_eq!(pulled.first(), Some(&start));
        assert_eq!(pulled.last(), Some(&goal));
        assert_valid_pull(&grid, &result.path_grid, &pulled);
    }

    assert!(found > TRIALS / 4, "only {} of {} searches succeeded", found, TRIALS);
}

#[test]
fn test_blocked_endpoints_are_repaired() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..TRIALS {
        let grid = random_grid(&mut rng, 16, 16, 0.4);
        let start = GridCoord::new(rng.random_range(0..16), rng.random_range(0..16));
        let goal = GridCoord::new(rng.random_range(0..16), rng.random_range(0..16));

        let planner = AStarPlanner::new(&grid, AStarConfig::with_detour(10.0, 100));
        let result = planner.find_path(start, goal);
        if !result.success {
            continue;
        }

        let first = result.start().unwrap();
        let last = result.goal().unwrap();
        assert!(grid.is_passable(first) && grid.is_passable(last));
        if grid.is_passable(start) {
            assert_eq!(first, start);
        }
        if grid.is_passable(goal) {
            assert_eq!(last, goal);
        }
        assert_eq!(planner.nearest_passable(start), Some(first));
    }
}

#[test]
fn test_catmull_rom_hits_control_points() {
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..50 {
        let n = rng.random_range(2..8);
        let points: Vec<WorldPoint> = (0..n)
            .map(|_| WorldPoint::new(rng.random_range(0.0..500.0), rng.random_range(0.0..500.0)))
            .collect();
        let samples = rng.random_range(1..20);

        let smooth = catmull_rom(&points, 0.5, samples);
        assert_eq!(smooth.len(), 1 + (n - 1) * samples);
        for (k, p) in points.iter().enumerate() {
            let q = smooth[k * samples];
            assert_relative_eq!(q.x, p.x, epsilon = 1e-2);
            assert_relative_eq!(q.y, p.y, epsilon = 1e-2);
        }
    }
}

#[test]
fn test_resample_keeps_endpoints_and_spacing() {
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..50 {
        let n = rng.random_range(2..12);
        let points: Vec<WorldPoint> = (0..n)
            .map(|_| WorldPoint::new(rng.random_range(0.0..300.0), rng.random_range(0.0..300.0)))
            .collect();
        let ds = rng.random_range(1.0..25.0);

        let out = resample_by_arc_length(&points, ds);
        assert_eq!(out.first(), points.first());
        assert_eq!(out.last(), points.last());
        for pair in out.windows(2) {
            assert!(pair[0].distance(&pair[1]) <= ds + 1e-2);
        }
    }
}

#[test]
fn test_distance_field_is_manhattan_on_open_grid() {
    let mut rng = StdRng::seed_from_u64(13);
    let (w, h) = (20, 15);

    for _ in 0..20 {
        let seeds: Vec<GridCoord> = (0..rng.random_range(1..4))
            .map(|_| GridCoord::new(rng.random_range(0..w as i32), rng.random_range(0..h as i32)))
            .collect();
        let field = FloodField::from_seeds(w, h, seeds.iter().copied());

        for y in 0..h as i32 {
            for x in 0..w as i32 {
                let c = GridCoord::new(x, y);
                let expected = seeds.iter().map(|s| s.manhattan_distance(&c)).min();
                assert_eq!(field.get(c), expected);
            }
        }
    }
}

#[test]
fn test_bresenham_lines_are_connected() {
    let mut rng = StdRng::seed_from_u64(17);

    for _ in 0..TRIALS {
        let a = GridCoord::new(rng.random_range(-20..20), rng.random_range(-20..20));
        let b = GridCoord::new(rng.random_range(-20..20), rng.random_range(-20..20));
        let cells: Vec<GridCoord> = BresenhamLine::new(a, b).collect();

        assert_eq!(cells.first(), Some(&a));
        assert_eq!(cells.last(), Some(&b));
        assert_eq!(cells.len() as i32, a.chebyshev_distance(&b) + 1);
        for pair in cells.windows(2) {
            assert_eq!(pair[0].chebyshev_distance(&pair[1]), 1);
        }
    }
}
