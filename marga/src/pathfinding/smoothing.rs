//! Path smoothing algorithms.
//!
//! Post-processes A* paths into motion-friendly polylines:
//! - Line-of-sight string pulling (grid and world paths)
//! - Centripetal Catmull-Rom interpolation
//! - Collision-aware Chaikin corner cutting
//! - Arc-length resampling

use log::debug;

use crate::core::{GridCoord, WorldPoint};
use crate::grid::{OccupancyGrid, has_line_of_sight, has_world_line_of_sight};

/// Knot gaps below this are bumped by [`KNOT_BUMP`]
const KNOT_EPSILON: f64 = 1e-5;
const KNOT_BUMP: f64 = 1e-3;

/// Collision-aware path smoother
pub struct PathSmoother<'a> {
    grid: &'a OccupancyGrid,
}

impl<'a> PathSmoother<'a> {
    /// Create a new path smoother over a grid
    pub fn new(grid: &'a OccupancyGrid) -> Self {
        Self { grid }
    }

    /// Reduce a grid path to the fewest line-of-sight segments.
    ///
    /// From each anchor, extends forward while the straight line stays clear
    /// and stops at the first blocked candidate. The output is a subsequence
    /// of the input that keeps both endpoints.
    pub fn string_pull(&self, path: &[GridCoord]) -> Vec<GridCoord> {
        pull_strings(path, |a, b| has_line_of_sight(self.grid, *a, *b))
    }

    /// World-space variant of [`string_pull`](Self::string_pull), projecting
    /// points onto the grid with floor division.
    pub fn string_pull_world(&self, path: &[WorldPoint]) -> Vec<WorldPoint> {
        pull_strings(path, |a, b| has_world_line_of_sight(self.grid, *a, *b))
    }

    /// Chaikin corner cutting.
    ///
    /// Each iteration replaces every edge with points at 1/4 and 3/4 along
    /// it, keeping both endpoints. If any new edge crosses a blocked cell the
    /// previous iteration's polyline is returned.
    pub fn chaikin(&self, path: &[WorldPoint], iterations: usize) -> Vec<WorldPoint> {
        if path.len() < 3 || iterations == 0 {
            return path.to_vec();
        }

        let mut current = path.to_vec();
        for iteration in 0..iterations {
            if current.len() < 3 {
                break;
            }

            let mut next = Vec::with_capacity(current.len() * 2);
            next.push(current[0]);
            for pair in current.windows(2) {
                next.push(pair[0].lerp(&pair[1], 0.25));
                next.push(pair[0].lerp(&pair[1], 0.75));
            }
            next.push(current[current.len() - 1]);

            let collides = next
                .windows(2)
                .any(|pair| !has_world_line_of_sight(self.grid, pair[0], pair[1]));
            if collides {
                debug!(
                    "[Smoothing] Chaikin iteration {} collides, keeping {} points",
                    iteration + 1,
                    current.len()
                );
                return current;
            }
            current = next;
        }
        current
    }

    /// True if every consecutive pair of the world polyline has line of sight
    pub fn is_collision_free(&self, path: &[WorldPoint]) -> bool {
        path.windows(2)
            .all(|pair| has_world_line_of_sight(self.grid, pair[0], pair[1]))
    }
}

fn pull_strings<T: Copy>(path: &[T], clear: impl Fn(&T, &T) -> bool) -> Vec<T> {
    if path.len() < 3 {
        return path.to_vec();
    }

    let mut pulled = vec![path[0]];
    let mut anchor = 0;
    while anchor < path.len() - 1 {
        let mut furthest = anchor + 1;
        for candidate in (anchor + 2)..path.len() {
            if clear(&path[anchor], &path[candidate]) {
                furthest = candidate;
            } else {
                break;
            }
        }
        pulled.push(path[furthest]);
        anchor = furthest;
    }
    pulled
}

/// Centripetal Catmull-Rom interpolation through every control point.
///
/// Virtual endpoints `2*p0 - p1` and `2*pn - pn-1` are added so the spline
/// also passes through the first and last points. Each span between
/// consecutive control points contributes `samples_per_span` points, the
/// last of which is the span's end point. `alpha` is the knot exponent
/// (0.5 is centripetal).
///
/// Returns the input unchanged if it has fewer than 2 points or
/// `samples_per_span` is 0.
pub fn catmull_rom(points: &[WorldPoint], alpha: f32, samples_per_span: usize) -> Vec<WorldPoint> {
    if points.len() < 2 || samples_per_span < 1 {
        return points.to_vec();
    }

    let n = points.len();
    let mut control = Vec::with_capacity(n + 2);
    control.push(points[0].mirror(&points[1]));
    control.extend_from_slice(points);
    control.push(points[n - 1].mirror(&points[n - 2]));

    let mut smoothed = Vec::with_capacity(1 + (n - 1) * samples_per_span);
    smoothed.push(points[0]);
    for span in control.windows(4) {
        for j in 1..=samples_per_span {
            let t = j as f64 / samples_per_span as f64;
            smoothed.push(catmull_rom_point(t, span, alpha as f64));
        }
    }
    smoothed
}

/// Point at parameter `t` in `[0, 1]` between `p[1]` and `p[2]`.
fn catmull_rom_point(t: f64, p: &[WorldPoint], alpha: f64) -> WorldPoint {
    // Each knot is built on the bumped previous knot, so every knot gap
    // stays at least KNOT_BUMP wide even across three coincident points.
    let knot = |prev: f64, a: &WorldPoint, b: &WorldPoint| {
        let mut next = prev + (a.distance(b) as f64).powf(alpha);
        if (next - prev).abs() < KNOT_EPSILON {
            next += KNOT_BUMP;
        }
        next
    };

    let t0 = 0.0;
    let t1 = knot(t0, &p[0], &p[1]);
    let t2 = knot(t1, &p[1], &p[2]);
    let t3 = knot(t2, &p[2], &p[3]);
    let u = t1 + t * (t2 - t1);

    let interp = |ta: f64, tb: f64, a: (f64, f64), b: (f64, f64)| {
        let wa = (tb - u) / (tb - ta);
        let wb = (u - ta) / (tb - ta);
        (wa * a.0 + wb * b.0, wa * a.1 + wb * b.1)
    };
    let xy = |w: &WorldPoint| (w.x as f64, w.y as f64);

    let a1 = interp(t0, t1, xy(&p[0]), xy(&p[1]));
    let a2 = interp(t1, t2, xy(&p[1]), xy(&p[2]));
    let a3 = interp(t2, t3, xy(&p[2]), xy(&p[3]));
    let b1 = interp(t0, t2, a1, a2);
    let b2 = interp(t1, t3, a2, a3);
    let c = interp(t1, t2, b1, b2);
    WorldPoint::new(c.0 as f32, c.1 as f32)
}

/// Resample a polyline at uniform arc-length spacing `ds`.
///
/// Emits the first point, then points at arc lengths `ds, 2ds, ...` strictly
/// below the total length, then the last point if the final sample differs
/// from it. Returns the input unchanged if it has fewer than 2 points, `ds`
/// is not positive, or the polyline has zero length.
pub fn resample_by_arc_length(points: &[WorldPoint], ds: f32) -> Vec<WorldPoint> {
    if points.len() < 2 || ds <= 0.0 {
        return points.to_vec();
    }

    let mut arc = Vec::with_capacity(points.len());
    arc.push(0.0f64);
    for pair in points.windows(2) {
        let last = arc[arc.len() - 1];
        arc.push(last + pair[0].distance(&pair[1]) as f64);
    }

    let total = arc[arc.len() - 1];
    if total <= 0.0 {
        return points.to_vec();
    }

    let ds = ds as f64;
    let mut out = Vec::with_capacity((total / ds) as usize + 2);
    out.push(points[0]);

    let mut target = ds;
    let mut seg = 1;
    while target < total {
        while seg < points.len() && arc[seg] < target {
            seg += 1;
        }
        if seg >= points.len() {
            break;
        }
        let t = (target - arc[seg - 1]) / (arc[seg] - arc[seg - 1] + 1e-9);
        out.push(points[seg - 1].lerp(&points[seg], t as f32));
        target += ds;
    }

    let last = points[points.len() - 1];
    if out.last() != Some(&last) {
        out.push(last);
    }
    out
}

/// Total polyline length
pub fn path_length(points: &[WorldPoint]) -> f32 {
    points
        .windows(2)
        .map(|pair| pair[0].distance(&pair[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CellState;
    use approx::assert_relative_eq;

    fn wp(x: f32, y: f32) -> WorldPoint {
        WorldPoint::new(x, y)
    }

    #[test]
    fn test_string_pull_open_grid() {
        let grid = OccupancyGrid::new(10, 10, 10.0);
        let path: Vec<GridCoord> = (0..10).map(|i| GridCoord::new(i, i)).collect();
        let pulled = PathSmoother::new(&grid).string_pull(&path);
        assert_eq!(pulled, vec![GridCoord::new(0, 0), GridCoord::new(9, 9)]);
    }

    #[test]
    fn test_string_pull_short_paths_unchanged() {
        let grid = OccupancyGrid::new(4, 4, 1.0);
        let smoother = PathSmoother::new(&grid);
        let path = vec![GridCoord::new(0, 0), GridCoord::new(3, 3)];
        assert_eq!(smoother.string_pull(&path), path);
        assert!(smoother.string_pull(&[]).is_empty());
    }

    #[test]
    fn test_string_pull_keeps_corner() {
        // L-shaped path around a blocked block
        let grid = OccupancyGrid::from_ascii(&[".....", ".###.", ".###.", "....."], 10.0);
        let path = vec![
            GridCoord::new(0, 3),
            GridCoord::new(0, 2),
            GridCoord::new(0, 1),
            GridCoord::new(0, 0),
            GridCoord::new(1, 0),
            GridCoord::new(2, 0),
            GridCoord::new(3, 0),
            GridCoord::new(4, 0),
        ];
        let pulled = PathSmoother::new(&grid).string_pull(&path);
        assert_eq!(
            pulled,
            vec![GridCoord::new(0, 3), GridCoord::new(0, 0), GridCoord::new(4, 0)]
        );
    }

    #[test]
    fn test_string_pull_world() {
        let mut grid = OccupancyGrid::new(10, 10, 10.0);
        grid.set(GridCoord::new(5, 5), CellState::Blocked);
        let smoother = PathSmoother::new(&grid);
        let path = vec![wp(5.0, 55.0), wp(55.0, 95.0), wp(95.0, 55.0), wp(95.0, 5.0)];
        let pulled = smoother.string_pull_world(&path);
        assert_eq!(pulled.first(), path.first());
        assert_eq!(pulled.last(), path.last());
        assert!(smoother.is_collision_free(&pulled));
    }

    #[test]
    fn test_catmull_rom_interpolates_control_points() {
        let control = vec![wp(0.0, 0.0), wp(100.0, 0.0), wp(100.0, 100.0), wp(200.0, 150.0)];
        let res = 10;
        let smooth = catmull_rom(&control, 0.5, res);
        assert_eq!(smooth.len(), 1 + (control.len() - 1) * res);
        for (i, p) in control.iter().enumerate() {
            let s = smooth[i * res];
            assert_relative_eq!(s.x, p.x, epsilon = 1e-3);
            assert_relative_eq!(s.y, p.y, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_catmull_rom_straight_line_stays_straight() {
        let control = vec![wp(0.0, 0.0), wp(50.0, 0.0), wp(100.0, 0.0)];
        let smooth = catmull_rom(&control, 0.5, 8);
        for p in &smooth {
            assert_relative_eq!(p.y, 0.0, epsilon = 1e-3);
            assert!(p.x >= -1e-3 && p.x <= 100.0 + 1e-3);
        }
    }

    #[test]
    fn test_catmull_rom_duplicate_points() {
        let control = vec![wp(10.0, 10.0), wp(10.0, 10.0), wp(20.0, 10.0)];
        let smooth = catmull_rom(&control, 0.5, 4);
        assert!(smooth.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert_relative_eq!(smooth[smooth.len() - 1].x, 20.0, epsilon = 1e-3);
    }

    #[test]
    fn test_catmull_rom_coincident_span_is_finite() {
        let a = wp(10.0, 10.0);
        let span = [a, a, a, wp(20.0, 10.0)];
        for t in [0.0, 0.5, 1.0] {
            let p = catmull_rom_point(t, &span, 0.5);
            assert!(p.x.is_finite() && p.y.is_finite(), "t={} gave {:?}", t, p);
        }
    }

    #[test]
    fn test_catmull_rom_degenerate_inputs() {
        let single = vec![wp(1.0, 2.0)];
        assert_eq!(catmull_rom(&single, 0.5, 10), single);
        let pair = vec![wp(0.0, 0.0), wp(1.0, 0.0)];
        assert_eq!(catmull_rom(&pair, 0.5, 0), pair);
    }

    #[test]
    fn test_chaikin_open_space() {
        let grid = OccupancyGrid::new(20, 20, 10.0);
        let path = vec![wp(15.0, 15.0), wp(105.0, 15.0), wp(105.0, 105.0)];
        let smooth = PathSmoother::new(&grid).chaikin(&path, 2);
        // n -> 2(n-1) + 2
        assert_eq!(smooth.len(), 2 * (2 * 2 + 2 - 1) + 2);
        assert_eq!(smooth[0], path[0]);
        assert_eq!(smooth[smooth.len() - 1], path[2]);
    }

    #[test]
    fn test_chaikin_reverts_on_collision() {
        // First cut of the corner at (5,95) runs through cell (1,8)
        let mut grid = OccupancyGrid::new(10, 10, 10.0);
        grid.set(GridCoord::new(1, 8), CellState::Blocked);
        let path = vec![wp(5.0, 5.0), wp(5.0, 95.0), wp(95.0, 95.0)];
        let smoother = PathSmoother::new(&grid);
        assert!(smoother.is_collision_free(&path));

        let result = smoother.chaikin(&path, 3);
        assert_eq!(result, path);
    }

    #[test]
    fn test_resample_spacing() {
        let path = vec![wp(0.0, 0.0), wp(100.0, 0.0), wp(100.0, 35.0)];
        let out = resample_by_arc_length(&path, 10.0);
        assert_eq!(out[0], path[0]);
        assert_eq!(out[out.len() - 1], path[2]);
        // 135 total: samples at 10..130 plus both ends
        assert_eq!(out.len(), 15);
        for pair in out[..out.len() - 1].windows(2) {
            assert_relative_eq!(pair[0].distance(&pair[1]), 10.0, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_resample_exact_multiple() {
        let path = vec![wp(0.0, 0.0), wp(30.0, 0.0)];
        let out = resample_by_arc_length(&path, 10.0);
        assert_eq!(out.len(), 4);
        for (i, p) in out.iter().enumerate() {
            assert_relative_eq!(p.x, 10.0 * i as f32, epsilon = 1e-4);
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn test_resample_degenerate_inputs() {
        let path = vec![wp(0.0, 0.0), wp(30.0, 0.0)];
        assert_eq!(resample_by_arc_length(&path, 0.0), path);
        let zero = vec![wp(5.0, 5.0), wp(5.0, 5.0)];
        assert_eq!(resample_by_arc_length(&zero, 1.0), zero);
    }

    #[test]
    fn test_path_length() {
        assert_relative_eq!(path_length(&[wp(0.0, 0.0), wp(3.0, 4.0), wp(3.0, 10.0)]), 11.0);
        assert_eq!(path_length(&[]), 0.0);
    }
}
