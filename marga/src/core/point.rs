//! Point and coordinate types for the planning grid.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Grid coordinates (integer cell indices)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate
    #[inline]
    pub fn manhattan_distance(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Chebyshev distance (max of x and y distance) - used for 8-connected grids
    #[inline]
    pub fn chebyshev_distance(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Get the 4 orthogonal neighbors (N, S, E, W)
    #[inline]
    pub fn neighbors_4(&self) -> [GridCoord; 4] {
        [
            GridCoord::new(self.x, self.y + 1),
            GridCoord::new(self.x, self.y - 1),
            GridCoord::new(self.x + 1, self.y),
            GridCoord::new(self.x - 1, self.y),
        ]
    }

    /// Get the 8 neighbors.
    ///
    /// The first four entries are the orthogonal neighbors in the same order
    /// as [`GridCoord::neighbors_4`], the last four are the diagonals.
    #[inline]
    pub fn neighbors_8(&self) -> [GridCoord; 8] {
        [
            GridCoord::new(self.x, self.y + 1),
            GridCoord::new(self.x, self.y - 1),
            GridCoord::new(self.x + 1, self.y),
            GridCoord::new(self.x - 1, self.y),
            GridCoord::new(self.x + 1, self.y + 1),
            GridCoord::new(self.x + 1, self.y - 1),
            GridCoord::new(self.x - 1, self.y + 1),
            GridCoord::new(self.x - 1, self.y - 1),
        ]
    }

    /// True if `other` is one of the 8 unit offsets away from this cell
    #[inline]
    pub fn is_adjacent_8(&self, other: &GridCoord) -> bool {
        self != other && self.chebyshev_distance(other) == 1
    }
}

impl Add for GridCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridCoord::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridCoord::new(self.x - other.x, self.y - other.y)
    }
}

/// World coordinates (map units, millimetres by convention)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl WorldPoint {
    /// Create a new world point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero point (origin)
    pub const ZERO: WorldPoint = WorldPoint { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &WorldPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Squared distance (faster, avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &WorldPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Linear interpolation towards `other` (t = 0 gives self, t = 1 gives other)
    #[inline]
    pub fn lerp(&self, other: &WorldPoint, t: f32) -> WorldPoint {
        WorldPoint::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Point reflected through `self`, i.e. `2 * self - other`
    #[inline]
    pub fn mirror(&self, other: &WorldPoint) -> WorldPoint {
        WorldPoint::new(2.0 * self.x - other.x, 2.0 * self.y - other.y)
    }

    /// Compass heading from this point to another, in degrees.
    ///
    /// North (+Y) is 0 and east (+X) is 90.
    #[inline]
    pub fn heading_to(&self, other: &WorldPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx.atan2(dy).to_degrees()
    }
}

impl Add for WorldPoint {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        WorldPoint::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for WorldPoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        WorldPoint::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for WorldPoint {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        WorldPoint::new(self.x * scalar, self.y * scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_coord_neighbors() {
        let c = GridCoord::new(5, 5);
        let n8 = c.neighbors_8();
        assert_eq!(&n8[..4], &c.neighbors_4());
        for n in &n8[4..] {
            assert_ne!(n.x, c.x);
            assert_ne!(n.y, c.y);
        }
        assert!(n8.iter().all(|n| c.is_adjacent_8(n)));
    }

    #[test]
    fn test_world_point_distance() {
        let a = WorldPoint::new(0.0, 0.0);
        let b = WorldPoint::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_mirror_and_lerp() {
        let p0 = WorldPoint::new(10.0, 10.0);
        let p1 = WorldPoint::new(20.0, 15.0);
        assert_eq!(p0.mirror(&p1), WorldPoint::new(0.0, 5.0));
        assert_eq!(p0.lerp(&p1, 0.5), WorldPoint::new(15.0, 12.5));
    }

    #[test]
    fn test_heading() {
        let origin = WorldPoint::ZERO;
        assert!((origin.heading_to(&WorldPoint::new(0.0, 1.0)) - 0.0).abs() < 1e-4);
        assert!((origin.heading_to(&WorldPoint::new(1.0, 0.0)) - 90.0).abs() < 1e-4);
    }
}
