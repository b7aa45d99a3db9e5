//! Axis-aligned rectangles for obstacles.
//!
//! [`Rect`] is stored the way map editors hand obstacles over: a top-left
//! corner plus a size, in world units.
//!
//! ```rust
//! use marga::core::{Rect, WorldPoint};
//!
//! let wall = Rect::new(100.0, 0.0, 20.0, 300.0);
//! assert!(wall.contains(WorldPoint::new(110.0, 150.0)));
//!
//! // Grow by the robot's half-size before rasterizing
//! let inflated = wall.inflated(50.0);
//! assert_eq!(inflated.left(), 50.0);
//! assert_eq!(inflated.width, 120.0);
//! ```

use serde::{Deserialize, Serialize};

use super::point::WorldPoint;

/// Axis-aligned rectangle in world coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge (smallest y)
    pub y: f32,
    /// Extent along x
    pub width: f32,
    /// Extent along y
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle spanning two opposite corners (any order).
    pub fn from_corners(a: WorldPoint, b: WorldPoint) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    /// Left edge.
    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge.
    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Centre of the rectangle.
    #[inline]
    pub fn center(&self) -> WorldPoint {
        WorldPoint::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Check if a point is inside the rectangle (edges included).
    #[inline]
    pub fn contains(&self, point: WorldPoint) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Rectangle grown by `margin` on all four sides.
    #[inline]
    pub fn inflated(&self, margin: f32) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }

    /// Same rectangle with every value multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Rect {
        Rect::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(WorldPoint::new(0.0, 0.0)));
        assert!(r.contains(WorldPoint::new(10.0, 10.0)));
        assert!(!r.contains(WorldPoint::new(10.1, 5.0)));
    }

    #[test]
    fn test_from_corners() {
        let r = Rect::from_corners(WorldPoint::new(30.0, 5.0), WorldPoint::new(10.0, 25.0));
        assert_eq!(r, Rect::new(10.0, 5.0, 20.0, 20.0));
    }

    #[test]
    fn test_inflated() {
        let r = Rect::new(10.0, 10.0, 5.0, 5.0).inflated(2.5);
        assert_eq!(r.left(), 7.5);
        assert_eq!(r.bottom(), 17.5);
        assert_eq!(r.center(), WorldPoint::new(12.5, 12.5));
    }
}
