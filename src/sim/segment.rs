//! Line segment geometry for world obstacles and travel paths
//!
//! A world is an ordered list of segments. A segment may be degenerate (both
//! endpoints equal), standing for a single obstacle point rather than a line.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A 2D line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: DVec2,
    pub b: DVec2,
}

impl Segment {
    pub fn new(a: DVec2, b: DVec2) -> Self {
        Self { a, b }
    }

    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(DVec2::new(x1, y1), DVec2::new(x2, y2))
    }

    /// A degenerate segment stands for a single obstacle point.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }

    /// Direction vector from `a` to `b`.
    #[inline]
    pub fn delta(&self) -> DVec2 {
        self.b - self.a
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.delta().length()
    }

    /// Component-wise lower corner of the bounding box.
    #[inline]
    pub fn min(&self) -> DVec2 {
        self.a.min(self.b)
    }

    /// Component-wise upper corner of the bounding box.
    #[inline]
    pub fn max(&self) -> DVec2 {
        self.a.max(self.b)
    }

    /// Closed bounding-box containment.
    pub fn bounds_contain(&self, p: DVec2) -> bool {
        let (lo, hi) = (self.min(), self.max());
        p.x >= lo.x && p.x <= hi.x && p.y >= lo.y && p.y <= hi.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate() {
        assert!(Segment::from_coords(5.0, 5.0, 5.0, 5.0).is_degenerate());
        assert!(!Segment::from_coords(5.0, 5.0, 5.0, 6.0).is_degenerate());
    }

    #[test]
    fn test_length_and_delta() {
        let seg = Segment::from_coords(1.0, 2.0, 4.0, 6.0);
        assert_eq!(seg.delta(), DVec2::new(3.0, 4.0));
        assert_eq!(seg.length(), 5.0);
    }

    #[test]
    fn test_bounds() {
        // endpoint order must not matter
        let seg = Segment::from_coords(10.0, 2.0, -3.0, 8.0);
        assert_eq!(seg.min(), DVec2::new(-3.0, 2.0));
        assert_eq!(seg.max(), DVec2::new(10.0, 8.0));

        assert!(seg.bounds_contain(DVec2::new(0.0, 5.0)));
        assert!(seg.bounds_contain(DVec2::new(-3.0, 2.0))); // corner is inside
        assert!(!seg.bounds_contain(DVec2::new(11.0, 5.0)));
        assert!(!seg.bounds_contain(DVec2::new(0.0, 1.0)));
    }
}
