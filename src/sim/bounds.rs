//! Axis-aligned bounds and overlap testing

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in scene pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Grow the rectangle by `margin` on every side
    pub fn inflate(&self, margin: f32) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.width + margin * 2.0,
            self.height + margin * 2.0,
        )
    }

    pub fn overlaps(&self, other: &Bounds) -> bool {
        overlaps(self, other)
    }
}

/// True when the two rectangles intersect with positive area.
///
/// Rectangles that only share an edge do not overlap.
#[inline]
pub fn overlaps(a: &Bounds, b: &Bounds) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(5.0, 5.0, 10.0, 10.0);
        let c = Bounds::new(20.0, 20.0, 5.0, 5.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
        assert!(!overlaps(&a, &c));
        assert!(a.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let right = Bounds::new(10.0, 0.0, 10.0, 10.0);
        let below = Bounds::new(0.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &below));
    }

    #[test]
    fn test_inflate_catches_near_miss() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(15.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &b));
        assert!(overlaps(&a.inflate(3.0), &b.inflate(3.0)));

        let grown = a.inflate(2.0);
        assert_eq!(grown, Bounds::new(-2.0, -2.0, 14.0, 14.0));
    }
}
