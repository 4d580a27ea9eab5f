//! Page geometry.

use serde::{Deserialize, Serialize};

/// An axis-aligned box in page space.
///
/// Coordinates use a top-left origin: `top` grows downward, so `top <= bottom`
/// for a well-formed box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: f64,
    /// Top edge
    pub top: f64,
    /// Right edge
    pub x1: f64,
    /// Bottom edge
    pub bottom: f64,
}

impl BBox {
    /// Create a box from its four edges.
    pub fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }

    /// Whether the point lies within the box, edges included.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.x0 <= x && x <= self.x1 && self.top <= y && y <= self.bottom
    }

    /// Width of the box.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Smallest box covering both boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            top: self.top.min(other.top),
            x1: self.x1.max(other.x1),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

impl From<(f64, f64, f64, f64)> for BBox {
    fn from((x0, top, x1, bottom): (f64, f64, f64, f64)) -> Self {
        Self::new(x0, top, x1, bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point_is_inclusive() {
        let bbox = BBox::new(10.0, 20.0, 110.0, 80.0);
        assert!(bbox.contains_point(10.0, 20.0));
        assert!(bbox.contains_point(110.0, 80.0));
        assert!(bbox.contains_point(50.0, 50.0));
        assert!(!bbox.contains_point(9.99, 50.0));
        assert!(!bbox.contains_point(50.0, 80.01));
    }

    #[test]
    fn test_union() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(5.0, -5.0, 20.0, 8.0);
        assert_eq!(a.union(&b), BBox::new(0.0, -5.0, 20.0, 10.0));
        assert_eq!(a.union(&b).width(), 20.0);
        assert_eq!(a.union(&b).height(), 15.0);
    }
}
