//! Points and sizes.

use super::{Vector, MIN_EXTENT};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A position in screen space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The displacement from the origin to this point.
    pub fn to_vector(self) -> Vector {
        Vector::new(self.x, self.y)
    }

    /// Box hit-test: whether this point lies within `radius` of `target` on
    /// both axes independently.
    ///
    /// The touch area is a square of side `2 * radius`, not a circle.
    pub fn is_inside(self, target: Point, radius: f64) -> bool {
        (self.x - target.x).abs() <= radius && (self.y - target.y).abs() <= radius
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, start: Point) -> Vector {
        Vector::new(self.x - start.x, self.y - start.y)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, v: Vector) -> Point {
        Point::new(self.x + v.dx, self.y + v.dy)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, v: Vector) -> Point {
        Point::new(self.x - v.dx, self.y - v.dy)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width over height. Collapsed heights are clamped to a tiny extent.
    pub fn aspect_ratio(self) -> f64 {
        debug_assert!(self.height > 0.0, "aspect ratio of zero-height size");
        self.width / self.height.max(MIN_EXTENT)
    }

    /// Whether both extents are strictly positive and finite.
    pub fn is_positive(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// The size after `times` quarter turns (odd counts swap the extents).
    pub fn rotated_90_degrees(self, times: i32) -> Size {
        if times.rem_euclid(2) == 0 {
            self
        } else {
            Size::new(self.height, self.width)
        }
    }

    pub fn scaled(self, factor: f64) -> Size {
        Size::new(self.width * factor, self.height * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_difference_is_vector() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(4.0, 25.0);
        assert_eq!(a - b, Vector::new(6.0, -5.0));
        assert_eq!(b + (a - b), a);
        assert_eq!(a - (a - b), b);
    }

    #[test]
    fn test_is_inside_uses_box_not_circle() {
        let anchor = Point::new(0.0, 0.0);
        // Corner of the box is outside a circle of the same radius but inside the box.
        assert!(Point::new(24.0, 24.0).is_inside(anchor, 24.0));
        assert!(Point::new(-24.0, 24.0).is_inside(anchor, 24.0));
        assert!(!Point::new(24.1, 0.0).is_inside(anchor, 24.0));
        assert!(!Point::new(0.0, -24.1).is_inside(anchor, 24.0));
    }

    #[test]
    fn test_size_rotation_swaps_on_odd_turns() {
        let s = Size::new(400.0, 300.0);
        assert_eq!(s.rotated_90_degrees(0), s);
        assert_eq!(s.rotated_90_degrees(1), Size::new(300.0, 400.0));
        assert_eq!(s.rotated_90_degrees(2), s);
        assert_eq!(s.rotated_90_degrees(-3), Size::new(300.0, 400.0));
    }

    #[test]
    fn test_size_aspect_ratio() {
        assert_eq!(Size::new(200.0, 100.0).aspect_ratio(), 2.0);
        assert!(Size::new(1.0, 1.0).is_positive());
        assert!(!Size::new(0.0, 1.0).is_positive());
        assert!(!Size::new(f64::NAN, 1.0).is_positive());
    }
}
