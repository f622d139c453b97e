//! Linear interpolation and easing.
//!
//! Animations sample an eased progress value in `[0, 1]` and blend a start
//! and end state component-wise with [`Lerp`].

use crate::geometry::{Point, Rect, Vector};

/// Ease-in-ease-out timing curve (quadratic).
///
/// Formula: `2t²` for `t < 0.5`, otherwise `-1 + (4 - 2t)t`.
///
/// # Arguments
/// * `t` - Linear progress (clamped to 0.0-1.0)
#[inline]
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Blend between `start` and `end`; `t = 0` yields `start`, `t = 1` yields `end`.
#[inline]
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// Values that can be blended component-wise.
pub trait Lerp: Sized {
    fn lerp(&self, end: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, end: &Self, t: f64) -> Self {
        lerp(*self, *end, t)
    }
}

impl Lerp for Point {
    fn lerp(&self, end: &Self, t: f64) -> Self {
        Point::new(lerp(self.x, end.x, t), lerp(self.y, end.y, t))
    }
}

impl Lerp for Vector {
    fn lerp(&self, end: &Self, t: f64) -> Self {
        Vector::new(lerp(self.dx, end.dx, t), lerp(self.dy, end.dy, t))
    }
}

impl Lerp for Rect {
    fn lerp(&self, end: &Self, t: f64) -> Self {
        Rect::new(
            lerp(self.left, end.left, t),
            lerp(self.top, end.top, t),
            lerp(self.right, end.right, t),
            lerp(self.bottom, end.bottom, t),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_boundaries() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert_eq!(ease_in_out(0.5), 0.5);
    }

    #[test]
    fn test_ease_clamps_input() {
        assert_eq!(ease_in_out(-0.5), 0.0);
        assert_eq!(ease_in_out(1.5), 1.0);
    }

    #[test]
    fn test_ease_is_symmetric() {
        for i in 0..=50 {
            let x = i as f64 / 100.0;
            assert!((ease_in_out(0.5 - x) + ease_in_out(0.5 + x) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_ease_monotonic() {
        let mut prev = 0.0;
        for i in 0..=1000 {
            let val = ease_in_out(i as f64 / 1000.0);
            assert!(val >= prev, "ease_in_out should be monotonically increasing");
            prev = val;
        }
    }

    #[test]
    fn test_rect_lerp() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(100.0, 50.0, 300.0, 150.0);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, 0.5), Rect::new(50.0, 25.0, 200.0, 125.0));
    }

    #[test]
    fn test_scalar_and_point_lerp() {
        assert_eq!(lerp(10.0, 20.0, 0.25), 12.5);
        let p = Point::new(0.0, 10.0).lerp(&Point::new(10.0, 0.0), 0.5);
        assert_eq!(p, Point::new(5.0, 5.0));
    }
}
