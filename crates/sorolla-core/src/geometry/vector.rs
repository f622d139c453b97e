//! Two-dimensional displacement vectors.

use super::Axis;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A displacement in screen space (or a per-axis factor, e.g. a signed scale).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { dx: 0.0, dy: 0.0 };
    pub const ONE: Vector = Vector { dx: 1.0, dy: 1.0 };

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// The per-axis factor that reflects a vector across `axis`.
    ///
    /// Mirroring horizontally negates the x component.
    pub fn mirror(axis: Axis) -> Vector {
        match axis {
            Axis::Horizontal => Vector::new(-1.0, 1.0),
            Axis::Vertical => Vector::new(1.0, -1.0),
        }
    }

    /// `-1` when exactly one component is negative, `+1` otherwise.
    ///
    /// Applied to a signed scale this tells whether the image is currently
    /// mirrored an odd number of times, which reverses the visual direction
    /// of rotations expressed in the image's own frame.
    pub fn sign(self) -> f64 {
        if (self.dx < 0.0) != (self.dy < 0.0) {
            -1.0
        } else {
            1.0
        }
    }

    /// Rotate by `degrees` with the standard rotation matrix.
    ///
    /// Multiples of 90° are handled exactly so that repeated quarter turns do
    /// not accumulate rounding noise.
    pub fn rotate(self, degrees: f64) -> Vector {
        let quarter_turns = degrees / 90.0;
        if (quarter_turns - quarter_turns.round()).abs() < 1e-9 {
            return match (quarter_turns.round() as i64).rem_euclid(4) {
                0 => self,
                1 => Vector::new(-self.dy, self.dx),
                2 => Vector::new(-self.dx, -self.dy),
                _ => Vector::new(self.dy, -self.dx),
            };
        }

        let (sin, cos) = degrees.to_radians().sin_cos();
        Vector::new(self.dx * cos - self.dy * sin, self.dx * sin + self.dy * cos)
    }

    /// Keep only the component along `axis`.
    pub fn projected(self, axis: Axis) -> Vector {
        match axis {
            Axis::Horizontal => Vector::new(self.dx, 0.0),
            Axis::Vertical => Vector::new(0.0, self.dy),
        }
    }

    pub fn length(self) -> f64 {
        self.dx.hypot(self.dy)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        *self = *self + rhs;
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.dx - rhs.dx, self.dy - rhs.dy)
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Vector) {
        *self = *self - rhs;
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.dx, -self.dy)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, factor: f64) -> Vector {
        Vector::new(self.dx * factor, self.dy * factor)
    }
}

/// Component-wise product.
impl Mul for Vector {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Vector {
        Vector::new(self.dx * rhs.dx, self.dy * rhs.dy)
    }
}

impl Div<f64> for Vector {
    type Output = Vector;

    fn div(self, factor: f64) -> Vector {
        Vector::new(self.dx / factor, self.dy / factor)
    }
}

/// Component-wise quotient.
impl Div for Vector {
    type Output = Vector;

    fn div(self, rhs: Vector) -> Vector {
        Vector::new(self.dx / rhs.dx, self.dy / rhs.dy)
    }
}
