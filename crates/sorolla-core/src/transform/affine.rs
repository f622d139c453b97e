//! The decomposed image transform value.

use crate::geometry::{Point, Rect, Vector};
use crate::interpolate::Lerp;
use serde::{Deserialize, Serialize};

/// Cumulative image transform: translation, signed scale and rotation.
///
/// Operations compose onto an existing value; only a reset replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageTransform {
    /// Offset in the image's own (pre-rotation, pre-scale) frame.
    pub translation: Vector,
    /// Per-axis scale in screen space. Negative components mirror.
    pub scale: Vector,
    /// Rotation in degrees, a multiple of 90 when not mid-animation.
    pub rotation_degrees: f64,
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ImageTransform {
    pub const IDENTITY: ImageTransform = ImageTransform {
        translation: Vector::ZERO,
        scale: Vector::ONE,
        rotation_degrees: 0.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Rotation as clockwise quarter turns in `0..4`.
    pub fn quarter_turns(&self) -> i32 {
        ((self.rotation_degrees / 90.0).round() as i32).rem_euclid(4)
    }

    /// Rotation as counter-clockwise quarter turns in `0..4`.
    pub fn ccw_quarter_turns(&self) -> i32 {
        (-self.quarter_turns()).rem_euclid(4)
    }

    /// Whether the image is mirrored on the horizontal axis (x flipped).
    pub fn is_flipped_horizontally(&self) -> bool {
        self.scale.dx < 0.0
    }

    /// Whether the image is mirrored on the vertical axis (y flipped).
    pub fn is_flipped_vertically(&self) -> bool {
        self.scale.dy < 0.0
    }

    /// Where a point of the untransformed view is drawn.
    pub fn apply(&self, point: Point, pivot: Point) -> Point {
        pivot + ((point - pivot) + self.translation).rotate(self.rotation_degrees) * self.scale
    }

    /// The untransformed view point drawn at `point`.
    pub fn unapply(&self, point: Point, pivot: Point) -> Point {
        pivot + self.to_local(point - pivot) - self.translation
    }

    /// Convert a screen-space displacement into the image's own frame.
    ///
    /// Adding the result to `translation` moves the drawn image by exactly `v`.
    pub fn to_local(&self, v: Vector) -> Vector {
        (v / self.scale).rotate(-self.rotation_degrees)
    }

    /// Bounding box of `rect` after the transform.
    pub fn map_rect(&self, rect: &Rect, pivot: Point) -> Rect {
        let corners = rect.corners().map(|p| self.apply(p, pivot));
        Rect::bounding(&corners).unwrap_or(*rect)
    }

    /// Bounding box of the untransformed view region drawn inside `rect`.
    pub fn unmap_rect(&self, rect: &Rect, pivot: Point) -> Rect {
        let corners = rect.corners().map(|p| self.unapply(p, pivot));
        Rect::bounding(&corners).unwrap_or(*rect)
    }

    /// Flatten into a matrix for a renderer that wants one.
    pub fn to_matrix(&self, pivot: Point) -> AffineMatrix {
        let x_axis = Vector::new(1.0, 0.0).rotate(self.rotation_degrees) * self.scale;
        let y_axis = Vector::new(0.0, 1.0).rotate(self.rotation_degrees) * self.scale;
        let origin = self.apply(Point::new(0.0, 0.0), pivot);
        AffineMatrix {
            a: x_axis.dx,
            b: x_axis.dy,
            c: y_axis.dx,
            d: y_axis.dy,
            tx: origin.x,
            ty: origin.y,
        }
    }
}

impl Lerp for ImageTransform {
    fn lerp(&self, end: &Self, t: f64) -> Self {
        ImageTransform {
            translation: self.translation.lerp(&end.translation, t),
            scale: self.scale.lerp(&end.scale, t),
            rotation_degrees: self.rotation_degrees.lerp(&end.rotation_degrees, t),
        }
    }
}

/// A 2D affine matrix: `x' = a·x + c·y + tx`, `y' = b·x + d·y + ty`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineMatrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl AffineMatrix {
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    /// The six values in `[a, b, c, d, tx, ty]` order.
    pub fn to_array(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.tx, self.ty]
    }
}
