//! Geometry primitives for the crop overlay and the transform engine.
//!
//! All coordinates are floating point screen units with the origin at the
//! top-left corner and the y axis pointing down. Rectangles are immutable
//! values: every operation returns a new rectangle instead of mutating one
//! in place.
//!
//! # Conventions
//!
//! - A [`Point`] is a position, a [`Vector`] is a displacement. Subtracting two
//!   points yields a vector; adding a vector to a point yields a point.
//! - Rotations are expressed in degrees using the standard 2D rotation matrix.
//!   Because y points down, a negative angle turns counter-clockwise on screen.

mod anchor;
mod axis;
mod point;
mod rect;
mod vector;

pub use anchor::Anchor;
pub use axis::Axis;
pub use point::{Point, Size};
pub use rect::{Insets, Rect};
pub use vector::Vector;

/// Smallest extent used as a divisor when a rectangle collapsed to zero.
pub(crate) const MIN_EXTENT: f64 = 1e-6;
