//! Non-destructive image transforms.
//!
//! The image transform is kept decomposed into a translation, a signed
//! per-axis scale and a rotation in degrees instead of a single matrix.
//! Anchor-relative operations need to reason about distances from the view
//! center in the current frame, which the decomposition keeps cheap and exact.
//!
//! # Coordinate System
//!
//! - All transforms pivot at the center `c` of the view frame
//! - A point `p` of the untransformed view is drawn at
//!   `c + S · R(r) · ((p - c) + t)`: translate in the image's own frame,
//!   rotate, then scale
//! - Rotation angles are in degrees with y pointing down, so negative angles
//!   turn counter-clockwise on screen
//! - Scale components are signed; a negative component mirrors that axis

mod affine;
mod engine;

pub use affine::{AffineMatrix, ImageTransform};
pub use engine::TransformEngine;
