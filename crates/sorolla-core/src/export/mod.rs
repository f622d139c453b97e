//! Rendering the final crop.
//!
//! The editor only ever moves a crop rect and an image transform around on
//! screen. This module turns that state into pixels:
//!
//! 1. [`CropPlan::new`] maps the crop rect back through the inverse transform
//!    into a region of the source image and records the orientation to apply.
//! 2. [`render_crop`] cuts that region out and orients it.
//! 3. [`export_jpeg`] does both for encoded input and re-encodes as JPEG.
//!
//! Writing the result anywhere is left to the host.

mod jpeg;
mod plan;

pub use jpeg::{encode_jpeg, export_jpeg};
pub use plan::{render_crop, CropPlan, PixelRegion};

use thiserror::Error;

/// Errors that can occur while exporting a crop.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The source bytes could not be decoded
    #[error("Failed to decode source image: {0}")]
    Decode(String),

    /// The crop rect does not overlap the image
    #[error("Crop region does not overlap the image")]
    EmptyRegion,

    /// The crop region exceeds the decoded image
    #[error("Crop region {region:?} exceeds the {width}x{height} source image")]
    RegionOutOfBounds {
        region: PixelRegion,
        width: u32,
        height: u32,
    },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}
