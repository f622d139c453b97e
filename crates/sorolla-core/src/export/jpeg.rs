//! JPEG encoding of the rendered crop.

use super::{render_crop, CropPlan, ExportError};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageReader};
use log::debug;
use std::io::Cursor;

/// Encode an image as JPEG bytes.
///
/// Alpha is dropped; `quality` is clamped to 1-100.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, ExportError> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(ExportError::EmptyRegion);
    }

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
        .map_err(|e| ExportError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Decode `bytes` (JPEG or PNG), render the planned crop and encode it as JPEG.
///
/// # Errors
///
/// Returns `ExportError::Decode` for unreadable input, and propagates the
/// errors of [`render_crop`] and [`encode_jpeg`].
pub fn export_jpeg(bytes: &[u8], plan: &CropPlan, quality: u8) -> Result<Vec<u8>, ExportError> {
    let source = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ExportError::Decode(e.to_string()))?
        .decode()
        .map_err(|e| ExportError::Decode(e.to_string()))?;

    let rendered = render_crop(&source, plan)?;
    debug!(
        "exporting {}x{} crop of {}x{} source at quality {quality}",
        rendered.width(),
        rendered.height(),
        source.width(),
        source.height()
    );
    encode_jpeg(&rendered, quality)
}
