//! Crop geometry in source pixels.
//!
//! # Coordinate System
//!
//! The untransformed image is aspect-fitted into the view frame. A crop rect
//! on screen is unmapped through the image transform into that frame, then
//! scaled from view units into the pixel grid of the source image. Quarter
//! turns keep the unmapped region axis-aligned, so it is a plain rectangle of
//! pixels.

use super::ExportError;
use crate::geometry::{Rect, Size};
use crate::transform::ImageTransform;
use image::DynamicImage;
use log::debug;
use serde::{Deserialize, Serialize};

/// A rectangle of whole source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// What to cut out of the source image and how to orient it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropPlan {
    /// Source pixels under the crop rect.
    pub region: PixelRegion,
    /// Counter-clockwise quarter turns applied after cutting, in `0..4`.
    pub ccw_quarter_turns: u8,
    /// Mirror left-right after rotating.
    pub flip_horizontal: bool,
    /// Mirror top-bottom after rotating.
    pub flip_vertical: bool,
}

impl CropPlan {
    /// Plan the export of what is visible inside `crop_rect`.
    ///
    /// # Arguments
    ///
    /// * `transform` - The committed image transform
    /// * `view_frame` - The frame the image is laid out in; transforms pivot at its center
    /// * `image_size` - Native size of the source image in pixels
    /// * `crop_rect` - The crop rect in screen space
    ///
    /// # Errors
    ///
    /// Returns `ExportError::EmptyRegion` if the crop does not cover at least
    /// one whole source pixel.
    pub fn new(
        transform: &ImageTransform,
        view_frame: &Rect,
        image_size: Size,
        crop_rect: &Rect,
    ) -> Result<Self, ExportError> {
        if !view_frame.is_valid() || !image_size.is_positive() || !crop_rect.is_valid() {
            return Err(ExportError::EmptyRegion);
        }

        let image_rect = Rect::aspect_fit(image_size, view_frame);
        let unmapped = transform.unmap_rect(crop_rect, view_frame.center());
        let pixels_per_unit = image_size.width / image_rect.width();

        let to_pixels = |v: f64, origin: f64, extent: f64| {
            ((v - origin) * pixels_per_unit).round().clamp(0.0, extent)
        };
        let left = to_pixels(unmapped.left, image_rect.left, image_size.width);
        let right = to_pixels(unmapped.right, image_rect.left, image_size.width);
        let top = to_pixels(unmapped.top, image_rect.top, image_size.height);
        let bottom = to_pixels(unmapped.bottom, image_rect.top, image_size.height);

        if right - left < 1.0 || bottom - top < 1.0 {
            debug!("crop {crop_rect:?} maps outside the image ({unmapped:?})");
            return Err(ExportError::EmptyRegion);
        }

        Ok(Self {
            region: PixelRegion {
                x: left as u32,
                y: top as u32,
                width: (right - left) as u32,
                height: (bottom - top) as u32,
            },
            ccw_quarter_turns: transform.ccw_quarter_turns() as u8,
            flip_horizontal: transform.is_flipped_horizontally(),
            flip_vertical: transform.is_flipped_vertically(),
        })
    }

    /// Dimensions of the rendered crop.
    pub fn output_size(&self) -> (u32, u32) {
        if self.ccw_quarter_turns % 2 == 0 {
            (self.region.width, self.region.height)
        } else {
            (self.region.height, self.region.width)
        }
    }
}

/// Cut the planned region out of `image` and orient it.
///
/// # Errors
///
/// Returns `ExportError::RegionOutOfBounds` if the plan was made for a larger
/// image than the one given.
pub fn render_crop(image: &DynamicImage, plan: &CropPlan) -> Result<DynamicImage, ExportError> {
    let r = plan.region;
    let fits = r.x.checked_add(r.width).is_some_and(|right| right <= image.width())
        && r.y.checked_add(r.height).is_some_and(|bottom| bottom <= image.height());
    if !fits {
        return Err(ExportError::RegionOutOfBounds {
            region: r,
            width: image.width(),
            height: image.height(),
        });
    }

    let cropped = image.crop_imm(r.x, r.y, r.width, r.height);
    let rotated = match plan.ccw_quarter_turns % 4 {
        0 => cropped,
        1 => cropped.rotate270(),
        2 => cropped.rotate180(),
        _ => cropped.rotate90(),
    };

    let mut out = rotated;
    if plan.flip_horizontal {
        out = out.fliph();
    }
    if plan.flip_vertical {
        out = out.flipv();
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vector;
    use image::{Rgb, RgbImage};

    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    /// A 40x20 gray image with a red top-left pixel.
    fn marked_image() -> DynamicImage {
        let mut img = RgbImage::from_pixel(40, 20, Rgb([128, 128, 128]));
        img.put_pixel(0, 0, RED);
        DynamicImage::ImageRgb8(img)
    }

    fn square_view() -> Rect {
        Rect::new(0.0, 0.0, 400.0, 400.0)
    }

    #[test]
    fn test_identity_plan_covers_image() {
        let image_rect = Rect::new(0.0, 100.0, 400.0, 300.0);
        let plan = CropPlan::new(
            &ImageTransform::IDENTITY,
            &square_view(),
            Size::new(40.0, 20.0),
            &image_rect,
        )
        .unwrap();

        assert_eq!(
            plan.region,
            PixelRegion {
                x: 0,
                y: 0,
                width: 40,
                height: 20
            }
        );
        assert_eq!(plan.ccw_quarter_turns, 0);
        assert!(!plan.flip_horizontal && !plan.flip_vertical);
    }

    #[test]
    fn test_partial_crop_scales_to_pixels() {
        let crop = Rect::new(100.0, 100.0, 300.0, 200.0);
        let plan = CropPlan::new(
            &ImageTransform::IDENTITY,
            &square_view(),
            Size::new(40.0, 20.0),
            &crop,
        )
        .unwrap();
        assert_eq!(
            plan.region,
            PixelRegion {
                x: 10,
                y: 0,
                width: 20,
                height: 10
            }
        );
    }

    #[test]
    fn test_crop_clamped_to_image() {
        // Crop spans the whole view, including the letterbox bands.
        let plan = CropPlan::new(
            &ImageTransform::IDENTITY,
            &square_view(),
            Size::new(40.0, 20.0),
            &square_view(),
        )
        .unwrap();
        assert_eq!(plan.region.height, 20);
        assert_eq!(plan.region.y, 0);
    }

    #[test]
    fn test_crop_outside_image_is_empty() {
        let letterbox = Rect::new(0.0, 0.0, 400.0, 90.0);
        let result = CropPlan::new(
            &ImageTransform::IDENTITY,
            &square_view(),
            Size::new(40.0, 20.0),
            &letterbox,
        );
        assert!(matches!(result, Err(ExportError::EmptyRegion)));
    }

    #[test]
    fn test_zoomed_and_panned_plan() {
        let transform = ImageTransform {
            translation: Vector::new(50.0, 0.0),
            scale: Vector::new(2.0, 2.0),
            rotation_degrees: 0.0,
        };
        // Image is drawn at (-100, 0)-(700, 400); the view shows its middle half.
        let plan = CropPlan::new(&transform, &square_view(), Size::new(40.0, 20.0), &square_view())
            .unwrap();
        assert_eq!(
            plan.region,
            PixelRegion {
                x: 5,
                y: 0,
                width: 20,
                height: 20
            }
        );
    }

    #[test]
    fn test_rotated_plan_renders_counter_clockwise() {
        let transform = ImageTransform {
            rotation_degrees: -90.0,
            ..ImageTransform::IDENTITY
        };
        // A quarter turn draws the 400x200 image rect upright as 200x400.
        let drawn = Rect::new(100.0, 0.0, 300.0, 400.0);
        let plan = CropPlan::new(&transform, &square_view(), Size::new(40.0, 20.0), &drawn).unwrap();
        assert_eq!(plan.region.width, 40);
        assert_eq!(plan.region.height, 20);
        assert_eq!(plan.ccw_quarter_turns, 1);
        assert_eq!(plan.output_size(), (20, 40));

        let out = render_crop(&marked_image(), &plan).unwrap().into_rgb8();
        assert_eq!(out.dimensions(), (20, 40));
        // Top-left turns counter-clockwise into the bottom-left.
        assert_eq!(*out.get_pixel(0, 39), RED);
    }

    #[test]
    fn test_mirrored_plan_renders_flipped() {
        let transform = ImageTransform {
            scale: Vector::new(-1.0, 1.0),
            ..ImageTransform::IDENTITY
        };
        let drawn = Rect::new(0.0, 100.0, 400.0, 300.0);
        let plan = CropPlan::new(&transform, &square_view(), Size::new(40.0, 20.0), &drawn).unwrap();
        assert!(plan.flip_horizontal);

        let out = render_crop(&marked_image(), &plan).unwrap().into_rgb8();
        assert_eq!(*out.get_pixel(39, 0), RED);
    }

    #[test]
    fn test_render_rejects_oversized_region() {
        let plan = CropPlan {
            region: PixelRegion {
                x: 30,
                y: 0,
                width: 20,
                height: 10,
            },
            ccw_quarter_turns: 0,
            flip_horizontal: false,
            flip_vertical: false,
        };
        assert!(matches!(
            render_crop(&marked_image(), &plan),
            Err(ExportError::RegionOutOfBounds { .. })
        ));
    }
}
