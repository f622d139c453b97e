//! Transform engine: owns the image transform and animates changes to it.

use super::ImageTransform;
use crate::animation::{AnimationDriver, Frame};
use crate::config::EditorConfig;
use crate::geometry::{Anchor, Axis, Point, Rect, Size, Vector};
use log::debug;
use std::time::Duration;

/// Where the image is laid out before any transform is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ImageFrame {
    /// The view frame the image is aspect-fitted into; transforms pivot at its center.
    view: Rect,
    /// Native image size in pixels.
    image_size: Size,
}

/// Owns the cumulative [`ImageTransform`] and its animation.
///
/// Every operation composes onto the committed transform. Animated operations
/// commit the new value immediately and animate the displayed value from the
/// previous committed one.
#[derive(Debug, Clone)]
pub struct TransformEngine {
    frame: Option<ImageFrame>,
    transform: ImageTransform,
    animation: AnimationDriver<ImageTransform>,
    transform_duration: Duration,
    bounds_duration: Duration,
    reset_duration: Duration,
}

impl TransformEngine {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            frame: None,
            transform: ImageTransform::IDENTITY,
            animation: AnimationDriver::new(),
            transform_duration: config.transform_animation(),
            bounds_duration: config.bounds_animation(),
            reset_duration: config.reset_animation(),
        }
    }

    /// Lay out a newly loaded image and reset the transform to identity.
    pub fn set_frame(&mut self, view: Rect, image_size: Size) {
        if !view.is_valid() || !image_size.is_positive() {
            debug!("ignoring degenerate image frame {view:?} / {image_size:?}");
            return;
        }
        self.frame = Some(ImageFrame { view, image_size });
        self.transform = ImageTransform::IDENTITY;
        self.animation.cancel();
    }

    pub fn clear(&mut self) {
        self.frame = None;
        self.transform = ImageTransform::IDENTITY;
        self.animation.cancel();
    }

    /// The committed transform.
    pub fn transform(&self) -> ImageTransform {
        self.transform
    }

    /// The transform to draw: the animated one while animating.
    pub fn displayed(&self) -> ImageTransform {
        self.animation.current().copied().unwrap_or(self.transform)
    }

    pub fn view_frame(&self) -> Option<Rect> {
        self.frame.map(|f| f.view)
    }

    pub fn image_size(&self) -> Option<Size> {
        self.frame.map(|f| f.image_size)
    }

    /// Center of the view frame, the pivot of every transform.
    pub fn view_center(&self) -> Option<Point> {
        self.frame.map(|f| f.view.center())
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    /// The visible extent of the image inside the view frame.
    ///
    /// The largest rect of the image's aspect ratio, swapped for quarter and
    /// three-quarter turns, centered in the view frame.
    pub fn content_clipping_rect(&self) -> Option<Rect> {
        let frame = self.frame?;
        let size = frame
            .image_size
            .rotated_90_degrees(self.transform.quarter_turns());
        Some(Rect::aspect_fit(size, &frame.view))
    }

    /// Where the image is drawn under the committed transform.
    pub fn image_extent(&self) -> Option<Rect> {
        let frame = self.frame?;
        let untransformed = Rect::aspect_fit(frame.image_size, &frame.view);
        Some(self.transform.map_rect(&untransformed, frame.view.center()))
    }

    /// Pan the image by a screen-space delta, immediately.
    ///
    /// The delta is divided by the current scale so the image follows the
    /// pointer at any zoom level.
    pub fn move_by(&mut self, translation: Vector) -> bool {
        if self.frame.is_none() {
            return false;
        }
        let mut next = self.transform;
        next.translation += next.to_local(translation);
        self.commit(next, None);
        true
    }

    /// Pull the image back so it covers `bounds`.
    ///
    /// On each axis where the image leaves part of `bounds` uncovered, the
    /// image is shifted just enough to cover it; an image narrower than
    /// `bounds` on an axis is centered on it instead. Returns whether a
    /// correction was needed.
    pub fn move_within_bounds(&mut self, bounds: Rect) -> bool {
        let Some(extent) = self.image_extent() else {
            return false;
        };

        let correction = Vector::new(
            axis_correction(extent.left, extent.right, bounds.left, bounds.right),
            axis_correction(extent.top, extent.bottom, bounds.top, bounds.bottom),
        );
        if correction == Vector::ZERO {
            return false;
        }
        debug!("moving image back inside crop by {correction:?}");

        let mut next = self.transform;
        next.translation += next.to_local(correction);
        self.commit(next, Some(self.bounds_duration));
        true
    }

    /// Zoom the image by `scale` so that the point at `anchor` of `from_rect`
    /// lands on the point at `anchor` of `to_rect`.
    ///
    /// Scaling pivots at the view center, so the translation compensates for
    /// the anchor's offset from it: `(to - c) - (from - c) * scale`.
    pub fn refit(&mut self, scale: f64, anchor: Anchor, from_rect: Rect, to_rect: Rect) -> bool {
        let Some(center) = self.view_center() else {
            return false;
        };
        let from_vector = from_rect.anchor_point(anchor) - center;
        let to_vector = to_rect.anchor_point(anchor) - center;
        let translation = to_vector - from_vector * scale;

        let mut next = self.transform;
        next.scale = next.scale * scale;
        next.translation += next.to_local(translation);
        debug!("refit x{scale:.3} around {anchor:?}");

        self.commit(next, Some(self.transform_duration));
        true
    }

    /// Mirror the image across `axis` through the center of `rect`.
    pub fn mirror(&mut self, axis: Axis, rect: Rect) -> bool {
        let Some(clip) = self.content_clipping_rect() else {
            return false;
        };
        let offset = (rect.center() - clip.center()).projected(axis) * 2.0;

        let mut next = self.transform;
        next.scale = next.scale * Vector::mirror(axis);
        next.translation += next.to_local(offset);
        debug!("mirror {axis:?} through {:?}", rect.center());

        self.commit(next, None);
        true
    }

    /// Turn the image a quarter counter-clockwise, zooming by `scale`, so the
    /// center of `rect` lands on the center of `to_rect`.
    ///
    /// After an odd number of mirrors a rotation in the image's frame turns
    /// the other way on screen, hence the sign correction.
    pub fn rotate_90_ccw(&mut self, scale: f64, rect: Rect, to_rect: Rect) -> bool {
        let Some(center) = self.view_center() else {
            return false;
        };
        let sign = self.transform.scale.sign();
        let turned = (rect.center() - center).rotate(-90.0) * scale;
        let translation = (to_rect.center() - center) - turned;

        let mut next = self.transform;
        next.rotation_degrees -= 90.0 * sign;
        next.scale = next.scale * scale;
        next.translation += next.to_local(translation);
        debug!("rotate ccw to {}°", next.rotation_degrees);

        self.commit(next, Some(self.transform_duration));
        true
    }

    /// Drop every transform.
    pub fn reset(&mut self, animated: bool) {
        let duration = animated.then_some(self.reset_duration);
        self.commit(ImageTransform::IDENTITY, duration);
    }

    /// Advance the transform animation.
    pub fn tick(&mut self, now: Duration) -> Option<Frame<ImageTransform>> {
        self.animation.tick(now)
    }

    pub fn cancel_animation(&mut self) -> bool {
        self.animation.cancel()
    }

    fn commit(&mut self, next: ImageTransform, duration: Option<Duration>) {
        let previous = std::mem::replace(&mut self.transform, next);
        match duration {
            Some(duration) => self.animation.start(previous, next, duration),
            None => {
                self.animation.cancel();
            }
        }
    }
}

/// Screen shift along one axis that makes `[min, max]` cover `[lo, hi]`.
fn axis_correction(min: f64, max: f64, lo: f64, hi: f64) -> f64 {
    if max - min < hi - lo {
        (lo + hi) / 2.0 - (min + max) / 2.0
    } else if min > lo {
        lo - min
    } else if max < hi {
        hi - max
    } else {
        0.0
    }
}
