//! Crop rectangle state machine.
//!
//! [`CropOverlay`] owns the crop rectangle and the working rectangle it must
//! stay inside. Pointer gestures either resize the crop by one of its anchors
//! or pan the image underneath it; the overlay reports what happened as
//! [`OverlayEvent`]s for the transform engine to consume.
//!
//! # States
//!
//! ```text
//!            drag_start (anchor hit)            drag_end
//!   Idle ──────────────────────────> Anchor ──────────────> Idle (+ Scale, fit animation)
//!     │      drag_start (center hit)            drag_end
//!     └────────────────────────────> Move ────────────────> Idle (+ MoveFinished)
//! ```

use crate::animation::{AnimationDriver, Frame};
use crate::config::EditorConfig;
use crate::geometry::{Anchor, Point, Rect, Size, Vector};
use log::debug;
use std::time::Duration;

/// The active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Resizing the crop by dragging an anchor.
    Anchor(Anchor),
    /// Panning the image under the crop.
    Move,
}

/// Parameters for re-fitting the image after the crop was resized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleEvent {
    /// Uniform zoom factor from `from_rect` to `to_rect`.
    pub scale: f64,
    /// Pivot that stays fixed on the image (opposite of the dragged anchor).
    pub anchor: Anchor,
    pub from_rect: Rect,
    pub to_rect: Rect,
}

/// What a gesture asks of the image transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayEvent {
    /// Zoom the image so `from_rect` lands on `to_rect`.
    Scale(ScaleEvent),
    /// Pan the image by a screen-space delta.
    Move(Vector),
    /// A pan ended; the image should be pulled back to cover this crop.
    MoveFinished(Rect),
}

/// Outcome of a counter-clockwise quarter turn of the crop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateResult {
    pub scale: f64,
    pub from_rect: Rect,
    pub to_rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    working: Rect,
    original: Rect,
    /// How far anchor drags may reach: the image's visible area.
    limit: Rect,
}

/// Crop rectangle, working bounds, gesture state and the crop animation.
#[derive(Debug, Clone)]
pub struct CropOverlay {
    anchor_radius: f64,
    move_radius: f64,
    min_size: Size,
    duration: Duration,
    reset_duration: Duration,
    bounds: Option<Bounds>,
    crop_rect: Option<Rect>,
    drag: DragState,
    animation: AnimationDriver<Rect>,
}

impl CropOverlay {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            anchor_radius: config.anchor_radius(),
            move_radius: config.move_radius(),
            min_size: config.min_crop_size(),
            duration: config.crop_animation(),
            reset_duration: config.reset_animation(),
            bounds: None,
            crop_rect: None,
            drag: DragState::Idle,
            animation: AnimationDriver::new(),
        }
    }

    /// Establish the working area and the image rect for a freshly loaded image.
    ///
    /// The crop starts out covering `image_rect`, which is also what
    /// [`CropOverlay::reset_overlay`] returns to and where anchor drags stop
    /// until [`CropOverlay::set_drag_limit`] says otherwise.
    pub fn set_bounds(&mut self, working: Rect, image_rect: Rect) {
        if !working.is_valid() || !image_rect.is_valid() {
            debug!("ignoring degenerate overlay bounds {working:?} / {image_rect:?}");
            return;
        }
        self.bounds = Some(Bounds {
            working,
            original: image_rect,
            limit: image_rect.intersection(&working).unwrap_or(working),
        });
        self.crop_rect = Some(image_rect);
        self.drag = DragState::Idle;
        self.animation.cancel();
    }

    /// Where the image is drawn now, so anchor drags never leave it.
    ///
    /// The limit never extends past the working rect. An extent that misses
    /// the working rect entirely is ignored.
    pub fn set_drag_limit(&mut self, image_extent: Rect) {
        let Some(bounds) = self.bounds.as_mut() else {
            return;
        };
        match image_extent.intersection(&bounds.working) {
            Some(limit) => bounds.limit = limit,
            None => debug!("image extent {image_extent:?} is off screen"),
        }
    }

    /// Forget the current image.
    pub fn clear(&mut self) {
        self.bounds = None;
        self.crop_rect = None;
        self.drag = DragState::Idle;
        self.animation.cancel();
    }

    pub fn working_rect(&self) -> Option<Rect> {
        self.bounds.map(|b| b.working)
    }

    pub fn original_rect(&self) -> Option<Rect> {
        self.bounds.map(|b| b.original)
    }

    pub fn drag_limit(&self) -> Option<Rect> {
        self.bounds.map(|b| b.limit)
    }

    /// The committed crop rect.
    pub fn crop_rect(&self) -> Option<Rect> {
        self.crop_rect
    }

    /// The rect to draw: the animated one while animating, else the crop rect.
    pub fn displayed_rect(&self) -> Option<Rect> {
        self.animation.current().copied().or(self.crop_rect)
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    /// Which anchor, if any, is under `point`. Edges win over corners.
    pub fn hit_anchor(&self, point: Point) -> Option<Anchor> {
        let crop = self.crop_rect?;
        Anchor::ALL
            .into_iter()
            .find(|&anchor| point.is_inside(crop.anchor_point(anchor), self.anchor_radius))
    }

    /// Whether `point` is close enough to the crop center to pan.
    pub fn hit_move(&self, point: Point) -> bool {
        self.crop_rect
            .is_some_and(|crop| point.is_inside(crop.center(), self.move_radius))
    }

    /// Begin a gesture at `point`. Returns whether the gesture is claimed.
    ///
    /// Any running crop animation is cancelled first so the gesture is the
    /// only writer of the crop rect.
    pub fn on_drag_start(&mut self, point: Point) -> bool {
        if self.crop_rect.is_none() {
            return false;
        }
        if self.animation.cancel() {
            debug!("crop animation interrupted by drag");
        }

        self.drag = if let Some(anchor) = self.hit_anchor(point) {
            DragState::Anchor(anchor)
        } else if self.hit_move(point) {
            DragState::Move
        } else {
            DragState::Idle
        };
        debug!("drag start at {point:?}: {:?}", self.drag);

        self.drag != DragState::Idle
    }

    /// Continue the gesture by `delta`.
    ///
    /// Anchor drags resize the crop in place without leaving the drag limit;
    /// move drags leave the crop alone and emit [`OverlayEvent::Move`].
    pub fn on_drag_move(&mut self, delta: Vector) -> Option<OverlayEvent> {
        let bounds = self.bounds?;
        let crop = self.crop_rect?;

        match self.drag {
            DragState::Idle => None,
            DragState::Anchor(anchor) => {
                self.crop_rect =
                    Some(crop.moved_within(anchor, delta, self.min_size, &bounds.limit));
                None
            }
            DragState::Move => Some(OverlayEvent::Move(delta)),
        }
    }

    /// Finish the gesture.
    ///
    /// After an anchor drag the crop snaps to the largest rect of the same
    /// aspect ratio inside the working area. The crop rect is committed to
    /// that target immediately while the displayed rect animates towards it.
    pub fn on_drag_end(&mut self) -> Option<OverlayEvent> {
        let drag = std::mem::take(&mut self.drag);
        let bounds = self.bounds?;
        let crop = self.crop_rect?;

        match drag {
            DragState::Idle => None,
            DragState::Anchor(anchor) => {
                let target = crop.fit_to(&bounds.working);
                let scale = (target.width() / crop.width()).min(target.height() / crop.height());
                debug!("drag end on {anchor:?}: fit {crop:?} -> {target:?} (x{scale:.3})");

                self.animate(crop, target, self.duration);
                Some(OverlayEvent::Scale(ScaleEvent {
                    scale,
                    anchor: anchor.opposite(),
                    from_rect: crop,
                    to_rect: target,
                }))
            }
            DragState::Move => Some(OverlayEvent::MoveFinished(crop)),
        }
    }

    /// Turn the crop a quarter counter-clockwise and re-fit it.
    pub fn rotate_90_ccw(&mut self) -> Option<RotateResult> {
        let bounds = self.bounds?;
        let crop = self.crop_rect?;

        let target = crop.swap_axis().fit_to(&bounds.working);
        self.animate(crop, target, self.duration);

        Some(RotateResult {
            scale: target.width() / crop.height(),
            from_rect: crop,
            to_rect: target,
        })
    }

    /// Animate the crop back to the rect captured when the image was loaded.
    pub fn reset_overlay(&mut self) -> bool {
        let (Some(bounds), Some(crop)) = (self.bounds, self.crop_rect) else {
            return false;
        };
        self.drag = DragState::Idle;
        self.animate(crop, bounds.original, self.reset_duration);
        true
    }

    /// Advance the crop animation.
    pub fn tick(&mut self, now: Duration) -> Option<Frame<Rect>> {
        self.animation.tick(now)
    }

    pub fn cancel_animation(&mut self) -> bool {
        self.animation.cancel()
    }

    fn animate(&mut self, from: Rect, to: Rect, duration: Duration) {
        self.crop_rect = Some(to);
        self.animation.start(from, to, duration);
    }
}
