//! Axis-aligned rectangles.

use super::{Anchor, Axis, Point, Size, Vector, MIN_EXTENT};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle stored by its edges.
///
/// Invariant: `right >= left` and `bottom >= top`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Padding around the content of a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Insets {
    pub const fn uniform(value: f64) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

impl Rect {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }

    /// A rectangle of `size` centered on `center`.
    pub fn from_center_size(center: Point, size: Size) -> Self {
        let half_w = size.width / 2.0;
        let half_h = size.height / 2.0;
        Self::new(
            center.x - half_w,
            center.y - half_h,
            center.x + half_w,
            center.y + half_h,
        )
    }

    /// The smallest rectangle containing every point.
    ///
    /// Returns `None` for an empty slice.
    pub fn bounding(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let init = Rect::new(first.x, first.y, first.x, first.y);
        Some(points[1..].iter().fold(init, |r, p| {
            Rect::new(r.left.min(p.x), r.top.min(p.y), r.right.max(p.x), r.bottom.max(p.y))
        }))
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Width over height.
    ///
    /// Rectangles never collapse by invariant; a zero height trips a debug
    /// assertion and is clamped to a tiny extent in release builds.
    pub fn aspect_ratio(&self) -> f64 {
        debug_assert!(self.height() > 0.0, "aspect ratio of zero-height rect");
        self.width() / self.height().max(MIN_EXTENT)
    }

    /// Whether both extents are strictly positive and every edge is finite.
    pub fn is_valid(&self) -> bool {
        self.size().is_positive()
            && [self.left, self.top, self.right, self.bottom]
                .iter()
                .all(|edge| edge.is_finite())
    }

    /// The position of one of the eight anchors.
    pub fn anchor_point(&self, anchor: Anchor) -> Point {
        let center = self.center();
        match anchor {
            Anchor::Left => Point::new(self.left, center.y),
            Anchor::Top => Point::new(center.x, self.top),
            Anchor::Right => Point::new(self.right, center.y),
            Anchor::Bottom => Point::new(center.x, self.bottom),
            Anchor::TopLeft => Point::new(self.left, self.top),
            Anchor::TopRight => Point::new(self.right, self.top),
            Anchor::BottomLeft => Point::new(self.left, self.bottom),
            Anchor::BottomRight => Point::new(self.right, self.bottom),
        }
    }

    /// The axis that limits how far this rectangle can be enlarged inside
    /// `working` without changing its aspect ratio.
    ///
    /// Zooming until the widths match: if the resulting height still fits,
    /// the horizontal axis leads, otherwise the vertical one does.
    pub fn leading_axis_to_fit(&self, working: &Rect) -> Axis {
        let horizontal_zoom_ratio = working.width() / self.width().max(MIN_EXTENT);

        if self.height() * horizontal_zoom_ratio < working.height() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    /// The largest rectangle with this aspect ratio that fits inside
    /// `working`, centered on it.
    ///
    /// The result spans the full extent of `working` along the leading axis.
    pub fn fit_to(&self, working: &Rect) -> Rect {
        let aspect_ratio = self.aspect_ratio();
        let center = working.center();

        match self.leading_axis_to_fit(working) {
            Axis::Horizontal => {
                let zoomed_height = working.width() / aspect_ratio;
                Rect::new(
                    working.left,
                    center.y - zoomed_height / 2.0,
                    working.right,
                    center.y + zoomed_height / 2.0,
                )
            }
            Axis::Vertical => {
                let zoomed_width = working.height() * aspect_ratio;
                Rect::new(
                    center.x - zoomed_width / 2.0,
                    working.top,
                    center.x + zoomed_width / 2.0,
                    working.bottom,
                )
            }
        }
    }

    /// Shift the edge(s) named by `anchor` by the matching components of
    /// `translation`.
    ///
    /// Each shift is clamped so the width and height never drop below
    /// `min_size`. A rectangle already smaller than `min_size` is never
    /// shrunk further, but is not forcibly grown either.
    pub fn moved(&self, anchor: Anchor, translation: Vector, min_size: Size) -> Rect {
        self.moved_clamped(anchor, translation, min_size, None)
    }

    /// Like [`Rect::moved`], additionally keeping the moved edges inside
    /// `bounds`. The minimum size wins when both constraints conflict.
    pub fn moved_within(
        &self,
        anchor: Anchor,
        translation: Vector,
        min_size: Size,
        bounds: &Rect,
    ) -> Rect {
        self.moved_clamped(anchor, translation, min_size, Some(bounds))
    }

    fn moved_clamped(
        &self,
        anchor: Anchor,
        translation: Vector,
        min_size: Size,
        bounds: Option<&Rect>,
    ) -> Rect {
        let mut out = *self;

        if anchor.moves_left() {
            let upper = (self.right - min_size.width).max(self.left);
            let lower = bounds.map_or(f64::NEG_INFINITY, |b| b.left.min(self.left));
            out.left = (self.left + translation.dx).max(lower).min(upper);
        }
        if anchor.moves_right() {
            let lower = (self.left + min_size.width).min(self.right);
            let upper = bounds.map_or(f64::INFINITY, |b| b.right.max(self.right));
            out.right = (self.right + translation.dx).min(upper).max(lower);
        }
        if anchor.moves_top() {
            let upper = (self.bottom - min_size.height).max(self.top);
            let lower = bounds.map_or(f64::NEG_INFINITY, |b| b.top.min(self.top));
            out.top = (self.top + translation.dy).max(lower).min(upper);
        }
        if anchor.moves_bottom() {
            let lower = (self.top + min_size.height).min(self.bottom);
            let upper = bounds.map_or(f64::INFINITY, |b| b.bottom.max(self.bottom));
            out.bottom = (self.bottom + translation.dy).min(upper).max(lower);
        }

        out
    }

    /// Exchange width and height, keeping the origin (landscape <> portrait).
    pub fn swap_axis(&self) -> Rect {
        Rect::from_origin_size(self.origin(), self.size().rotated_90_degrees(1))
    }

    pub fn translated(&self, v: Vector) -> Rect {
        Rect::new(
            self.left + v.dx,
            self.top + v.dy,
            self.right + v.dx,
            self.bottom + v.dy,
        )
    }

    /// Shrink by the given padding.
    pub fn inset(&self, insets: Insets) -> Rect {
        Rect::new(
            self.left + insets.left,
            self.top + insets.top,
            self.right - insets.right,
            self.bottom - insets.bottom,
        )
    }

    /// The overlapping region, if any.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let r = Rect::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        );
        (r.right > r.left && r.bottom > r.top).then_some(r)
    }

    /// Whether `other` lies entirely inside this rectangle, with `epsilon`
    /// tolerance on every edge.
    pub fn contains_rect(&self, other: &Rect, epsilon: f64) -> bool {
        other.left >= self.left - epsilon
            && other.top >= self.top - epsilon
            && other.right <= self.right + epsilon
            && other.bottom <= self.bottom + epsilon
    }

    /// Place `size` aspect-fitted and centered inside `frame`.
    pub fn aspect_fit(size: Size, frame: &Rect) -> Rect {
        let scale = (frame.width() / size.width.max(MIN_EXTENT))
            .min(frame.height() / size.height.max(MIN_EXTENT));
        Rect::from_center_size(frame.center(), size.scaled(scale))
    }

    /// Corner points in clockwise order starting at the top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right, self.top),
            Point::new(self.right, self.bottom),
            Point::new(self.left, self.bottom),
        ]
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
