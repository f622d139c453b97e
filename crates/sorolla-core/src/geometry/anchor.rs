//! Named reference points on a rectangle.

use serde::{Deserialize, Serialize};

/// One of the eight reference points of a rectangle: four edge midpoints and
/// four corners.
///
/// Anchors serve two purposes: they are the drag handles of the crop overlay,
/// and they are the pivots used when the image is rescaled after a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    // Edges
    Left,
    Top,
    Right,
    Bottom,

    // Corners
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Anchor {
    /// Every anchor in hit-test priority order: edges before corners.
    pub const ALL: [Anchor; 8] = [
        Anchor::Left,
        Anchor::Top,
        Anchor::Right,
        Anchor::Bottom,
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomRight,
    ];

    /// The anchor on the other side of the rectangle.
    pub fn opposite(self) -> Anchor {
        match self {
            Anchor::Left => Anchor::Right,
            Anchor::Top => Anchor::Bottom,
            Anchor::Right => Anchor::Left,
            Anchor::Bottom => Anchor::Top,
            Anchor::TopLeft => Anchor::BottomRight,
            Anchor::TopRight => Anchor::BottomLeft,
            Anchor::BottomLeft => Anchor::TopRight,
            Anchor::BottomRight => Anchor::TopLeft,
        }
    }

    /// Whether the anchor is one of the four corners.
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Anchor::TopLeft | Anchor::TopRight | Anchor::BottomLeft | Anchor::BottomRight
        )
    }

    /// Whether dragging this anchor moves the left edge.
    pub(crate) fn moves_left(self) -> bool {
        matches!(self, Anchor::Left | Anchor::TopLeft | Anchor::BottomLeft)
    }

    /// Whether dragging this anchor moves the right edge.
    pub(crate) fn moves_right(self) -> bool {
        matches!(self, Anchor::Right | Anchor::TopRight | Anchor::BottomRight)
    }

    /// Whether dragging this anchor moves the top edge.
    pub(crate) fn moves_top(self) -> bool {
        matches!(self, Anchor::Top | Anchor::TopLeft | Anchor::TopRight)
    }

    /// Whether dragging this anchor moves the bottom edge.
    pub(crate) fn moves_bottom(self) -> bool {
        matches!(self, Anchor::Bottom | Anchor::BottomLeft | Anchor::BottomRight)
    }
}
