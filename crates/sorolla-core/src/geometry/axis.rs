//! Horizontal and vertical axes.

use serde::{Deserialize, Serialize};

/// A screen axis, used for mirroring and for the "leading axis" of a fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}
