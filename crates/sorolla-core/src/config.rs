//! Editor configuration.
//!
//! All lengths are in density-independent screen units and all durations in
//! milliseconds. Every field has a default, so hosts may supply a partial
//! configuration.

use crate::geometry::Size;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors raised by [`EditorConfig::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A length that must be strictly positive is zero, negative or not finite.
    #[error("Invalid {field}: {value} (must be a positive, finite length)")]
    InvalidLength { field: &'static str, value: f64 },
}

/// Tunables for hit-testing, crop constraints and animation timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Side of the square touch area around each crop anchor.
    pub anchor_touch_area: f64,
    /// Side of the square touch area around the crop center that pans the image.
    pub move_touch_area: f64,
    /// Minimum crop edge length while dragging an anchor.
    pub min_crop_edge: f64,
    /// Duration of the crop rect "snap to fit" and rotate animations.
    pub crop_animation_ms: u64,
    /// Duration of refit and rotate transform animations.
    pub transform_animation_ms: u64,
    /// Duration of the animation that pulls the image back inside the crop.
    pub bounds_animation_ms: u64,
    /// Duration of the cancel/reset animations.
    pub reset_animation_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            anchor_touch_area: 48.0,
            move_touch_area: 128.0,
            min_crop_edge: 25.0,
            crop_animation_ms: 500,
            transform_animation_ms: 500,
            bounds_animation_ms: 200,
            reset_animation_ms: 500,
        }
    }
}

impl EditorConfig {
    /// Check that every length is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("anchor_touch_area", self.anchor_touch_area),
            ("move_touch_area", self.move_touch_area),
            ("min_crop_edge", self.min_crop_edge),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidLength { field, value });
            }
        }
        Ok(())
    }

    /// Hit-test radius around anchors (half the touch area).
    pub fn anchor_radius(&self) -> f64 {
        self.anchor_touch_area / 2.0
    }

    /// Hit-test radius around the crop center (half the touch area).
    pub fn move_radius(&self) -> f64 {
        self.move_touch_area / 2.0
    }

    pub fn min_crop_size(&self) -> Size {
        Size::new(self.min_crop_edge, self.min_crop_edge)
    }

    pub fn crop_animation(&self) -> Duration {
        Duration::from_millis(self.crop_animation_ms)
    }

    pub fn transform_animation(&self) -> Duration {
        Duration::from_millis(self.transform_animation_ms)
    }

    pub fn bounds_animation(&self) -> Duration {
        Duration::from_millis(self.bounds_animation_ms)
    }

    pub fn reset_animation(&self) -> Duration {
        Duration::from_millis(self.reset_animation_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EditorConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.anchor_radius(), 24.0);
        assert_eq!(config.move_radius(), 64.0);
        assert_eq!(config.min_crop_size(), Size::new(25.0, 25.0));
        assert_eq!(config.crop_animation(), Duration::from_millis(500));
        assert_eq!(config.bounds_animation(), Duration::from_millis(200));
    }

    #[test]
    fn test_rejects_non_positive_lengths() {
        let mut config = EditorConfig::default();
        config.min_crop_edge = 0.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidLength {
                field: "min_crop_edge",
                value: 0.0
            })
        );

        let mut config = EditorConfig::default();
        config.anchor_touch_area = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_error_message() {
        let err = ConfigError::InvalidLength {
            field: "move_touch_area",
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid move_touch_area: -1 (must be a positive, finite length)"
        );
    }
}
