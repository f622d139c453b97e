//! Sorolla Core - crop and transform engine
//!
//! This crate provides the geometry behind Sorolla's image cropping widget:
//! a crop rectangle driven by pointer gestures, the image transform that
//! follows it, the animations between states, and the export of the final
//! crop.

pub mod animation;
pub mod config;
pub mod editor;
pub mod export;
pub mod geometry;
pub mod interpolate;
pub mod overlay;
pub mod transform;

pub use animation::{AnimationDriver, FrameScheduler, ManualScheduler};
pub use config::{ConfigError, EditorConfig};
pub use editor::{CropEditor, Mode, RenderState};
pub use export::{export_jpeg, render_crop, CropPlan, ExportError};
pub use geometry::{Anchor, Axis, Insets, Point, Rect, Size, Vector};
pub use overlay::{CropOverlay, OverlayEvent};
pub use transform::{ImageTransform, TransformEngine};
