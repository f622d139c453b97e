//! Crop editor WASM bindings.
//!
//! JavaScript owns the frame loop, so the editor runs over a
//! [`ManualScheduler`] and the host polls [`JsCropEditor::needs_frame`]
//! after each call to decide whether to keep requesting animation frames.
//!
//! # Example
//!
//! ```typescript
//! canvas.onpointerdown = (e) => editor.drag_start(e.offsetX, e.offsetY);
//! canvas.onpointermove = (e) => editor.drag_move(e.movementX, e.movementY);
//! canvas.onpointerup = () => editor.drag_end();
//!
//! const jpeg = editor.export_jpeg(originalBytes, 90);
//! ```

use crate::render::JsRenderState;
use sorolla_core::{
    export_jpeg, Axis, ConfigError, CropEditor, EditorConfig, Insets, ManualScheduler, Mode,
    Point, Rect, Size, Vector,
};
use std::time::Duration;
use wasm_bindgen::prelude::*;

/// Crop editor wrapper for JavaScript
#[wasm_bindgen]
pub struct JsCropEditor {
    inner: CropEditor<ManualScheduler>,
}

#[wasm_bindgen]
impl JsCropEditor {
    /// Create an editor from a partial configuration object.
    ///
    /// `null` or `undefined` selects the defaults; missing fields take their
    /// default values.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsCropEditor, JsValue> {
        let config: EditorConfig = if config.is_null() || config.is_undefined() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        Self::with_config(config).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Lay out a loaded image in the view. Returns `false` for degenerate sizes.
    #[allow(clippy::too_many_arguments)]
    pub fn layout_image(
        &mut self,
        view_x: f64,
        view_y: f64,
        view_width: f64,
        view_height: f64,
        padding: f64,
        image_width: f64,
        image_height: f64,
    ) -> bool {
        let view = Rect::from_origin_size(
            Point::new(view_x, view_y),
            Size::new(view_width, view_height),
        );
        self.inner.layout_image(
            view,
            Insets::uniform(padding),
            Size::new(image_width, image_height),
        )
    }

    /// Switch panels: `"none"`, `"transform"` or `"settings"`.
    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = parse_mode(mode)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown mode: {mode}")))?;
        self.inner.set_mode(mode);
        Ok(())
    }

    /// Begin a pointer gesture. Returns whether the editor claims it.
    pub fn drag_start(&mut self, x: f64, y: f64) -> bool {
        self.inner.on_drag_start(Point::new(x, y))
    }

    pub fn drag_move(&mut self, dx: f64, dy: f64) {
        self.inner.on_drag_move(Vector::new(dx, dy));
    }

    pub fn drag_end(&mut self) {
        self.inner.on_drag_end();
    }

    /// Rotate crop and image a quarter turn counter-clockwise.
    pub fn rotate_ccw(&mut self) -> bool {
        self.inner.rotate_90_ccw()
    }

    pub fn mirror_horizontally(&mut self) -> bool {
        self.inner.mirror(Axis::Horizontal)
    }

    pub fn mirror_vertically(&mut self) -> bool {
        self.inner.mirror(Axis::Vertical)
    }

    /// Animate back to the untransformed image with a full crop.
    pub fn cancel_transform(&mut self) -> bool {
        self.inner.cancel_transform()
    }

    /// Advance animations to `now_ms` (a `requestAnimationFrame` timestamp).
    ///
    /// Returns `undefined` until an image is laid out.
    pub fn tick(&mut self, now_ms: f64) -> Option<JsRenderState> {
        self.inner.tick(timestamp(now_ms)).map(JsRenderState::from)
    }

    /// Whether animation frames are still needed.
    pub fn needs_frame(&self) -> bool {
        self.inner.scheduler().is_active()
    }

    /// Crop `bytes` (the original JPEG or PNG) as currently shown and encode as JPEG.
    pub fn export_jpeg(&self, bytes: &[u8], quality: u8) -> Result<Vec<u8>, JsValue> {
        let plan = self
            .inner
            .export_plan()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        export_jpeg(bytes, &plan, quality).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsCropEditor {
    pub(crate) fn with_config(config: EditorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: CropEditor::new(config, ManualScheduler::new())?,
        })
    }
}

fn parse_mode(mode: &str) -> Option<Mode> {
    match mode {
        "none" => Some(Mode::None),
        "transform" => Some(Mode::Transform),
        "settings" => Some(Mode::Settings),
        _ => None,
    }
}

/// Milliseconds to a `Duration`; garbage timestamps read as zero.
fn timestamp(now_ms: f64) -> Duration {
    Duration::try_from_secs_f64(now_ms / 1000.0).unwrap_or_default()
}
