//! Per-frame render state for JavaScript.

use sorolla_core::RenderState;
use wasm_bindgen::prelude::*;

/// What to draw for one frame.
///
/// Draw the image into the image rect through `matrix`, then the crop
/// overlay at the crop rect.
#[wasm_bindgen]
pub struct JsRenderState {
    inner: RenderState,
}

#[wasm_bindgen]
impl JsRenderState {
    #[wasm_bindgen(getter)]
    pub fn crop_left(&self) -> f64 {
        self.inner.crop_rect.left
    }

    #[wasm_bindgen(getter)]
    pub fn crop_top(&self) -> f64 {
        self.inner.crop_rect.top
    }

    #[wasm_bindgen(getter)]
    pub fn crop_right(&self) -> f64 {
        self.inner.crop_rect.right
    }

    #[wasm_bindgen(getter)]
    pub fn crop_bottom(&self) -> f64 {
        self.inner.crop_rect.bottom
    }

    #[wasm_bindgen(getter)]
    pub fn image_left(&self) -> f64 {
        self.inner.image_rect.left
    }

    #[wasm_bindgen(getter)]
    pub fn image_top(&self) -> f64 {
        self.inner.image_rect.top
    }

    #[wasm_bindgen(getter)]
    pub fn image_width(&self) -> f64 {
        self.inner.image_rect.width()
    }

    #[wasm_bindgen(getter)]
    pub fn image_height(&self) -> f64 {
        self.inner.image_rect.height()
    }

    #[wasm_bindgen(getter)]
    pub fn rotation_degrees(&self) -> f64 {
        self.inner.transform.rotation_degrees
    }

    #[wasm_bindgen(getter)]
    pub fn scale_x(&self) -> f64 {
        self.inner.transform.scale.dx
    }

    #[wasm_bindgen(getter)]
    pub fn scale_y(&self) -> f64 {
        self.inner.transform.scale.dy
    }

    /// The image transform as `[a, b, c, d, tx, ty]`, suitable for
    /// `CanvasRenderingContext2D.setTransform`.
    pub fn matrix(&self) -> Vec<f64> {
        self.inner.matrix.to_array().to_vec()
    }

    /// The whole state as a plain object.
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl From<RenderState> for JsRenderState {
    fn from(inner: RenderState) -> Self {
        Self { inner }
    }
}
