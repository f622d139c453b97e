//! Sorolla WASM - WebAssembly bindings for the Sorolla crop editor
//!
//! This crate exposes the sorolla-core crop editor to JavaScript/TypeScript.
//! The host forwards pointer events and drives animation frames from
//! `requestAnimationFrame` while `needs_frame()` is true.
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropEditor } from '@sorolla/wasm';
//!
//! await init();
//!
//! const editor = new JsCropEditor({ min_crop_edge: 32 });
//! editor.layout_image(0, 0, canvas.width, canvas.height, 16, img.width, img.height);
//! editor.set_mode('transform');
//!
//! const frame = (now: number) => {
//!   const state = editor.tick(now);
//!   if (state) draw(state);
//!   if (editor.needs_frame()) requestAnimationFrame(frame);
//! };
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod logger;
mod render;

pub use editor::JsCropEditor;
pub use render::JsRenderState;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Info);
}

/// Enable debug logging of gestures and transforms to the console.
#[wasm_bindgen]
pub fn set_debug_logging(enabled: bool) {
    let level = if enabled {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    log::set_max_level(level);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
