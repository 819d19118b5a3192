//! Browser viewport size.

use platform_host::{ViewportService, ViewportSize};

#[derive(Debug, Clone, Copy, Default)]
/// Reads `window.innerWidth`/`innerHeight`, falling back to [`ViewportSize::default`].
pub struct WebViewport;

impl ViewportService for WebViewport {
    fn viewport(&self) -> ViewportSize {
        #[cfg(target_arch = "wasm32")]
        {
            let read = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
                value.ok().and_then(|v| v.as_f64()).map(|v| v as i32)
            };
            let Some(window) = web_sys::window() else {
                return ViewportSize::default();
            };
            match (read(window.inner_width()), read(window.inner_height())) {
                (Some(width), Some(height)) => ViewportSize::new(width, height),
                _ => ViewportSize::default(),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            ViewportSize::default()
        }
    }
}
