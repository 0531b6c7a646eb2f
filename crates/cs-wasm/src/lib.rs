//! Browser bindings for the canvas shell.
//!
//! Compiled via `wasm-pack build --target web`. Drives a `cs_core::Shell`
//! from `requestAnimationFrame` and DOM input events.

mod console;
mod demo;
mod host;
mod js_app;
mod listeners;
mod raf;
mod surface;

pub use demo::{DemoHandle, start_demo};
pub use host::WebShell;
pub use js_app::{JsApplication, JsShell};
pub use surface::{Canvas2dSurface, CanvasBinding, CanvasSurface, WebGlSurface};

use cs_core::ShellError;
use wasm_bindgen::JsValue;

/// Wrap a thrown JS value as a shell error.
pub(crate) fn js_error(err: JsValue) -> ShellError {
    ShellError::Host(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// Throw into JS. Callers must have released every borrow first, since a
/// thrown exception skips Rust destructors.
pub(crate) fn throw_on_error(result: cs_core::Result<()>) {
    if let Err(err) = result {
        wasm_bindgen::throw_str(&err.to_string());
    }
}

/// Convert a shell error into a JS `Error` for returning across the bridge.
pub(crate) fn to_js(err: ShellError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
