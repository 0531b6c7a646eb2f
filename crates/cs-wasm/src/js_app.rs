//! An `Application` whose hooks are plain JS functions.
//!
//! ```js
//! const shell = new JsShell(canvas, {
//!   update(elapsed, interval) { ... },
//!   render() { ... },
//!   onKeyDown(json) { const ev = JSON.parse(json); ... },
//! }, '{"reportPointerMove": false}');
//! shell.start();
//! ```
//!
//! Events are handed to JS as JSON strings. A hook missing from the object
//! fails with `UnimplementedHook`, like an unoverridden Rust hook.

use crate::console;
use crate::host::WebShell;
use crate::surface::CanvasSurface;
use crate::{js_error, to_js};
use cs_core::{Application, FrameLoop, KeyEvent, PointerEvent, Result, ShellConfig, ShellError};
use js_sys::{Array, Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

pub struct JsApplication {
    hooks: Object,
}

impl JsApplication {
    pub fn new(hooks: Object) -> Self {
        Self { hooks }
    }

    fn call(&self, name: &'static str, args: &Array) -> Result<()> {
        let hook = Reflect::get(&self.hooks, &JsValue::from_str(name))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
            .ok_or_else(|| ShellError::unimplemented(name))?;
        hook.apply(&self.hooks, args).map(|_| ()).map_err(js_error)
    }

    fn dispatch<E: Serialize>(&self, name: &'static str, event: &E) -> Result<()> {
        let json = serde_json::to_string(event).map_err(|e| ShellError::Host(e.to_string()))?;
        self.call(name, &Array::of1(&JsValue::from_str(&json)))
    }
}

impl Application for JsApplication {
    fn update(&mut self, _frame_loop: &mut FrameLoop, elapsed: f64, interval: f64) -> Result<()> {
        let args = Array::of2(&JsValue::from_f64(elapsed), &JsValue::from_f64(interval));
        self.call("update", &args)
    }

    fn render(&mut self, _frame_loop: &mut FrameLoop) -> Result<()> {
        self.call("render", &Array::new())
    }

    fn on_pointer_down(&mut self, _frame_loop: &mut FrameLoop, event: &PointerEvent) -> Result<()> {
        self.dispatch("onPointerDown", event)
    }

    fn on_pointer_up(&mut self, _frame_loop: &mut FrameLoop, event: &PointerEvent) -> Result<()> {
        self.dispatch("onPointerUp", event)
    }

    fn on_pointer_move(&mut self, _frame_loop: &mut FrameLoop, event: &PointerEvent) -> Result<()> {
        self.dispatch("onPointerMove", event)
    }

    fn on_pointer_drag(&mut self, _frame_loop: &mut FrameLoop, event: &PointerEvent) -> Result<()> {
        self.dispatch("onPointerDrag", event)
    }

    fn on_key_press(&mut self, _frame_loop: &mut FrameLoop, event: &KeyEvent) -> Result<()> {
        self.dispatch("onKeyPress", event)
    }

    fn on_key_down(&mut self, _frame_loop: &mut FrameLoop, event: &KeyEvent) -> Result<()> {
        self.dispatch("onKeyDown", event)
    }

    fn on_key_up(&mut self, _frame_loop: &mut FrameLoop, event: &KeyEvent) -> Result<()> {
        self.dispatch("onKeyUp", event)
    }
}

/// JS-facing shell around a `JsApplication`.
#[wasm_bindgen]
pub struct JsShell {
    inner: WebShell<JsApplication>,
}

#[wasm_bindgen]
impl JsShell {
    /// Create and attach a shell. `config` is an optional JSON object, e.g.
    /// `{"reportPointerMove": true}`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        hooks: Object,
        config: Option<String>,
    ) -> std::result::Result<JsShell, JsValue> {
        console::init(log::LevelFilter::Info);
        let config = match config {
            Some(json) => ShellConfig::from_json(&json).map_err(to_js)?,
            None => ShellConfig::default(),
        };
        let app = JsApplication::new(hooks);
        let mut inner = WebShell::new(app, CanvasSurface::new(canvas), config).map_err(to_js)?;
        inner.attach().map_err(to_js)?;
        Ok(Self { inner })
    }

    /// `start`, `stop` and `detach` are safe to call from inside a hook:
    /// the request is applied when the hook returns and the last one wins.
    pub fn start(&self) -> std::result::Result<(), JsValue> {
        self.inner.start().map_err(to_js)
    }

    pub fn stop(&self) {
        self.inner.stop();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    /// Stop and remove every DOM listener.
    pub fn detach(&mut self) {
        self.inner.detach();
    }
}
