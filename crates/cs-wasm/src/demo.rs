//! Demo application: logs input and frame timing to the console.

use crate::console;
use crate::host::WebShell;
use crate::surface::Canvas2dSurface;
use crate::to_js;
use cs_core::{Application, FrameLoop, KeyEvent, PointerEvent, Result, ShellConfig};
use wasm_bindgen::prelude::*;
use web_sys::{ContextAttributes2d, HtmlCanvasElement};

#[derive(Default)]
struct LoggingApp {
    frames: u64,
}

impl Application for LoggingApp {
    fn update(&mut self, _frame_loop: &mut FrameLoop, elapsed: f64, interval: f64) -> Result<()> {
        self.frames += 1;
        log::debug!("frame {}: elapsed {elapsed}ms, interval {interval}ms", self.frames);
        Ok(())
    }

    fn render(&mut self, _frame_loop: &mut FrameLoop) -> Result<()> {
        log::trace!("render");
        Ok(())
    }

    fn on_pointer_down(&mut self, _frame_loop: &mut FrameLoop, event: &PointerEvent) -> Result<()> {
        log::info!("pointer {:?} down at {}", event.button, event.canvas_position);
        Ok(())
    }

    fn on_pointer_up(&mut self, _frame_loop: &mut FrameLoop, _event: &PointerEvent) -> Result<()> {
        Ok(())
    }

    fn on_pointer_drag(&mut self, _frame_loop: &mut FrameLoop, event: &PointerEvent) -> Result<()> {
        log::debug!("drag to {}", event.canvas_position);
        Ok(())
    }

    fn on_key_press(&mut self, _frame_loop: &mut FrameLoop, _event: &KeyEvent) -> Result<()> {
        Ok(())
    }

    fn on_key_down(&mut self, frame_loop: &mut FrameLoop, event: &KeyEvent) -> Result<()> {
        log::info!("key {} down", event.key);
        if event.key == "Escape" {
            frame_loop.stop();
        }
        Ok(())
    }

    fn on_key_up(&mut self, _frame_loop: &mut FrameLoop, _event: &KeyEvent) -> Result<()> {
        Ok(())
    }
}

/// Handle returned to JS by `start_demo`. Dropping it detaches the demo.
#[wasm_bindgen]
pub struct DemoHandle {
    shell: WebShell<LoggingApp>,
}

#[wasm_bindgen]
impl DemoHandle {
    pub fn start(&self) -> std::result::Result<(), JsValue> {
        self.shell.start().map_err(to_js)
    }

    pub fn stop(&self) {
        self.shell.stop();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.shell.is_running()
    }

    /// Frames rendered since the demo was created.
    pub fn frames(&self) -> f64 {
        self.shell.shell().app().frames as f64
    }
}

/// Attach the logging demo to `canvas` and start its frame loop.
/// Press Escape to stop it.
#[wasm_bindgen]
pub fn start_demo(canvas: HtmlCanvasElement) -> std::result::Result<DemoHandle, JsValue> {
    console::init(log::LevelFilter::Debug);
    let surface = Canvas2dSurface::new(canvas, &ContextAttributes2d::new());
    if surface.context().is_none() {
        log::warn!("demo running without a 2d context");
    }
    let mut shell = WebShell::new(LoggingApp::default(), surface, ShellConfig::default())
        .map_err(to_js)?;
    shell.attach().map_err(to_js)?;
    shell.start().map_err(to_js)?;
    Ok(DemoHandle { shell })
}
