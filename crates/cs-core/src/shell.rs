//! The application shell: frame loop + surface + input dispatch.
//!
//! Construction only stores state. Hosts feed it frames (`step`) and raw
//! input (`handle_pointer`, `handle_key`); every fault is returned to the
//! host that delivered the callback.

use crate::app::Application;
use crate::config::ShellConfig;
use crate::error::Result;
use crate::event::{
    InputEventKind, KeyAction, PointerAction, RawKeyInput, RawPointerInput, translate_key,
    translate_pointer,
};
use crate::frame_loop::{FrameLoop, LoopRequest};
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::surface::Surface;

pub struct Shell<A> {
    app: A,
    frame_loop: FrameLoop,
    surface: Option<Box<dyn Surface>>,
    config: ShellConfig,
    pointer_down: bool,
}

impl<A: Application> Shell<A> {
    pub fn new(app: A, scheduler: Box<dyn FrameScheduler>, config: ShellConfig) -> Self {
        Self {
            app,
            frame_loop: FrameLoop::new(scheduler),
            surface: None,
            config,
            pointer_down: false,
        }
    }

    pub fn with_surface(mut self, surface: Box<dyn Surface>) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn set_surface(&mut self, surface: Option<Box<dyn Surface>>) {
        self.surface = surface;
    }

    pub fn surface(&self) -> Option<&dyn Surface> {
        self.surface.as_deref()
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut A {
        &mut self.app
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn set_report_pointer_move(&mut self, enabled: bool) {
        self.config.report_pointer_move = enabled;
    }

    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    pub fn start(&mut self) -> Result<()> {
        self.frame_loop.start()
    }

    pub fn stop(&mut self) {
        self.frame_loop.stop();
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// Apply a start/stop request deferred by the host.
    pub fn apply(&mut self, request: LoopRequest) -> Result<()> {
        self.frame_loop.apply(request)
    }

    /// Whether a pointer button is held (down seen, up not yet seen).
    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    /// Frame callback for `handle`. Runs `update` then `render` and schedules
    /// the next frame. Frames other than the pending one are ignored. A hook
    /// error halts the loop and is returned to the host.
    pub fn step(&mut self, handle: FrameHandle, now: f64) -> Result<()> {
        let Some(timing) = self.frame_loop.begin_frame(handle, now) else {
            return Ok(());
        };
        log::trace!(
            "frame at {now}: elapsed {}, interval {}",
            timing.elapsed,
            timing.interval
        );
        if let Err(err) = self.run_frame(timing.elapsed, timing.interval) {
            log::error!("frame loop halted: {err}");
            self.frame_loop.stop();
            return Err(err);
        }
        Ok(())
    }

    fn run_frame(&mut self, elapsed: f64, interval: f64) -> Result<()> {
        self.app.update(&mut self.frame_loop, elapsed, interval)?;
        self.app.render(&mut self.frame_loop)?;
        self.frame_loop.end_frame()
    }

    /// Dispatch a raw pointer notification from the surface.
    pub fn handle_pointer(&mut self, raw: &RawPointerInput) -> Result<()> {
        match raw.action {
            PointerAction::Down => {
                self.pointer_down = true;
                let event = translate_pointer(self.surface.as_deref(), raw)?;
                self.app.on_pointer_down(&mut self.frame_loop, &event)
            }
            PointerAction::Up => {
                self.pointer_down = false;
                let event = translate_pointer(self.surface.as_deref(), raw)?;
                self.app.on_pointer_up(&mut self.frame_loop, &event)
            }
            PointerAction::Move => {
                let report_move = self.config.report_pointer_move;
                if !report_move && !self.pointer_down {
                    return Ok(());
                }
                let event = translate_pointer(self.surface.as_deref(), raw)?;
                if report_move {
                    self.app.on_pointer_move(&mut self.frame_loop, &event)?;
                }
                if self.pointer_down {
                    let drag = event.with_kind(InputEventKind::PointerDrag);
                    self.app.on_pointer_drag(&mut self.frame_loop, &drag)?;
                }
                Ok(())
            }
        }
    }

    /// Dispatch a raw keyboard notification.
    pub fn handle_key(&mut self, raw: &RawKeyInput) -> Result<()> {
        let event = translate_key(raw);
        match raw.action {
            KeyAction::Press => self.app.on_key_press(&mut self.frame_loop, &event),
            KeyAction::Down => self.app.on_key_down(&mut self.frame_loop, &event),
            KeyAction::Up => self.app.on_key_up(&mut self.frame_loop, &event),
        }
    }
}
