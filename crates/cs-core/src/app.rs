//! Application hooks driven by the shell.

use crate::error::{Result, ShellError};
use crate::event::{KeyEvent, PointerEvent};
use crate::frame_loop::FrameLoop;

/// A concrete application plugged into a `Shell`.
///
/// `update` and `render` are required. Input hooks default to failing with
/// `ShellError::UnimplementedHook`, so an application must override every
/// hook its host will actually dispatch.
///
/// Every hook receives the shell's `FrameLoop` and may start or stop it.
pub trait Application {
    /// Advance state. Called once per frame, before `render`.
    fn update(&mut self, frame_loop: &mut FrameLoop, elapsed: f64, interval: f64) -> Result<()>;

    fn render(&mut self, frame_loop: &mut FrameLoop) -> Result<()>;

    fn on_pointer_down(
        &mut self,
        _frame_loop: &mut FrameLoop,
        _event: &PointerEvent,
    ) -> Result<()> {
        Err(ShellError::unimplemented("on_pointer_down"))
    }

    fn on_pointer_up(&mut self, _frame_loop: &mut FrameLoop, _event: &PointerEvent) -> Result<()> {
        Err(ShellError::unimplemented("on_pointer_up"))
    }

    /// Only dispatched when `ShellConfig::report_pointer_move` is set.
    fn on_pointer_move(
        &mut self,
        _frame_loop: &mut FrameLoop,
        _event: &PointerEvent,
    ) -> Result<()> {
        Err(ShellError::unimplemented("on_pointer_move"))
    }

    fn on_pointer_drag(
        &mut self,
        _frame_loop: &mut FrameLoop,
        _event: &PointerEvent,
    ) -> Result<()> {
        Err(ShellError::unimplemented("on_pointer_drag"))
    }

    fn on_key_press(&mut self, _frame_loop: &mut FrameLoop, _event: &KeyEvent) -> Result<()> {
        Err(ShellError::unimplemented("on_key_press"))
    }

    fn on_key_down(&mut self, _frame_loop: &mut FrameLoop, _event: &KeyEvent) -> Result<()> {
        Err(ShellError::unimplemented("on_key_down"))
    }

    fn on_key_up(&mut self, _frame_loop: &mut FrameLoop, _event: &KeyEvent) -> Result<()> {
        Err(ShellError::unimplemented("on_key_up"))
    }
}
