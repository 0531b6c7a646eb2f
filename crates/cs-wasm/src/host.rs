//! Wires a `Shell` into the browser.
//!
//! The shell lives in `Rc<RefCell<_>>`; frame callbacks and DOM listeners
//! hold `Weak` references to it. Errors raised inside those callbacks are
//! thrown back into JS so they surface as uncaught exceptions, the same path
//! a throwing `requestAnimationFrame` callback would take.
//!
//! While a callback is running the shell is borrowed. `start`, `stop` and
//! `detach` called from JS at that point (from inside a hook) are recorded
//! and applied as soon as the callback returns.

use crate::listeners::Listeners;
use crate::raf::{DispatchSlot, FrameDispatch, RafScheduler};
use crate::surface::CanvasBinding;
use crate::throw_on_error;
use cs_core::{Application, LoopRequest, Result, Shell, ShellConfig, ShellError};
use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};
use web_sys::{HtmlCanvasElement, Window};

/// Loop state visible while the shell is borrowed.
#[derive(Default)]
struct LoopControl {
    /// Last start/stop request made while the shell was busy.
    deferred: Cell<Option<LoopRequest>>,
    /// `is_running` as of the last time the shell was released.
    running: Cell<bool>,
}

impl LoopControl {
    fn is_running(&self) -> bool {
        match self.deferred.get() {
            Some(LoopRequest::Start) => true,
            Some(LoopRequest::Stop) => false,
            None => self.running.get(),
        }
    }

    /// Apply any deferred request and refresh the running mirror.
    fn settle<A: Application>(&self, shell: &mut Shell<A>) -> Result<()> {
        let applied = match self.deferred.take() {
            Some(request) => shell.apply(request),
            None => Ok(()),
        };
        self.running.set(shell.is_running());
        applied
    }
}

pub struct WebShell<A: Application + 'static> {
    shell: Rc<RefCell<Shell<A>>>,
    control: Rc<LoopControl>,
    dispatch: DispatchSlot,
    window: Window,
    canvas: HtmlCanvasElement,
    listeners: Option<Listeners>,
}

impl<A: Application + 'static> WebShell<A> {
    /// Build the shell. Nothing is subscribed until `attach`.
    pub fn new<S: CanvasBinding + 'static>(
        app: A,
        surface: S,
        config: ShellConfig,
    ) -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| ShellError::host("no global window"))?;
        let canvas = surface.canvas().clone();
        let dispatch: DispatchSlot = Rc::new(RefCell::new(None));
        let scheduler = RafScheduler::new(window.clone(), dispatch.clone());
        let shell = Shell::new(app, Box::new(scheduler), config).with_surface(Box::new(surface));
        Ok(Self {
            shell: Rc::new(RefCell::new(shell)),
            control: Rc::default(),
            dispatch,
            window,
            canvas,
            listeners: None,
        })
    }

    /// Install the frame dispatch and subscribe to DOM input. Idempotent.
    pub fn attach(&mut self) -> Result<()> {
        if self.listeners.is_some() {
            return Ok(());
        }

        let weak = Rc::downgrade(&self.shell);
        let control = self.control.clone();
        let dispatch: FrameDispatch = Rc::new(move |handle, now| {
            with_shell(&weak, &control, |shell| shell.step(handle, now))
        });
        *self.dispatch.borrow_mut() = Some(dispatch);

        let pointer_shell = Rc::downgrade(&self.shell);
        let pointer_control = self.control.clone();
        let key_shell = Rc::downgrade(&self.shell);
        let key_control = self.control.clone();
        let listeners = Listeners::subscribe(
            self.window.clone(),
            self.canvas.clone(),
            move |raw| {
                throw_on_error(with_shell(&pointer_shell, &pointer_control, |shell| {
                    shell.handle_pointer(&raw)
                }));
            },
            move |raw| {
                throw_on_error(with_shell(&key_shell, &key_control, |shell| {
                    shell.handle_key(&raw)
                }));
            },
        );
        match listeners {
            Ok(listeners) => {
                self.listeners = Some(listeners);
                Ok(())
            }
            Err(err) => {
                *self.dispatch.borrow_mut() = None;
                Err(err)
            }
        }
    }

    /// Stop the loop and remove every DOM listener. Idempotent.
    ///
    /// From inside a hook the stop is deferred until the hook returns; the
    /// frame dispatch stays installed until then so the pending frame is
    /// cancelled rather than left pointing at nothing.
    pub fn detach(&mut self) {
        let stopped = match self.shell.try_borrow_mut() {
            Ok(mut shell) => {
                shell.stop();
                self.control.running.set(false);
                true
            }
            Err(_) => {
                log::debug!("detach inside a callback, stop deferred");
                self.control.deferred.set(Some(LoopRequest::Stop));
                false
            }
        };
        if let Some(listeners) = self.listeners.take() {
            listeners.unsubscribe();
        }
        if stopped {
            *self.dispatch.borrow_mut() = None;
        }
    }

    pub fn is_attached(&self) -> bool {
        self.listeners.is_some()
    }

    pub fn start(&self) -> Result<()> {
        self.request(LoopRequest::Start)
    }

    pub fn stop(&self) {
        // Stopping never fails.
        let _ = self.request(LoopRequest::Stop);
    }

    /// Inside a hook this reports the state the loop will have once the
    /// hook returns.
    pub fn is_running(&self) -> bool {
        match self.shell.try_borrow() {
            Ok(shell) => shell.is_running(),
            Err(_) => self.control.is_running(),
        }
    }

    pub fn shell(&self) -> Ref<'_, Shell<A>> {
        self.shell.borrow()
    }

    fn request(&self, request: LoopRequest) -> Result<()> {
        match self.shell.try_borrow_mut() {
            Ok(mut shell) => {
                let result = shell.apply(request);
                self.control.running.set(shell.is_running());
                result
            }
            Err(_) => {
                log::debug!("shell busy, {request:?} deferred");
                self.control.deferred.set(Some(request));
                Ok(())
            }
        }
    }
}

impl<A: Application + 'static> Drop for WebShell<A> {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Run `f` against the shell if it is still alive and not already borrowed,
/// then apply whatever request JS made in the meantime. A nested DOM event
/// dispatched from inside a hook is dropped with a warning.
fn with_shell<A: Application>(
    weak: &Weak<RefCell<Shell<A>>>,
    control: &LoopControl,
    f: impl FnOnce(&mut Shell<A>) -> Result<()>,
) -> Result<()> {
    let Some(shell) = weak.upgrade() else {
        return Ok(());
    };
    let Ok(mut shell) = shell.try_borrow_mut() else {
        log::warn!("re-entrant shell callback ignored");
        return Ok(());
    };
    let result = f(&mut shell);
    let settled = control.settle(&mut shell);
    result.and(settled)
}
