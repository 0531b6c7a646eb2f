//! `requestAnimationFrame` scheduler.
//!
//! Every requested frame gets its own JS callback that carries the
//! `FrameHandle` it was issued under, so the shell can ignore a frame that
//! fires after being superseded.

use crate::{js_error, throw_on_error};
use cs_core::{FrameHandle, FrameScheduler, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

/// Entry point a fired frame calls into.
pub(crate) type FrameDispatch = Rc<dyn Fn(FrameHandle, f64) -> Result<()>>;

/// Filled by `WebShell::attach`. A frame firing while it is empty is dropped.
pub(crate) type DispatchSlot = Rc<RefCell<Option<FrameDispatch>>>;

struct LiveFrame {
    raf_id: i32,
    _callback: Closure<dyn FnMut(f64)>,
}

pub(crate) struct RafScheduler {
    window: Window,
    dispatch: DispatchSlot,
    live: Rc<RefCell<HashMap<FrameHandle, LiveFrame>>>,
    last_id: u32,
}

impl RafScheduler {
    pub(crate) fn new(window: Window, dispatch: DispatchSlot) -> Self {
        Self {
            window,
            dispatch,
            live: Rc::default(),
            last_id: 0,
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle> {
        self.last_id = self.last_id.wrapping_add(1);
        let handle = FrameHandle(self.last_id);

        let dispatch = self.dispatch.clone();
        let live = Rc::downgrade(&self.live);
        let callback = Closure::<dyn FnMut(f64)>::new(move |now: f64| {
            // wasm-bindgen defers freeing a closure dropped during its own call.
            if let Some(live) = live.upgrade() {
                live.borrow_mut().remove(&handle);
            }
            let dispatch = dispatch.borrow().clone();
            if let Some(dispatch) = dispatch {
                throw_on_error(dispatch(handle, now));
            }
        });
        let raf_id = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(js_error)?;
        self.live.borrow_mut().insert(
            handle,
            LiveFrame {
                raf_id,
                _callback: callback,
            },
        );
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let frame = self.live.borrow_mut().remove(&handle);
        if let Some(frame) = frame
            && let Err(err) = self.window.cancel_animation_frame(frame.raf_id)
        {
            log::warn!("cancelAnimationFrame({}) failed: {err:?}", frame.raf_id);
        }
    }
}

impl Drop for RafScheduler {
    fn drop(&mut self) {
        for (_, frame) in self.live.borrow_mut().drain() {
            let _ = self.window.cancel_animation_frame(frame.raf_id);
        }
    }
}
