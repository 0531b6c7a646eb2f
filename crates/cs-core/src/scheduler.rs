//! Host frame pacing.
//!
//! The shell asks the host for "one more frame" and remembers the returned
//! handle so it can cancel it. The host calls `Shell::step` when the frame
//! fires; the scheduler itself never calls back into the shell.

use crate::error::Result;
use std::cell::RefCell;
use std::rc::Rc;

/// Scheduler-issued id of one requested frame. The host passes it back to
/// `Shell::step` so a frame that outlived its cancellation can be told apart
/// from the one currently expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u32);

pub trait FrameScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler for headless hosts: records requests and lets the host decide
/// when a frame fires.
///
/// Clones share state, so a host can keep one clone while the shell owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

#[derive(Debug, Default)]
struct ManualState {
    last_id: u32,
    pending: Option<FrameHandle>,
    requested: usize,
    cancelled: Vec<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The frame currently waiting to fire, if any.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.state.borrow().pending
    }

    /// Consume the pending frame. Returns `None` when nothing is scheduled,
    /// in which case the host must not call `step`.
    pub fn fire(&self) -> Option<FrameHandle> {
        self.state.borrow_mut().pending.take()
    }

    pub fn requested(&self) -> usize {
        self.state.borrow().requested
    }

    pub fn cancelled(&self) -> Vec<FrameHandle> {
        self.state.borrow().cancelled.clone()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle> {
        let mut state = self.state.borrow_mut();
        state.last_id = state.last_id.wrapping_add(1);
        state.requested += 1;
        let handle = FrameHandle(state.last_id);
        if let Some(prev) = state.pending.replace(handle) {
            log::warn!("frame {prev:?} replaced by {handle:?} before firing");
        }
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut state = self.state.borrow_mut();
        if state.pending == Some(handle) {
            state.pending = None;
        }
        state.cancelled.push(handle);
    }
}
