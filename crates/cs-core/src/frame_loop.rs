//! Frame loop lifecycle: `stopped` ⇄ `running`.
//!
//! `FrameLoop` owns the timing state and the pending frame handle. It is
//! handed to every application hook so hooks can start or stop the loop,
//! including from inside a frame that is currently being processed.

use crate::error::Result;
use crate::scheduler::{FrameHandle, FrameScheduler};

/// Timing passed to `Application::update`, in host time units
/// (milliseconds for `requestAnimationFrame`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTiming {
    /// Time since the first frame of the current run.
    pub elapsed: f64,
    /// Time since the previous frame; 0 on the first frame of a run.
    pub interval: f64,
}

/// A start/stop request that a host could not apply immediately because a
/// shell callback was on the stack. Applied with `Shell::apply` once the
/// callback returns; the last request wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopRequest {
    Start,
    Stop,
}

pub struct FrameLoop {
    scheduler: Box<dyn FrameScheduler>,
    running: bool,
    pending: Option<FrameHandle>,
    start_time: Option<f64>,
    last_frame_time: Option<f64>,
}

impl FrameLoop {
    pub fn new(scheduler: Box<dyn FrameScheduler>) -> Self {
        Self {
            scheduler,
            running: false,
            pending: None,
            start_time: None,
            last_frame_time: None,
        }
    }

    /// Begin running and schedule the first frame. No-op when already running.
    pub fn start(&mut self) -> Result<()> {
        if self.running {
            return Ok(());
        }
        self.reset_timestamps();
        let handle = self.scheduler.request_frame()?;
        self.running = true;
        self.pending = Some(handle);
        log::debug!("frame loop started ({handle:?})");
        Ok(())
    }

    /// Cancel the pending frame and stop. No-op when already stopped.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.running = false;
        self.reset_timestamps();
        log::debug!("frame loop stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Timestamp of the first frame of the current run.
    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    pub fn last_frame_time(&self) -> Option<f64> {
        self.last_frame_time
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn apply(&mut self, request: LoopRequest) -> Result<()> {
        match request {
            LoopRequest::Start => self.start(),
            LoopRequest::Stop => {
                self.stop();
                Ok(())
            }
        }
    }

    /// Account for frame `handle` firing at `now`. Returns `None` when
    /// stopped or when `handle` is not the pending frame: a frame that fires
    /// after its cancellation must not reach the hooks.
    pub(crate) fn begin_frame(&mut self, handle: FrameHandle, now: f64) -> Option<FrameTiming> {
        if !self.running {
            log::trace!("frame {handle:?} at {now} ignored, loop stopped");
            return None;
        }
        if self.pending != Some(handle) {
            log::trace!("stale frame {handle:?} ignored, expecting {:?}", self.pending);
            return None;
        }
        self.pending = None;
        let start = *self.start_time.get_or_insert(now);
        let last = self.last_frame_time.replace(now).unwrap_or(now);
        Some(FrameTiming {
            elapsed: now - start,
            interval: now - last,
        })
    }

    /// Schedule the successor frame unless a hook stopped the loop or
    /// already restarted it.
    pub(crate) fn end_frame(&mut self) -> Result<()> {
        if self.running && self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame()?);
        }
        Ok(())
    }

    fn reset_timestamps(&mut self) {
        self.start_time = None;
        self.last_frame_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use pretty_assertions::assert_eq;

    fn make_loop() -> (FrameLoop, ManualScheduler) {
        let sched = ManualScheduler::new();
        (FrameLoop::new(Box::new(sched.clone())), sched)
    }

    #[test]
    fn start_is_idempotent() {
        let (mut fl, sched) = make_loop();
        fl.start().unwrap();
        fl.start().unwrap();
        assert!(fl.is_running());
        assert_eq!(sched.requested(), 1);
    }

    #[test]
    fn stop_is_idempotent_and_cancels() {
        let (mut fl, sched) = make_loop();
        fl.stop();
        assert!(sched.cancelled().is_empty());
        fl.start().unwrap();
        let handle = fl.pending_frame().unwrap();
        fl.stop();
        fl.stop();
        assert!(!fl.is_running());
        assert_eq!(sched.cancelled(), vec![handle]);
        assert_eq!(sched.pending(), None);
    }

    #[test]
    fn first_frame_latches_start_and_reports_zero_interval() {
        let (mut fl, _sched) = make_loop();
        fl.start().unwrap();
        assert_eq!(fl.start_time(), None);
        assert_eq!(fl.last_frame_time(), None);

        let first = fl.pending_frame().unwrap();
        let timing = fl.begin_frame(first, 1000.0).unwrap();
        assert_eq!(timing, FrameTiming { elapsed: 0.0, interval: 0.0 });
        assert_eq!(fl.start_time(), Some(1000.0));
        fl.end_frame().unwrap();

        let second = fl.pending_frame().unwrap();
        let timing = fl.begin_frame(second, 1016.0).unwrap();
        assert_eq!(timing, FrameTiming { elapsed: 16.0, interval: 16.0 });
        assert_eq!(fl.start_time(), Some(1000.0));
        assert_eq!(fl.last_frame_time(), Some(1016.0));
    }

    #[test]
    fn frame_after_stop_is_ignored() {
        let (mut fl, _sched) = make_loop();
        fl.start().unwrap();
        let handle = fl.pending_frame().unwrap();
        fl.stop();
        assert_eq!(fl.begin_frame(handle, 5.0), None);
        assert_eq!(fl.start_time(), None);
    }

    #[test]
    fn frame_from_previous_run_is_ignored() {
        let (mut fl, _sched) = make_loop();
        fl.start().unwrap();
        let stale = fl.pending_frame().unwrap();
        fl.stop();
        fl.start().unwrap();
        let current = fl.pending_frame().unwrap();
        assert_ne!(stale, current);

        assert_eq!(fl.begin_frame(stale, 5.0), None);
        assert_eq!(fl.pending_frame(), Some(current));
        assert!(fl.begin_frame(current, 6.0).is_some());
    }

    #[test]
    fn apply_requests() {
        let (mut fl, sched) = make_loop();
        fl.apply(LoopRequest::Start).unwrap();
        assert!(fl.is_running());
        fl.apply(LoopRequest::Stop).unwrap();
        assert!(!fl.is_running());
        assert_eq!(sched.pending(), None);
    }

    #[test]
    fn restart_resets_timestamps() {
        let (mut fl, _sched) = make_loop();
        fl.start().unwrap();
        let handle = fl.pending_frame().unwrap();
        fl.begin_frame(handle, 10.0).unwrap();
        fl.stop();
        fl.start().unwrap();
        assert_eq!(fl.start_time(), None);
        assert_eq!(fl.last_frame_time(), None);
        let handle = fl.pending_frame().unwrap();
        let timing = fl.begin_frame(handle, 50.0).unwrap();
        assert_eq!(timing.elapsed, 0.0);
    }
}
