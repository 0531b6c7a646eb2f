//! Integration tests: frame loop lifecycle driven through `Shell`.
//!
//! A `ManualScheduler` stands in for `requestAnimationFrame`; each test fires
//! frames by hand with explicit timestamps.

use cs_core::{
    Application, FrameLoop, KeyAction, KeyEvent, LoopRequest, ManualScheduler, Modifiers,
    RawKeyInput, Result, Shell, ShellConfig, ShellError,
};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct Recorder {
    calls: Vec<String>,
    stop_in_update: bool,
    restart_in_update: bool,
    fail_render: bool,
}

impl Application for Recorder {
    fn update(&mut self, frame_loop: &mut FrameLoop, elapsed: f64, interval: f64) -> Result<()> {
        self.calls.push(format!("update {elapsed} {interval}"));
        if self.stop_in_update {
            frame_loop.stop();
        }
        if self.restart_in_update {
            frame_loop.stop();
            frame_loop.start()?;
        }
        Ok(())
    }

    fn render(&mut self, _frame_loop: &mut FrameLoop) -> Result<()> {
        self.calls.push("render".into());
        if self.fail_render {
            return Err(ShellError::host("context lost"));
        }
        Ok(())
    }

    fn on_key_down(&mut self, frame_loop: &mut FrameLoop, event: &KeyEvent) -> Result<()> {
        self.calls.push(format!("key {}", event.key));
        if event.key == "Escape" {
            frame_loop.stop();
        }
        Ok(())
    }
}

fn make_shell(app: Recorder) -> (Shell<Recorder>, ManualScheduler) {
    let _ = env_logger::builder().is_test(true).try_init();
    let sched = ManualScheduler::new();
    let shell = Shell::new(app, Box::new(sched.clone()), ShellConfig::default());
    (shell, sched)
}

/// Fire the pending frame, if any. Returns whether a frame fired.
fn fire(shell: &mut Shell<Recorder>, sched: &ManualScheduler, now: f64) -> bool {
    let Some(handle) = sched.fire() else {
        return false;
    };
    shell.step(handle, now).unwrap();
    true
}

fn key_down(key: &str) -> RawKeyInput {
    RawKeyInput {
        action: KeyAction::Down,
        key: key.into(),
        key_code: 0,
        repeat: false,
        modifiers: Modifiers::default(),
    }
}

// ─── Timing ──────────────────────────────────────────────────────────────

#[test]
fn first_two_frames_report_expected_timing() {
    let (mut shell, sched) = make_shell(Recorder::default());
    shell.start().unwrap();
    assert_eq!(shell.frame_loop().start_time(), None);
    assert_eq!(shell.frame_loop().last_frame_time(), None);

    assert!(fire(&mut shell, &sched, 1000.0));
    assert_eq!(shell.frame_loop().start_time(), Some(1000.0));

    assert!(fire(&mut shell, &sched, 1016.0));
    assert_eq!(shell.frame_loop().start_time(), Some(1000.0));
    assert_eq!(
        shell.app().calls,
        vec!["update 0 0", "render", "update 16 16", "render"]
    );
}

#[test]
fn elapsed_is_non_decreasing_within_a_run() {
    let (mut shell, sched) = make_shell(Recorder::default());
    shell.start().unwrap();
    for t in [5.0, 21.0, 37.5, 37.5, 60.0] {
        assert!(fire(&mut shell, &sched, t));
    }
    let elapsed: Vec<f64> = shell
        .app()
        .calls
        .iter()
        .filter_map(|c| c.strip_prefix("update "))
        .map(|rest| rest.split(' ').next().unwrap().parse().unwrap())
        .collect();
    assert_eq!(elapsed, vec![0.0, 16.0, 32.5, 32.5, 55.0]);
    assert!(elapsed.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn update_always_precedes_render() {
    let (mut shell, sched) = make_shell(Recorder::default());
    shell.start().unwrap();
    for t in [0.0, 16.0, 32.0] {
        fire(&mut shell, &sched, t);
    }
    for pair in shell.app().calls.chunks(2) {
        assert!(pair[0].starts_with("update"));
        assert_eq!(pair[1], "render");
    }
}

// ─── Start / stop ────────────────────────────────────────────────────────

#[test]
fn is_running_tracks_last_call() {
    let (mut shell, sched) = make_shell(Recorder::default());
    assert!(!shell.is_running());

    let script = [true, true, false, false, true, false, true];
    for start in script {
        if start {
            shell.start().unwrap();
        } else {
            shell.stop();
        }
        assert_eq!(shell.is_running(), start);
        assert_eq!(sched.pending().is_some(), start);
    }
    // Only the three stopped→running transitions requested a frame.
    assert_eq!(sched.requested(), 3);
    assert_eq!(sched.cancelled().len(), 2);
}

#[test]
fn stale_frame_after_stop_is_ignored() {
    let (mut shell, sched) = make_shell(Recorder::default());
    shell.start().unwrap();
    let handle = sched.pending().unwrap();
    shell.stop();
    shell.step(handle, 1000.0).unwrap();
    assert!(shell.app().calls.is_empty());
}

#[test]
fn frame_from_cancelled_run_does_not_fork_the_loop() {
    let (mut shell, sched) = make_shell(Recorder::default());
    shell.start().unwrap();
    let cancelled = sched.pending().unwrap();
    shell.stop();
    shell.start().unwrap();
    let current = sched.pending().unwrap();

    // The first run's callback fires anyway.
    shell.step(cancelled, 10.0).unwrap();
    assert!(shell.app().calls.is_empty());
    assert_eq!(sched.pending(), Some(current));
    assert_eq!(sched.requested(), 2);

    assert!(fire(&mut shell, &sched, 20.0));
    assert_eq!(shell.app().calls, vec!["update 0 0", "render"]);
    // Exactly one successor is in flight.
    assert_eq!(sched.requested(), 3);
    assert_eq!(shell.frame_loop().pending_frame(), sched.pending());
}

#[test]
fn stop_inside_update_ends_the_loop() {
    let (mut shell, sched) = make_shell(Recorder {
        stop_in_update: true,
        ..Default::default()
    });
    shell.start().unwrap();
    let handle = sched.fire().unwrap();
    shell.step(handle, 10.0).unwrap();

    assert!(!shell.is_running());
    assert_eq!(sched.pending(), None);
    // A repeated delivery of the same callback must not reach the hooks.
    shell.step(handle, 26.0).unwrap();
    assert_eq!(shell.app().calls, vec!["update 0 0", "render"]);
}

#[test]
fn stop_from_key_hook_prevents_further_frames() {
    let (mut shell, sched) = make_shell(Recorder::default());
    shell.start().unwrap();
    fire(&mut shell, &sched, 0.0);
    let successor = sched.pending().unwrap();
    shell.handle_key(&key_down("Escape")).unwrap();

    assert!(!shell.is_running());
    assert_eq!(sched.cancelled(), vec![successor]);
    assert!(!fire(&mut shell, &sched, 16.0));
    shell.step(successor, 16.0).unwrap();
    assert_eq!(shell.app().calls, vec!["update 0 0", "render", "key Escape"]);
}

#[test]
fn restart_inside_update_keeps_a_single_pending_frame() {
    let (mut shell, sched) = make_shell(Recorder {
        restart_in_update: true,
        ..Default::default()
    });
    shell.start().unwrap();
    fire(&mut shell, &sched, 100.0);

    assert!(shell.is_running());
    assert_eq!(sched.requested(), 2);
    assert_eq!(shell.frame_loop().pending_frame(), sched.pending());
    // The restart reset the run, so the next frame starts a fresh clock.
    assert_eq!(shell.frame_loop().start_time(), None);
}

#[test]
fn hook_error_halts_the_loop() {
    let (mut shell, sched) = make_shell(Recorder {
        fail_render: true,
        ..Default::default()
    });
    shell.start().unwrap();
    let handle = sched.fire().unwrap();
    let err = shell.step(handle, 0.0).unwrap_err();

    assert_eq!(err, ShellError::host("context lost"));
    assert!(!shell.is_running());
    assert_eq!(sched.pending(), None);
    assert_eq!(shell.frame_loop().start_time(), None);
}

#[test]
fn app_can_be_reconfigured_between_frames() {
    let (mut shell, sched) = make_shell(Recorder::default());
    shell.start().unwrap();
    fire(&mut shell, &sched, 0.0);
    shell.app_mut().stop_in_update = true;
    fire(&mut shell, &sched, 16.0);

    assert!(!shell.is_running());
    assert!(!fire(&mut shell, &sched, 32.0));
    assert_eq!(
        shell.app().calls,
        vec!["update 0 0", "render", "update 16 16", "render"]
    );
}

// ─── Deferred requests ───────────────────────────────────────────────────

#[test]
fn deferred_stop_cancels_the_scheduled_successor() {
    let (mut shell, sched) = make_shell(Recorder::default());
    shell.start().unwrap();
    fire(&mut shell, &sched, 0.0);
    let successor = sched.pending().unwrap();

    // A host that could not stop mid-callback applies the request afterwards.
    shell.apply(LoopRequest::Stop).unwrap();

    assert!(!shell.is_running());
    assert_eq!(shell.frame_loop().pending_frame(), None);
    assert_eq!(sched.pending(), None);
    assert_eq!(sched.cancelled(), vec![successor]);
    shell.step(successor, 16.0).unwrap();
    assert_eq!(shell.app().calls, vec!["update 0 0", "render"]);
}

#[test]
fn deferred_start_schedules_a_fresh_run() {
    let (mut shell, sched) = make_shell(Recorder::default());
    shell.apply(LoopRequest::Start).unwrap();
    assert!(shell.is_running());
    assert!(fire(&mut shell, &sched, 500.0));
    assert_eq!(shell.frame_loop().start_time(), Some(500.0));
}
