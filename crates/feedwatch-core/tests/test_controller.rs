mod common;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use feedwatch_core::consts::REPLENISHED_TAG;
use feedwatch_core::control::controller::Collaborators;
use feedwatch_core::control::{
    CycleOutcome, CycleState, FrameSource, ReplenishmentController, ScheduleConfig,
};
use feedwatch_core::frame::Frame;
use feedwatch_core::level::{CalibrationReference, FillStatus};

use common::{
    event_log, full_frame_estimator, hopper_frame, EventLog, FakeClock, HistoryRows, MemoryHistory,
    RecordingActuator, RecordingNotifier, ScriptedCamera,
};

/// Handles to everything the mocks recorded.
struct Harness {
    events: EventLog,
    history: HistoryRows,
    messages: Rc<RefCell<Vec<String>>>,
}

struct Options {
    fail_open: bool,
    fail_close: bool,
    fail_notify: bool,
}

const HEALTHY: Options = Options {
    fail_open: false,
    fail_close: false,
    fail_notify: false,
};

fn schedule() -> ScheduleConfig {
    ScheduleConfig {
        min_level: 20.0,
        interval_secs: 3600,
        dispense_secs: 3,
        settle_secs: 10,
    }
}

fn controller(frames: Vec<Option<Frame>>, options: Options) -> (ReplenishmentController, Harness) {
    let events = event_log();
    let history: HistoryRows = Rc::new(RefCell::new(Vec::new()));
    let messages = Rc::new(RefCell::new(Vec::new()));

    let io = Collaborators {
        camera: Box::new(ScriptedCamera {
            frames: VecDeque::from(frames),
            events: events.clone(),
        }),
        actuator: Box::new(RecordingActuator {
            events: events.clone(),
            fail_open: options.fail_open,
            fail_close: options.fail_close,
        }),
        notifier: Box::new(RecordingNotifier {
            messages: messages.clone(),
            fail: options.fail_notify,
        }),
        history: Box::new(MemoryHistory {
            rows: history.clone(),
        }),
        clock: Box::new(FakeClock {
            events: events.clone(),
        }),
    };

    let calibration = CalibrationReference::new(5.0, 45.0).unwrap();
    let controller =
        ReplenishmentController::new(calibration, full_frame_estimator(), schedule(), io).unwrap();

    (
        controller,
        Harness {
            events,
            history,
            messages,
        },
    )
}

fn events(h: &Harness) -> Vec<String> {
    h.events.borrow().clone()
}

// ---------------------------------------------------------------------------
// Evaluating -> NoAction
// ---------------------------------------------------------------------------

#[test]
fn test_cycle_above_minimum_takes_no_action() {
    // Raw density 15% -> level 25%, at or above the 20% minimum.
    let (mut c, h) = controller(vec![Some(hopper_frame(15))], HEALTHY);

    let outcome = c.run_cycle();

    let CycleOutcome::NoAction { reading } = &outcome else {
        panic!("expected NoAction, got {outcome:?}");
    };
    assert_abs_diff_eq!(reading.level, 25.0, epsilon = 1e-6);
    assert!(!outcome.replenished());
    assert_eq!(events(&h), vec!["capture"]);
    assert_eq!(h.history.borrow().len(), 1);
    assert_eq!(h.history.borrow()[0].1, None);
    assert_eq!(h.messages.borrow().len(), 1);
    assert!(h.messages.borrow()[0].starts_with("Feed level: 25%"));
    assert_eq!(c.state(), CycleState::Idle);
}

// ---------------------------------------------------------------------------
// Replenishing -> PostCheck
// ---------------------------------------------------------------------------

#[test]
fn test_cycle_below_minimum_replenishes() {
    // 8% -> 7.5% triggers a refill; the post-check photo shows 40% -> 87.5%.
    let (mut c, h) = controller(
        vec![Some(hopper_frame(8)), Some(hopper_frame(40))],
        HEALTHY,
    );

    let outcome = c.run_cycle();

    let CycleOutcome::Replenished { before, after } = &outcome else {
        panic!("expected Replenished, got {outcome:?}");
    };
    assert_abs_diff_eq!(before.level, 7.5, epsilon = 1e-6);
    assert_eq!(before.status, FillStatus::Empty);
    let after = after.as_ref().expect("post-check reading");
    assert_abs_diff_eq!(after.level, 87.5, epsilon = 1e-6);
    assert_eq!(after.status, FillStatus::Full);

    assert_eq!(
        events(&h),
        vec!["capture", "open", "sleep 3s", "close", "sleep 10s", "capture"]
    );

    let history = h.history.borrow();
    assert_eq!(history.len(), 2);
    assert_abs_diff_eq!(history[0].0, 7.5, epsilon = 1e-6);
    assert_eq!(history[0].1, None);
    assert_abs_diff_eq!(history[1].0, 87.5, epsilon = 1e-6);
    assert_eq!(history[1].1.as_deref(), Some(REPLENISHED_TAG));

    let messages = h.messages.borrow();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Refilled:"), "{}", messages[0]);
}

#[test]
fn test_still_low_after_refill_waits_for_next_cycle() {
    let (mut c, h) = controller(
        vec![Some(hopper_frame(6)), Some(hopper_frame(9))],
        HEALTHY,
    );

    let outcome = c.run_cycle();

    assert!(outcome.replenished());
    let opens = events(&h).iter().filter(|e| *e == "open").count();
    assert_eq!(opens, 1);
    assert_eq!(c.state(), CycleState::Idle);
}

#[test]
fn test_post_check_failure_still_records_refill() {
    let (mut c, h) = controller(vec![Some(hopper_frame(8)), None], HEALTHY);

    let outcome = c.run_cycle();

    assert_eq!(
        outcome,
        CycleOutcome::Replenished {
            before: outcome.reading().unwrap().clone(),
            after: None,
        }
    );
    let history = h.history.borrow();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].1.as_deref(), Some(REPLENISHED_TAG));
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn test_capture_failure_abandons_cycle() {
    let (mut c, h) = controller(vec![None], HEALTHY);

    let outcome = c.run_cycle();

    assert!(matches!(outcome, CycleOutcome::Abandoned { .. }));
    assert!(outcome.reading().is_none());
    assert_eq!(events(&h), vec!["capture"]);
    assert!(h.history.borrow().is_empty());
    assert_eq!(h.messages.borrow().len(), 1);
    assert_eq!(c.state(), CycleState::Idle);
}

#[test]
fn test_degenerate_frame_abandons_cycle() {
    let (mut c, h) = controller(vec![Some(Frame::filled(4, 4, [0, 0, 0]))], HEALTHY);

    assert!(matches!(c.run_cycle(), CycleOutcome::Abandoned { .. }));
    assert!(h.history.borrow().is_empty());
}

#[test]
fn test_open_failure_closes_and_abandons() {
    let options = Options {
        fail_open: true,
        ..HEALTHY
    };
    let (mut c, h) = controller(vec![Some(hopper_frame(8))], options);

    let outcome = c.run_cycle();

    assert!(matches!(outcome, CycleOutcome::Abandoned { .. }));
    assert_eq!(events(&h), vec!["capture", "open", "close"]);
    assert_eq!(h.history.borrow().len(), 1);
}

#[test]
fn test_close_failure_sends_urgent_notice_and_continues() {
    let options = Options {
        fail_close: true,
        ..HEALTHY
    };
    let (mut c, h) = controller(
        vec![Some(hopper_frame(8)), Some(hopper_frame(30))],
        options,
    );

    assert!(c.run_cycle().replenished());
    let messages = h.messages.borrow();
    assert!(messages.iter().any(|m| m.starts_with("URGENT")));
}

#[test]
fn test_notification_failures_do_not_stop_monitoring() {
    let options = Options {
        fail_notify: true,
        ..HEALTHY
    };
    let (mut c, h) = controller(
        vec![None, Some(hopper_frame(15)), Some(hopper_frame(8)), Some(hopper_frame(40))],
        options,
    );

    c.run(Some(3));

    assert_eq!(h.history.borrow().len(), 3);
    assert_eq!(h.messages.borrow().len(), 3);
}

// ---------------------------------------------------------------------------
// Scheduling
// ---------------------------------------------------------------------------

#[test]
fn test_run_waits_interval_between_cycles() {
    let (mut c, h) = controller(
        vec![Some(hopper_frame(30)), Some(hopper_frame(30))],
        HEALTHY,
    );

    c.run(Some(2));

    assert_eq!(events(&h), vec!["capture", "sleep 3600s", "capture"]);
}

#[test]
fn test_camera_readiness_check() {
    let events = event_log();
    let mut missing = ScriptedCamera {
        frames: VecDeque::new(),
        events: events.clone(),
    };
    assert!(missing.check_ready().is_err());

    let mut tiny = ScriptedCamera {
        frames: VecDeque::from(vec![Some(Frame::filled(4, 4, [0, 0, 0]))]),
        events: events.clone(),
    };
    assert!(tiny.check_ready().is_err());

    let mut working = ScriptedCamera {
        frames: VecDeque::from(vec![Some(hopper_frame(20))]),
        events,
    };
    assert!(working.check_ready().is_ok());
}

#[test]
fn test_invalid_calibration_is_rejected_up_front() {
    let (_, h) = controller(vec![], HEALTHY);
    let io = Collaborators {
        camera: Box::new(ScriptedCamera {
            frames: VecDeque::new(),
            events: h.events.clone(),
        }),
        actuator: Box::new(RecordingActuator {
            events: h.events.clone(),
            fail_open: false,
            fail_close: false,
        }),
        notifier: Box::new(RecordingNotifier {
            messages: h.messages.clone(),
            fail: false,
        }),
        history: Box::new(MemoryHistory {
            rows: h.history.clone(),
        }),
        clock: Box::new(FakeClock {
            events: h.events.clone(),
        }),
    };
    let bad = CalibrationReference {
        empty_density: 40.0,
        full_density: 10.0,
    };
    assert!(ReplenishmentController::new(bad, full_frame_estimator(), schedule(), io).is_err());
}

#[test]
fn test_overlay_notification_sends_image() {
    let dir = tempfile::tempdir().unwrap();
    let overlay = dir.path().join("result.png");
    let (c, h) = controller(vec![Some(hopper_frame(50))], HEALTHY);
    let mut c = c.with_overlay(&overlay);

    assert!(matches!(c.run_cycle(), CycleOutcome::NoAction { .. }));
    assert!(overlay.exists());
    let messages = h.messages.borrow();
    assert!(messages[0].starts_with(&format!("[{}]", overlay.display())));
}
