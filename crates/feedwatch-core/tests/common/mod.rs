#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};

use feedwatch_core::control::{Actuator, Clock, FrameSource, Notifier};
use feedwatch_core::detection::EstimatorConfig;
use feedwatch_core::error::{FeedwatchError, Result};
use feedwatch_core::frame::Frame;
use feedwatch_core::io::history::HistoryLog;

/// Dark, slightly warm feed pellets.
pub const MATERIAL: [u8; 3] = [30, 25, 20];
/// Pale hopper floor.
pub const BACKGROUND: [u8; 3] = [230, 220, 200];

/// Estimator settings that analyse the whole frame, so densities are easy to predict.
pub fn full_frame_estimator() -> EstimatorConfig {
    EstimatorConfig {
        margin_x: 0.0,
        margin_y: 0.0,
        ..Default::default()
    }
}

/// A 100x100 frame whose top `rows` rows are material: density = `rows`%
/// under [`full_frame_estimator`].
pub fn hopper_frame(rows: usize) -> Frame {
    striped_frame(100, 100, rows)
}

pub fn striped_frame(width: usize, height: usize, rows: usize) -> Frame {
    let mut frame_data = Frame::filled(width, height, BACKGROUND).data().clone();
    for row in 0..rows.min(height) {
        for col in 0..width {
            for c in 0..3 {
                frame_data[[row, col, c]] = MATERIAL[c];
            }
        }
    }
    Frame::new(frame_data).unwrap()
}

pub fn fixed_time() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap()
}

/// Ordered record of everything the mock collaborators were asked to do.
pub type EventLog = Rc<RefCell<Vec<String>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Hands out queued frames; `None` entries and an empty queue fail the capture.
pub struct ScriptedCamera {
    pub frames: VecDeque<Option<Frame>>,
    pub events: EventLog,
}

impl FrameSource for ScriptedCamera {
    fn capture(&mut self) -> Result<Frame> {
        self.events.borrow_mut().push("capture".into());
        match self.frames.pop_front() {
            Some(Some(frame)) => Ok(frame),
            _ => Err(FeedwatchError::Capture("camera unavailable".into())),
        }
    }
}

pub struct RecordingActuator {
    pub events: EventLog,
    pub fail_open: bool,
    pub fail_close: bool,
}

impl Actuator for RecordingActuator {
    fn open(&mut self) -> Result<()> {
        self.events.borrow_mut().push("open".into());
        if self.fail_open {
            return Err(FeedwatchError::Actuator("servo jammed".into()));
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.events.borrow_mut().push("close".into());
        if self.fail_close {
            return Err(FeedwatchError::Actuator("servo jammed".into()));
        }
        Ok(())
    }
}

pub struct RecordingNotifier {
    pub messages: Rc<RefCell<Vec<String>>>,
    pub fail: bool,
}

impl Notifier for RecordingNotifier {
    fn send_text(&self, message: &str) -> Result<()> {
        self.messages.borrow_mut().push(message.to_string());
        if self.fail {
            return Err(FeedwatchError::Notification("offline".into()));
        }
        Ok(())
    }

    fn send_image_with_caption(&self, image: &Path, caption: &str) -> Result<()> {
        self.messages
            .borrow_mut()
            .push(format!("[{}] {caption}", image.display()));
        if self.fail {
            return Err(FeedwatchError::Notification("offline".into()));
        }
        Ok(())
    }
}

/// History rows as (level, tag).
pub type HistoryRows = Rc<RefCell<Vec<(f64, Option<String>)>>>;

pub struct MemoryHistory {
    pub rows: HistoryRows,
}

impl HistoryLog for MemoryHistory {
    fn append(&mut self, _timestamp: DateTime<Local>, level: f64, tag: Option<&str>) -> Result<()> {
        self.rows
            .borrow_mut()
            .push((level, tag.map(str::to_string)));
        Ok(())
    }
}

/// Frozen clock that records sleeps instead of blocking.
pub struct FakeClock {
    pub events: EventLog,
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Local> {
        fixed_time()
    }

    fn sleep(&self, duration: Duration) {
        self.events
            .borrow_mut()
            .push(format!("sleep {}s", duration.as_secs()));
    }
}
