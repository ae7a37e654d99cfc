use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::annotate::render_overlay;
use crate::consts::REPLENISHED_TAG;
use crate::detection::{measure_frame, EstimatorConfig};
use crate::error::Result;
use crate::frame::{Frame, Region};
use crate::io::history::HistoryLog;
use crate::io::image_io::save_rgb_image;
use crate::level::{normalize, CalibrationReference, LevelReading};

use super::actuator::Actuator;
use super::camera::FrameSource;
use super::clock::Clock;
use super::config::ScheduleConfig;
use super::notify::Notifier;
use super::types::{CycleOutcome, CycleState};

/// External collaborators driven by the controller.
pub struct Collaborators {
    pub camera: Box<dyn FrameSource>,
    pub actuator: Box<dyn Actuator>,
    pub notifier: Box<dyn Notifier>,
    pub history: Box<dyn HistoryLog>,
    pub clock: Box<dyn Clock>,
}

/// One photo and what was read from it.
struct Measurement {
    frame: Frame,
    region: Region,
    reading: LevelReading,
}

/// Measure, evaluate and refill, one cycle at a time.
///
/// Cycles are strictly sequential. Nothing inside a cycle escapes as an error:
/// failures are logged, notified, and the controller returns to `Idle`.
pub struct ReplenishmentController {
    calibration: CalibrationReference,
    estimator: EstimatorConfig,
    schedule: ScheduleConfig,
    overlay_path: Option<PathBuf>,
    io: Collaborators,
    state: CycleState,
}

impl ReplenishmentController {
    /// Fails if `calibration` is not a valid empty/full pair.
    pub fn new(
        calibration: CalibrationReference,
        estimator: EstimatorConfig,
        schedule: ScheduleConfig,
        io: Collaborators,
    ) -> Result<Self> {
        calibration.validate()?;
        Ok(Self {
            calibration,
            estimator,
            schedule,
            overlay_path: None,
            io,
            state: CycleState::Idle,
        })
    }

    /// Render an annotated photo to `path` for image notifications.
    pub fn with_overlay(mut self, path: impl Into<PathBuf>) -> Self {
        self.overlay_path = Some(path.into());
        self
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Run cycles separated by the configured interval.
    ///
    /// With `max_cycles = None` this never returns.
    pub fn run(&mut self, max_cycles: Option<usize>) {
        let mut completed = 0usize;
        loop {
            let outcome = self.run_cycle();
            completed += 1;
            debug!(cycle = completed, replenished = outcome.replenished(), "Cycle finished");

            if max_cycles.is_some_and(|max| completed >= max) {
                return;
            }
            self.io.clock.sleep(self.schedule.interval());
        }
    }

    /// Run a single cycle from `Idle` back to `Idle`.
    pub fn run_cycle(&mut self) -> CycleOutcome {
        self.transition(CycleState::Measuring);
        let before = match self.measure() {
            Ok(m) => m,
            Err(e) => {
                warn!(error = %e, "Measurement failed, skipping this cycle");
                self.notify_text(&format!("Feed level check failed: {e}"));
                self.transition(CycleState::Idle);
                return CycleOutcome::Abandoned {
                    reason: format!("measurement failed: {e}"),
                };
            }
        };

        self.transition(CycleState::Evaluating);
        let level = before.reading.level;
        info!(level, status = %before.reading.status, "Feed level measured");
        self.record(&before.reading, None);

        if level >= self.schedule.min_level {
            self.transition(CycleState::NoAction);
            let caption = format!("Feed level: {:.0}% ({})", level, before.reading.status);
            self.notify_measurement(&before, &caption);
            self.transition(CycleState::Idle);
            return CycleOutcome::NoAction {
                reading: before.reading,
            };
        }

        self.transition(CycleState::Replenishing);
        if let Err(reason) = self.dispense() {
            self.notify_text(&format!("Refill at {level:.0}% failed: {reason}"));
            self.transition(CycleState::Idle);
            return CycleOutcome::Abandoned { reason };
        }

        self.transition(CycleState::PostCheck);
        let after = match self.measure() {
            Ok(m) => Some(m),
            Err(e) => {
                warn!(error = %e, "Post-refill measurement failed");
                None
            }
        };

        match &after {
            Some(after) => {
                let after_level = after.reading.level;
                self.record(&after.reading, Some(REPLENISHED_TAG));
                if after_level < self.schedule.min_level {
                    warn!(
                        before = level,
                        after = after_level,
                        min_level = self.schedule.min_level,
                        "Still below minimum after refill; waiting for the next cycle"
                    );
                }
                let caption = format!(
                    "Refilled: {:.0}% -> {:.0}% ({})",
                    level, after_level, after.reading.status
                );
                self.notify_measurement(after, &caption);
            }
            None => {
                // Keep the refill event in the history even without a second photo.
                self.record(&before.reading, Some(REPLENISHED_TAG));
                self.notify_text(&format!(
                    "Refilled from {level:.0}%, but the follow-up photo failed"
                ));
            }
        }

        self.transition(CycleState::Idle);
        CycleOutcome::Replenished {
            before: before.reading,
            after: after.map(|m| m.reading),
        }
    }

    fn transition(&mut self, next: CycleState) {
        debug!(from = %self.state, to = %next, "State transition");
        self.state = next;
    }

    fn measure(&mut self) -> Result<Measurement> {
        let frame = self.io.camera.capture()?;
        let (region, density) = measure_frame(&frame, &self.estimator)?;
        let reading = normalize(density, &self.calibration, self.io.clock.now())?;
        Ok(Measurement {
            frame,
            region,
            reading,
        })
    }

    /// Hold the dispenser open for the configured time, close it, and let
    /// the feed settle. Returns the reason if the dispenser never opened.
    fn dispense(&mut self) -> std::result::Result<(), String> {
        info!(secs = self.schedule.dispense_secs, "Opening dispenser");
        if let Err(e) = self.io.actuator.open() {
            error!(error = %e, "Dispenser failed to open");
            if let Err(close_err) = self.io.actuator.close() {
                error!(error = %close_err, "Dispenser failed to close");
            }
            return Err(format!("dispenser failed to open: {e}"));
        }

        self.io.clock.sleep(self.schedule.dispense());

        if let Err(e) = self.io.actuator.close() {
            error!(error = %e, "Dispenser failed to close");
            self.notify_text(&format!("URGENT: dispenser may be stuck open: {e}"));
        }
        info!("Dispenser closed");

        self.io.clock.sleep(self.schedule.settle());
        Ok(())
    }

    fn record(&mut self, reading: &LevelReading, tag: Option<&str>) {
        if let Err(e) = self.io.history.append(reading.timestamp, reading.level, tag) {
            error!(error = %e, "Failed to append history record");
        }
    }

    fn notify_text(&self, message: &str) -> bool {
        match self.io.notifier.send_text(message) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Notification failed");
                false
            }
        }
    }

    /// Send the annotated photo when an overlay path is configured, plain text otherwise.
    fn notify_measurement(&self, measurement: &Measurement, caption: &str) -> bool {
        let Some(path) = &self.overlay_path else {
            return self.notify_text(caption);
        };

        let overlay = render_overlay(&measurement.frame, &measurement.region, &measurement.reading);
        if let Err(e) = save_rgb_image(&overlay, path) {
            warn!(error = %e, path = %path.display(), "Could not save overlay, sending text only");
            return self.notify_text(caption);
        }

        match self.io.notifier.send_image_with_caption(path, caption) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Image notification failed");
                false
            }
        }
    }
}
