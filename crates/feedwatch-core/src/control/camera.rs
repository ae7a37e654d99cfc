use std::path::PathBuf;
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::DEFAULT_WARMUP_FRAMES;
use crate::error::{FeedwatchError, Result};
use crate::frame::Frame;
use crate::io::image_io::load_frame;

/// Anything that can produce a photo of the hopper.
pub trait FrameSource {
    /// Return a stable frame. Empty frames are reported as capture errors.
    fn capture(&mut self) -> Result<Frame>;

    /// Confirm the camera works before monitoring starts.
    fn check_ready(&mut self) -> Result<()> {
        let frame = self.capture()?;
        frame.ensure_measurable()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Program and arguments that write one photo to `snapshot`.
    /// When empty, `snapshot` is read as-is (written by some other process).
    #[serde(default)]
    pub command: Vec<String>,
    /// Where the photo is written.
    #[serde(default = "default_snapshot")]
    pub snapshot: PathBuf,
    /// Captures discarded before the one that is analysed.
    #[serde(default = "default_warmup_frames")]
    pub warmup_frames: usize,
}

fn default_snapshot() -> PathBuf {
    PathBuf::from("snapshot.jpg")
}
fn default_warmup_frames() -> usize {
    DEFAULT_WARMUP_FRAMES
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            command: Vec::new(),
            snapshot: default_snapshot(),
            warmup_frames: DEFAULT_WARMUP_FRAMES,
        }
    }
}

/// Captures by running an external still-capture program.
#[derive(Clone, Debug)]
pub struct SnapshotCamera {
    config: CameraConfig,
}

impl SnapshotCamera {
    pub fn new(config: CameraConfig) -> Self {
        Self { config }
    }

    fn run_command(&self) -> Result<()> {
        let Some((program, args)) = self.config.command.split_first() else {
            return Ok(());
        };
        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|e| FeedwatchError::Capture(format!("cannot run {program}: {e}")))?;
        if !status.success() {
            return Err(FeedwatchError::Capture(format!(
                "{program} exited with {status}"
            )));
        }
        Ok(())
    }
}

impl FrameSource for SnapshotCamera {
    fn capture(&mut self) -> Result<Frame> {
        if !self.config.command.is_empty() {
            for i in 0..self.config.warmup_frames {
                debug!(frame = i + 1, "Discarding warm-up capture");
                self.run_command()?;
            }
            self.run_command()?;
        }

        let frame = load_frame(&self.config.snapshot).map_err(|e| {
            FeedwatchError::Capture(format!("{}: {e}", self.config.snapshot.display()))
        })?;
        if frame.is_empty() {
            return Err(FeedwatchError::Capture("empty frame".into()));
        }
        Ok(frame)
    }
}
