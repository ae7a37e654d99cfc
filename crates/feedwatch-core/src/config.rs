use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::control::actuator::ActuatorConfig;
use crate::control::camera::CameraConfig;
use crate::control::notify::NotifierConfig;
use crate::control::ScheduleConfig;
use crate::detection::EstimatorConfig;
use crate::level::CalibrationConfig;

/// Full configuration of the monitor, usually read from a TOML file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub actuator: ActuatorConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
    #[serde(default)]
    pub estimator: EstimatorConfig,
    #[serde(default)]
    pub calibration: CalibrationConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Files written while monitoring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Append-only CSV of level readings.
    #[serde(default = "default_history")]
    pub history: PathBuf,
    /// Annotated photo attached to notifications.
    pub overlay: Option<PathBuf>,
    /// Material mask written by one-shot measurements.
    pub debug_mask: Option<PathBuf>,
}

fn default_history() -> PathBuf {
    PathBuf::from("history.csv")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            history: default_history(),
            overlay: Some(PathBuf::from("result.jpg")),
            debug_mask: None,
        }
    }
}
