use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CYCLE_INTERVAL_SECS, DEFAULT_DISPENSE_SECS, DEFAULT_MIN_LEVEL, DEFAULT_SETTLE_SECS,
};

/// Timing and threshold of the monitoring loop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Level (%) below which the dispenser runs.
    #[serde(default = "default_min_level")]
    pub min_level: f64,
    /// Wait between cycles.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// How long the dispenser is held open.
    #[serde(default = "default_dispense_secs")]
    pub dispense_secs: u64,
    /// Wait after closing before the post-check photo.
    #[serde(default = "default_settle_secs")]
    pub settle_secs: u64,
}

fn default_min_level() -> f64 {
    DEFAULT_MIN_LEVEL
}
fn default_interval_secs() -> u64 {
    DEFAULT_CYCLE_INTERVAL_SECS
}
fn default_dispense_secs() -> u64 {
    DEFAULT_DISPENSE_SECS
}
fn default_settle_secs() -> u64 {
    DEFAULT_SETTLE_SECS
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            min_level: DEFAULT_MIN_LEVEL,
            interval_secs: DEFAULT_CYCLE_INTERVAL_SECS,
            dispense_secs: DEFAULT_DISPENSE_SECS,
            settle_secs: DEFAULT_SETTLE_SECS,
        }
    }
}

impl ScheduleConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn dispense(&self) -> Duration {
        Duration::from_secs(self.dispense_secs)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_secs(self.settle_secs)
    }
}
