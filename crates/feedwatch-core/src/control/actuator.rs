use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{FeedwatchError, Result};

/// The dispensing mechanism. Each call is a single positioning command;
/// how long it stays open is up to the caller.
pub trait Actuator {
    fn open(&mut self) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActuatorConfig {
    /// Log commands without touching hardware.
    #[default]
    DryRun,
    /// Hobby servo driven through the Linux sysfs PWM interface.
    SysfsPwm(ServoConfig),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServoConfig {
    #[serde(default)]
    pub chip: u32,
    #[serde(default)]
    pub channel: u32,
    /// PWM period in nanoseconds (20 ms for standard servos).
    #[serde(default = "default_period_ns")]
    pub period_ns: u64,
    /// Pulse width that opens the dispenser.
    #[serde(default = "default_open_pulse_ns")]
    pub open_pulse_ns: u64,
    /// Pulse width that closes the dispenser.
    #[serde(default = "default_close_pulse_ns")]
    pub close_pulse_ns: u64,
}

fn default_period_ns() -> u64 {
    20_000_000
}
fn default_open_pulse_ns() -> u64 {
    2_000_000
}
fn default_close_pulse_ns() -> u64 {
    1_000_000
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            chip: 0,
            channel: 0,
            period_ns: default_period_ns(),
            open_pulse_ns: default_open_pulse_ns(),
            close_pulse_ns: default_close_pulse_ns(),
        }
    }
}

/// Build the actuator described by `config`.
pub fn build_actuator(config: &ActuatorConfig) -> Result<Box<dyn Actuator>> {
    match config {
        ActuatorConfig::DryRun => Ok(Box::new(DryRunActuator)),
        ActuatorConfig::SysfsPwm(servo) => Ok(Box::new(SysfsServo::new(servo.clone())?)),
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DryRunActuator;

impl Actuator for DryRunActuator {
    fn open(&mut self) -> Result<()> {
        info!("Dispenser open (dry run)");
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        info!("Dispenser close (dry run)");
        Ok(())
    }
}

/// Servo on `/sys/class/pwm/pwmchipN/pwmM`.
#[derive(Debug)]
pub struct SysfsServo {
    config: ServoConfig,
    channel_dir: PathBuf,
}

impl SysfsServo {
    /// Export and enable the PWM channel, parking the servo in the closed position.
    pub fn new(config: ServoConfig) -> Result<Self> {
        let chip_dir = PathBuf::from(format!("/sys/class/pwm/pwmchip{}", config.chip));
        let channel_dir = chip_dir.join(format!("pwm{}", config.channel));

        if !channel_dir.exists() {
            write_attr(&chip_dir.join("export"), config.channel)?;
        }

        let servo = Self {
            config,
            channel_dir,
        };
        servo.write("period", servo.config.period_ns)?;
        servo.write("duty_cycle", servo.config.close_pulse_ns)?;
        servo.write("enable", 1)?;
        Ok(servo)
    }

    fn write(&self, attr: &str, value: impl std::fmt::Display) -> Result<()> {
        write_attr(&self.channel_dir.join(attr), value)
    }
}

impl Actuator for SysfsServo {
    fn open(&mut self) -> Result<()> {
        debug!(pulse_ns = self.config.open_pulse_ns, "Servo open");
        self.write("duty_cycle", self.config.open_pulse_ns)
    }

    fn close(&mut self) -> Result<()> {
        debug!(pulse_ns = self.config.close_pulse_ns, "Servo close");
        self.write("duty_cycle", self.config.close_pulse_ns)
    }
}

fn write_attr(path: &Path, value: impl std::fmt::Display) -> Result<()> {
    fs::write(path, value.to_string())
        .map_err(|e| FeedwatchError::Actuator(format!("{}: {e}", path.display())))
}
