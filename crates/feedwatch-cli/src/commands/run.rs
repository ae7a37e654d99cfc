use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use feedwatch_core::control::actuator::build_actuator;
use feedwatch_core::control::camera::{FrameSource, SnapshotCamera};
use feedwatch_core::control::controller::Collaborators;
use feedwatch_core::control::notify::build_notifier;
use feedwatch_core::control::{ReplenishmentController, SystemClock};
use feedwatch_core::io::calibration_store::FileCalibrationStore;
use feedwatch_core::io::history::CsvHistory;
use feedwatch_core::level::load_or_calibrate;
use tracing::info;

use super::load_config;

#[derive(Args)]
pub struct RunArgs {
    /// Monitor config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Stop after this many cycles instead of running forever
    #[arg(long)]
    pub cycles: Option<usize>,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    let store = FileCalibrationStore::new(&config.calibration.path);
    let calibration = load_or_calibrate(&store, &config.calibration, &config.estimator)
        .context("Cannot start without a valid calibration")?;

    let mut camera = SnapshotCamera::new(config.camera.clone());
    camera
        .check_ready()
        .context("Camera unavailable at startup")?;

    let actuator = build_actuator(&config.actuator).context("Failed to initialise actuator")?;
    let history = CsvHistory::open(&config.output.history).with_context(|| {
        format!(
            "Failed to open history file {}",
            config.output.history.display()
        )
    })?;

    let io = Collaborators {
        camera: Box::new(camera),
        actuator,
        notifier: build_notifier(&config.notifier),
        history: Box::new(history),
        clock: Box::new(SystemClock),
    };

    let mut controller = ReplenishmentController::new(
        calibration,
        config.estimator.clone(),
        config.schedule.clone(),
        io,
    )?;
    if let Some(ref overlay) = config.output.overlay {
        controller = controller.with_overlay(overlay);
    }

    info!(
        min_level = config.schedule.min_level,
        interval_secs = config.schedule.interval_secs,
        "Monitoring started"
    );
    controller.run(args.cycles);
    Ok(())
}
