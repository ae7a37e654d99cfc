use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{FeedwatchError, Result};
use crate::level::CalibrationReference;

/// Durable storage for the calibration pair.
pub trait CalibrationStore {
    /// Fails with [`FeedwatchError::CalibrationMissing`] when nothing is stored.
    fn load(&self) -> Result<CalibrationReference>;
    fn save(&self, reference: &CalibrationReference) -> Result<()>;
}

/// Plain text file: empty density on the first line, full density on the second.
#[derive(Clone, Debug)]
pub struct FileCalibrationStore {
    path: PathBuf,
}

impl FileCalibrationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CalibrationStore for FileCalibrationStore {
    fn load(&self) -> Result<CalibrationReference> {
        if !self.path.exists() {
            return Err(FeedwatchError::CalibrationMissing(self.path.clone()));
        }
        let contents = fs::read_to_string(&self.path)?;
        parse_calibration(&contents)
    }

    fn save(&self, reference: &CalibrationReference) -> Result<()> {
        let contents = format!("{}\n{}\n", reference.empty_density, reference.full_density);
        fs::write(&self.path, contents)?;
        info!(path = %self.path.display(), "Calibration saved");
        Ok(())
    }
}

/// Parse the two-line calibration format. Blank lines are skipped.
/// Ordering is not checked here; callers validate before use.
pub fn parse_calibration(contents: &str) -> Result<CalibrationReference> {
    let mut values = contents.lines().map(str::trim).filter(|l| !l.is_empty());

    let mut next_value = |name: &str| -> Result<f64> {
        let line = values
            .next()
            .ok_or_else(|| FeedwatchError::CalibrationParse(format!("missing {name} density")))?;
        line.parse::<f64>().map_err(|_| {
            FeedwatchError::CalibrationParse(format!("{name} density is not a number: {line:?}"))
        })
    };

    let empty_density = next_value("empty")?;
    let full_density = next_value("full")?;

    Ok(CalibrationReference {
        empty_density,
        full_density,
    })
}
