use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::Result;

/// Timestamp layout used in history rows.
pub const HISTORY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Append-only log of level readings.
pub trait HistoryLog {
    fn append(&mut self, timestamp: DateTime<Local>, level: f64, tag: Option<&str>) -> Result<()>;
}

/// Comma-separated `timestamp,level[,tag]` rows, appended and never rewritten.
#[derive(Debug)]
pub struct CsvHistory {
    path: PathBuf,
    file: File,
}

impl CsvHistory {
    /// Open (creating if needed) the history file for appending.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryLog for CsvHistory {
    fn append(&mut self, timestamp: DateTime<Local>, level: f64, tag: Option<&str>) -> Result<()> {
        let row = format_row(timestamp, level, tag);
        writeln!(self.file, "{row}")?;
        self.file.flush()?;
        Ok(())
    }
}

/// Render one history row without the trailing newline.
pub fn format_row(timestamp: DateTime<Local>, level: f64, tag: Option<&str>) -> String {
    let time = timestamp.format(HISTORY_TIME_FORMAT);
    match tag {
        Some(tag) => format!("{time},{level:.1},{tag}"),
        None => format!("{time},{level:.1}"),
    }
}
