//! Per-frame CSV trace of a counting run.
//!
//! Each processed frame becomes one row, accepted or not, so a recording can
//! be inspected offline (e.g. to tune a profile's angle domain).

use crate::tracker::Reading;
use crate::validator::Rejected;
use crate::{Direction, RepCounterState, Result};
use std::fs::File;
use std::path::Path;

/// A row in the trace CSV
#[derive(Debug, serde::Serialize, PartialEq)]
pub struct TraceRow {
    pub frame: usize,
    pub accepted: bool,
    pub angle: f32,
    pub percentage: u8,
    pub count: f32,
    pub direction: Direction,
    pub reason: Option<String>,
}

impl TraceRow {
    /// Row for an accepted frame
    pub fn accepted(frame: usize, reading: &Reading) -> Self {
        Self {
            frame,
            accepted: true,
            angle: reading.angle,
            percentage: reading.percentage,
            count: reading.count,
            direction: reading.direction,
            reason: None,
        }
    }

    /// Row for a rejected frame, showing the state that was held
    pub fn rejected(frame: usize, held: &RepCounterState, reason: &Rejected) -> Self {
        Self {
            frame,
            accepted: false,
            angle: held.last_angle,
            percentage: held.last_percentage,
            count: held.count(),
            direction: held.direction,
            reason: Some(reason.to_string()),
        }
    }
}

/// CSV writer for trace rows
pub struct TraceSink {
    writer: csv::Writer<File>,
    rows: usize,
}

impl TraceSink {
    /// Create (or truncate) a trace file, creating parent directories
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let writer = csv::Writer::from_path(path)?;
        tracing::debug!("Writing trace to {:?}", path);
        Ok(Self { writer, rows: 0 })
    }

    pub fn write(&mut self, row: &TraceRow) -> Result<()> {
        self.writer.serialize(row)?;
        self.rows += 1;
        Ok(())
    }

    /// Flush and sync to disk, returning the number of rows written
    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        let file = self
            .writer
            .into_inner()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        file.sync_all()?;
        tracing::info!("Wrote {} trace rows", self.rows);
        Ok(self.rows)
    }
}
