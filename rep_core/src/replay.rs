//! Reading recorded landmark frames.
//!
//! Recordings are JSON Lines: one frame per line, each frame a JSON array of
//! landmarks (`{"x": .., "y": .., "z": .., "visibility": ..}`). Blank lines
//! are skipped. Malformed lines are logged and skipped so that one corrupt
//! frame does not discard a whole recording.

use crate::{LandmarkFrame, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read all frames from a JSONL recording
pub fn read_frames(path: &Path) -> Result<Vec<LandmarkFrame>> {
    let file = File::open(path)?;
    let frames = read_frames_from(BufReader::new(file))?;
    tracing::debug!("Read {} frames from {:?}", frames.len(), path);
    Ok(frames)
}

/// Read frames from any buffered reader
pub fn read_frames_from<R: BufRead>(reader: R) -> Result<Vec<LandmarkFrame>> {
    let mut frames = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<LandmarkFrame>(&line) {
            Ok(frame) => frames.push(frame),
            Err(e) => {
                tracing::warn!("Failed to parse frame at line {}: {}", line_num + 1, e);
            }
        }
    }

    Ok(frames)
}
