//! Audio property extraction
//!
//! Decodes each resolved file and accumulates one metadata row per file into
//! the report table, in resolution order.

use crate::decode;
use crate::error::Result;
use serde::Serialize;
use std::path::PathBuf;

/// Container-level properties of one audio file.
///
/// Field renames double as the CSV header row.
#[derive(Debug, Clone, Serialize)]
pub struct AudioMetadata {
    /// Path to the audio file as given on the command line
    #[serde(rename = "File")]
    pub path: PathBuf,

    /// Total duration in seconds (fractional, not rounded)
    #[serde(rename = "Duration (seconds)")]
    pub duration_seconds: f64,

    /// Channel count
    #[serde(rename = "Channels")]
    pub channels: u16,

    /// Samples per second per channel
    #[serde(rename = "Frame Rate (Hz)")]
    pub frame_rate_hz: u32,

    /// Bytes per stored sample
    #[serde(rename = "Sample Width (bytes)")]
    pub sample_width_bytes: u16,
}

/// Ordered collection of per-file metadata rows
#[derive(Debug, Clone, Default)]
pub struct PropertyTable {
    rows: Vec<AudioMetadata>,
}

impl PropertyTable {
    /// Column headers, in CSV column order
    pub const HEADERS: [&'static str; 5] = [
        "File",
        "Duration (seconds)",
        "Channels",
        "Frame Rate (Hz)",
        "Sample Width (bytes)",
    ];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: AudioMetadata) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[AudioMetadata] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Decode every file and build the property table.
///
/// The first decode failure aborts the whole batch; no partial table is
/// returned.
pub fn extract_properties(files: &[PathBuf]) -> Result<PropertyTable> {
    let mut table = PropertyTable::new();

    for (i, path) in files.iter().enumerate() {
        log::info!(
            "[{}/{}] Reading properties: {}",
            i + 1,
            files.len(),
            path.display()
        );

        let decoded = decode::decode(path)?;
        table.push(AudioMetadata {
            path: path.clone(),
            duration_seconds: decoded.duration_seconds(),
            channels: decoded.channels,
            frame_rate_hz: decoded.frame_rate_hz,
            sample_width_bytes: decoded.sample_width_bytes,
        });
    }

    Ok(table)
}
