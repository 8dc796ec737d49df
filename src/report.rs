//! Report output
//!
//! Persists the property table as CSV and formats it for the console. All
//! console printing goes through the [`Reporter`] trait so the pipeline can
//! run silently in library and test contexts.

use crate::error::Result;
use crate::properties::PropertyTable;
use std::path::{Path, PathBuf};

/// File name of the CSV report inside the output directory
pub const CSV_FILE_NAME: &str = "audio_properties.csv";

/// Write the property table to `<output_dir>/audio_properties.csv`.
///
/// Header row comes from the table's column schema; no index column is
/// emitted. Returns the path of the written file.
pub fn write_csv(table: &PropertyTable, output_dir: &Path) -> Result<PathBuf> {
    let csv_path = output_dir.join(CSV_FILE_NAME);
    let mut writer = csv::Writer::from_path(&csv_path)?;

    for row in table.rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;

    log::info!("Audio properties saved to: {}", csv_path.display());
    Ok(csv_path)
}

/// Format the property table as a bordered text table.
pub fn format_table(table: &PropertyTable) -> String {
    let headers = PropertyTable::HEADERS;
    let rows: Vec<[String; 5]> = table
        .rows()
        .iter()
        .map(|row| {
            [
                row.path.display().to_string(),
                row.duration_seconds.to_string(),
                row.channels.to_string(),
                row.frame_rate_hz.to_string(),
                row.sample_width_bytes.to_string(),
            ]
        })
        .collect();

    let mut widths: [usize; 5] = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let border = {
        let mut line = String::from("+");
        for width in widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line
    };

    let format_row = |cells: &[String]| {
        let mut line = String::from("|");
        for (width, cell) in widths.iter().copied().zip(cells.iter()) {
            line.push_str(&format!(" {:<w$} |", cell, w = width));
        }
        line
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    out.push_str(&format_row(&header_cells));
    out.push('\n');
    out.push_str(&border);
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    out.push_str(&border);
    out
}

/// Presentation seam for the pipeline's human-readable output
pub trait Reporter {
    /// Called once after the CSV report is written
    fn table(&self, table: &PropertyTable);
}

/// Prints the formatted table to standard output
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn table(&self, table: &PropertyTable) {
        println!("\nAudio File Properties:");
        println!("{}", format_table(table));
    }
}

/// Discards all presentation output; for library callers and tests
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn table(&self, _table: &PropertyTable) {}
}
