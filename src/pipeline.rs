//! Analysis pipeline orchestration

use crate::error::AudioError;
use crate::properties::{self, PropertyTable};
use crate::report::{self, Reporter};
use crate::resolve::{self, InputSelection};
use crate::waveform;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Configuration for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory the CSV report and waveform plots are written to.
    /// Created recursively if absent, reused (never cleared) if present.
    pub output_dir: PathBuf,

    /// Whether to open each waveform plot in the platform viewer after
    /// saving it
    pub view_waveforms: bool,
}

impl PipelineConfig {
    /// Create a configuration with viewing disabled
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            view_waveforms: false,
        }
    }

    /// Enable or disable interactive waveform viewing
    pub fn with_view_waveforms(mut self, view: bool) -> Self {
        self.view_waveforms = view;
        self
    }
}

/// Everything a completed run produced
#[derive(Debug)]
pub struct PipelineSummary {
    /// The in-memory property table, one row per analyzed file
    pub table: PropertyTable,

    /// Path of the written CSV report
    pub csv_path: PathBuf,

    /// Paths of the saved waveform plots, in input order
    pub waveform_paths: Vec<PathBuf>,
}

/// Sequential analysis pipeline: resolve inputs, extract properties, write
/// the report, render waveforms
pub struct AnalysisPipeline<R: Reporter> {
    config: PipelineConfig,
    reporter: R,
}

impl<R: Reporter> AnalysisPipeline<R> {
    pub fn new(config: PipelineConfig, reporter: R) -> Self {
        Self { config, reporter }
    }

    /// Run the complete analysis for one input selection.
    ///
    /// Stages run strictly in order; the first failure aborts the run with
    /// context naming the stage. Nothing is written before resolution
    /// succeeds and at least one input file is found.
    pub fn run(&self, selection: &InputSelection) -> Result<PipelineSummary> {
        // Stage 1: resolve input files
        let files = resolve::resolve(selection).context("Failed to resolve input files")?;
        if files.is_empty() {
            return Err(AudioError::NoAudioFiles.into());
        }
        log::info!("Analyzing {} audio file(s)", files.len());

        // Stage 2: ensure the output directory exists
        if self.config.output_dir.exists() {
            log::info!(
                "Using existing output directory: {}",
                self.config.output_dir.display()
            );
        } else {
            fs::create_dir_all(&self.config.output_dir).with_context(|| {
                format!(
                    "Failed to create output directory: {}",
                    self.config.output_dir.display()
                )
            })?;
            log::info!(
                "Created output directory: {}",
                self.config.output_dir.display()
            );
        }

        // Stage 3: extract per-file properties
        log::info!("Analyzing audio properties...");
        let table =
            properties::extract_properties(&files).context("Failed to analyze audio properties")?;

        // Stage 4: write the report
        let csv_path = report::write_csv(&table, &self.config.output_dir)
            .context("Failed to write audio property report")?;
        self.reporter.table(&table);

        // Stage 5: render waveform plots
        log::info!("Generating and saving waveform plots...");
        let waveform_paths = waveform::render_waveforms(
            &files,
            &self.config.output_dir,
            self.config.view_waveforms,
        )
        .context("Failed to render waveforms")?;

        log::info!("Analysis complete!");
        Ok(PipelineSummary {
            table,
            csv_path,
            waveform_paths,
        })
    }
}
