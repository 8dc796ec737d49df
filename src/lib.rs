//! Audiopsy - batch audio file inspection
//!
//! Resolves a set of MP3/WAV input files, extracts container-level
//! properties (duration, channels, frame rate, sample width) into a CSV
//! report, and renders a waveform plot per file.

pub mod decode;
pub mod error;
pub mod pipeline;
pub mod properties;
pub mod report;
pub mod resolve;
pub mod waveform;

pub use error::AudioError;
pub use pipeline::{AnalysisPipeline, PipelineConfig, PipelineSummary};
pub use report::{ConsoleReporter, Reporter, SilentReporter};
pub use resolve::InputSelection;
