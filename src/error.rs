//! Error types for the analysis pipeline

use std::path::PathBuf;

/// Errors that can occur while resolving, decoding, or reporting on audio files
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("{} is not a valid directory", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("{} is not a valid file", .0.display())]
    InvalidFile(PathBuf),

    /// Resolution produced zero inputs; there is nothing to analyze
    #[error("no audio files found")]
    NoAudioFiles,

    #[error("failed to decode {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("failed to render waveform for {}: {reason}", .path.display())]
    Render { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, AudioError>;
