//! Input file resolution
//!
//! Turns the CLI's input selection (a directory to scan, or an explicit
//! comma-separated file list) into a validated list of audio file paths.

use crate::error::{AudioError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recognized audio file extensions (lowercase)
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav"];

/// Where the input files come from - exactly one variant per invocation
#[derive(Debug, Clone)]
pub enum InputSelection {
    /// Scan the top level of this directory for audio files
    Directory(PathBuf),

    /// Comma-separated list of explicit file paths
    FileList(String),
}

/// Resolve an input selection into an ordered list of existing audio files.
///
/// Directory listings are sorted so report row order is deterministic across
/// filesystems. Explicit file lists keep the order the user gave; any segment
/// that does not name an existing file aborts the whole resolution.
///
/// A directory containing no recognized audio files resolves to an empty
/// list - deciding whether that is fatal is the pipeline's call.
pub fn resolve(selection: &InputSelection) -> Result<Vec<PathBuf>> {
    match selection {
        InputSelection::Directory(dir) => resolve_directory(dir),
        InputSelection::FileList(list) => resolve_file_list(list),
    }
}

fn resolve_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(AudioError::InvalidDirectory(dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_audio_file(path))
        .collect();

    files.sort();

    log::debug!("Resolved {} audio file(s) in {:?}", files.len(), dir);
    Ok(files)
}

fn resolve_file_list(list: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for segment in list.split(',') {
        let path = PathBuf::from(segment.trim());
        if !path.is_file() {
            return Err(AudioError::InvalidFile(path));
        }
        files.push(path);
    }

    Ok(files)
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| AUDIO_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn directory_with_no_audio_files_resolves_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), b"text").unwrap();
        fs::write(dir.path().join("image.png"), b"png").unwrap();

        let files = resolve(&InputSelection::Directory(dir.path().to_path_buf())).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn directory_listing_is_filtered_and_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.wav"), b"").unwrap();
        fs::write(dir.path().join("a.mp3"), b"").unwrap();
        fs::write(dir.path().join("readme.md"), b"").unwrap();
        fs::create_dir(dir.path().join("nested.wav")).unwrap();

        let files = resolve(&InputSelection::Directory(dir.path().to_path_buf())).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.mp3", "b.wav"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let result = resolve(&InputSelection::Directory(PathBuf::from(
            "/definitely/not/here",
        )));
        assert!(matches!(result, Err(AudioError::InvalidDirectory(_))));
    }

    #[test]
    fn file_list_preserves_order_and_trims_whitespace() {
        let dir = TempDir::new().unwrap();
        let b = dir.path().join("b.wav");
        let a = dir.path().join("a.wav");
        fs::write(&b, b"").unwrap();
        fs::write(&a, b"").unwrap();

        let list = format!(" {} , {}", b.display(), a.display());
        let files = resolve(&InputSelection::FileList(list)).unwrap();
        assert_eq!(files, vec![b, a]);
    }

    #[test]
    fn file_list_with_missing_entry_names_the_offender() {
        let dir = TempDir::new().unwrap();
        let existing = dir.path().join("real.wav");
        fs::write(&existing, b"").unwrap();

        let list = format!("{},{}", existing.display(), "missing.wav");
        let result = resolve(&InputSelection::FileList(list));
        match result {
            Err(AudioError::InvalidFile(path)) => {
                assert_eq!(path, PathBuf::from("missing.wav"));
            }
            other => panic!("expected InvalidFile, got {:?}", other),
        }
    }

    #[test]
    fn file_list_missing_entry_fails_regardless_of_position() {
        let dir = TempDir::new().unwrap();
        let existing = dir.path().join("real.wav");
        fs::write(&existing, b"").unwrap();

        let list = format!("{},{}", "missing.wav", existing.display());
        let result = resolve(&InputSelection::FileList(list));
        assert!(matches!(result, Err(AudioError::InvalidFile(_))));
    }
}
