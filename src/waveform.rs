//! Waveform plot rendering
//!
//! Re-decodes each file, collapses it to a single amplitude series, and saves
//! a line plot of amplitude against sample index as a PNG in the output
//! directory.

use crate::decode;
use crate::error::{AudioError, Result};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

const PLOT_SIZE: (u32, u32) = (1200, 400);
const WAVE_COLOR: RGBColor = RGBColor(128, 128, 128);

/// Render one waveform PNG per input file.
///
/// Plots are saved as `<file name>_waveform.png` under `output_dir`. With
/// `view` set, each saved plot is additionally opened in the platform image
/// viewer; viewing is best-effort and never blocks the batch. The first
/// decode or render failure aborts the remaining files.
pub fn render_waveforms(files: &[PathBuf], output_dir: &Path, view: bool) -> Result<Vec<PathBuf>> {
    let mut artifacts = Vec::with_capacity(files.len());

    for (i, path) in files.iter().enumerate() {
        log::info!(
            "[{}/{}] Rendering waveform: {}",
            i + 1,
            files.len(),
            path.display()
        );

        let decoded = decode::decode(path)?;
        if decoded.channels > 2 {
            log::warn!(
                "{} has {} channels; plotting raw interleaved samples",
                path.display(),
                decoded.channels
            );
        }
        let samples = decoded.mono();

        let plot_path = output_dir.join(plot_file_name(path));
        render_plot(&samples, path, &plot_path)?;
        log::info!("Waveform saved to: {}", plot_path.display());

        if view {
            open_in_viewer(&plot_path);
        }

        artifacts.push(plot_path);
    }

    Ok(artifacts)
}

/// Plot file name for an input: the full file name with `_waveform.png`
/// appended, so `a.wav` becomes `a.wav_waveform.png`.
pub fn plot_file_name(input: &Path) -> String {
    let base = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    format!("{base}_waveform.png")
}

fn render_plot(samples: &[f32], input: &Path, plot_path: &Path) -> Result<()> {
    let title = format!(
        "Waveform of {}",
        input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string())
    );

    // Amplitude range with a small margin; flat signals get a minimum span
    // so the axis stays well-formed
    let min_amp = samples.iter().copied().fold(f32::INFINITY, f32::min) as f64;
    let max_amp = samples.iter().copied().fold(f32::NEG_INFINITY, f32::max) as f64;
    let span = (max_amp - min_amp).max(0.1);
    let y_margin = span * 0.05;

    let draw = || -> std::result::Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::new(plot_path, PLOT_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&title, ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(
                0..samples.len(),
                (min_amp - y_margin)..(max_amp + y_margin),
            )?;

        chart
            .configure_mesh()
            .x_desc("Sample")
            .y_desc("Amplitude")
            .draw()?;

        chart.draw_series(LineSeries::new(
            samples.iter().enumerate().map(|(i, &v)| (i, f64::from(v))),
            &WAVE_COLOR,
        ))?;

        root.present()?;
        Ok(())
    };

    draw().map_err(|e| AudioError::Render {
        path: input.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Open a saved plot in the platform image viewer, without waiting on it.
fn open_in_viewer(plot_path: &Path) {
    #[cfg(target_os = "macos")]
    let command = "open";
    #[cfg(target_os = "windows")]
    let command = "explorer";
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let command = "xdg-open";

    match std::process::Command::new(command).arg(plot_path).spawn() {
        Ok(_) => log::debug!("Opened viewer for {}", plot_path.display()),
        Err(e) => log::warn!("Could not open viewer for {}: {}", plot_path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_wav(path: &Path, channels: u16, sample_rate: u32, frames: usize) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..frames {
            for _ in 0..channels {
                let t = i as f32 / sample_rate as f32;
                let value = (t * 440.0 * std::f32::consts::TAU).sin();
                writer.write_sample((value * 16000.0) as i16).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn plot_file_name_keeps_audio_extension() {
        assert_eq!(plot_file_name(Path::new("in/a.wav")), "a.wav_waveform.png");
        assert_eq!(plot_file_name(Path::new("b.mp3")), "b.mp3_waveform.png");
    }

    #[test]
    fn renders_one_png_per_file() {
        let dir = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let wav = dir.path().join("tone.wav");
        write_wav(&wav, 1, 8000, 800);

        let artifacts = render_waveforms(&[wav], out.path(), false).unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0], out.path().join("tone.wav_waveform.png"));
        assert!(artifacts[0].exists());
        assert!(std::fs::metadata(&artifacts[0]).unwrap().len() > 0);
    }

    #[test]
    fn undecodable_file_aborts_rendering() {
        let dir = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let bad = dir.path().join("bad.wav");
        std::fs::write(&bad, b"nope").unwrap();

        let result = render_waveforms(&[bad], out.path(), false);
        assert!(matches!(result, Err(AudioError::Decode { .. })));
    }
}
