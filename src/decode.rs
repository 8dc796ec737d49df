//! Audio decoding using symphonia
//!
//! Wraps the probe/decode dance behind a single call that yields the full
//! interleaved sample buffer plus the container-level properties the report
//! needs (channels, frame rate, sample width, duration).

use crate::error::{AudioError, Result};
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Fully decoded audio: interleaved samples plus container properties
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// Interleaved amplitude samples, all channels
    pub samples: Vec<f32>,

    /// Channel count
    pub channels: u16,

    /// Samples per second per channel
    pub frame_rate_hz: u32,

    /// Bytes used to store one sample
    pub sample_width_bytes: u16,
}

impl DecodedAudio {
    /// Number of frames (per-channel sample count)
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.channels.max(1))
    }

    /// Total duration in seconds, derived from frame count and frame rate
    pub fn duration_seconds(&self) -> f64 {
        self.frames() as f64 / f64::from(self.frame_rate_hz)
    }

    /// Collapse to a single amplitude series.
    ///
    /// Stereo input is averaged per frame; mono passes through. Any other
    /// channel count is unsupported and yields the raw interleaved buffer
    /// unchanged.
    pub fn mono(&self) -> Vec<f32> {
        match self.channels {
            2 => self
                .samples
                .chunks_exact(2)
                .map(|pair| (pair[0] + pair[1]) / 2.0)
                .collect(),
            _ => self.samples.clone(),
        }
    }
}

/// Decode an audio file to PCM samples and container properties.
///
/// Handles any container symphonia was built with (MP3 and WAV here). Files
/// that cannot be opened, probed, or that yield no decodable samples fail
/// with [`AudioError::Decode`] carrying the path and the underlying cause.
pub fn decode(path: &Path) -> Result<DecodedAudio> {
    log::debug!("Decoding: {:?}", path);

    let file = std::fs::File::open(path)
        .map_err(|e| decode_error(path, format!("failed to open file: {e}")))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // Probe the file format
    let mut hint = Hint::new();
    if let Some(ext) = path.extension() {
        hint.with_extension(ext.to_str().unwrap_or(""));
    }

    let format_opts = FormatOptions::default();
    let metadata_opts = MetadataOptions::default();

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &format_opts, &metadata_opts)
        .map_err(|e| decode_error(path, format!("failed to probe audio format: {e}")))?;

    let mut format = probed.format;

    // Find the first audio track
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
        .ok_or_else(|| decode_error(path, "no audio track found".to_string()))?;

    let track_id = track.id;
    let frame_rate_hz = track
        .codec_params
        .sample_rate
        .ok_or_else(|| decode_error(path, "no sample rate in audio track".to_string()))?;

    // MP3 reports no stored sample width; decoded PCM is 16-bit there
    let sample_width_bytes = track
        .codec_params
        .bits_per_sample
        .map(|bits| bits.div_ceil(8) as u16)
        .unwrap_or(2);

    let dec_opts = DecoderOptions::default();
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &dec_opts)
        .map_err(|e| decode_error(path, format!("failed to create decoder: {e}")))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut channels: u16 = 0;

    // Decode audio packets
    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break; // End of file
            }
            Err(e) => {
                log::warn!("Error reading packet: {:?}", e);
                break;
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(e) => {
                log::warn!("Error decoding packet: {:?}", e);
                continue;
            }
        };

        let spec = *decoded.spec();
        channels = spec.channels.count() as u16;
        let duration = decoded.capacity() as u64;

        let mut sample_buf = SampleBuffer::<f32>::new(duration, spec);
        sample_buf.copy_interleaved_ref(decoded);
        samples.extend_from_slice(sample_buf.samples());
    }

    if samples.is_empty() || channels == 0 {
        return Err(decode_error(path, "no decodable audio samples".to_string()));
    }

    log::debug!(
        "Decoded {} samples, {} channel(s) at {}Hz",
        samples.len(),
        channels,
        frame_rate_hz
    );

    Ok(DecodedAudio {
        samples,
        channels,
        frame_rate_hz,
        sample_width_bytes,
    })
}

fn decode_error(path: &Path, reason: String) -> AudioError {
    AudioError::Decode {
        path: path.to_path_buf(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_wav(path: &Path, channels: u16, sample_rate: u32, frames: usize) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..frames {
            for ch in 0..channels {
                let value = ((i as i32 % 100) - 50) * 100 * (ch as i32 + 1);
                writer.write_sample(value as i16).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn decode_requires_existing_file() {
        let result = decode(&PathBuf::from("/nonexistent/file.mp3"));
        assert!(matches!(result, Err(AudioError::Decode { .. })));
    }

    #[test]
    fn decode_rejects_non_audio_content() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fake.wav");
        std::fs::write(&path, b"this is not audio data").unwrap();

        let result = decode(&path);
        assert!(matches!(result, Err(AudioError::Decode { .. })));
    }

    #[test]
    fn decode_reports_mono_wav_properties() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("mono.wav");
        write_wav(&path, 1, 8000, 8000);

        let decoded = decode(&path).unwrap();
        assert_eq!(decoded.channels, 1);
        assert_eq!(decoded.frame_rate_hz, 8000);
        assert_eq!(decoded.sample_width_bytes, 2);
        assert_eq!(decoded.frames(), 8000);
        assert!((decoded.duration_seconds() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn duration_is_frames_over_rate_independent_of_channels() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("stereo.wav");
        write_wav(&path, 2, 16000, 32000);

        let decoded = decode(&path).unwrap();
        assert_eq!(decoded.channels, 2);
        assert_eq!(decoded.frames(), 32000);
        assert!((decoded.duration_seconds() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn mono_reduction_averages_stereo_pairs() {
        let decoded = DecodedAudio {
            samples: vec![0.2, 0.4, -1.0, 1.0, 0.5, 0.5],
            channels: 2,
            frame_rate_hz: 8000,
            sample_width_bytes: 2,
        };

        let mono = decoded.mono();
        assert_eq!(mono.len(), 3);
        assert!((mono[0] - 0.3).abs() < 1e-6);
        assert!(mono[1].abs() < 1e-6);
        assert!((mono[2] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn mono_reduction_passes_single_channel_through() {
        let decoded = DecodedAudio {
            samples: vec![0.1, 0.2, 0.3],
            channels: 1,
            frame_rate_hz: 8000,
            sample_width_bytes: 2,
        };
        assert_eq!(decoded.mono(), vec![0.1, 0.2, 0.3]);
    }
}
