//! Audio decoding using Symphonia
//!
//! Decodes any format the default Symphonia probe recognises (WAV, FLAC, MP3,
//! AAC/MP4, Vorbis) and downmixes it to mono `f32` samples.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};
use symphonia::core::audio::SampleBuffer as PcmBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::{Result, TranscriptionError};
use crate::preprocessing::channel_mixer::downmix_interleaved;

/// Decoded mono audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedAudio {
    /// Mono samples in [-1.0, 1.0]
    pub samples: Vec<f32>,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Channel count of the source before downmixing
    pub channels: u16,
}

impl DecodedAudio {
    /// Duration in seconds
    pub fn duration_seconds(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Decode audio file to mono PCM samples
///
/// # Arguments
///
/// * `path` - Path to audio file
///
/// # Errors
///
/// Returns `DecodingError` if the file cannot be opened, the format is not
/// recognised, there is no audio track, or the track yields no samples.
pub fn decode_audio<P: AsRef<Path>>(path: P) -> Result<DecodedAudio> {
    let path = path.as_ref();
    log::debug!("Decoding audio file: {}", path.display());

    let file = File::open(path).map_err(|e| {
        TranscriptionError::DecodingError(format!("Failed to open {}: {}", path.display(), e))
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| {
            TranscriptionError::DecodingError(format!(
                "Unsupported format for {}: {}",
                path.display(),
                e
            ))
        })?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| TranscriptionError::DecodingError("No supported audio tracks found".to_string()))?;

    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;
    let mut channels = track.codec_params.channels.map(|c| c.count());

    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut interleaved: Vec<f32> = Vec::new();
    let mut pcm: Option<PcmBuffer<f32>> = None;
    let mut skipped_packets = 0usize;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => {
                log::warn!("Decoder reset required, stopping at {} samples", interleaved.len());
                break;
            }
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                sample_rate.get_or_insert(spec.rate);
                channels.get_or_insert(spec.channels.count());

                let frames = decoded.capacity() as u64;
                let required = frames as usize * spec.channels.count();
                if pcm.as_ref().map_or(true, |buf| buf.capacity() < required) {
                    pcm = Some(PcmBuffer::<f32>::new(frames, spec));
                }
                if let Some(buf) = pcm.as_mut() {
                    buf.copy_interleaved_ref(decoded);
                    interleaved.extend_from_slice(buf.samples());
                }
            }
            Err(SymphoniaError::DecodeError(e)) => {
                // Corrupt packet; keep going
                skipped_packets += 1;
                log::warn!("Skipping undecodable packet: {}", e);
            }
            Err(e) => return Err(e.into()),
        }
    }

    let sample_rate = sample_rate
        .ok_or_else(|| TranscriptionError::DecodingError("Sample rate not found".to_string()))?;
    let channels = channels
        .ok_or_else(|| TranscriptionError::DecodingError("Channel count not found".to_string()))?;

    if interleaved.is_empty() {
        return Err(TranscriptionError::DecodingError(format!(
            "No audio samples decoded from {}",
            path.display()
        )));
    }

    let samples = downmix_interleaved(&interleaved, channels)?;

    log::debug!(
        "Decoded {} mono samples at {} Hz from {} channel(s), {} packet(s) skipped",
        samples.len(),
        sample_rate,
        channels,
        skipped_packets
    );

    Ok(DecodedAudio {
        samples,
        sample_rate,
        channels: channels as u16,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_decoding_error() {
        let result = decode_audio("/definitely/not/here.wav");
        assert!(matches!(result, Err(TranscriptionError::DecodingError(_))));
    }

    #[test]
    fn test_duration() {
        let audio = DecodedAudio {
            samples: vec![0.0; 22050],
            sample_rate: 44100,
            channels: 1,
        };
        assert!((audio.duration_seconds() - 0.5).abs() < 1e-6);
    }
}
