//! # Chroma Transcribe
//!
//! Rough note/chord transcription from a recording's chromagram.
//!
//! ## Features
//!
//! - **Chroma extraction**: STFT power folded onto 12 pitch classes, max-normalized per frame
//! - **Event classification**: each frame is `Silence`, `Picking` (1–3 active pitch classes) or `Chord` (4+)
//! - **Chord labels**: active pitch classes listed in ascending order, e.g. `C+E+G`, or `N`
//!
//! ## Quick Start
//!
//! ```no_run
//! use chroma_transcribe::{transcribe_audio, TranscriptionConfig};
//!
//! // Load audio samples (mono, f32, normalized)
//! let samples: Vec<f32> = vec![]; // Your audio data
//! let sample_rate = 44100;
//!
//! let result = transcribe_audio(&samples, sample_rate, &TranscriptionConfig::default())?;
//!
//! for entry in &result.transcription {
//!     println!("{}", entry); // "12: Picking - C+E+G"
//! }
//! # Ok::<(), chroma_transcribe::TranscriptionError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Audio file → Decoder → Chroma extraction → Frame classifier + Chord labeler → Transcription
//! ```
//!
//! Frames are classified independently; there is no smoothing across frames.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod display;
pub mod error;
pub mod features;
pub mod io;
pub mod preprocessing;
pub mod transcription;

use std::path::Path;
use std::time::Instant;

// Re-export main types
pub use analysis::metadata::TranscriptionMetadata;
pub use analysis::result::{
    ChordLabel, EventLabel, Transcription, TranscriptionEntry, TranscriptionResult,
    TranscriptionSummary,
};
pub use config::{TranscriptionConfig, DEFAULT_ACTIVATION_THRESHOLD};
pub use error::TranscriptionError;
pub use features::chroma::EnergyMatrix;
pub use transcription::{ChordLabeler, FrameClassifier, TranscriptionBuilder};

/// Main transcription function
///
/// Extracts the chromagram of the samples and transcribes every frame.
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz (typically 44100 or 48000)
/// * `config` - Chroma and classification parameters
///
/// # Returns
///
/// `TranscriptionResult` with the energy matrix, the per-frame transcription
/// and run metadata
///
/// # Errors
///
/// Returns `TranscriptionError` if the input or configuration is invalid or a
/// frame is malformed
///
/// # Example
///
/// ```no_run
/// use chroma_transcribe::{transcribe_audio, TranscriptionConfig};
///
/// let samples = vec![0.0f32; 44100 * 5]; // 5 seconds of silence
/// let result = transcribe_audio(&samples, 44100, &TranscriptionConfig::default())?;
/// assert_eq!(result.transcription.summary().silence_frames, result.transcription.len());
/// # Ok::<(), chroma_transcribe::TranscriptionError>(())
/// ```
pub fn transcribe_audio(
    samples: &[f32],
    sample_rate: u32,
    config: &TranscriptionConfig,
) -> Result<TranscriptionResult, TranscriptionError> {
    let start_time = Instant::now();

    log::debug!("Starting transcription: {} samples at {} Hz", samples.len(), sample_rate);

    // Validates the input and the whole config
    let energy_matrix = features::chroma::extract_chroma(samples, sample_rate, config)?;
    let transcription = TranscriptionBuilder::new(config)?.build(&energy_matrix)?;

    let summary = transcription.summary();
    log::debug!(
        "Transcribed {} frames: {} chord, {} picking, {} silence",
        summary.frames,
        summary.chord_frames,
        summary.picking_frames,
        summary.silence_frames
    );

    let metadata = TranscriptionMetadata {
        duration_seconds: samples.len() as f32 / sample_rate as f32,
        sample_rate,
        frame_count: energy_matrix.len(),
        hop_seconds: energy_matrix.hop_seconds(),
        processing_time_ms: start_time.elapsed().as_secs_f32() * 1000.0,
        ..TranscriptionMetadata::default()
    };

    Ok(TranscriptionResult {
        energy_matrix,
        transcription,
        metadata,
    })
}

/// Decode an audio file and transcribe it
///
/// # Errors
///
/// Returns `TranscriptionError::DecodingError` if the file cannot be loaded,
/// otherwise the same errors as [`transcribe_audio`]
pub fn transcribe_file<P: AsRef<Path>>(
    path: P,
    config: &TranscriptionConfig,
) -> Result<TranscriptionResult, TranscriptionError> {
    let audio = io::decode_audio(path)?;
    transcribe_audio(&audio.samples, audio.sample_rate, config)
}
