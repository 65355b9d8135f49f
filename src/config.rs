//! Configuration parameters for chroma extraction and transcription

use crate::error::{Result, TranscriptionError};

/// Energy a pitch class must exceed (strictly) to count as active
pub const DEFAULT_ACTIVATION_THRESHOLD: f64 = 0.3;

/// Smallest active-set size classified as a chord (i.e. more than 3 pitch classes)
pub const DEFAULT_MIN_CHORD_PITCH_CLASSES: usize = 4;

/// MIDI note used as the octave root when spelling note names (middle C)
pub const DEFAULT_NOTE_REFERENCE_MIDI: u8 = 60;

/// Transcription configuration parameters
///
/// The activation threshold lives here once and is handed to both the frame
/// classifier and the chord labeler, so the two can never disagree on which
/// pitch classes are active.
#[derive(Debug, Clone)]
pub struct TranscriptionConfig {
    // Frame classification
    /// Activation threshold for a pitch class (default: 0.3, exclusive)
    pub activation_threshold: f64,

    /// Minimum number of active pitch classes labelled as a chord (default: 4)
    pub min_chord_pitch_classes: usize,

    // STFT parameters
    /// Frame size for STFT (default: 2048)
    pub frame_size: usize,

    /// Hop size for STFT (default: 512)
    pub hop_size: usize,

    // Chroma extraction
    /// Tuning reference for chroma mapping (default: 440.0 Hz, A4)
    pub center_frequency: f64,

    /// Lowest frequency folded into the chromagram (default: 32.70 Hz, C1)
    pub min_frequency: f64,

    /// Highest frequency folded into the chromagram (default: 4186.0 Hz, C8)
    pub max_frequency: f64,

    /// Enable soft chroma mapping (default: true)
    /// Soft mapping spreads frequency bins to neighboring semitones for robustness
    pub soft_chroma_mapping: bool,

    /// Soft mapping standard deviation in semitones (default: 0.5)
    pub soft_mapping_sigma: f64,

    // Chord labels
    /// MIDI note of pitch class 0 when octave numbers are printed (default: 60)
    /// Must be a C: 0, 12, .., 108
    pub note_reference_midi: u8,

    /// Append octave numbers to note names, e.g. "C4+E4+G4" (default: false)
    pub include_octave: bool,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            activation_threshold: DEFAULT_ACTIVATION_THRESHOLD,
            min_chord_pitch_classes: DEFAULT_MIN_CHORD_PITCH_CLASSES,
            frame_size: 2048,
            hop_size: 512,
            center_frequency: 440.0,
            min_frequency: 32.70,
            max_frequency: 4186.0,
            soft_chroma_mapping: true,
            soft_mapping_sigma: 0.5,
            note_reference_midi: DEFAULT_NOTE_REFERENCE_MIDI,
            include_octave: false,
        }
    }
}

impl TranscriptionConfig {
    /// Check that every parameter is usable
    ///
    /// # Errors
    ///
    /// Returns `TranscriptionError::InvalidInput` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        check_activation_threshold(self.activation_threshold)?;
        check_min_chord_pitch_classes(self.min_chord_pitch_classes)?;
        if self.frame_size == 0 {
            return Err(TranscriptionError::InvalidInput(
                "Frame size must be > 0".to_string(),
            ));
        }
        if self.hop_size == 0 {
            return Err(TranscriptionError::InvalidInput(
                "Hop size must be > 0".to_string(),
            ));
        }
        if !(self.center_frequency > 0.0 && self.center_frequency.is_finite()) {
            return Err(TranscriptionError::InvalidInput(format!(
                "center_frequency must be positive, got {}",
                self.center_frequency
            )));
        }
        if !(self.min_frequency > 0.0 && self.min_frequency < self.max_frequency) {
            return Err(TranscriptionError::InvalidInput(format!(
                "Frequency range must satisfy 0 < min < max, got {}..{}",
                self.min_frequency, self.max_frequency
            )));
        }
        if self.soft_chroma_mapping && !(self.soft_mapping_sigma > 0.0) {
            return Err(TranscriptionError::InvalidInput(format!(
                "soft_mapping_sigma must be positive, got {}",
                self.soft_mapping_sigma
            )));
        }
        check_note_reference_midi(self.note_reference_midi)?;
        Ok(())
    }
}

pub(crate) fn check_activation_threshold(threshold: f64) -> Result<()> {
    if !threshold.is_finite() {
        return Err(TranscriptionError::InvalidInput(format!(
            "activation_threshold must be finite, got {}",
            threshold
        )));
    }
    Ok(())
}

pub(crate) fn check_min_chord_pitch_classes(min: usize) -> Result<()> {
    if min == 0 {
        return Err(TranscriptionError::InvalidInput(
            "min_chord_pitch_classes must be > 0".to_string(),
        ));
    }
    Ok(())
}

/// Pitch class 0 must spell as a C, and reference + 11 must stay a valid MIDI note
pub(crate) fn check_note_reference_midi(reference: u8) -> Result<()> {
    if reference % 12 != 0 || reference > 108 {
        return Err(TranscriptionError::InvalidInput(format!(
            "note_reference_midi must be a C (multiple of 12, at most 108), got {}",
            reference
        )));
    }
    Ok(())
}
