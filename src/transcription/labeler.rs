//! Chord labeling
//!
//! Lists the active pitch classes of a frame in ascending order, joined with
//! "+" ("C+E+G"). This is a raw listing, not a chord-quality name. Frames with
//! nothing active get the "N" label.

use super::active_set::ActiveSet;
use super::notes::{midi_note_name, pitch_class_name};
use crate::analysis::result::ChordLabel;
use crate::config::{
    check_activation_threshold, check_note_reference_midi, TranscriptionConfig,
    DEFAULT_ACTIVATION_THRESHOLD, DEFAULT_NOTE_REFERENCE_MIDI,
};
use crate::error::Result;

/// Turns a frame's active pitch classes into a chord label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChordLabeler {
    threshold: f64,
    reference_midi: u8,
    include_octave: bool,
}

impl ChordLabeler {
    /// Labeler with an explicit threshold, spelling plain pitch-class names
    ///
    /// # Errors
    ///
    /// Returns `TranscriptionError::InvalidInput` for a non-finite threshold.
    pub fn new(threshold: f64) -> Result<Self> {
        check_activation_threshold(threshold)?;
        Ok(Self {
            threshold,
            reference_midi: DEFAULT_NOTE_REFERENCE_MIDI,
            include_octave: false,
        })
    }

    /// Labeler using the threshold and note spelling from `config`
    ///
    /// # Errors
    ///
    /// Returns `TranscriptionError::InvalidInput` for a non-finite threshold or
    /// a note reference that is not a C.
    pub fn from_config(config: &TranscriptionConfig) -> Result<Self> {
        check_activation_threshold(config.activation_threshold)?;
        check_note_reference_midi(config.note_reference_midi)?;
        Ok(Self {
            threshold: config.activation_threshold,
            reference_midi: config.note_reference_midi,
            include_octave: config.include_octave,
        })
    }

    /// Label one frame
    ///
    /// # Errors
    ///
    /// Returns `TranscriptionError::InvalidFrame` for a frame that is not 12
    /// finite values.
    pub fn label(&self, frame: &[f64]) -> Result<ChordLabel> {
        let active = ActiveSet::from_frame(frame, self.threshold)?;
        Ok(self.label_active(&active))
    }

    /// Label an already computed active set
    pub fn label_active(&self, active: &ActiveSet) -> ChordLabel {
        if active.is_empty() {
            return ChordLabel::none();
        }
        ChordLabel::from_notes(active.iter().map(|pc| self.note_name(pc)))
    }

    fn note_name(&self, pitch_class: usize) -> String {
        if self.include_octave {
            midi_note_name(self.reference_midi.saturating_add(pitch_class as u8))
        } else {
            pitch_class_name(pitch_class).to_string()
        }
    }
}

impl Default for ChordLabeler {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_ACTIVATION_THRESHOLD,
            reference_midi: DEFAULT_NOTE_REFERENCE_MIDI,
            include_octave: false,
        }
    }
}
