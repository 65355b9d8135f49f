//! Frame event classification
//!
//! Counts the active pitch classes of a frame and maps the count to an event:
//!
//! | active pitch classes | event     |
//! |----------------------|-----------|
//! | 0                    | `Silence` |
//! | 1 ..= 3              | `Picking` |
//! | 4 or more            | `Chord`   |
//!
//! Every frame is classified on its own; there is no smoothing across frames,
//! so labels may flicker between neighbouring frames.

use super::active_set::ActiveSet;
use crate::analysis::result::EventLabel;
use crate::config::{
    check_activation_threshold, check_min_chord_pitch_classes, TranscriptionConfig,
    DEFAULT_ACTIVATION_THRESHOLD, DEFAULT_MIN_CHORD_PITCH_CLASSES,
};
use crate::error::Result;

/// Classifies single frames as chord, picking or silence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClassifier {
    threshold: f64,
    min_chord_pitch_classes: usize,
}

impl FrameClassifier {
    /// Classifier with an explicit threshold and the default chord size
    ///
    /// # Errors
    ///
    /// Returns `TranscriptionError::InvalidInput` for a non-finite threshold.
    pub fn new(threshold: f64) -> Result<Self> {
        check_activation_threshold(threshold)?;
        Ok(Self {
            threshold,
            min_chord_pitch_classes: DEFAULT_MIN_CHORD_PITCH_CLASSES,
        })
    }

    /// Classifier using the threshold and chord size from `config`
    ///
    /// # Errors
    ///
    /// Returns `TranscriptionError::InvalidInput` for a non-finite threshold or
    /// a zero chord size.
    pub fn from_config(config: &TranscriptionConfig) -> Result<Self> {
        check_activation_threshold(config.activation_threshold)?;
        check_min_chord_pitch_classes(config.min_chord_pitch_classes)?;
        Ok(Self {
            threshold: config.activation_threshold,
            min_chord_pitch_classes: config.min_chord_pitch_classes,
        })
    }

    /// Activation threshold in use
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Classify one frame
    ///
    /// # Errors
    ///
    /// Returns `TranscriptionError::InvalidFrame` for a frame that is not 12
    /// finite values.
    pub fn classify(&self, frame: &[f64]) -> Result<EventLabel> {
        let active = ActiveSet::from_frame(frame, self.threshold)?;
        Ok(self.classify_active(&active))
    }

    /// Classify an already computed active set
    pub fn classify_active(&self, active: &ActiveSet) -> EventLabel {
        match active.len() {
            0 => EventLabel::Silence,
            n if n >= self.min_chord_pitch_classes => EventLabel::Chord,
            _ => EventLabel::Picking,
        }
    }
}

impl Default for FrameClassifier {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_ACTIVATION_THRESHOLD,
            min_chord_pitch_classes: DEFAULT_MIN_CHORD_PITCH_CLASSES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranscriptionError;

    fn frame_with(active: &[usize], value: f64) -> Vec<f64> {
        let mut frame = vec![0.0; 12];
        for &pc in active {
            frame[pc] = value;
        }
        frame
    }

    #[test]
    fn test_zero_frame_is_silence() {
        let classifier = FrameClassifier::default();
        assert_eq!(classifier.classify(&[0.0; 12]).unwrap(), EventLabel::Silence);
    }

    #[test]
    fn test_one_to_three_active_is_picking() {
        let classifier = FrameClassifier::default();
        assert_eq!(
            classifier.classify(&frame_with(&[0], 0.5)).unwrap(),
            EventLabel::Picking
        );
        assert_eq!(
            classifier.classify(&frame_with(&[0, 4], 0.6)).unwrap(),
            EventLabel::Picking
        );
        assert_eq!(
            classifier.classify(&frame_with(&[0, 4, 7], 0.6)).unwrap(),
            EventLabel::Picking
        );
    }

    #[test]
    fn test_more_than_three_active_is_chord() {
        let classifier = FrameClassifier::default();
        assert_eq!(
            classifier.classify(&frame_with(&[0, 4, 7, 11], 0.6)).unwrap(),
            EventLabel::Chord
        );
        assert_eq!(classifier.classify(&[1.0; 12]).unwrap(), EventLabel::Chord);
    }

    #[test]
    fn test_threshold_boundary() {
        let classifier = FrameClassifier::default();
        assert_eq!(
            classifier.classify(&frame_with(&[0], 0.3)).unwrap(),
            EventLabel::Silence
        );
        assert_eq!(
            classifier.classify(&frame_with(&[0], 0.30000001)).unwrap(),
            EventLabel::Picking
        );
    }

    #[test]
    fn test_sub_threshold_energy_is_ignored() {
        // Four pitch classes present, only two above threshold
        let mut frame = frame_with(&[0, 4], 0.9);
        frame[7] = 0.2;
        frame[11] = 0.29;
        let classifier = FrameClassifier::default();
        assert_eq!(classifier.classify(&frame).unwrap(), EventLabel::Picking);
    }

    #[test]
    fn test_is_deterministic() {
        let classifier = FrameClassifier::default();
        let frame = frame_with(&[2, 5, 9, 10], 0.45);
        let first = classifier.classify(&frame).unwrap();
        let second = classifier.classify(&frame).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_uses_configured_threshold_and_chord_size() {
        let config = TranscriptionConfig {
            activation_threshold: 0.5,
            min_chord_pitch_classes: 3,
            ..TranscriptionConfig::default()
        };
        let classifier = FrameClassifier::from_config(&config).unwrap();
        assert_eq!(classifier.threshold(), 0.5);
        assert_eq!(
            classifier.classify(&frame_with(&[0, 4, 7], 0.6)).unwrap(),
            EventLabel::Chord
        );
        assert_eq!(
            classifier.classify(&frame_with(&[0, 4, 7], 0.4)).unwrap(),
            EventLabel::Silence
        );
    }

    #[test]
    fn test_rejects_unusable_threshold() {
        assert!(matches!(
            FrameClassifier::new(f64::NAN),
            Err(TranscriptionError::InvalidInput(_))
        ));
        assert!(FrameClassifier::new(f64::INFINITY).is_err());
        assert_eq!(FrameClassifier::new(0.3).unwrap(), FrameClassifier::default());

        let config = TranscriptionConfig {
            min_chord_pitch_classes: 0,
            ..TranscriptionConfig::default()
        };
        assert!(FrameClassifier::from_config(&config).is_err());
    }

    #[test]
    fn test_malformed_frame() {
        let classifier = FrameClassifier::default();
        assert!(matches!(
            classifier.classify(&[0.1; 6]),
            Err(TranscriptionError::InvalidFrame(_))
        ));
    }
}
