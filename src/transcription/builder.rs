//! Transcription assembly
//!
//! Runs the frame classifier and the chord labeler over every frame of an
//! energy matrix and zips the results in frame order. Both components are
//! built from the same configuration, so they share one activation threshold.

use super::active_set::ActiveSet;
use super::classifier::FrameClassifier;
use super::labeler::ChordLabeler;
use crate::analysis::result::{Transcription, TranscriptionEntry};
use crate::config::TranscriptionConfig;
use crate::error::Result;
use crate::features::chroma::EnergyMatrix;

/// Builds a [`Transcription`] from an [`EnergyMatrix`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranscriptionBuilder {
    classifier: FrameClassifier,
    labeler: ChordLabeler,
}

impl TranscriptionBuilder {
    /// Builder whose classifier and labeler both take the threshold from `config`
    ///
    /// # Errors
    ///
    /// Returns `TranscriptionError::InvalidInput` if the classification or
    /// labeling fields of `config` are unusable.
    pub fn new(config: &TranscriptionConfig) -> Result<Self> {
        Ok(Self {
            classifier: FrameClassifier::from_config(config)?,
            labeler: ChordLabeler::from_config(config)?,
        })
    }

    /// Transcribe every frame of `matrix`, in frame order
    ///
    /// The result has exactly one entry per frame and entry `i` is derived
    /// from frame `i` only.
    ///
    /// # Errors
    ///
    /// Returns `TranscriptionError::InvalidFrame` on the first malformed frame;
    /// no partial transcription is returned.
    pub fn build(&self, matrix: &EnergyMatrix) -> Result<Transcription> {
        log::debug!(
            "Building transcription: {} frames, threshold={}",
            matrix.len(),
            self.classifier.threshold()
        );

        let entries = self.build_entries(matrix)?;
        Ok(Transcription::new(entries, matrix.hop_seconds()))
    }

    fn entry(&self, matrix: &EnergyMatrix, index: usize, frame: &[f64]) -> Result<TranscriptionEntry> {
        let active = ActiveSet::from_frame(frame, self.classifier.threshold())?;

        Ok(TranscriptionEntry {
            frame_index: index,
            time_seconds: matrix.frame_time(index),
            event: self.classifier.classify_active(&active),
            chord: self.labeler.label_active(&active),
        })
    }

    #[cfg(not(feature = "parallel"))]
    fn build_entries(&self, matrix: &EnergyMatrix) -> Result<Vec<TranscriptionEntry>> {
        matrix
            .frames()
            .iter()
            .enumerate()
            .map(|(i, frame)| self.entry(matrix, i, frame))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn build_entries(&self, matrix: &EnergyMatrix) -> Result<Vec<TranscriptionEntry>> {
        use rayon::prelude::*;

        // Indexed parallel collect keeps frame order
        matrix
            .frames()
            .par_iter()
            .enumerate()
            .map(|(i, frame)| self.entry(matrix, i, frame))
            .collect()
    }
}

impl Default for TranscriptionBuilder {
    fn default() -> Self {
        Self {
            classifier: FrameClassifier::default(),
            labeler: ChordLabeler::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::result::EventLabel;
    use crate::error::TranscriptionError;

    fn frame_with(active: &[usize], value: f64) -> Vec<f64> {
        let mut frame = vec![0.0; 12];
        for &pc in active {
            frame[pc] = value;
        }
        frame
    }

    fn scenario_matrix() -> EnergyMatrix {
        EnergyMatrix::new(
            vec![
                vec![0.0; 12],
                frame_with(&[0], 0.5),
                frame_with(&[0, 4, 7], 0.6),
                frame_with(&[0, 4, 7, 11], 0.6),
                frame_with(&[0], 0.3),
            ],
            512,
            22050,
        )
        .unwrap()
    }

    #[test]
    fn test_reference_scenarios() {
        let transcription = TranscriptionBuilder::default()
            .build(&scenario_matrix())
            .unwrap();

        let pairs: Vec<(EventLabel, String)> = transcription
            .pairs()
            .map(|(event, chord)| (event, chord.to_string()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                (EventLabel::Silence, "N".to_string()),
                (EventLabel::Picking, "C".to_string()),
                (EventLabel::Picking, "C+E+G".to_string()),
                (EventLabel::Chord, "C+E+G+B".to_string()),
                (EventLabel::Silence, "N".to_string()),
            ]
        );
    }

    #[test]
    fn test_preserves_length_and_order() {
        let matrix = scenario_matrix();
        let transcription = TranscriptionBuilder::default().build(&matrix).unwrap();

        assert_eq!(transcription.len(), matrix.len());
        for (i, entry) in transcription.iter().enumerate() {
            assert_eq!(entry.frame_index, i);
            assert!((entry.time_seconds - matrix.frame_time(i)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_matches_independent_components() {
        // Zipping separately computed labels gives the same sequence
        let matrix = scenario_matrix();
        let builder = TranscriptionBuilder::default();
        let transcription = builder.build(&matrix).unwrap();

        let classifier = FrameClassifier::default();
        let labeler = ChordLabeler::default();
        for (frame, entry) in matrix.frames().iter().zip(transcription.iter()) {
            assert_eq!(classifier.classify(frame).unwrap(), entry.event);
            assert_eq!(labeler.label(frame).unwrap(), entry.chord);
        }
    }

    #[test]
    fn test_no_smoothing_between_frames() {
        let matrix = EnergyMatrix::new(
            vec![
                frame_with(&[0, 2, 4, 5], 0.9),
                vec![0.0; 12],
                frame_with(&[0, 2, 4, 5], 0.9),
                vec![0.0; 12],
            ],
            512,
            44100,
        )
        .unwrap();
        let transcription = TranscriptionBuilder::default().build(&matrix).unwrap();
        let events: Vec<EventLabel> = transcription.iter().map(|e| e.event).collect();
        assert_eq!(
            events,
            vec![
                EventLabel::Chord,
                EventLabel::Silence,
                EventLabel::Chord,
                EventLabel::Silence
            ]
        );
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = EnergyMatrix::new(vec![], 512, 44100).unwrap();
        let transcription = TranscriptionBuilder::default().build(&matrix).unwrap();
        assert!(transcription.is_empty());
    }

    #[test]
    fn test_rejects_nan_threshold() {
        let config = TranscriptionConfig {
            activation_threshold: f64::NAN,
            ..TranscriptionConfig::default()
        };
        assert!(matches!(
            TranscriptionBuilder::new(&config),
            Err(TranscriptionError::InvalidInput(_))
        ));
        assert_eq!(
            TranscriptionBuilder::new(&TranscriptionConfig::default()).unwrap(),
            TranscriptionBuilder::default()
        );
    }

    #[test]
    fn test_malformed_frame_aborts() {
        let matrix = EnergyMatrix::new(
            vec![vec![0.0; 12], vec![0.0; 7], vec![0.0; 12]],
            512,
            44100,
        )
        .unwrap();
        let result = TranscriptionBuilder::default().build(&matrix);
        assert!(matches!(result, Err(TranscriptionError::InvalidFrame(_))));
    }
}
