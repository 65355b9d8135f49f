//! Pitch-class energy matrix (chromagram)

use serde::{Deserialize, Serialize};

use super::NUM_PITCH_CLASSES;
use crate::error::{Result, TranscriptionError};

/// Chromagram: one 12-element energy vector per time frame
///
/// Frame order is chronological. Frame `i` starts `i * hop_size` samples into
/// the (centered) signal, so its time offset is `i * hop_size / sample_rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyMatrix {
    frames: Vec<Vec<f64>>,
    hop_size: usize,
    sample_rate: u32,
}

impl EnergyMatrix {
    /// Wrap pre-computed frames
    ///
    /// Frames are not validated here; the classifier and labeler reject
    /// malformed frames with `TranscriptionError::InvalidFrame`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `hop_size` or `sample_rate` is zero.
    pub fn new(frames: Vec<Vec<f64>>, hop_size: usize, sample_rate: u32) -> Result<Self> {
        if hop_size == 0 {
            return Err(TranscriptionError::InvalidInput(
                "Hop size must be > 0".to_string(),
            ));
        }
        if sample_rate == 0 {
            return Err(TranscriptionError::InvalidInput(
                "Invalid sample rate".to_string(),
            ));
        }
        Ok(Self {
            frames,
            hop_size,
            sample_rate,
        })
    }

    /// All frames in time order
    pub fn frames(&self) -> &[Vec<f64>] {
        &self.frames
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True if the matrix holds no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Hop size in samples
    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Sample rate of the source audio in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Duration of one hop in seconds
    pub fn hop_seconds(&self) -> f64 {
        self.hop_size as f64 / self.sample_rate as f64
    }

    /// Time offset of frame `index` in seconds
    pub fn frame_time(&self, index: usize) -> f64 {
        index as f64 * self.hop_seconds()
    }

    /// Energy of one pitch class across all frames (a chromagram row)
    pub fn pitch_class_row(&self, pitch_class: usize) -> Vec<f64> {
        self.frames
            .iter()
            .map(|frame| frame.get(pitch_class).copied().unwrap_or(0.0))
            .collect()
    }
}

/// Check that a frame has exactly 12 finite values
pub fn validate_frame(frame: &[f64]) -> Result<()> {
    if frame.len() != NUM_PITCH_CLASSES {
        return Err(TranscriptionError::InvalidFrame(format!(
            "expected {} pitch classes, got {}",
            NUM_PITCH_CLASSES,
            frame.len()
        )));
    }
    if let Some(pc) = frame.iter().position(|v| !v.is_finite()) {
        return Err(TranscriptionError::InvalidFrame(format!(
            "non-finite energy {} at pitch class {}",
            frame[pc], pc
        )));
    }
    Ok(())
}
