//! Active pitch-class sets
//!
//! A pitch class is active in a frame when its energy is strictly greater
//! than the activation threshold; a value equal to the threshold is inactive.

use crate::error::Result;
use crate::features::chroma::{validate_frame, NUM_PITCH_CLASSES};

/// Set of active pitch classes in one frame, stored as a 12-bit mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ActiveSet {
    mask: u16,
}

impl ActiveSet {
    /// Compute the active set of a frame
    ///
    /// # Errors
    ///
    /// Returns `TranscriptionError::InvalidFrame` if the frame does not hold
    /// exactly 12 finite values.
    pub fn from_frame(frame: &[f64], threshold: f64) -> Result<Self> {
        validate_frame(frame)?;

        let mask = frame
            .iter()
            .enumerate()
            .filter(|&(_, &energy)| energy > threshold)
            .fold(0u16, |mask, (pc, _)| mask | (1 << pc));

        Ok(Self { mask })
    }

    /// Number of active pitch classes
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// True if no pitch class is active
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// True if `pitch_class` is active
    pub fn contains(&self, pitch_class: usize) -> bool {
        pitch_class < NUM_PITCH_CLASSES && self.mask & (1 << pitch_class) != 0
    }

    /// Active pitch classes in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..NUM_PITCH_CLASSES).filter(move |&pc| self.contains(pc))
    }
}
