//! Chroma extraction modules
//!
//! Extract pitch-class distribution (12 semitones) from audio:
//! - Chroma vector computation
//! - Per-frame normalization
//! - The energy matrix the transcription consumes

pub mod extractor;
pub mod matrix;
pub mod normalization;

pub use extractor::extract_chroma;
pub use matrix::{validate_frame, EnergyMatrix};

/// Number of pitch classes (C, C#, D, ..., B)
pub const NUM_PITCH_CLASSES: usize = 12;
