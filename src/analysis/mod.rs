//! Transcription result types
//!
//! - Per-frame event and chord labels
//! - The ordered transcription and its summary
//! - Run metadata

pub mod metadata;
pub mod result;
