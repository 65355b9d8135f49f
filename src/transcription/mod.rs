//! Frame-level transcription
//!
//! Turns a chromagram into a per-frame symbolic stream:
//! - Active pitch-class sets (strict threshold)
//! - Event classification (chord / picking / silence)
//! - Chord labels ("C+E+G" or "N")
//! - Frame-ordered assembly

pub mod active_set;
pub mod builder;
pub mod classifier;
pub mod labeler;
pub mod notes;

pub use active_set::ActiveSet;
pub use builder::TranscriptionBuilder;
pub use classifier::FrameClassifier;
pub use labeler::ChordLabeler;
pub use notes::{midi_note_name, pitch_class_name, NOTE_NAMES};
