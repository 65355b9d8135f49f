//! Audio I/O modules
//!
//! Audio decoding (Symphonia) and hop-based sample windowing.

pub mod decoder;
pub mod sample_buffer;

pub use decoder::{decode_audio, DecodedAudio};
