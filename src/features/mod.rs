//! Feature extraction modules
//!
//! - Chroma extraction (pitch-class energy matrix)

pub mod chroma;
