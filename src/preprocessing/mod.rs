//! Audio preprocessing modules
//!
//! - Channel mixing (multi-channel to mono)

pub mod channel_mixer;
