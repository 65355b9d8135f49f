//! Channel mixing (multi-channel to mono conversion)

use crate::error::{Result, TranscriptionError};

/// Downmix interleaved samples with `channels` channels to mono
///
/// Each output sample is the average of one interleaved frame.
///
/// # Errors
///
/// Returns `InvalidInput` if `channels` is zero or the sample count is not a
/// multiple of `channels`.
pub fn downmix_interleaved(samples: &[f32], channels: usize) -> Result<Vec<f32>> {
    if channels == 0 {
        return Err(TranscriptionError::InvalidInput(
            "Channel count must be > 0".to_string(),
        ));
    }
    if samples.len() % channels != 0 {
        return Err(TranscriptionError::InvalidInput(format!(
            "{} interleaved samples do not divide into {} channels",
            samples.len(),
            channels
        )));
    }
    if channels == 1 {
        return Ok(samples.to_vec());
    }

    log::debug!("Downmixing {} channels to mono", channels);

    Ok(samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect())
}
