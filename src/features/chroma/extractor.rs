//! Chroma vector extraction
//!
//! Converts audio samples to a 12-row pitch-class energy matrix:
//! 1. Centered framing (frame_size, hop_size), Hann window
//! 2. FFT power spectrum per frame
//! 3. Fold each bin onto the 12 pitch classes (hard or Gaussian soft mapping)
//! 4. Max-normalize each frame into [0, 1]
//!
//! # Example
//!
//! ```no_run
//! use chroma_transcribe::features::chroma::extractor::extract_chroma;
//! use chroma_transcribe::TranscriptionConfig;
//!
//! let samples = vec![0.0f32; 44100 * 5];
//! let matrix = extract_chroma(&samples, 44100, &TranscriptionConfig::default())?;
//! println!("{} chroma frames", matrix.len());
//! # Ok::<(), chroma_transcribe::TranscriptionError>(())
//! ```

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use super::matrix::EnergyMatrix;
use super::normalization::normalize_max;
use super::NUM_PITCH_CLASSES;
use crate::config::TranscriptionConfig;
use crate::error::{Result, TranscriptionError};
use crate::io::sample_buffer::SampleBuffer;

/// MIDI note number of the tuning reference (A4)
const REFERENCE_MIDI: f64 = 69.0;

/// Pitch-class weights for one FFT bin
#[derive(Debug, Clone)]
struct BinMapping {
    bin: usize,
    weights: [f64; NUM_PITCH_CLASSES],
}

/// Extract chroma vectors from audio samples
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz
/// * `config` - Frame/hop size, tuning reference, frequency range and mapping mode
///
/// # Returns
///
/// Energy matrix with `samples.len() / hop_size + 1` frames, each holding 12
/// values in [0, 1]
///
/// # Errors
///
/// Returns `InvalidInput` for empty audio, a zero sample rate or an invalid
/// configuration.
pub fn extract_chroma(
    samples: &[f32],
    sample_rate: u32,
    config: &TranscriptionConfig,
) -> Result<EnergyMatrix> {
    config.validate()?;

    if samples.is_empty() {
        return Err(TranscriptionError::InvalidInput(
            "Empty audio samples".to_string(),
        ));
    }
    if sample_rate == 0 {
        return Err(TranscriptionError::InvalidInput(
            "Invalid sample rate".to_string(),
        ));
    }

    let frame_size = config.frame_size;
    log::debug!(
        "Extracting chroma: {} samples at {} Hz, frame={}, hop={}, soft={}",
        samples.len(),
        sample_rate,
        frame_size,
        config.hop_size,
        config.soft_chroma_mapping
    );

    let mapping = build_bin_mapping(sample_rate, config);
    if mapping.is_empty() {
        return Err(TranscriptionError::ProcessingError(format!(
            "No FFT bins between {:.1} Hz and {:.1} Hz at {} Hz / frame size {}",
            config.min_frequency, config.max_frequency, sample_rate, frame_size
        )));
    }

    let window = hann_window(frame_size);
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(frame_size);
    let mut spectrum = vec![Complex::new(0.0, 0.0); frame_size];
    let mut scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];

    let mut buffer = SampleBuffer::centered(samples, frame_size, config.hop_size);
    let mut frames = Vec::with_capacity(buffer.window_count(frame_size));

    while let Some(chunk) = buffer.next_window(frame_size) {
        for ((slot, &x), &w) in spectrum.iter_mut().zip(chunk).zip(&window) {
            *slot = Complex::new(x as f64 * w, 0.0);
        }
        fft.process_with_scratch(&mut spectrum, &mut scratch);

        let mut chroma = vec![0.0f64; NUM_PITCH_CLASSES];
        for m in &mapping {
            let power = spectrum[m.bin].norm_sqr();
            for (c, &w) in chroma.iter_mut().zip(&m.weights) {
                *c += power * w;
            }
        }
        normalize_max(&mut chroma);
        frames.push(chroma);
    }

    log::debug!(
        "Extracted {} chroma frames from {} mapped bins",
        frames.len(),
        mapping.len()
    );

    EnergyMatrix::new(frames, config.hop_size, sample_rate)
}

/// Periodic Hann window
fn hann_window(size: usize) -> Vec<f64> {
    if size <= 1 {
        return vec![1.0; size];
    }
    (0..size)
        .map(|i| {
            let t = 2.0 * std::f64::consts::PI * i as f64 / size as f64;
            0.5 * (1.0 - t.cos())
        })
        .collect()
}

/// Fractional MIDI pitch of a frequency under the given A4 tuning
fn frequency_to_midi(freq_hz: f64, center_frequency: f64) -> f64 {
    REFERENCE_MIDI + 12.0 * (freq_hz / center_frequency).log2()
}

/// Signed distance in semitones from `midi` to `pitch_class`, wrapped to [-6, 6)
fn pitch_class_distance(midi: f64, pitch_class: usize) -> f64 {
    (midi - pitch_class as f64 + 6.0).rem_euclid(12.0) - 6.0
}

/// Pitch-class weights for every FFT bin inside the configured frequency range
///
/// Soft weights are Gaussian in circular semitone distance and sum to 1 per bin.
fn build_bin_mapping(sample_rate: u32, config: &TranscriptionConfig) -> Vec<BinMapping> {
    let frame_size = config.frame_size;
    let freq_resolution = sample_rate as f64 / frame_size as f64;
    let nyquist = sample_rate as f64 / 2.0;
    let max_freq = config.max_frequency.min(nyquist);

    let mut mapping = Vec::new();

    // Skip DC
    for bin in 1..=frame_size / 2 {
        let freq = bin as f64 * freq_resolution;
        if freq < config.min_frequency || freq > max_freq {
            continue;
        }

        let midi = frequency_to_midi(freq, config.center_frequency);
        let mut weights = [0.0f64; NUM_PITCH_CLASSES];

        if config.soft_chroma_mapping {
            let sigma = config.soft_mapping_sigma;
            for (pc, w) in weights.iter_mut().enumerate() {
                let d = pitch_class_distance(midi, pc) / sigma;
                *w = (-0.5 * d * d).exp();
            }
            let total: f64 = weights.iter().sum();
            if total > 0.0 {
                weights.iter_mut().for_each(|w| *w /= total);
            }
        } else {
            let pc = (midi.round() as i64).rem_euclid(NUM_PITCH_CLASSES as i64) as usize;
            weights[pc] = 1.0;
        }

        mapping.push(BinMapping { bin, weights });
    }

    mapping
}
