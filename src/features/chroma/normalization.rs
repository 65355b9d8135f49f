//! Chroma normalization

/// Peaks below this are treated as silence and left at zero
const EPSILON: f64 = 1e-10;

/// Scale a chroma vector so its largest bin is 1.0
///
/// Every value ends up in [0, 1]. Vectors whose peak is below a tiny epsilon
/// (digital silence) are zeroed instead of being blown up to full scale.
///
/// # Arguments
///
/// * `chroma` - 12-element chroma vector, modified in place
pub fn normalize_max(chroma: &mut [f64]) {
    let peak = chroma.iter().copied().fold(0.0f64, f64::max);

    if peak < EPSILON {
        chroma.iter_mut().for_each(|v| *v = 0.0);
        return;
    }

    for v in chroma.iter_mut() {
        *v = (*v / peak).clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_max_scales_peak_to_one() {
        let mut chroma = vec![0.0, 2.0, 4.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        normalize_max(&mut chroma);
        assert_eq!(chroma[2], 1.0);
        assert_eq!(chroma[1], 0.5);
        assert_eq!(chroma[3], 0.25);
    }

    #[test]
    fn test_normalize_max_silence_stays_zero() {
        let mut chroma = vec![1e-14; 12];
        normalize_max(&mut chroma);
        assert!(chroma.iter().all(|&v| v == 0.0));
    }
}
