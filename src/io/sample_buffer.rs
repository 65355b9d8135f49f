//! Sample windowing and buffering utilities

/// Buffer for hop-based windowed audio processing
///
/// Windows are centered: the signal is padded with `frame_size / 2` zeros on
/// both sides, so window `i` is centered on sample `i * hop_size`.
#[derive(Debug)]
pub struct SampleBuffer {
    /// Padded buffer data
    data: Vec<f32>,
    /// Start of the next window
    position: usize,
    /// Advance between windows
    hop_size: usize,
}

impl SampleBuffer {
    /// Create a centered buffer over `samples`
    pub fn centered(samples: &[f32], frame_size: usize, hop_size: usize) -> Self {
        let pad = frame_size / 2;
        let mut data = Vec::with_capacity(samples.len() + 2 * pad);
        data.resize(pad, 0.0);
        data.extend_from_slice(samples);
        data.resize(samples.len() + 2 * pad, 0.0);

        Self {
            data,
            position: 0,
            hop_size,
        }
    }

    /// Number of full windows of `window_size` the buffer yields
    pub fn window_count(&self, window_size: usize) -> usize {
        if self.hop_size == 0 || window_size == 0 || self.data.len() < window_size {
            return 0;
        }
        (self.data.len() - window_size) / self.hop_size + 1
    }

    /// Get next window of samples, advancing by one hop
    pub fn next_window(&mut self, window_size: usize) -> Option<&[f32]> {
        if self.hop_size == 0 || self.position + window_size > self.data.len() {
            return None;
        }

        let start = self.position;
        self.position += self.hop_size;
        Some(&self.data[start..start + window_size])
    }
}
