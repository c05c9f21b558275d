// FFT module - Short-time Fourier transform
//
// This module computes magnitude spectrograms with a periodic Hann window.
// Frames are centered on multiples of the hop: the signal is zero padded by
// half an FFT on both sides, giving `1 + len / hop` frames.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Magnitude spectrogram, frame-major: `frames[t][bin]`
pub type Spectrogram = Vec<Vec<f32>>;

/// STFT processor computing magnitude spectra for every frame of a signal
pub struct StftProcessor {
    fft: Arc<dyn Fft<f32>>,
    fft_size: usize,
    hop_length: usize,
    /// Periodic Hann window (pre-computed)
    window: Vec<f32>,
}

impl StftProcessor {
    /// Create a new STFT processor
    ///
    /// # Arguments
    /// * `fft_size` - FFT and window size in samples
    /// * `hop_length` - Hop between frame centers
    pub fn new(fft_size: usize, hop_length: usize) -> Self {
        let fft_size = fft_size.max(2);
        let window = (0..fft_size)
            .map(|i| {
                0.5 - 0.5 * ((2.0 * std::f32::consts::PI * i as f32) / fft_size as f32).cos()
            })
            .collect();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);

        Self {
            fft,
            fft_size,
            hop_length: hop_length.max(1),
            window,
        }
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn hop_length(&self) -> usize {
        self.hop_length
    }

    /// Number of positive-frequency bins per frame
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Number of frames produced for a signal of `len` samples
    pub fn num_frames(&self, len: usize) -> usize {
        1 + len / self.hop_length
    }

    /// Compute the magnitude spectrogram of a signal
    ///
    /// # Returns
    /// `num_frames(len)` frames of `num_bins()` magnitudes each
    pub fn magnitude_spectrogram(&self, audio: &[f32]) -> Spectrogram {
        let pad = self.fft_size / 2;
        let num_frames = self.num_frames(audio.len());
        let num_bins = self.num_bins();

        let mut buffer = vec![Complex::new(0.0f32, 0.0); self.fft_size];
        let mut scratch = vec![Complex::new(0.0f32, 0.0); self.fft.get_inplace_scratch_len()];
        let mut frames = Vec::with_capacity(num_frames);

        for frame in 0..num_frames {
            let start = (frame * self.hop_length) as isize - pad as isize;
            for (i, slot) in buffer.iter_mut().enumerate() {
                let idx = start + i as isize;
                let sample = if idx >= 0 && (idx as usize) < audio.len() {
                    audio[idx as usize]
                } else {
                    0.0
                };
                *slot = Complex::new(sample * self.window[i], 0.0);
            }

            self.fft.process_with_scratch(&mut buffer, &mut scratch);

            frames.push(buffer[..num_bins].iter().map(|c| c.norm()).collect());
        }

        frames
    }
}
