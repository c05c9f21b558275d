// Mel module - Slaney mel filterbank, dB conversion and DCT
//
// The mel scale is linear below 1 kHz and logarithmic above it (Slaney's
// Auditory Toolbox convention). Each triangular filter is area normalized.

use std::f64::consts::PI;

/// Power floor for dB conversion
const POWER_AMIN: f32 = 1e-10;

/// Dynamic range kept below the spectrogram maximum (dB)
const TOP_DB: f32 = 80.0;

const F_SP: f64 = 200.0 / 3.0;
const MIN_LOG_HZ: f64 = 1000.0;
const MIN_LOG_MEL: f64 = MIN_LOG_HZ / F_SP;

fn log_step() -> f64 {
    6.4f64.ln() / 27.0
}

/// Converts frequency in Hz to the Slaney mel scale.
pub fn hz_to_mel(hz: f64) -> f64 {
    if hz >= MIN_LOG_HZ {
        MIN_LOG_MEL + (hz / MIN_LOG_HZ).ln() / log_step()
    } else {
        hz / F_SP
    }
}

/// Converts Slaney mel back to Hz.
pub fn mel_to_hz(mel: f64) -> f64 {
    if mel >= MIN_LOG_MEL {
        MIN_LOG_HZ * (log_step() * (mel - MIN_LOG_MEL)).exp()
    } else {
        F_SP * mel
    }
}

/// Creates the area-normalized mel filterbank.
///
/// Returns `[num_mels][fft_size / 2 + 1]`.
pub fn mel_filter_bank(
    num_mels: usize,
    fft_size: usize,
    sample_rate: u32,
    low_freq: f64,
    high_freq: f64,
) -> Vec<Vec<f32>> {
    let half_fft = fft_size / 2 + 1;
    let nyquist = sample_rate as f64 / 2.0;

    let fft_freqs: Vec<f64> = (0..half_fft)
        .map(|i| i as f64 * nyquist / (half_fft - 1).max(1) as f64)
        .collect();

    // num_mels + 2 equally spaced mel points
    let low_mel = hz_to_mel(low_freq);
    let high_mel = hz_to_mel(high_freq);
    let step = (high_mel - low_mel) / (num_mels + 1) as f64;
    let mel_hz: Vec<f64> = (0..num_mels + 2)
        .map(|i| mel_to_hz(low_mel + i as f64 * step))
        .collect();

    (0..num_mels)
        .map(|m| {
            let lower_width = mel_hz[m + 1] - mel_hz[m];
            let upper_width = mel_hz[m + 2] - mel_hz[m + 1];
            let enorm = 2.0 / (mel_hz[m + 2] - mel_hz[m]);

            fft_freqs
                .iter()
                .map(|&f| {
                    let lower = (f - mel_hz[m]) / lower_width;
                    let upper = (mel_hz[m + 2] - f) / upper_width;
                    (lower.min(upper).max(0.0) * enorm) as f32
                })
                .collect()
        })
        .collect()
}

/// Convert a power spectrogram to dB in place
///
/// `10 * log10(max(S, 1e-10))`, then everything more than 80 dB below the
/// global maximum is raised to that floor.
pub fn power_to_db(spectrogram: &mut [Vec<f32>]) {
    let mut max_db = f32::NEG_INFINITY;
    for frame in spectrogram.iter_mut() {
        for value in frame.iter_mut() {
            *value = 10.0 * value.max(POWER_AMIN).log10();
            max_db = max_db.max(*value);
        }
    }

    let floor = max_db - TOP_DB;
    for frame in spectrogram.iter_mut() {
        for value in frame.iter_mut() {
            *value = value.max(floor);
        }
    }
}

/// Orthonormal DCT-II basis, truncated to the first `num_coeffs` rows
///
/// Returns `[num_coeffs][num_inputs]`.
pub fn dct_matrix(num_coeffs: usize, num_inputs: usize) -> Vec<Vec<f32>> {
    let n = num_inputs as f64;
    (0..num_coeffs)
        .map(|k| {
            let norm = if k == 0 {
                (1.0 / n).sqrt()
            } else {
                (2.0 / n).sqrt()
            };
            (0..num_inputs)
                .map(|i| (norm * (PI * k as f64 * (2.0 * i as f64 + 1.0) / (2.0 * n)).cos()) as f32)
                .collect()
        })
        .collect()
}
