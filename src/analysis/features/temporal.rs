// Temporal module - Time-domain feature extraction
//
// Amplitude variability and the summary statistics shared by the MFCC and
// pitch paths. All reductions accumulate in f64 so results do not depend on
// summation order beyond the fixed left-to-right pass.

use crate::audio::frame_rms;

/// Arithmetic mean, 0.0 for an empty slice
pub fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: f64 = values.iter().map(|&v| v as f64).sum();
    (sum / values.len() as f64) as f32
}

/// Population standard deviation (ddof = 0), 0.0 for an empty slice
pub fn std_dev(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    let var = values
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    var.sqrt() as f32
}

/// Mean absolute difference between consecutive values
///
/// Returns 0.0 when fewer than two values are present.
pub fn mean_abs_diff(values: &[f32]) -> f32 {
    if values.len() < 2 {
        return 0.0;
    }
    let sum: f64 = values
        .windows(2)
        .map(|w| (w[1] as f64 - w[0] as f64).abs())
        .sum();
    (sum / (values.len() - 1) as f64) as f32
}

/// Shimmer: mean absolute change of per-frame RMS amplitude
///
/// # Arguments
/// * `samples` - Time-domain audio signal
/// * `frame_length` - RMS frame length
/// * `hop_length` - Hop between RMS frames
pub fn shimmer(samples: &[f32], frame_length: usize, hop_length: usize) -> f32 {
    mean_abs_diff(&frame_rms(samples, frame_length, hop_length))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&values) - 5.0).abs() < 1e-6);
        assert!((std_dev(&values) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_inputs_are_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(std_dev(&[]), 0.0);
        assert_eq!(mean_abs_diff(&[]), 0.0);
        assert_eq!(mean_abs_diff(&[3.0]), 0.0);
    }

    #[test]
    fn test_mean_abs_diff() {
        assert!((mean_abs_diff(&[1.0, 3.0, 2.0]) - 1.5).abs() < 1e-6);
        assert_eq!(mean_abs_diff(&[4.0, 4.0, 4.0]), 0.0);
    }

    #[test]
    fn test_constant_tone_has_low_shimmer() {
        let samples: Vec<f32> = (0..16_000)
            .map(|i| 0.5 * (2.0 * std::f32::consts::PI * 220.0 * i as f32 / 16_000.0).sin())
            .collect();
        let steady = shimmer(&samples, 2048, 512);

        let modulated: Vec<f32> = samples
            .iter()
            .enumerate()
            .map(|(i, s)| s * (0.5 + 0.5 * (2.0 * std::f32::consts::PI * 4.0 * i as f32 / 16_000.0).sin()))
            .collect();
        let varying = shimmer(&modulated, 2048, 512);

        assert!(varying > steady, "modulated {} vs steady {}", varying, steady);
    }

    #[test]
    fn test_shimmer_of_silence_is_zero() {
        assert_eq!(shimmer(&vec![0.0; 4096], 2048, 512), 0.0);
    }
}
