// Delta module - Savitzky-Golay derivatives of per-frame features
//
// For a window of half-width h, a least-squares polynomial of degree `order`
// is fitted around each frame and its `order`-th derivative taken:
//
//   order 1: d[t]  = Σ k·x[t+k] / Σ k²
//   order 2: d2[t] = 2 · Σ (k² − m)·x[t+k] / Σ (k² − m)²,  m = Σ k² / (2h+1)
//
// For polynomial degree == derivative order that derivative is constant over
// the window, so edge frames reuse the first/last full window ("interp"
// edges). Short inputs shrink the window to the widest odd width that fits;
// below three frames the derivative is zero.

/// Compute the `order`-th derivative (1 or 2) of every feature across frames
///
/// # Arguments
/// * `frames` - Frame-major features (`frames[t][coeff]`)
/// * `width` - Regression window width (odd, typically 9)
/// * `order` - Derivative order, 1 or 2
///
/// # Returns
/// Frame-major derivatives with the same shape as `frames`
pub fn delta(frames: &[Vec<f32>], width: usize, order: usize) -> Vec<Vec<f32>> {
    let num_frames = frames.len();
    let num_coeffs = frames.first().map(Vec::len).unwrap_or(0);
    let mut output = vec![vec![0.0f32; num_coeffs]; num_frames];

    let width = effective_width(width, num_frames);
    if width < 3 || !(1..=2).contains(&order) {
        return output;
    }

    let half = width / 2;
    let weights = regression_weights(half, order);

    for (t, out) in output.iter_mut().enumerate() {
        let center = t.clamp(half, num_frames - 1 - half);
        for (c, value) in out.iter_mut().enumerate() {
            let acc: f64 = weights
                .iter()
                .enumerate()
                .map(|(j, &w)| w * frames[center + j - half][c] as f64)
                .sum();
            *value = acc as f32;
        }
    }

    output
}

/// Largest odd width not exceeding `width` or `num_frames`
fn effective_width(width: usize, num_frames: usize) -> usize {
    let w = width.min(num_frames);
    if w % 2 == 0 {
        w.saturating_sub(1)
    } else {
        w
    }
}

/// Weights for offsets `-half..=half`
fn regression_weights(half: usize, order: usize) -> Vec<f64> {
    let offsets: Vec<f64> = (-(half as i64)..=half as i64).map(|k| k as f64).collect();
    let sum_k2: f64 = offsets.iter().map(|k| k * k).sum();

    if order == 1 {
        return offsets.iter().map(|k| k / sum_k2).collect();
    }

    let mean_k2 = sum_k2 / offsets.len() as f64;
    let centered: Vec<f64> = offsets.iter().map(|k| k * k - mean_k2).collect();
    let norm: f64 = centered.iter().map(|c| c * c).sum();
    centered.iter().map(|c| 2.0 * c / norm).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(values: &[f32]) -> Vec<Vec<f32>> {
        values.iter().map(|&v| vec![v]).collect()
    }

    #[test]
    fn test_first_delta_of_linear_ramp() {
        let frames = column(&(0..20).map(|i| 3.0 * i as f32 + 1.0).collect::<Vec<_>>());
        let d = delta(&frames, 9, 1);
        for row in &d {
            assert!((row[0] - 3.0).abs() < 1e-4, "got {}", row[0]);
        }
    }

    #[test]
    fn test_second_delta_of_parabola() {
        // x = 0.5 t² has second derivative 1 everywhere, edges included
        let frames = column(&(0..15).map(|t| 0.5 * (t * t) as f32).collect::<Vec<_>>());
        let d2 = delta(&frames, 9, 2);
        for row in &d2 {
            assert!((row[0] - 1.0).abs() < 1e-3, "got {}", row[0]);
        }
    }

    #[test]
    fn test_constant_signal_has_zero_deltas() {
        let frames = vec![vec![2.0, -1.0]; 12];
        for order in [1, 2] {
            let d = delta(&frames, 9, order);
            assert!(d.iter().flatten().all(|v| v.abs() < 1e-6));
        }
    }

    #[test]
    fn test_short_input_shrinks_window() {
        // Five frames: width drops to 5 and a ramp still has slope 2
        let frames = column(&[0.0, 2.0, 4.0, 6.0, 8.0]);
        let d = delta(&frames, 9, 1);
        assert!(d.iter().all(|row| (row[0] - 2.0).abs() < 1e-5));

        // Four frames: width 3
        let frames = column(&[0.0, 1.0, 2.0, 3.0]);
        let d = delta(&frames, 9, 1);
        assert!(d.iter().all(|row| (row[0] - 1.0).abs() < 1e-5));
    }

    #[test]
    fn test_too_few_frames_yield_zeros() {
        for n in 0..3 {
            let frames = vec![vec![1.0, 5.0]; n];
            let d = delta(&frames, 9, 1);
            assert_eq!(d.len(), n);
            assert!(d.iter().flatten().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn test_effective_width() {
        assert_eq!(effective_width(9, 100), 9);
        assert_eq!(effective_width(9, 8), 7);
        assert_eq!(effective_width(9, 3), 3);
        assert_eq!(effective_width(9, 2), 1);
        assert_eq!(effective_width(9, 0), 0);
    }
}
