// Pitch module - spectral peak tracking
//
// Pitch candidates are local maxima of each magnitude spectrum frame that
// lie in [fmin, fmax) and exceed `threshold` × the frame maximum. Bin
// position and magnitude are refined by parabolic interpolation over the
// neighbouring bins.
//
// Low-energy peaks produce unreliable pitch values, so only candidates whose
// magnitude exceeds the median of the whole time-frequency magnitude grid
// (non-peak cells count as zero) are retained.
//
// References:
// - Smith, J.O. Spectral Audio Signal Processing, "Quadratic Interpolation
//   of Spectral Peaks"

/// Pitch tracking parameters
#[derive(Debug, Clone, Copy)]
pub struct PitchTracker {
    sample_rate: u32,
    fft_size: usize,
    fmin: f32,
    fmax: f32,
    threshold: f32,
}

/// A pitch candidate in one frame
#[derive(Debug, Clone, Copy, PartialEq)]
struct Peak {
    pitch: f32,
    magnitude: f32,
}

impl PitchTracker {
    /// Create a new pitch tracker
    ///
    /// # Arguments
    /// * `sample_rate` - Sample rate of the analysed signal
    /// * `fft_size` - FFT size used for the spectrogram
    /// * `fmin` / `fmax` - Candidate frequency band in Hz (fmax exclusive)
    /// * `threshold` - Fraction of the frame maximum a peak must exceed
    pub fn new(sample_rate: u32, fft_size: usize, fmin: f32, fmax: f32, threshold: f32) -> Self {
        Self {
            sample_rate,
            fft_size,
            fmin,
            fmax,
            threshold,
        }
    }

    /// Retained pitch samples in Hz, ordered frame by frame
    ///
    /// # Arguments
    /// * `spectrogram` - Frame-major magnitude spectrogram
    pub fn track(&self, spectrogram: &[Vec<f32>]) -> Vec<f32> {
        let num_bins = spectrogram.first().map(Vec::len).unwrap_or(0);
        let grid_size = spectrogram.len() * num_bins;
        if grid_size == 0 {
            return Vec::new();
        }

        let peaks: Vec<Peak> = spectrogram
            .iter()
            .flat_map(|spectrum| self.frame_peaks(spectrum))
            .collect();

        let median = grid_median(
            peaks.iter().map(|p| p.magnitude).collect(),
            grid_size,
        );

        peaks
            .into_iter()
            .filter(|p| p.magnitude > median)
            .map(|p| p.pitch)
            .collect()
    }

    fn frame_peaks(&self, spectrum: &[f32]) -> Vec<Peak> {
        let n = spectrum.len();
        if n < 3 {
            return Vec::new();
        }

        let bin_hz = self.sample_rate as f32 / self.fft_size as f32;
        let frame_max = spectrum.iter().copied().fold(0.0f32, f32::max);
        let reference = self.threshold * frame_max;

        // Spectrum with sub-threshold bins zeroed
        let gated = |i: usize| {
            if spectrum[i] > reference {
                spectrum[i]
            } else {
                0.0
            }
        };

        let mut peaks = Vec::new();
        for bin in 0..n {
            let freq = bin as f32 * bin_hz;
            if freq < self.fmin || freq >= self.fmax {
                continue;
            }

            let value = gated(bin);
            let left = gated(bin.saturating_sub(1));
            let right = gated((bin + 1).min(n - 1));
            if !(value > left && value >= right) {
                continue;
            }

            let (shift, skew) = if bin > 0 && bin + 1 < n {
                let avg = 0.5 * (spectrum[bin + 1] - spectrum[bin - 1]);
                let mut curvature = 2.0 * spectrum[bin] - spectrum[bin + 1] - spectrum[bin - 1];
                if curvature.abs() < f32::MIN_POSITIVE {
                    curvature += 1.0;
                }
                let shift = avg / curvature;
                (shift, 0.5 * avg * shift)
            } else {
                (0.0, 0.0)
            };

            peaks.push(Peak {
                pitch: (bin as f32 + shift) * bin_hz,
                magnitude: spectrum[bin] + skew,
            });
        }

        peaks
    }
}

/// Median of a grid whose non-listed cells are zero
fn grid_median(mut values: Vec<f32>, grid_size: usize) -> f32 {
    let zeros = grid_size.saturating_sub(values.len());
    values.extend(std::iter::repeat(0.0).take(zeros));
    values.sort_by(|a, b| a.total_cmp(b));

    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        0.5 * (values[mid - 1] + values[mid])
    } else {
        values[mid]
    }
}
