// FeatureExtractor - acoustic features for voice authenticity scoring
//
// This module turns a trimmed waveform into the fixed-width feature vector
// consumed by the scaler and classifier, plus the summary statistics used to
// narrate a decision.
//
// Module organization:
// - types: Data structures (FeatureVector, ScaledFeatureVector, Statistics)
// - fft: Centered STFT with a periodic Hann window
// - mel: Slaney mel filterbank, dB conversion and DCT-II
// - delta: Savitzky-Golay first and second derivatives
// - pitch: Spectral peak pitch tracking with median gating
// - temporal: Shimmer and the mean/std/diff reductions
// - mod.rs: Coordinator (FeatureExtractor)
//
// Feature vector layout for N = 3 × n_mfcc stacked rows:
//   [mean(N), std(N), pitch_mean, pitch_std, jitter, shimmer]
// where the stacked rows are the MFCCs, their deltas and their delta-deltas.
//
// References:
// - Davis, S. & Mermelstein, P. (1980). Comparison of parametric
//   representations for monosyllabic word recognition
// - Slaney, M. (1998). Auditory Toolbox, Technical Report #1998-010

mod delta;
mod fft;
mod mel;
mod pitch;
mod temporal;
mod types;

pub use types::{feature_len, FeatureVector, ScaledFeatureVector, Statistics, PROSODY_FEATURES};

use log::debug;

use crate::audio::Waveform;
use crate::config::FeatureConfig;
use crate::error::PipelineError;
use fft::StftProcessor;
use pitch::PitchTracker;

/// FeatureExtractor coordinates the MFCC, pitch and amplitude analyses
///
/// All tables (window, mel filterbank, DCT basis, FFT plan) are built once in
/// `new`; `extract` only reads them, so one extractor can serve concurrent
/// requests.
pub struct FeatureExtractor {
    sample_rate: u32,
    n_mfcc: usize,
    delta_width: usize,
    stft: StftProcessor,
    /// `[n_mels][n_fft / 2 + 1]`
    mel_bank: Vec<Vec<f32>>,
    /// `[n_mfcc][n_mels]`
    dct: Vec<Vec<f32>>,
    pitch: PitchTracker,
}

impl FeatureExtractor {
    /// Create a new FeatureExtractor from the feature configuration
    pub fn new(config: &FeatureConfig) -> Self {
        let stft = StftProcessor::new(config.n_fft, config.hop_length);
        let mel_bank = mel::mel_filter_bank(
            config.n_mels,
            stft.fft_size(),
            config.sample_rate,
            0.0,
            config.sample_rate as f64 / 2.0,
        );
        let dct = mel::dct_matrix(config.n_mfcc, config.n_mels);
        let pitch = PitchTracker::new(
            config.sample_rate,
            stft.fft_size(),
            config.pitch_fmin,
            config.pitch_fmax,
            config.pitch_threshold,
        );

        Self {
            sample_rate: config.sample_rate,
            n_mfcc: config.n_mfcc,
            delta_width: config.delta_width,
            stft,
            mel_bank,
            dct,
            pitch,
        }
    }

    /// Width of the vectors produced by `extract`
    pub fn feature_len(&self) -> usize {
        feature_len(self.n_mfcc)
    }

    /// Extract the feature vector and summary statistics of a waveform
    ///
    /// # Errors
    /// * `PipelineError::Decode` for an empty waveform
    /// * `PipelineError::Internal` if the waveform is not at the configured
    ///   sample rate
    pub fn extract(&self, waveform: &Waveform) -> Result<(FeatureVector, Statistics), PipelineError> {
        if waveform.is_empty() {
            return Err(PipelineError::Decode {
                reason: "cannot extract features from an empty waveform".to_string(),
            });
        }
        if waveform.sample_rate() != self.sample_rate {
            return Err(PipelineError::Internal {
                details: format!(
                    "waveform sample rate {} Hz differs from analysis rate {} Hz",
                    waveform.sample_rate(),
                    self.sample_rate
                ),
            });
        }

        let samples = waveform.samples();
        let magnitudes = self.stft.magnitude_spectrogram(samples);

        // Cepstral rows: coefficients, deltas, delta-deltas
        let mfcc = self.mfcc(&magnitudes);
        let d1 = delta::delta(&mfcc, self.delta_width, 1);
        let d2 = delta::delta(&mfcc, self.delta_width, 2);

        let rows = 3 * self.n_mfcc;
        let mut row_means = Vec::with_capacity(rows);
        let mut row_stds = Vec::with_capacity(rows);
        for frames in [&mfcc, &d1, &d2] {
            for coeff in 0..self.n_mfcc {
                let row: Vec<f32> = frames.iter().map(|frame| frame[coeff]).collect();
                row_means.push(temporal::mean(&row));
                row_stds.push(temporal::std_dev(&row));
            }
        }

        let pitches = self.pitch.track(&magnitudes);
        let stats = Statistics {
            pitch_mean: temporal::mean(&pitches),
            pitch_std: temporal::std_dev(&pitches),
            jitter: temporal::mean_abs_diff(&pitches),
            shimmer: temporal::shimmer(samples, self.stft.fft_size(), self.stft.hop_length()),
            mfcc_std_mean: temporal::mean(&row_stds),
        };

        debug!(
            "Extracted features: frames={}, pitch_samples={}, pitch_mean={:.1}, shimmer={:.4}",
            mfcc.len(),
            pitches.len(),
            stats.pitch_mean,
            stats.shimmer
        );

        let mut values = Vec::with_capacity(self.feature_len());
        values.extend_from_slice(&row_means);
        values.extend_from_slice(&row_stds);
        values.extend_from_slice(&[stats.pitch_mean, stats.pitch_std, stats.jitter, stats.shimmer]);

        Ok((FeatureVector::new(values), stats))
    }

    /// Frame-major MFCCs (`[frames][n_mfcc]`) from a magnitude spectrogram
    fn mfcc(&self, magnitudes: &[Vec<f32>]) -> Vec<Vec<f32>> {
        let mut mel_db: Vec<Vec<f32>> = magnitudes
            .iter()
            .map(|frame| {
                self.mel_bank
                    .iter()
                    .map(|filter| {
                        filter
                            .iter()
                            .zip(frame)
                            .map(|(&w, &m)| w as f64 * (m as f64 * m as f64))
                            .sum::<f64>() as f32
                    })
                    .collect()
            })
            .collect();

        mel::power_to_db(&mut mel_db);

        mel_db
            .iter()
            .map(|bands| {
                self.dct
                    .iter()
                    .map(|basis| {
                        basis
                            .iter()
                            .zip(bands)
                            .map(|(&b, &v)| b as f64 * v as f64)
                            .sum::<f64>() as f32
                    })
                    .collect()
            })
            .collect()
    }
}
