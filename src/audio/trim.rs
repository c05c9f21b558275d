// Trim - frame RMS and leading/trailing silence removal
//
// Frames are centered on multiples of the hop (zero padded by half a frame on
// both sides). A frame is "loud" when its RMS level is within `top_db` of the
// loudest frame; everything before the first and after the last loud frame is
// dropped.

use std::ops::Range;

/// Amplitude floor used for the dB conversion
const AMIN: f32 = 1e-5;

/// Compute per-frame root-mean-square amplitude over centered frames
///
/// # Arguments
/// * `samples` - Mono signal
/// * `frame_length` - Frame size in samples
/// * `hop_length` - Hop between frame centers
///
/// # Returns
/// `1 + len / hop_length` RMS values (empty for an empty signal)
pub fn frame_rms(samples: &[f32], frame_length: usize, hop_length: usize) -> Vec<f32> {
    if samples.is_empty() || frame_length == 0 || hop_length == 0 {
        return Vec::new();
    }

    let pad = frame_length / 2;
    let num_frames = 1 + samples.len() / hop_length;

    (0..num_frames)
        .map(|frame| {
            // Frame covers padded[frame * hop .. frame * hop + frame_length]
            let start = (frame * hop_length) as isize - pad as isize;
            let lo = start.max(0) as usize;
            let hi = ((start + frame_length as isize).max(0) as usize).min(samples.len());
            let energy: f64 = if lo < hi {
                samples[lo..hi].iter().map(|&s| (s as f64) * (s as f64)).sum()
            } else {
                0.0
            };
            (energy / frame_length as f64).sqrt() as f32
        })
        .collect()
}

/// Find the non-silent sample range of a signal
///
/// # Arguments
/// * `samples` - Mono signal
/// * `top_db` - Threshold in dB below the loudest frame
/// * `frame_length` - Analysis frame size
/// * `hop_length` - Hop between frames
///
/// # Returns
/// Range of samples to keep; empty when the whole signal is silent. A signal
/// whose loudest frame RMS is at or below 1e-5 (about -100 dBFS) counts as
/// silent as a whole, even though it could still hold relative dynamics.
pub fn trim_silence(
    samples: &[f32],
    top_db: f32,
    frame_length: usize,
    hop_length: usize,
) -> Range<usize> {
    let rms = frame_rms(samples, frame_length, hop_length);
    let peak = rms.iter().copied().fold(0.0f32, f32::max);

    // A signal that never rises above the amplitude floor is all silence
    if peak <= AMIN {
        return 0..0;
    }

    let ref_db = 20.0 * peak.log10();
    let is_loud = |r: &f32| 20.0 * r.max(AMIN).log10() - ref_db > -top_db;

    let first = rms.iter().position(is_loud);
    let last = rms.iter().rposition(is_loud);

    match (first, last) {
        (Some(first), Some(last)) => {
            let start = (first * hop_length).min(samples.len());
            let end = ((last + 1) * hop_length).min(samples.len());
            start..end.max(start)
        }
        _ => 0..0,
    }
}
