//! Deterministic synthetic signals and in-memory WAV encoding.
//!
//! Tones are generated with a phase accumulator so frequency-modulated
//! signals stay continuous; noise uses a fixed-seed `StdRng`.

use std::f32::consts::PI;
use std::io::Cursor;

use rand::{rngs::StdRng, Rng, SeedableRng};

fn sample_count(sample_rate: u32, duration_secs: f32) -> usize {
    (sample_rate as f32 * duration_secs.max(0.0)).round() as usize
}

/// Pure sine tone
pub fn sine(sample_rate: u32, frequency_hz: f32, duration_secs: f32, amplitude: f32) -> Vec<f32> {
    vibrato(sample_rate, frequency_hz, 0.0, 0.0, duration_secs, amplitude)
}

/// Sine tone whose frequency swings `depth_hz` around `frequency_hz` at `rate_hz`
pub fn vibrato(
    sample_rate: u32,
    frequency_hz: f32,
    depth_hz: f32,
    rate_hz: f32,
    duration_secs: f32,
    amplitude: f32,
) -> Vec<f32> {
    let sr = sample_rate.max(1) as f32;
    let mut phase = 0.0f32;

    (0..sample_count(sample_rate, duration_secs))
        .map(|i| {
            let t = i as f32 / sr;
            let value = (2.0 * PI * phase).sin() * amplitude;
            let freq = frequency_hz + depth_hz * (2.0 * PI * rate_hz * t).sin();
            phase += freq / sr;
            if phase >= 1.0 {
                phase -= 1.0;
            }
            value
        })
        .collect()
}

/// Multiply a signal by a sinusoidal envelope swinging between `1 - depth` and 1
pub fn tremolo(samples: &[f32], sample_rate: u32, rate_hz: f32, depth: f32) -> Vec<f32> {
    let sr = sample_rate.max(1) as f32;
    samples
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let lfo = 0.5 + 0.5 * (2.0 * PI * rate_hz * i as f32 / sr).sin();
            s * (1.0 - depth + depth * lfo)
        })
        .collect()
}

/// Uniform white noise from a fixed seed
pub fn noise(seed: u64, len: usize, amplitude: f32) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| rng.gen_range(-amplitude..=amplitude))
        .collect()
}

/// Pad a signal with digital silence on both sides
pub fn with_silence(samples: &[f32], sample_rate: u32, lead_secs: f32, tail_secs: f32) -> Vec<f32> {
    let lead = sample_count(sample_rate, lead_secs);
    let tail = sample_count(sample_rate, tail_secs);

    let mut out = Vec::with_capacity(lead + samples.len() + tail);
    out.extend(std::iter::repeat(0.0).take(lead));
    out.extend_from_slice(samples);
    out.extend(std::iter::repeat(0.0).take(tail));
    out
}

/// Encode mono samples as a 16-bit PCM WAV file in memory
///
/// Panics on encoder failure, which cannot happen for an in-memory cursor.
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).expect("wav header");
        for &sample in samples {
            let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer.write_sample(value).expect("wav sample");
        }
        writer.finalize().expect("wav finalize");
    }
    cursor.into_inner()
}
