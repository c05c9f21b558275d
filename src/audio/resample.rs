// Resample - sample rate conversion to the analysis rate using rubato
//
// A synchronous FFT resampler processes fixed-size chunks; the final chunk is
// zero padded, the resampler's output delay is dropped and the result is cut
// to ceil(len * to / from) samples so the output lines up with the input.

use rubato::{FftFixedInOut, Resampler};

use crate::error::PipelineError;

/// Input frames per resampler chunk
const CHUNK_SIZE: usize = 1024;

fn resampler_error(err: impl std::fmt::Display) -> PipelineError {
    PipelineError::Internal {
        details: format!("resampler: {}", err),
    }
}

/// Resample mono samples from `from_rate` to `to_rate`
///
/// Returns the input unchanged when the rates already match.
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, PipelineError> {
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }
    if from_rate == 0 || to_rate == 0 {
        return Err(PipelineError::Decode {
            reason: format!("invalid sample rate conversion {} -> {}", from_rate, to_rate),
        });
    }

    let mut resampler =
        FftFixedInOut::<f32>::new(from_rate as usize, to_rate as usize, CHUNK_SIZE, 1)
            .map_err(resampler_error)?;

    let delay = resampler.output_delay();
    let expected = ((samples.len() as u64 * to_rate as u64 + from_rate as u64 - 1)
        / from_rate as u64) as usize;

    let mut output = Vec::with_capacity(expected + delay + CHUNK_SIZE);
    let mut position = 0usize;

    while output.len() < expected + delay {
        let needed = resampler.input_frames_next();
        let mut chunk = vec![0.0f32; needed];
        if position < samples.len() {
            let end = (position + needed).min(samples.len());
            chunk[..end - position].copy_from_slice(&samples[position..end]);
        }
        position += needed;

        let wave_in = vec![chunk];
        let wave_out = resampler.process(&wave_in, None).map_err(resampler_error)?;
        output.extend_from_slice(&wave_out[0]);
    }

    output.drain(..delay.min(output.len()));
    output.truncate(expected);
    Ok(output)
}
