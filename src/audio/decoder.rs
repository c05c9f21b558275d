// Decoder - compressed audio to mono PCM using symphonia
//
// The stream is probed (the declared format only serves as a hint), the
// default track is decoded packet by packet and every frame is downmixed to
// mono by averaging its channels.

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSource, MediaSourceStream};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::default::{get_codecs, get_probe};

use crate::error::PipelineError;

/// Decoded mono PCM at the source sample rate
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: usize,
}

fn decode_error(reason: impl Into<String>) -> PipelineError {
    PipelineError::Decode {
        reason: reason.into(),
    }
}

/// Decode an entire media source to mono f32 samples
///
/// # Arguments
/// * `source` - Staged media source
/// * `extension_hint` - Declared format, forwarded to the probe as a hint
pub fn decode(
    source: Box<dyn MediaSource>,
    extension_hint: &str,
) -> Result<DecodedAudio, PipelineError> {
    let mss = MediaSourceStream::new(source, Default::default());

    let mut hint = Hint::new();
    if !extension_hint.is_empty() {
        hint.with_extension(extension_hint);
    }

    let probed = get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|err| decode_error(format!("unrecognized audio stream: {}", err)))?;
    let mut format = probed.format;

    let (track_id, codec_params) = {
        let track = format
            .default_track()
            .ok_or_else(|| decode_error("no default audio track found"))?;
        (track.id, track.codec_params.clone())
    };

    let mut decoder = get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|err| decode_error(format!("unsupported codec: {}", err)))?;

    let mut sample_rate = codec_params.sample_rate;
    let mut channels = codec_params.channels.map(|c| c.count()).unwrap_or(1);

    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut mono = Vec::<f32>::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(Error::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(Error::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(err) => {
                return Err(decode_error(format!("reading packet: {}", err)));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            // Corrupt frames are skipped, like most players do
            Err(Error::DecodeError(_)) => continue,
            Err(err) => {
                return Err(decode_error(format!("decoding packet: {}", err)));
            }
        };

        let spec = *decoded.spec();
        let chan_count = spec.channels.count().max(1);
        sample_rate = Some(spec.rate);
        channels = chan_count;

        if sample_buf
            .as_ref()
            .map(|b| b.capacity() < decoded.capacity())
            .unwrap_or(true)
        {
            sample_buf = Some(SampleBuffer::<f32>::new(decoded.capacity() as u64, spec));
        }

        if let Some(buf) = sample_buf.as_mut() {
            buf.copy_interleaved_ref(decoded);
            mono.extend(
                buf.samples()
                    .chunks_exact(chan_count)
                    .map(|frame| frame.iter().sum::<f32>() / chan_count as f32),
            );
        }
    }

    let sample_rate = sample_rate.ok_or_else(|| decode_error("unknown sample rate"))?;
    if mono.is_empty() {
        return Err(decode_error("stream contains no audio samples"));
    }

    Ok(DecodedAudio {
        samples: mono,
        sample_rate,
        channels,
    })
}
