//! WAV decoding for uploaded recordings.

use std::io::Cursor;

use hound::{SampleFormat, WavReader};

use crate::{AudioError, Waveform};

/// Decodes a WAV byte stream into a mono [`Waveform`].
///
/// Supports integer PCM (8/16/24/32 bit) and IEEE float streams.
/// Multi-channel audio is averaged down to mono. Returns
/// [`AudioError::Decode`] on malformed input and [`AudioError::Empty`]
/// when the stream holds no samples.
pub fn decode_wav(bytes: &[u8]) -> Result<Waveform, AudioError> {
    let reader = WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();

    if spec.channels == 0 {
        return Err(AudioError::Unsupported("zero channels".into()));
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(AudioError::from)?,
        SampleFormat::Int => {
            if spec.bits_per_sample == 0 || spec.bits_per_sample > 32 {
                return Err(AudioError::Unsupported(format!(
                    "{} bit integer samples",
                    spec.bits_per_sample
                )));
            }
            // Full-scale value for this bit depth, e.g. 32768 for PCM16.
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()
                .map_err(AudioError::from)?
        }
    };

    if interleaved.is_empty() {
        return Err(AudioError::Empty);
    }

    let samples = downmix(&interleaved, spec.channels as usize);
    Ok(Waveform::new(samples, spec.sample_rate))
}

/// Averages interleaved channels into a mono signal.
fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}
