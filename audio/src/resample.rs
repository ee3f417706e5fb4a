//! Sample rate conversion via rubato's FFT resampler.

use rubato::{FftFixedIn, Resampler};

use crate::{AudioError, Waveform};

const CHUNK_SIZE: usize = 1024;
const SUB_CHUNKS: usize = 2;

/// Resamples a waveform to `target_rate`.
///
/// Identity when the waveform is already at the target rate. The FFT
/// resampler's startup latency is trimmed so the output aligns with the
/// input, and the result is truncated to the expected length.
pub fn resample(waveform: Waveform, target_rate: u32) -> Result<Waveform, AudioError> {
    if waveform.sample_rate == target_rate || waveform.is_empty() {
        return Ok(Waveform::new(waveform.samples, target_rate));
    }
    if waveform.sample_rate == 0 {
        return Err(AudioError::Resample("source sample rate is zero".into()));
    }

    let src_rate = waveform.sample_rate as usize;
    let dst_rate = target_rate as usize;
    let mut resampler = FftFixedIn::<f32>::new(src_rate, dst_rate, CHUNK_SIZE, SUB_CHUNKS, 1)
        .map_err(|e| AudioError::Resample(e.to_string()))?;

    let expected = (waveform.samples.len() as f64 * dst_rate as f64 / src_rate as f64)
        .round() as usize;
    let delay = resampler.output_delay();
    let mut out: Vec<f32> = Vec::with_capacity(expected + delay);

    let samples = &waveform.samples;
    let mut pos = 0;
    while samples.len() - pos >= resampler.input_frames_next() {
        let n = resampler.input_frames_next();
        let produced = resampler
            .process(&[&samples[pos..pos + n]], None)
            .map_err(|e| AudioError::Resample(e.to_string()))?;
        out.extend_from_slice(&produced[0]);
        pos += n;
    }

    // Tail shorter than one chunk, then flush the internal buffer.
    if pos < samples.len() {
        let produced = resampler
            .process_partial(Some(&[&samples[pos..]]), None)
            .map_err(|e| AudioError::Resample(e.to_string()))?;
        out.extend_from_slice(&produced[0]);
    }
    let produced = resampler
        .process_partial::<&[f32]>(None, None)
        .map_err(|e| AudioError::Resample(e.to_string()))?;
    out.extend_from_slice(&produced[0]);

    out.drain(..delay.min(out.len()));
    out.truncate(expected);

    Ok(Waveform::new(out, target_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn sine(freq: f32, sample_rate: u32, seconds: f32) -> Waveform {
        let n = (sample_rate as f32 * seconds) as usize;
        let samples = (0..n)
            .map(|i| (2.0 * PI * freq * i as f32 / sample_rate as f32).sin())
            .collect();
        Waveform::new(samples, sample_rate)
    }

    #[test]
    fn identity_when_rate_matches() {
        let w = sine(440.0, 16_000, 0.5);
        let original = w.clone();
        let out = resample(w, 16_000).unwrap();
        assert_eq!(out, original);
    }

    #[test]
    fn downsample_halves_length() {
        let w = sine(440.0, 32_000, 1.0);
        let out = resample(w, 16_000).unwrap();
        assert_eq!(out.sample_rate, 16_000);
        // 32000 samples at 2:1 -> 16000, allow a few frames of slack.
        assert!((out.len() as i64 - 16_000).abs() <= 16, "got {}", out.len());
    }

    #[test]
    fn upsample_preserves_amplitude() {
        let w = sine(440.0, 8_000, 1.0);
        let out = resample(w, 16_000).unwrap();
        assert_eq!(out.sample_rate, 16_000);
        let peak = out.peak();
        assert!((peak - 1.0).abs() < 0.1, "peak {peak}");
    }

    #[test]
    fn empty_input_stays_empty() {
        let w = Waveform::new(vec![], 44_100);
        let out = resample(w, 16_000).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.sample_rate, 16_000);
    }
}
