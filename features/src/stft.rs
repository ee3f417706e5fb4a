//! Short-time Fourier transform producing a power spectrogram.

use std::f64::consts::PI;

use crate::config::FeatureConfig;
use crate::fft::{fft, next_pow2};

/// Power spectrogram: `[num_frames][n_fft/2 + 1]`, |X[k]|^2 per bin.
///
/// Returns `None` when the signal is shorter than one frame.
pub(crate) fn power_spectrogram(samples: &[f32], cfg: &FeatureConfig) -> Option<Vec<Vec<f64>>> {
    if cfg.n_fft == 0 || cfg.hop == 0 || samples.len() < cfg.n_fft {
        return None;
    }

    let fft_size = next_pow2(cfg.n_fft);
    let half = fft_size / 2 + 1;
    let window = hann_window(cfg.n_fft);
    let num_frames = (samples.len() - cfg.n_fft) / cfg.hop + 1;

    let mut frames = Vec::with_capacity(num_frames);
    let mut buf = vec![(0.0f64, 0.0f64); fft_size];

    for f in 0..num_frames {
        let offset = f * cfg.hop;

        for v in &mut buf {
            *v = (0.0, 0.0);
        }
        for i in 0..cfg.n_fft {
            buf[i] = (samples[offset + i] as f64 * window[i], 0.0);
        }
        fft(&mut buf);

        let mut power = vec![0.0f64; half];
        for k in 0..half {
            let (re, im) = buf[k];
            power[k] = re * re + im * im;
        }
        frames.push(power);
    }

    Some(frames)
}

/// Time-domain frames matching the spectrogram framing, for descriptors
/// that need raw samples (zero-crossing rate).
pub(crate) fn time_frames<'a>(
    samples: &'a [f32],
    cfg: &FeatureConfig,
) -> impl Iterator<Item = &'a [f32]> {
    let n_fft = cfg.n_fft;
    let hop = cfg.hop;
    let num_frames = if samples.len() < n_fft {
        0
    } else {
        (samples.len() - n_fft) / hop + 1
    };
    (0..num_frames).map(move |f| &samples[f * hop..f * hop + n_fft])
}

fn hann_window(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / (n - 1) as f64).cos())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f64, sample_rate: u32, n: usize) -> Vec<f32> {
        (0..n)
            .map(|i| (2.0 * PI * freq * i as f64 / sample_rate as f64).sin() as f32)
            .collect()
    }

    #[test]
    fn frame_count() {
        let cfg = FeatureConfig::default();
        let samples = sine(440.0, 16_000, 16_000);
        let spec = power_spectrogram(&samples, &cfg).unwrap();
        // (16000 - 2048) / 512 + 1 = 28
        assert_eq!(spec.len(), 28);
        assert_eq!(spec[0].len(), 2048 / 2 + 1);
    }

    #[test]
    fn too_short_is_none() {
        let cfg = FeatureConfig::default();
        let samples = vec![0.0f32; 1000];
        assert!(power_spectrogram(&samples, &cfg).is_none());
    }

    #[test]
    fn tone_energy_near_expected_bin() {
        let cfg = FeatureConfig::default();
        // 1000 Hz at 16 kHz, bin width = 16000/2048 = 7.8125 Hz -> bin 128.
        let samples = sine(1000.0, 16_000, 16_000);
        let spec = power_spectrogram(&samples, &cfg).unwrap();
        let frame = &spec[5];
        let peak = frame
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(k, _)| k)
            .unwrap();
        assert!((peak as i64 - 128).abs() <= 1, "peak bin {peak}");
    }

    #[test]
    fn time_frames_align_with_spectrogram() {
        let cfg = FeatureConfig::default();
        let samples = sine(440.0, 16_000, 16_000);
        let spec = power_spectrogram(&samples, &cfg).unwrap();
        assert_eq!(time_frames(&samples, &cfg).count(), spec.len());
    }
}
