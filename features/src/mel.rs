//! Mel filterbank, mel spectrogram and MFCCs.

use std::f64::consts::PI;

use crate::config::FeatureConfig;
use crate::fft::next_pow2;

/// Floor applied before taking logs of band energies.
const ENERGY_FLOOR: f64 = 1e-10;

fn hz_to_mel(hz: f64) -> f64 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

fn mel_to_hz(mel: f64) -> f64 {
    700.0 * (10.0f64.powf(mel / 2595.0) - 1.0)
}

/// Triangular mel filterbank weights: `[n_mels][n_fft/2 + 1]`.
///
/// Filters span `cfg.low_freq` up to Nyquist, equally spaced on the mel
/// scale, each triangle anchored to FFT bin indices.
pub(crate) fn mel_filterbank(cfg: &FeatureConfig) -> Vec<Vec<f64>> {
    let fft_size = next_pow2(cfg.n_fft);
    let half = fft_size / 2 + 1;
    let high_freq = cfg.sample_rate as f64 / 2.0;

    let mel_low = hz_to_mel(cfg.low_freq);
    let mel_high = hz_to_mel(high_freq);
    let bins: Vec<usize> = (0..cfg.n_mels + 2)
        .map(|i| {
            let mel = mel_low + i as f64 * (mel_high - mel_low) / (cfg.n_mels + 1) as f64;
            let hz = mel_to_hz(mel);
            let bin = (hz * fft_size as f64 / cfg.sample_rate as f64).floor() as isize;
            bin.clamp(0, half as isize - 1) as usize
        })
        .collect();

    let mut bank = Vec::with_capacity(cfg.n_mels);
    for m in 0..cfg.n_mels {
        let (left, center, right) = (bins[m], bins[m + 1], bins[m + 2]);
        let mut filter = vec![0.0f64; half];
        if center > left {
            for k in left..=center {
                filter[k] = (k - left) as f64 / (center - left) as f64;
            }
        }
        if right > center {
            for k in center..=right {
                filter[k] = (right - k) as f64 / (right - center) as f64;
            }
        }
        bank.push(filter);
    }
    bank
}

/// Applies the filterbank to a power spectrogram: `[frames][n_mels]`
/// linear band energies.
pub(crate) fn mel_spectrogram(power: &[Vec<f64>], bank: &[Vec<f64>]) -> Vec<Vec<f64>> {
    power
        .iter()
        .map(|frame| {
            bank.iter()
                .map(|filter| {
                    filter
                        .iter()
                        .zip(frame.iter())
                        .map(|(&w, &p)| w * p)
                        .sum::<f64>()
                })
                .collect()
        })
        .collect()
}

/// Natural log of band energies with a floor to keep silence finite.
pub(crate) fn log_mel(mel: &[Vec<f64>]) -> Vec<Vec<f64>> {
    mel.iter()
        .map(|frame| frame.iter().map(|&e| e.max(ENERGY_FLOOR).ln()).collect())
        .collect()
}

/// First `n_mfcc` cepstral coefficients per frame via an orthonormal
/// DCT-II over the log-mel bands.
pub(crate) fn mfcc(log_mel: &[Vec<f64>], n_mfcc: usize) -> Vec<Vec<f64>> {
    log_mel
        .iter()
        .map(|frame| dct2_truncated(frame, n_mfcc))
        .collect()
}

fn dct2_truncated(x: &[f64], count: usize) -> Vec<f64> {
    let n = x.len();
    let mut out = Vec::with_capacity(count.min(n));
    for k in 0..count.min(n) {
        let mut sum = 0.0;
        for (i, &v) in x.iter().enumerate() {
            sum += v * (PI * k as f64 * (2.0 * i as f64 + 1.0) / (2.0 * n as f64)).cos();
        }
        let scale = if k == 0 {
            (1.0 / n as f64).sqrt()
        } else {
            (2.0 / n as f64).sqrt()
        };
        out.push(sum * scale);
    }
    out
}
