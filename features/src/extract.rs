//! Feature vector assembly.

use hivesense_audio::Waveform;

use crate::config::FeatureConfig;
use crate::error::FeatureError;
use crate::{mel, spectral, stft};

/// Fixed-length acoustic feature vector.
///
/// Layout (see crate docs): 16 spectral descriptor statistics, then
/// per-band mel means and stds, then per-coefficient MFCC means and stds.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f32>,
}

impl FeatureVector {
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<FeatureVector> for Vec<f32> {
    fn from(v: FeatureVector) -> Self {
        v.values
    }
}

/// Extracts the full feature vector from a preprocessed waveform.
///
/// The waveform must already be at `cfg.sample_rate`; extraction is
/// deterministic, so the same samples always yield the same vector.
pub fn extract_features(
    waveform: &Waveform,
    cfg: &FeatureConfig,
) -> Result<FeatureVector, FeatureError> {
    if waveform.sample_rate != cfg.sample_rate {
        return Err(FeatureError::SampleRate {
            expected: cfg.sample_rate,
            got: waveform.sample_rate,
        });
    }
    let power = stft::power_spectrogram(&waveform.samples, cfg).ok_or(FeatureError::TooShort {
        min_samples: cfg.n_fft,
        got_samples: waveform.len(),
    })?;

    let bin_hz = spectral::bin_hz(cfg);
    let mut centroids = Vec::with_capacity(power.len());
    let mut bandwidths = Vec::with_capacity(power.len());
    let mut rolloffs = Vec::with_capacity(power.len());
    for frame in &power {
        let c = spectral::centroid(frame, bin_hz);
        centroids.push(c);
        bandwidths.push(spectral::bandwidth(frame, bin_hz, c));
        rolloffs.push(spectral::rolloff(frame, bin_hz, cfg.rolloff));
    }
    let zcrs: Vec<f64> = stft::time_frames(&waveform.samples, cfg)
        .map(spectral::zero_crossing_rate)
        .collect();

    let bank = mel::mel_filterbank(cfg);
    let mel_frames = mel::mel_spectrogram(&power, &bank);
    let log_mel = mel::log_mel(&mel_frames);
    let mfcc_frames = mel::mfcc(&log_mel, cfg.n_mfcc);

    // Concatenation order is the model contract; do not reorder.
    let mut values = Vec::with_capacity(cfg.feature_dim());
    for series in [&centroids, &bandwidths, &rolloffs, &zcrs] {
        let s = Stats::over(series);
        values.extend_from_slice(&[s.mean as f32, s.std as f32, s.min as f32, s.max as f32]);
    }
    push_columnwise_mean_std(&mut values, &log_mel, cfg.n_mels);
    push_columnwise_mean_std(&mut values, &mfcc_frames, cfg.n_mfcc);

    debug_assert_eq!(values.len(), cfg.feature_dim());
    Ok(FeatureVector { values })
}

/// Appends the per-column mean block, then the per-column std block.
fn push_columnwise_mean_std(out: &mut Vec<f32>, frames: &[Vec<f64>], columns: usize) {
    let n = frames.len() as f64;
    let mut means = vec![0.0f64; columns];
    for frame in frames {
        for (m, &v) in means.iter_mut().zip(frame.iter()) {
            *m += v;
        }
    }
    for m in &mut means {
        *m /= n;
    }

    let mut stds = vec![0.0f64; columns];
    for frame in frames {
        for ((s, &v), &m) in stds.iter_mut().zip(frame.iter()).zip(means.iter()) {
            let d = v - m;
            *s += d * d;
        }
    }
    for s in &mut stds {
        *s = (*s / n).sqrt();
    }

    out.extend(means.iter().map(|&m| m as f32));
    out.extend(stds.iter().map(|&s| s as f32));
}

struct Stats {
    mean: f64,
    std: f64,
    min: f64,
    max: f64,
}

impl Stats {
    fn over(series: &[f64]) -> Self {
        let n = series.len() as f64;
        let mean = series.iter().sum::<f64>() / n;
        let var = series.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>() / n;
        let min = series.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = series.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Self {
            mean,
            std: var.sqrt(),
            min,
            max,
        }
    }
}
