//! Normalized mel-spectrogram tensor for image-based classifiers.

use hivesense_audio::Waveform;

use crate::config::FeatureConfig;
use crate::error::FeatureError;
use crate::{mel, stft};

/// A 2D log-mel spectrogram normalized into [0, 1].
///
/// Row-major, `n_mels` rows by `n_frames` columns. Consumed once by an
/// image-based model; the vector pipeline does not use it.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrogramTensor {
    n_mels: usize,
    n_frames: usize,
    data: Vec<f32>,
}

impl SpectrogramTensor {
    pub fn n_mels(&self) -> usize {
        self.n_mels
    }

    pub fn n_frames(&self) -> usize {
        self.n_frames
    }

    /// Row-major values, `n_mels * n_frames` long.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Value at mel band `mel`, frame `frame`, or `None` when either
    /// index is out of range.
    pub fn at(&self, mel: usize, frame: usize) -> Option<f32> {
        if mel >= self.n_mels || frame >= self.n_frames {
            return None;
        }
        self.data.get(mel * self.n_frames + frame).copied()
    }
}

/// Renders the normalized log-mel spectrogram of a preprocessed waveform.
///
/// Min-max normalized so values lie in [0, 1]; a spectrogram with no
/// dynamic range (e.g. digital silence) maps to all zeros.
pub fn mel_spectrogram_tensor(
    waveform: &Waveform,
    cfg: &FeatureConfig,
) -> Result<SpectrogramTensor, FeatureError> {
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

    let bank = mel::mel_filterbank(cfg);
    let log_mel = mel::log_mel(&mel::mel_spectrogram(&power, &bank));

    let n_frames = log_mel.len();
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for frame in &log_mel {
        for &v in frame {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    let range = hi - lo;

    let mut data = vec![0.0f32; cfg.n_mels * n_frames];
    if range > 0.0 {
        for (f, frame) in log_mel.iter().enumerate() {
            for (m, &v) in frame.iter().enumerate() {
                data[m * n_frames + f] = ((v - lo) / range) as f32;
            }
        }
    }

    Ok(SpectrogramTensor {
        n_mels: cfg.n_mels,
        n_frames,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine_waveform(freq: f64, seconds: f64) -> Waveform {
        let sr = 16_000u32;
        let n = (sr as f64 * seconds) as usize;
        let samples = (0..n)
            .map(|i| (2.0 * PI * freq * i as f64 / sr as f64).sin() as f32)
            .collect();
        Waveform::new(samples, sr)
    }

    #[test]
    fn tensor_shape_and_range() {
        let cfg = FeatureConfig::default();
        let w = sine_waveform(440.0, 1.0);
        let t = mel_spectrogram_tensor(&w, &cfg).unwrap();
        assert_eq!(t.n_mels(), 128);
        assert_eq!(t.n_frames(), 28);
        assert_eq!(t.data().len(), 128 * 28);
        assert!(t.data().iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn silence_maps_to_zeros() {
        let cfg = FeatureConfig::default();
        let w = Waveform::new(vec![0.0; 16_000], 16_000);
        let t = mel_spectrogram_tensor(&w, &cfg).unwrap();
        assert!(t.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn at_checks_bounds() {
        let cfg = FeatureConfig::default();
        let w = sine_waveform(440.0, 1.0);
        let t = mel_spectrogram_tensor(&w, &cfg).unwrap();
        assert!(t.at(0, 0).is_some());
        assert!(t.at(127, 27).is_some());
        assert!(t.at(128, 0).is_none());
        assert!(t.at(0, 28).is_none());
    }

    #[test]
    fn tone_has_bright_band() {
        let cfg = FeatureConfig::default();
        let w = sine_waveform(2000.0, 1.0);
        let t = mel_spectrogram_tensor(&w, &cfg).unwrap();
        // Some band in some frame must hit the normalized maximum.
        assert!(t.data().iter().any(|&v| v > 0.99));
    }
}
