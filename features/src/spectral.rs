//! Per-frame spectral descriptors.
//!
//! All descriptors return 0.0 for silent frames rather than NaN, so
//! summary statistics stay finite for quiet recordings.

use crate::config::FeatureConfig;

/// Spectral centroid in Hz: magnitude-weighted mean frequency.
pub(crate) fn centroid(power: &[f64], bin_hz: f64) -> f64 {
    let mut weighted = 0.0;
    let mut total = 0.0;
    for (k, &p) in power.iter().enumerate() {
        let mag = p.sqrt();
        weighted += k as f64 * bin_hz * mag;
        total += mag;
    }
    if total <= f64::EPSILON {
        return 0.0;
    }
    weighted / total
}

/// Spectral bandwidth in Hz: magnitude-weighted standard deviation of
/// frequency around the centroid.
pub(crate) fn bandwidth(power: &[f64], bin_hz: f64, centroid_hz: f64) -> f64 {
    let mut weighted = 0.0;
    let mut total = 0.0;
    for (k, &p) in power.iter().enumerate() {
        let mag = p.sqrt();
        let d = k as f64 * bin_hz - centroid_hz;
        weighted += mag * d * d;
        total += mag;
    }
    if total <= f64::EPSILON {
        return 0.0;
    }
    (weighted / total).sqrt()
}

/// Rolloff frequency in Hz: the frequency below which `fraction` of the
/// total spectral energy lies.
pub(crate) fn rolloff(power: &[f64], bin_hz: f64, fraction: f64) -> f64 {
    let total: f64 = power.iter().sum();
    if total <= f64::EPSILON {
        return 0.0;
    }
    let threshold = total * fraction.clamp(0.0, 1.0);
    let mut cumulative = 0.0;
    for (k, &p) in power.iter().enumerate() {
        cumulative += p;
        if cumulative >= threshold {
            return k as f64 * bin_hz;
        }
    }
    (power.len() - 1) as f64 * bin_hz
}

/// Zero-crossing rate: fraction of adjacent sample pairs that change sign.
pub(crate) fn zero_crossing_rate(frame: &[f32]) -> f64 {
    if frame.len() < 2 {
        return 0.0;
    }
    let crossings = frame
        .windows(2)
        .filter(|w| (w[0] >= 0.0) != (w[1] >= 0.0))
        .count();
    crossings as f64 / (frame.len() - 1) as f64
}

/// Width of one FFT bin in Hz for the configured analysis rate.
pub(crate) fn bin_hz(cfg: &FeatureConfig) -> f64 {
    cfg.sample_rate as f64 / crate::fft::next_pow2(cfg.n_fft) as f64
}
