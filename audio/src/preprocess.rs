//! Silence trimming and amplitude normalization.

use crate::Waveform;

/// Frame length for the silence gate (128 ms at 16 kHz).
const TRIM_FRAME: usize = 2048;
/// Hop between silence-gate frames.
const TRIM_HOP: usize = 512;
/// Frames this many dB below the waveform peak count as silence.
const TRIM_THRESHOLD_DB: f32 = 60.0;

/// Removes leading and trailing silence.
///
/// A frame is silent when its RMS is more than 60 dB below the waveform
/// peak. If every frame is silent the waveform is left untouched so a
/// quiet recording still reaches feature extraction instead of becoming
/// empty.
pub fn trim_silence(waveform: &mut Waveform) {
    let samples = &waveform.samples;
    if samples.is_empty() {
        return;
    }

    let peak = waveform.peak();
    if peak == 0.0 {
        return;
    }
    let threshold = peak * 10f32.powf(-TRIM_THRESHOLD_DB / 20.0);

    let frame = TRIM_FRAME.min(samples.len());
    let mut first: Option<usize> = None;
    let mut last: Option<usize> = None;

    let mut offset = 0;
    while offset + frame <= samples.len() {
        if frame_rms(&samples[offset..offset + frame]) >= threshold {
            first.get_or_insert(offset);
            last = Some(offset);
        }
        if offset + frame == samples.len() {
            break;
        }
        offset = (offset + TRIM_HOP).min(samples.len() - frame);
    }

    let (Some(first), Some(last)) = (first, last) else {
        return;
    };
    let end = (last + frame).min(samples.len());
    waveform.samples = waveform.samples[first..end].to_vec();
}

/// Scales the waveform so the peak absolute amplitude is 1.0.
///
/// No-op for an all-zero waveform; the zero guard is part of the
/// pipeline contract (silent uploads must not fail here).
pub fn normalize_peak(waveform: &mut Waveform) {
    let peak = waveform.peak();
    if peak == 0.0 {
        return;
    }
    let scale = 1.0 / peak;
    for s in &mut waveform.samples {
        *s *= scale;
    }
}

fn frame_rms(frame: &[f32]) -> f32 {
    let energy: f32 = frame.iter().map(|&s| s * s).sum();
    (energy / frame.len() as f32).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded_tone() -> Waveform {
        // 0.5s silence, 1s of 440 Hz tone, 0.5s silence, all at 16 kHz.
        let sr = 16_000usize;
        let mut samples = vec![0.0f32; sr / 2];
        for i in 0..sr {
            let t = i as f32 / sr as f32;
            samples.push((2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.8);
        }
        samples.extend(vec![0.0f32; sr / 2]);
        Waveform::new(samples, sr as u32)
    }

    #[test]
    fn trim_removes_padding() {
        let mut w = padded_tone();
        let before = w.len();
        trim_silence(&mut w);
        assert!(w.len() < before);
        // The tone itself (1s = 16000 samples) must survive.
        assert!(w.len() >= 16_000, "trimmed too much: {}", w.len());
        // Most of the 8000-sample pads must be gone.
        assert!(w.len() <= 16_000 + 2 * TRIM_FRAME, "trimmed too little: {}", w.len());
    }

    #[test]
    fn trim_all_zero_is_noop() {
        let mut w = Waveform::new(vec![0.0; 8000], 16_000);
        trim_silence(&mut w);
        assert_eq!(w.len(), 8000);
    }

    #[test]
    fn trim_short_waveform() {
        // Shorter than one gate frame: treated as a single frame.
        let mut w = Waveform::new(vec![0.5; 100], 16_000);
        trim_silence(&mut w);
        assert_eq!(w.len(), 100);
    }

    #[test]
    fn normalize_scales_to_unit_peak() {
        let mut w = Waveform::new(vec![0.1, -0.4, 0.2], 16_000);
        normalize_peak(&mut w);
        assert!((w.peak() - 1.0).abs() < 1e-6);
        assert!((w.samples[1] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_all_zero_is_noop() {
        let mut w = Waveform::new(vec![0.0; 1024], 16_000);
        normalize_peak(&mut w);
        assert!(w.samples.iter().all(|&s| s == 0.0));
    }
}
