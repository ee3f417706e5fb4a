use std::time::Duration;

/// A decoded mono audio signal.
///
/// Samples are f32 in [-1, 1]. Created once per request and discarded
/// after feature extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }

    /// Peak absolute amplitude, 0.0 for an empty waveform.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |m, &s| m.max(s.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_one_second() {
        let w = Waveform::new(vec![0.0; 16_000], 16_000);
        assert_eq!(w.duration(), Duration::from_secs(1));
    }

    #[test]
    fn peak_of_signal() {
        let w = Waveform::new(vec![0.25, -0.75, 0.5], 16_000);
        assert_eq!(w.peak(), 0.75);
    }

    #[test]
    fn peak_of_empty() {
        let w = Waveform::new(vec![], 16_000);
        assert_eq!(w.peak(), 0.0);
    }
}
