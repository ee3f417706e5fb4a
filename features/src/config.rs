/// Analysis parameters for feature extraction.
///
/// The defaults are the deployed model contract: 16 kHz audio, 2048-point
/// frames with hop 512, 128 mel bands from 20 Hz to Nyquist, 13 MFCCs,
/// 85 % rolloff. Artifacts trained with different values will fail the
/// dimension check at startup.
#[derive(Debug, Clone)]
pub struct FeatureConfig {
    /// Expected input sample rate in Hz.
    pub sample_rate: u32,
    /// FFT/frame size in samples.
    pub n_fft: usize,
    /// Hop between frames in samples.
    pub hop: usize,
    /// Number of mel filterbank channels.
    pub n_mels: usize,
    /// Number of cepstral coefficients.
    pub n_mfcc: usize,
    /// Fraction of spectral energy below the rolloff frequency.
    pub rolloff: f64,
    /// Low cutoff for the mel filterbank in Hz.
    pub low_freq: f64,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16_000,
            n_fft: 2048,
            hop: 512,
            n_mels: 128,
            n_mfcc: 13,
            rolloff: 0.85,
            low_freq: 20.0,
        }
    }
}

impl FeatureConfig {
    /// Length of the feature vector this configuration produces.
    ///
    /// 4 spectral descriptors x {mean, std, min, max} plus {mean, std}
    /// per mel band and per MFCC coefficient.
    pub fn feature_dim(&self) -> usize {
        4 * 4 + 2 * self.n_mels + 2 * self.n_mfcc
    }
}

/// Feature vector length for the default configuration.
pub const FEATURE_DIM: usize = 4 * 4 + 2 * 128 + 2 * 13;
