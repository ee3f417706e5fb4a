//! Acoustic feature extraction for hive recordings.
//!
//! # Pipeline
//!
//! A preprocessed [`Waveform`](hivesense_audio::Waveform) is framed,
//! windowed and transformed into per-frame descriptors, which are then
//! reduced to a fixed-length vector:
//!
//! 1. STFT power spectrogram (Hann window, 2048-point FFT, hop 512)
//! 2. per frame: spectral centroid, bandwidth, rolloff, zero-crossing rate
//! 3. 128-band mel spectrogram and 13 MFCCs
//! 4. summary statistics concatenated into a [`FeatureVector`]
//!
//! # Feature contract
//!
//! The concatenation order and the counts in [`FeatureConfig`] are the
//! contract the pretrained classifier was fitted against. Changing any of
//! them invalidates deployed model artifacts:
//!
//! ```text
//! [ centroid mean,std,min,max | bandwidth ... | rolloff ... | zcr ... ]   16
//! [ mel band means x 128 | mel band stds x 128 ]                         256
//! [ mfcc means x 13 | mfcc stds x 13 ]                                    26
//! ```
//!
//! Total: [`FEATURE_DIM`] = 298.
//!
//! For image-based classifiers, [`mel_spectrogram_tensor`] renders the
//! normalized log-mel spectrogram instead.

mod config;
mod error;
mod extract;
mod fft;
mod mel;
mod spectral;
mod stft;
mod tensor;

pub use config::{FeatureConfig, FEATURE_DIM};
pub use error::FeatureError;
pub use extract::{extract_features, FeatureVector};
pub use tensor::{mel_spectrogram_tensor, SpectrogramTensor};
