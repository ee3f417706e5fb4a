//! Audio decoding and preprocessing for hive recordings.
//!
//! The pipeline turns an uploaded byte stream into an analysis-ready
//! waveform:
//!
//! 1. [`decode_wav`]: WAV bytes -> mono f32 samples in [-1, 1]
//! 2. [`resample`]: convert to the fixed 16 kHz analysis rate
//! 3. [`trim_silence`]: drop leading/trailing low-energy frames
//! 4. [`normalize_peak`]: scale so max |sample| == 1
//!
//! Every stage is a pure function over [`Waveform`]; nothing is retained
//! between requests.

mod error;
mod preprocess;
mod resample;
mod waveform;
mod wav;

pub use error::AudioError;
pub use preprocess::{normalize_peak, trim_silence};
pub use resample::resample;
pub use waveform::Waveform;
pub use wav::decode_wav;

/// Fixed analysis sample rate. Feature extraction and the pretrained
/// classifier both assume audio at this rate.
pub const ANALYSIS_SAMPLE_RATE: u32 = 16_000;
