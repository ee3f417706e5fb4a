//! Request pipeline: bytes to prediction.

use std::path::Path;

use thiserror::Error;

use hivesense_audio::{
    decode_wav, normalize_peak, resample, trim_silence, AudioError, ANALYSIS_SAMPLE_RATE,
};
use hivesense_features::{extract_features, FeatureConfig, FeatureError};

use crate::{InferenceError, LinearClassifier, Prediction, QueenClassifier, Scaler};

/// Errors surfaced by [`Pipeline::classify`].
///
/// Audio and feature errors are caused by the uploaded file (HTTP 400
/// territory); inference errors indicate a server-side artifact problem
/// (HTTP 500 territory).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl PipelineError {
    /// True when the error was caused by the uploaded file rather than
    /// the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PipelineError::Audio(_) | PipelineError::Feature(_))
    }
}

/// The full classification pipeline with its read-only model state.
///
/// Constructed once at startup; `classify` is `&self` and safe to call
/// from concurrent requests.
pub struct Pipeline {
    config: FeatureConfig,
    scaler: Scaler,
    classifier: Box<dyn QueenClassifier>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("scaler", &self.scaler)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Assembles a pipeline, checking that the scaler, the classifier
    /// and the feature configuration agree on the vector dimension.
    pub fn new(
        config: FeatureConfig,
        scaler: Scaler,
        classifier: Box<dyn QueenClassifier>,
    ) -> Result<Self, InferenceError> {
        if scaler.dimension() != config.feature_dim() {
            return Err(InferenceError::DimensionMismatch {
                expected: config.feature_dim(),
                got: scaler.dimension(),
            });
        }
        if classifier.dimension() != config.feature_dim() {
            return Err(InferenceError::DimensionMismatch {
                expected: config.feature_dim(),
                got: classifier.dimension(),
            });
        }
        Ok(Self {
            config,
            scaler,
            classifier,
        })
    }

    /// Loads scaler and classifier artifacts from disk and assembles
    /// the default pipeline. Either artifact missing is an error; the
    /// caller treats it as fatal at startup.
    pub fn from_artifacts(scaler_path: &Path, classifier_path: &Path) -> Result<Self, InferenceError> {
        let scaler = Scaler::from_file(scaler_path)?;
        let classifier = LinearClassifier::from_file(classifier_path)?;
        Self::new(FeatureConfig::default(), scaler, Box::new(classifier))
    }

    /// Classifies an uploaded audio file.
    ///
    /// bytes -> waveform -> 16 kHz -> trimmed/normalized -> features ->
    /// scaled -> prediction.
    pub fn classify(&self, bytes: &[u8]) -> Result<Prediction, PipelineError> {
        let waveform = decode_wav(bytes)?;
        let mut waveform = resample(waveform, ANALYSIS_SAMPLE_RATE)?;
        trim_silence(&mut waveform);
        normalize_peak(&mut waveform);

        let features = extract_features(&waveform, &self.config)?;
        let scaled = self.scaler.transform(features.values())?;
        let prediction = self.classifier.predict(&scaled)?;
        Ok(prediction)
    }
}
