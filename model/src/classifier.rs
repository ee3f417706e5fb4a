use std::path::Path;

use serde::Deserialize;

use crate::{InferenceError, Prediction};

/// Predicts queen presence from a scaled feature vector.
///
/// Implementations must be safe for concurrent use: one classifier is
/// loaded at startup and shared across all requests.
pub trait QueenClassifier: Send + Sync {
    /// Classifies a scaled feature vector.
    fn predict(&self, features: &[f32]) -> Result<Prediction, InferenceError>;

    /// Feature dimension the classifier was trained on.
    fn dimension(&self) -> usize;
}

/// Logistic regression over the acoustic feature vector.
///
/// `p(queen) = sigmoid(w . x + b)`. Weights come from a JSON artifact
/// exported by the training side.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    weights: Vec<f32>,
    bias: f32,
}

/// JSON artifact format for the logistic regression classifier.
#[derive(Deserialize)]
struct ClassifierFile {
    weights: Vec<f32>,
    bias: f32,
}

impl LinearClassifier {
    pub fn new(weights: Vec<f32>, bias: f32) -> Result<Self, InferenceError> {
        if weights.is_empty() {
            return Err(InferenceError::ArtifactInvalid(
                "classifier has no weights".into(),
            ));
        }
        if weights.iter().any(|w| !w.is_finite()) || !bias.is_finite() {
            return Err(InferenceError::ArtifactInvalid(
                "classifier weights must be finite".into(),
            ));
        }
        Ok(Self { weights, bias })
    }

    /// Loads a classifier from JSON artifact bytes.
    pub fn from_json(json: &[u8]) -> Result<Self, InferenceError> {
        let cf: ClassifierFile = serde_json::from_slice(json)
            .map_err(|e| InferenceError::ArtifactParse(e.to_string()))?;
        Self::new(cf.weights, cf.bias)
    }

    /// Loads a classifier artifact from disk.
    pub fn from_file(path: &Path) -> Result<Self, InferenceError> {
        let data = std::fs::read(path).map_err(|e| InferenceError::ArtifactRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&data)
    }
}

impl QueenClassifier for LinearClassifier {
    fn predict(&self, features: &[f32]) -> Result<Prediction, InferenceError> {
        if features.len() != self.weights.len() {
            return Err(InferenceError::DimensionMismatch {
                expected: self.weights.len(),
                got: features.len(),
            });
        }
        let logit: f32 = self
            .weights
            .iter()
            .zip(features.iter())
            .map(|(&w, &x)| w * x)
            .sum::<f32>()
            + self.bias;
        Ok(Prediction::from_queen_probability(sigmoid(logit)))
    }

    fn dimension(&self) -> usize {
        self.weights.len()
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
