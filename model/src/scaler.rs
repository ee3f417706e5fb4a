use std::path::Path;

use serde::Deserialize;

use crate::InferenceError;

/// Per-dimension standardization fitted on the training set.
///
/// Transforms `x` to `(x - mean) / scale`. Dimensions with a near-zero
/// fitted scale pass through unscaled, matching how the fitting side
/// handles constant features.
#[derive(Debug, Clone)]
pub struct Scaler {
    mean: Vec<f32>,
    scale: Vec<f32>,
}

/// JSON artifact format for a fitted scaler.
#[derive(Deserialize)]
struct ScalerFile {
    mean: Vec<f32>,
    scale: Vec<f32>,
}

impl Scaler {
    pub fn new(mean: Vec<f32>, scale: Vec<f32>) -> Result<Self, InferenceError> {
        if mean.len() != scale.len() {
            return Err(InferenceError::ArtifactInvalid(format!(
                "scaler mean has {} entries but scale has {}",
                mean.len(),
                scale.len()
            )));
        }
        if mean.is_empty() {
            return Err(InferenceError::ArtifactInvalid("empty scaler".into()));
        }
        Ok(Self { mean, scale })
    }

    /// Identity scaler of the given dimension.
    pub fn identity(dim: usize) -> Self {
        Self {
            mean: vec![0.0; dim],
            scale: vec![1.0; dim],
        }
    }

    /// Loads a scaler from JSON artifact bytes.
    pub fn from_json(json: &[u8]) -> Result<Self, InferenceError> {
        let sf: ScalerFile = serde_json::from_slice(json)
            .map_err(|e| InferenceError::ArtifactParse(e.to_string()))?;
        Self::new(sf.mean, sf.scale)
    }

    /// Loads a scaler artifact from disk.
    pub fn from_file(path: &Path) -> Result<Self, InferenceError> {
        let data = std::fs::read(path).map_err(|e| InferenceError::ArtifactRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&data)
    }

    pub fn dimension(&self) -> usize {
        self.mean.len()
    }

    /// Standardizes a feature vector.
    pub fn transform(&self, features: &[f32]) -> Result<Vec<f32>, InferenceError> {
        if features.len() != self.mean.len() {
            return Err(InferenceError::DimensionMismatch {
                expected: self.mean.len(),
                got: features.len(),
            });
        }
        Ok(features
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(&x, (&m, &s))| {
                let s = if s.abs() < f32::EPSILON { 1.0 } else { s };
                (x - m) / s
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_standardizes() {
        let scaler = Scaler::new(vec![1.0, 2.0], vec![2.0, 4.0]).unwrap();
        let out = scaler.transform(&[3.0, 10.0]).unwrap();
        assert_eq!(out, vec![1.0, 2.0]);
    }

    #[test]
    fn zero_scale_passes_through() {
        let scaler = Scaler::new(vec![1.0], vec![0.0]).unwrap();
        let out = scaler.transform(&[4.0]).unwrap();
        assert_eq!(out, vec![3.0]);
    }

    #[test]
    fn dimension_mismatch_errors() {
        let scaler = Scaler::identity(3);
        let err = scaler.transform(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            InferenceError::DimensionMismatch {
                expected: 3,
                got: 2
            }
        ));
    }

    #[test]
    fn from_json_roundtrip() {
        let scaler =
            Scaler::from_json(br#"{"mean": [0.5, 1.5], "scale": [1.0, 3.0]}"#).unwrap();
        assert_eq!(scaler.dimension(), 2);
        let out = scaler.transform(&[0.5, 4.5]).unwrap();
        assert_eq!(out, vec![0.0, 1.0]);
    }

    #[test]
    fn mismatched_artifact_rejected() {
        let err = Scaler::from_json(br#"{"mean": [0.0], "scale": [1.0, 2.0]}"#).unwrap_err();
        assert!(matches!(err, InferenceError::ArtifactInvalid(_)));
    }

    #[test]
    fn missing_file_errors() {
        let err = Scaler::from_file(Path::new("/nonexistent/scaler.json")).unwrap_err();
        assert!(matches!(err, InferenceError::ArtifactRead { .. }));
    }
}
