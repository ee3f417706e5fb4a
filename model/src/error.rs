use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by scaling and inference.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("read artifact {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse artifact: {0}")]
    ArtifactParse(String),

    #[error("invalid artifact: {0}")]
    ArtifactInvalid(String),
}
