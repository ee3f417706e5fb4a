//! Pretrained queen-detection classifier and inference pipeline.
//!
//! # Artifacts
//!
//! Two JSON artifacts are loaded once at process start and shared
//! read-only across requests:
//!
//! - a [`Scaler`]: per-dimension standardization fitted on the training
//!   set
//! - a classifier implementing [`QueenClassifier`]; the shipped
//!   [`LinearClassifier`] is a logistic regression over the 298-dim
//!   feature vector
//!
//! # Pipeline
//!
//! [`Pipeline::classify`] runs the whole request path: decode, resample,
//! trim, normalize, extract, scale, predict. Each call is independent
//! and stateless.

mod classifier;
mod error;
mod pipeline;
mod prediction;
mod scaler;

pub use classifier::{LinearClassifier, QueenClassifier};
pub use hivesense_features::FeatureConfig;
pub use error::InferenceError;
pub use pipeline::{Pipeline, PipelineError};
pub use prediction::{Prediction, QueenLabel};
pub use scaler::Scaler;
