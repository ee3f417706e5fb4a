use thiserror::Error;

/// Errors returned by audio decoding and preprocessing.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("decode error: {0}")]
    Decode(String),

    #[error("unsupported format: {0}")]
    Unsupported(String),

    #[error("audio stream contains no samples")]
    Empty,

    #[error("resample error: {0}")]
    Resample(String),
}

impl From<hound::Error> for AudioError {
    fn from(e: hound::Error) -> Self {
        AudioError::Decode(e.to_string())
    }
}
