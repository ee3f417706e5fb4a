//! HTTP surface for the prediction pipeline.
//!
//! API endpoints:
//! - GET  /         - health probe
//! - POST /predict  - multipart audio upload -> prediction JSON

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use hivesense_model::{Pipeline, PipelineError, Prediction};

/// Upload size cap. Field recordings run well past axum's 2 MiB
/// default (a minute of 44.1 kHz 16-bit WAV is ~5 MB).
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Shared read-only state: the pipeline holds the loaded model.
#[derive(Clone)]
struct AppState {
    pipeline: Arc<Pipeline>,
}

/// Response body for POST /predict.
#[derive(Debug, Serialize)]
struct PredictResponse {
    prediction: &'static str,
    confidence: f32,
}

impl From<Prediction> for PredictResponse {
    fn from(p: Prediction) -> Self {
        Self {
            prediction: p.label.as_str(),
            confidence: p.confidence,
        }
    }
}

/// User-visible request failures, mapped to HTTP status codes.
enum ApiError {
    /// The uploaded file could not be processed (4xx).
    BadRequest(String),
    /// Inference failed server-side (5xx).
    Internal(String),
}

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        if e.is_client_error() {
            ApiError::BadRequest(e.to_string())
        } else {
            ApiError::Internal(e.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Builds the application router around the loaded pipeline.
fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/predict", post(predict))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Starts the HTTP server and blocks until it exits.
pub async fn serve(addr: &str, pipeline: Pipeline) -> Result<()> {
    let app = router(AppState {
        pipeline: Arc::new(pipeline),
    });

    let addr = parse_addr(addr)?;
    tracing::info!("listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Parse address string to SocketAddr, accepting the `:8080` shorthand.
fn parse_addr(addr: &str) -> Result<SocketAddr> {
    let addr = if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    };
    Ok(addr.parse()?)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "message": "queen detector is running",
    }))
}

async fn predict(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PredictResponse>, ApiError> {
    let bytes = read_upload(&mut multipart).await?;
    tracing::debug!(len = bytes.len(), "received upload");

    let prediction = state.pipeline.classify(&bytes)?;
    tracing::info!(
        label = prediction.label.as_str(),
        confidence = prediction.confidence,
        "classified upload"
    );
    Ok(Json(prediction.into()))
}

/// Pulls the uploaded audio out of the multipart body.
///
/// Prefers the field named `file`; otherwise the first field carrying a
/// filename is taken.
async fn read_upload(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        let named_file = field.name() == Some("file");
        if named_file || field.file_name().is_some() {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("reading upload: {e}")))?;
            if bytes.is_empty() {
                return Err(ApiError::BadRequest("uploaded file is empty".into()));
            }
            return Ok(bytes.to_vec());
        }
    }
    Err(ApiError::BadRequest(
        "multipart body has no 'file' field".into(),
    ))
}
