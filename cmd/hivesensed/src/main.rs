//! hivesensed - HTTP service for queen-bee detection from hive audio.

mod server;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hivesense_model::Pipeline;

/// Queen-bee detection service.
///
/// Loads the pretrained classifier and feature scaler at startup and
/// serves predictions over HTTP:
///   - GET  /         health probe
///   - POST /predict  multipart audio upload -> {prediction, confidence}
#[derive(Parser, Debug)]
#[command(name = "hivesensed")]
#[command(about = "Queen-bee detection service for hive audio recordings")]
#[command(version)]
struct Args {
    /// Listen address (e.g. :8080 or 127.0.0.1:8080)
    #[arg(short, long, default_value = ":8080")]
    addr: String,

    /// Path to the classifier artifact (JSON)
    #[arg(long, default_value = "model/classifier.json")]
    classifier: PathBuf,

    /// Path to the feature scaler artifact (JSON)
    #[arg(long, default_value = "model/scaler.json")]
    scaler: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .init();

    // Missing artifacts are fatal: refuse to start without a model.
    let pipeline = Pipeline::from_artifacts(&args.scaler, &args.classifier)
        .context("loading model artifacts")?;
    tracing::info!(
        scaler = %args.scaler.display(),
        classifier = %args.classifier.display(),
        "model artifacts loaded"
    );

    server::serve(&args.addr, pipeline).await
}
