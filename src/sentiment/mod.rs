mod classifier;
mod http;
#[cfg(feature = "onnx")]
mod onnx;
mod types;

pub use classifier::{SentimentClassifier, UnavailableClassifier};
pub use http::HttpClassifier;
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;
pub use types::*;

use crate::{
    Error, Result,
    config::{ClassifierBackend, SentimentConfig},
};
use std::sync::Arc;
use tracing::{error, info};

/// Builds the configured classifier backend.
pub fn build(config: &SentimentConfig) -> Result<Arc<dyn SentimentClassifier>> {
    match config.backend {
        ClassifierBackend::Onnx => build_onnx(config),
        ClassifierBackend::Http => {
            let endpoint = config.endpoint.clone().ok_or_else(|| {
                Error::config("sentiment.endpoint is required for the http backend")
            })?;
            info!("Using remote sentiment classifier at {}", endpoint);
            Ok(Arc::new(HttpClassifier::new(
                endpoint,
                config.api_token.clone(),
            )?))
        }
    }
}

#[cfg(feature = "onnx")]
fn build_onnx(config: &SentimentConfig) -> Result<Arc<dyn SentimentClassifier>> {
    Ok(Arc::new(OnnxClassifier::load(std::path::Path::new(
        &config.model_dir,
    ))?))
}

#[cfg(not(feature = "onnx"))]
fn build_onnx(_config: &SentimentConfig) -> Result<Arc<dyn SentimentClassifier>> {
    Err(Error::config(
        "the onnx sentiment backend requires building with the `onnx` feature",
    ))
}

/// Like [`build`], but a backend that fails to initialise is replaced by an
/// [`UnavailableClassifier`] so the server can still start.
pub fn build_or_unavailable(config: &SentimentConfig) -> Arc<dyn SentimentClassifier> {
    match build(config) {
        Ok(classifier) => classifier,
        Err(e) => {
            error!("Error loading sentiment model: {}", e);
            Arc::new(UnavailableClassifier::new(e.to_string()))
        }
    }
}
