use super::types::RawLabel;
use crate::{Error, Result};
use async_trait::async_trait;

#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<RawLabel>;
}

/// Stands in for a backend that failed to initialise. Every call fails.
pub struct UnavailableClassifier {
    reason: String,
}

impl UnavailableClassifier {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl SentimentClassifier for UnavailableClassifier {
    async fn classify(&self, _text: &str) -> Result<RawLabel> {
        Err(Error::classifier(format!(
            "classifier unavailable: {}",
            self.reason
        )))
    }
}

/// The highest-scoring label, if any.
pub(crate) fn best_label(labels: Vec<RawLabel>) -> Option<RawLabel> {
    labels
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
}
