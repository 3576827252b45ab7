//! Remote text-classification backend.
//!
//! Speaks the Hugging Face inference format: the request body is
//! `{"inputs": "<text>"}` and the response is a list of `{label, score}`
//! objects, optionally nested one level deep (one list per input).

use super::classifier::{SentimentClassifier, best_label};
use super::types::RawLabel;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpClassifier {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClassifyResponse {
    Nested(Vec<Vec<RawLabel>>),
    Flat(Vec<RawLabel>),
}

impl ClassifyResponse {
    fn into_labels(self) -> Vec<RawLabel> {
        match self {
            Self::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
            Self::Flat(labels) => labels,
        }
    }
}

impl HttpClassifier {
    pub fn new(endpoint: impl Into<String>, api_token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_token,
        })
    }
}

#[async_trait]
impl SentimentClassifier for HttpClassifier {
    async fn classify(&self, text: &str) -> Result<RawLabel> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&ClassifyRequest { inputs: text });

        if let Some(ref token) = self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::classifier(format!(
                "classification endpoint returned {}: {}",
                status, body
            )));
        }

        let labels = response
            .json::<ClassifyResponse>()
            .await
            .map_err(|e| Error::classifier(format!("invalid classification response: {}", e)))?
            .into_labels();

        debug!("Received {} candidate labels", labels.len());

        best_label(labels)
            .ok_or_else(|| Error::classifier("classification response contained no labels"))
    }
}
