//! ONNX Runtime sequence-classification backend.
//!
//! The model directory must contain `model.onnx` and `tokenizer.json`
//! (a DistilBERT-style export with `input_ids`/`attention_mask` inputs and a
//! `[batch, num_labels]` logits output). Label names come from the
//! `id2label` table of an optional `config.json`; otherwise `LABEL_{i}`.

use super::classifier::SentimentClassifier;
use super::types::RawLabel;
use crate::{Error, Result};
use async_trait::async_trait;
use ort::session::Session;
use ort::value::Tensor;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokenizers::Tokenizer;
use tracing::{debug, info};

const MAX_SEQUENCE_LENGTH: usize = 512;
const MAX_LABEL_ID: usize = 4096;

pub struct OnnxClassifier {
    inner: Arc<Inner>,
}

struct Inner {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    id2label: Vec<String>,
}

#[derive(Deserialize)]
struct ModelConfig {
    #[serde(default)]
    id2label: HashMap<String, String>,
}

impl OnnxClassifier {
    pub fn load(model_dir: &Path) -> Result<Self> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        if !model_path.exists() {
            return Err(Error::classifier(format!(
                "model.onnx not found in {}",
                model_dir.display()
            )));
        }
        if !tokenizer_path.exists() {
            return Err(Error::classifier(format!(
                "tokenizer.json not found in {}",
                model_dir.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e| Error::classifier(format!("create session: {}", e)))?
            .commit_from_file(&model_path)
            .map_err(|e| Error::classifier(format!("load model: {}", e)))?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| Error::classifier(format!("load tokenizer: {}", e)))?;
        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: MAX_SEQUENCE_LENGTH,
                ..Default::default()
            }))
            .map_err(|e| Error::classifier(format!("set truncation: {}", e)))?;

        let id2label = read_id2label(&model_dir.join("config.json"))?;

        info!(
            model = %model_path.display(),
            labels = id2label.len(),
            "loaded sentiment model"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                session: Mutex::new(session),
                tokenizer,
                id2label,
            }),
        })
    }
}

impl Inner {
    fn classify_blocking(&self, text: &str) -> Result<RawLabel> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| Error::classifier(format!("tokenize: {}", e)))?;

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();
        let shape = [1i64, input_ids.len() as i64];

        let ids_tensor = Tensor::from_array((shape, input_ids.into_boxed_slice()))
            .map_err(|e| Error::classifier(format!("build input tensor: {}", e)))?;
        let mask_tensor = Tensor::from_array((shape, attention_mask.into_boxed_slice()))
            .map_err(|e| Error::classifier(format!("build mask tensor: {}", e)))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| Error::internal("sentiment session lock poisoned"))?;

        let outputs = session
            .run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor,
            ])
            .map_err(|e| Error::classifier(format!("inference: {}", e)))?;

        let (_, logits) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::classifier(format!("extract logits: {}", e)))?;

        let probabilities = softmax(logits);
        let (index, score) = probabilities
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or_else(|| Error::classifier("model produced no logits"))?;

        let label = self
            .id2label
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("LABEL_{}", index));

        debug!(label = %label, score, "classified text");
        Ok(RawLabel { label, score })
    }
}

#[async_trait]
impl SentimentClassifier for OnnxClassifier {
    async fn classify(&self, text: &str) -> Result<RawLabel> {
        let inner = Arc::clone(&self.inner);
        let text = text.to_string();

        tokio::task::spawn_blocking(move || inner.classify_blocking(&text))
            .await
            .map_err(|e| Error::internal(format!("classification task failed: {}", e)))?
    }
}

/// Reads `id2label` from a Hugging Face `config.json`, ordered by id.
fn read_id2label(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let config: ModelConfig = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    let mut entries: Vec<(usize, String)> = config
        .id2label
        .into_iter()
        .filter_map(|(id, label)| id.parse().ok().map(|id| (id, label)))
        .collect();
    entries.sort_by_key(|(id, _)| *id);

    if let Some((id, _)) = entries.last()
        && *id >= MAX_LABEL_ID
    {
        return Err(Error::classifier(format!(
            "id2label id {} in {} exceeds {}",
            id,
            path.display(),
            MAX_LABEL_ID
        )));
    }

    let mut labels = Vec::with_capacity(entries.len());
    for (id, label) in entries {
        while labels.len() < id {
            labels.push(format!("LABEL_{}", labels.len()));
        }
        labels.push(label);
    }
    Ok(labels)
}

fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|x| x / sum).collect()
}
